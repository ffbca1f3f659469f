use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreResult};
use crate::{
    orders::{
        self,
        repo_types::{NewOrder, Order, OrderPatch},
    },
    products::{
        self,
        repo_types::{NewProduct, Product, ProductPatch},
    },
    users::{
        self,
        repo_types::{NewUser, User, UserPatch},
    },
};

/// [`Store`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        users::repo::insert(&self.db, &new).await
    }
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        users::repo::list(&self.db).await
    }
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        users::repo::find(&self.db, id).await
    }
    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>> {
        users::repo::update(&self.db, id, patch).await
    }
    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        users::repo::delete(&self.db, id).await
    }

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        products::repo::insert(&self.db, &new).await
    }
    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        products::repo::list(&self.db).await
    }
    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>> {
        products::repo::find(&self.db, id).await
    }
    async fn update_product(&self, id: i64, patch: ProductPatch) -> StoreResult<Option<Product>> {
        products::repo::update(&self.db, id, patch).await
    }
    async fn delete_product(&self, id: i64) -> StoreResult<bool> {
        products::repo::delete(&self.db, id).await
    }

    async fn create_order(&self, new: NewOrder) -> StoreResult<Order> {
        orders::repo::insert(&self.db, &new).await
    }
    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        orders::repo::list(&self.db).await
    }
    async fn list_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>> {
        orders::repo::list_by_user(&self.db, user_id).await
    }
    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        orders::repo::find(&self.db, id).await
    }
    async fn update_order(&self, id: i64, patch: OrderPatch) -> StoreResult<Option<Order>> {
        orders::repo::update(&self.db, id, patch).await
    }
    async fn delete_order(&self, id: i64) -> StoreResult<bool> {
        orders::repo::delete(&self.db, id).await
    }

    async fn list_order_products(&self, order_id: i64) -> StoreResult<Vec<Product>> {
        orders::repo::list_products(&self.db, order_id).await
    }
    async fn has_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool> {
        orders::repo::has_product(&self.db, order_id, product_id).await
    }
    async fn insert_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<()> {
        orders::repo::insert_product(&self.db, order_id, product_id).await
    }
    async fn delete_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool> {
        orders::repo::delete_product(&self.db, order_id, product_id).await
    }
}

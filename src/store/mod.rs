//! Persistence seam. Handlers and services only see [`Store`]; the
//! PostgreSQL implementation lives in [`postgres`].

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    orders::repo_types::{NewOrder, Order, OrderPatch},
    products::repo_types::{NewProduct, Product, ProductPatch},
    users::repo_types::{NewUser, User, UserPatch},
};

pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique or primary key constraint rejected the write.
    #[error("{0}")]
    Duplicate(String),
    /// A foreign key pointed at a row that does not exist.
    #[error("{0}")]
    MissingReference(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl StoreError {
    /// Classifies constraint violations; `duplicate` and `missing` describe
    /// the failure in terms of the caller's operation.
    pub fn from_sqlx(e: sqlx::Error, duplicate: impl FnOnce() -> String, missing: impl FnOnce() -> String) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Duplicate(duplicate()),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::MissingReference(missing())
            }
            _ => StoreError::Db(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: i64) -> StoreResult<Option<User>>;
    /// `None` when no user has this id.
    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>>;
    /// Removes the user together with their orders. `false` when absent.
    async fn delete_user(&self, id: i64) -> StoreResult<bool>;

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>>;
    async fn update_product(&self, id: i64, patch: ProductPatch) -> StoreResult<Option<Product>>;
    async fn delete_product(&self, id: i64) -> StoreResult<bool>;

    async fn create_order(&self, new: NewOrder) -> StoreResult<Order>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn list_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>>;
    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>>;
    async fn update_order(&self, id: i64, patch: OrderPatch) -> StoreResult<Option<Order>>;
    async fn delete_order(&self, id: i64) -> StoreResult<bool>;

    /// Products linked to the order, ascending by product id.
    async fn list_order_products(&self, order_id: i64) -> StoreResult<Vec<Product>>;
    async fn has_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool>;
    /// Fails with [`StoreError::Duplicate`] when the pair already exists.
    async fn insert_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<()>;
    /// `false` when the pair did not exist.
    async fn delete_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool>;
}

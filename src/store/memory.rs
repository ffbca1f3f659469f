//! In-process [`Store`] used by the test suite. It enforces the same
//! constraints as the SQL schema: unique email, foreign keys, composite
//! key on order products, and cascading deletes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime, UtcOffset};

use super::{Store, StoreError, StoreResult};
use crate::{
    orders::repo_types::{NewOrder, Order, OrderPatch},
    products::repo_types::{NewProduct, Product, ProductPatch},
    users::repo_types::{NewUser, User, UserPatch},
};

/// What a `TIMESTAMPTZ` column hands back: UTC, microsecond precision.
fn as_stored(ts: OffsetDateTime) -> OffsetDateTime {
    let utc = ts.to_offset(UtcOffset::UTC);
    utc - Duration::nanoseconds(i64::from(utc.nanosecond() % 1_000))
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    products: BTreeMap<i64, Product>,
    orders: BTreeMap<i64, Order>,
    order_products: BTreeSet<(i64, i64)>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn cascade_order(&mut self, order_id: i64) {
        self.orders.remove(&order_id);
        self.order_products.retain(|(o, _)| *o != order_id);
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    pub fn link_count(&self) -> usize {
        self.lock().order_products.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut t = self.lock();
        if t.email_taken(&new.email, None) {
            return Err(StoreError::Duplicate(format!(
                "email {} is already registered",
                new.email
            )));
        }
        let id = t.next_id();
        let user = User {
            id,
            name: new.name,
            email: new.email,
            address: new.address,
        };
        t.users.insert(id, user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn get_user(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn update_user(&self, id: i64, patch: UserPatch) -> StoreResult<Option<User>> {
        let mut t = self.lock();
        let Some(mut user) = t.users.get(&id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut user);
        if t.email_taken(&user.email, Some(id)) {
            return Err(StoreError::Duplicate(format!(
                "email {} is already registered",
                user.email
            )));
        }
        t.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete_user(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.lock();
        if t.users.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<i64> = t
            .orders
            .values()
            .filter(|o| o.user_id == id)
            .map(|o| o.id)
            .collect();
        for order_id in owned {
            t.cascade_order(order_id);
        }
        Ok(true)
    }

    async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
        let mut t = self.lock();
        let id = t.next_id();
        let product = Product {
            id,
            product_name: new.product_name,
            price: new.price,
        };
        t.products.insert(id, product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.lock().products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> StoreResult<Option<Product>> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> StoreResult<Option<Product>> {
        let mut t = self.lock();
        let Some(product) = t.products.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.lock();
        if t.products.remove(&id).is_none() {
            return Ok(false);
        }
        t.order_products.retain(|(_, p)| *p != id);
        Ok(true)
    }

    async fn create_order(&self, new: NewOrder) -> StoreResult<Order> {
        let mut t = self.lock();
        if !t.users.contains_key(&new.user_id) {
            return Err(StoreError::MissingReference(format!(
                "user {} not found",
                new.user_id
            )));
        }
        let id = t.next_id();
        let order = Order {
            id,
            order_date: as_stored(new.order_date.unwrap_or_else(OffsetDateTime::now_utc)),
            user_id: new.user_id,
        };
        t.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.lock().orders.values().cloned().collect())
    }

    async fn list_orders_by_user(&self, user_id: i64) -> StoreResult<Vec<Order>> {
        Ok(self
            .lock()
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_order(&self, id: i64) -> StoreResult<Option<Order>> {
        Ok(self.lock().orders.get(&id).cloned())
    }

    async fn update_order(&self, id: i64, patch: OrderPatch) -> StoreResult<Option<Order>> {
        let mut t = self.lock();
        let Some(mut order) = t.orders.get(&id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut order);
        order.order_date = as_stored(order.order_date);
        if !t.users.contains_key(&order.user_id) {
            return Err(StoreError::MissingReference(format!(
                "user {} not found",
                order.user_id
            )));
        }
        t.orders.insert(id, order.clone());
        Ok(Some(order))
    }

    async fn delete_order(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.lock();
        if !t.orders.contains_key(&id) {
            return Ok(false);
        }
        t.cascade_order(id);
        Ok(true)
    }

    async fn list_order_products(&self, order_id: i64) -> StoreResult<Vec<Product>> {
        let t = self.lock();
        let products = t
            .order_products
            .iter()
            .filter(|(o, _)| *o == order_id)
            .filter_map(|(_, p)| t.products.get(p).cloned())
            .collect();
        Ok(products)
    }

    async fn has_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool> {
        Ok(self.lock().order_products.contains(&(order_id, product_id)))
    }

    async fn insert_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<()> {
        let mut t = self.lock();
        if !t.orders.contains_key(&order_id) || !t.products.contains_key(&product_id) {
            return Err(StoreError::MissingReference(format!(
                "order {order_id} or product {product_id} not found"
            )));
        }
        if !t.order_products.insert((order_id, product_id)) {
            return Err(StoreError::Duplicate(format!(
                "product {product_id} is already in order {order_id}"
            )));
        }
        Ok(())
    }

    async fn delete_order_product(&self, order_id: i64, product_id: i64) -> StoreResult<bool> {
        Ok(self.lock().order_products.remove(&(order_id, product_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn stored_timestamps_are_utc_microseconds() {
        let stored = as_stored(datetime!(2024-05-01 12:30:00.123456789 +2));
        assert_eq!(stored.offset(), UtcOffset::UTC);
        assert_eq!(stored, datetime!(2024-05-01 10:30:00.123456 UTC));
    }
}

use sqlx::PgPool;

use crate::orders::repo_types::{NewOrder, Order, OrderPatch};
use crate::products::repo_types::Product;
use crate::store::{StoreError, StoreResult};

fn user_missing(user_id: i64) -> impl FnOnce() -> String {
    move || format!("user {user_id} not found")
}

fn no_duplicate() -> String {
    "order already exists".into()
}

/// Insert an order. The `user_id` foreign key is the final word on whether
/// the owner exists.
pub async fn insert(db: &PgPool, new: &NewOrder) -> StoreResult<Order> {
    sqlx::query_as::<_, Order>(
        r#"
        INSERT INTO orders (user_id, order_date)
        VALUES ($1, COALESCE($2, now()))
        RETURNING id, order_date, user_id
        "#,
    )
    .bind(new.user_id)
    .bind(new.order_date)
    .fetch_one(db)
    .await
    .map_err(|e| StoreError::from_sqlx(e, no_duplicate, user_missing(new.user_id)))
}

pub async fn list(db: &PgPool) -> StoreResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(r#"SELECT id, order_date, user_id FROM orders ORDER BY id"#)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn list_by_user(db: &PgPool, user_id: i64) -> StoreResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, order_date, user_id
          FROM orders
         WHERE user_id = $1
         ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i64) -> StoreResult<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(r#"SELECT id, order_date, user_id FROM orders WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn update(db: &PgPool, id: i64, patch: OrderPatch) -> StoreResult<Option<Order>> {
    let mut tx = db.begin().await?;

    let Some(mut order) = sqlx::query_as::<_, Order>(
        r#"SELECT id, order_date, user_id FROM orders WHERE id = $1 FOR UPDATE"#,
    )
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    else {
        return Ok(None);
    };

    patch.apply(&mut order);

    let order = sqlx::query_as::<_, Order>(
        r#"
        UPDATE orders
           SET user_id = $2, order_date = $3
         WHERE id = $1
        RETURNING id, order_date, user_id
        "#,
    )
    .bind(id)
    .bind(order.user_id)
    .bind(order.order_date)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| StoreError::from_sqlx(e, no_duplicate, user_missing(order.user_id)))?;

    tx.commit().await?;
    Ok(Some(order))
}

pub async fn delete(db: &PgPool, id: i64) -> StoreResult<bool> {
    let res = sqlx::query(r#"DELETE FROM orders WHERE id = $1"#)
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

// ---- order_products ----

pub async fn list_products(db: &PgPool, order_id: i64) -> StoreResult<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT p.id, p.name, p.price
          FROM products p
          JOIN order_products op ON op.product_id = p.id
         WHERE op.order_id = $1
         ORDER BY p.id
        "#,
    )
    .bind(order_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn has_product(db: &PgPool, order_id: i64, product_id: i64) -> StoreResult<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM order_products WHERE order_id = $1 AND product_id = $2
        )
        "#,
    )
    .bind(order_id)
    .bind(product_id)
    .fetch_one(db)
    .await?;
    Ok(found)
}

/// The composite primary key rejects a second link for the same pair.
pub async fn insert_product(db: &PgPool, order_id: i64, product_id: i64) -> StoreResult<()> {
    sqlx::query(r#"INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)"#)
        .bind(order_id)
        .bind(product_id)
        .execute(db)
        .await
        .map_err(|e| {
            StoreError::from_sqlx(
                e,
                || format!("product {product_id} is already in order {order_id}"),
                || format!("order {order_id} or product {product_id} not found"),
            )
        })?;
    Ok(())
}

pub async fn delete_product(db: &PgPool, order_id: i64, product_id: i64) -> StoreResult<bool> {
    let res = sqlx::query(r#"DELETE FROM order_products WHERE order_id = $1 AND product_id = $2"#)
        .bind(order_id)
        .bind(product_id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

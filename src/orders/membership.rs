//! The set of products attached to an order.
//!
//! Membership is a set: a product is either in the order or not. The
//! lookups below give precise 404/409 answers, but they are not atomic
//! with the write that follows. The `(order_id, product_id)` primary key
//! decides races, and its violations come back from the store as
//! `Duplicate`/`MissingReference`, which map to the same 409/404.

use tracing::{info, warn};

use crate::error::AppError;
use crate::orders::dto::OrderDetails;
use crate::orders::services::{require_order, with_products};
use crate::products::repo_types::Product;
use crate::state::AppState;

async fn require_product(st: &AppState, id: i64) -> Result<Product, AppError> {
    st.store
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::not_found("product", id))
}

pub async fn add_product(st: &AppState, order_id: i64, product_id: i64) -> Result<OrderDetails, AppError> {
    let order = require_order(st, order_id).await?;
    require_product(st, product_id).await?;

    if st.store.has_order_product(order_id, product_id).await? {
        warn!(order_id, product_id, "product already in order");
        return Err(AppError::Conflict(format!(
            "product {product_id} is already in order {order_id}"
        )));
    }

    st.store.insert_order_product(order_id, product_id).await?;
    info!(order_id, product_id, "product added to order");
    with_products(st, order).await
}

pub async fn remove_product(st: &AppState, order_id: i64, product_id: i64) -> Result<OrderDetails, AppError> {
    let order = require_order(st, order_id).await?;
    require_product(st, product_id).await?;

    let not_member = || AppError::Conflict(format!("product {product_id} is not in order {order_id}"));

    if !st.store.has_order_product(order_id, product_id).await? {
        warn!(order_id, product_id, "product not in order");
        return Err(not_member());
    }
    // a concurrent removal may have won since the check
    if !st.store.delete_order_product(order_id, product_id).await? {
        return Err(not_member());
    }

    info!(order_id, product_id, "product removed from order");
    with_products(st, order).await
}

pub async fn list_products(st: &AppState, order_id: i64) -> Result<Vec<Product>, AppError> {
    require_order(st, order_id).await?;
    Ok(st.store.list_order_products(order_id).await?)
}

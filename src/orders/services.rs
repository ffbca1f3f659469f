use tracing::{info, warn};

use crate::error::AppError;
use crate::orders::dto::OrderDetails;
use crate::orders::repo_types::{NewOrder, Order, OrderPatch};
use crate::state::AppState;

pub(crate) async fn require_order(st: &AppState, id: i64) -> Result<Order, AppError> {
    st.store
        .get_order(id)
        .await?
        .ok_or_else(|| AppError::not_found("order", id))
}

pub(crate) async fn require_user(st: &AppState, id: i64) -> Result<(), AppError> {
    match st.store.get_user(id).await? {
        Some(_) => Ok(()),
        None => {
            warn!(user_id = id, "order references unknown user");
            Err(AppError::not_found("user", id))
        }
    }
}

pub(crate) async fn with_products(st: &AppState, order: Order) -> Result<OrderDetails, AppError> {
    let products = st.store.list_order_products(order.id).await?;
    Ok(OrderDetails::new(order, products))
}

async fn all_with_products(st: &AppState, orders: Vec<Order>) -> Result<Vec<OrderDetails>, AppError> {
    let mut out = Vec::with_capacity(orders.len());
    for order in orders {
        out.push(with_products(st, order).await?);
    }
    Ok(out)
}

/// The owner is checked up front; the foreign key still rejects an owner
/// deleted in between.
pub async fn create_order(st: &AppState, new: NewOrder) -> Result<OrderDetails, AppError> {
    require_user(st, new.user_id).await?;
    let order = st.store.create_order(new).await?;
    info!(order_id = order.id, user_id = order.user_id, "order created");
    Ok(OrderDetails::new(order, Vec::new()))
}

pub async fn list_orders(st: &AppState) -> Result<Vec<OrderDetails>, AppError> {
    let orders = st.store.list_orders().await?;
    all_with_products(st, orders).await
}

/// An unknown user simply has no orders.
pub async fn list_orders_by_user(st: &AppState, user_id: i64) -> Result<Vec<OrderDetails>, AppError> {
    let orders = st.store.list_orders_by_user(user_id).await?;
    all_with_products(st, orders).await
}

pub async fn get_order(st: &AppState, id: i64) -> Result<OrderDetails, AppError> {
    let order = require_order(st, id).await?;
    with_products(st, order).await
}

pub async fn update_order(st: &AppState, id: i64, patch: OrderPatch) -> Result<OrderDetails, AppError> {
    if let Some(user_id) = patch.user_id {
        require_user(st, user_id).await?;
    }
    let order = st
        .store
        .update_order(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("order", id))?;
    info!(order_id = id, user_id = order.user_id, "order updated");
    with_products(st, order).await
}

pub async fn delete_order(st: &AppState, id: i64) -> Result<(), AppError> {
    if !st.store.delete_order(id).await? {
        return Err(AppError::not_found("order", id));
    }
    info!(order_id = id, "order deleted");
    Ok(())
}

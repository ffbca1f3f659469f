use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    orders::{
        dto::{CreateOrderRequest, OrderDetails, UpdateOrderRequest},
        membership, services,
    },
    products::repo_types::Product,
    response::Deleted,
    state::AppState,
};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route(
            "/orders/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/orders/user/:user_id", get(list_user_orders))
}

pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/products", get(list_order_products))
        .route("/orders/:id/add_product/:product_id", put(add_product))
        .route("/orders/:id/remove_product/:product_id", delete(remove_product))
}

#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderDetails>), AppError> {
    let new = payload.validate()?;
    let order = services::create_order(&state, new).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<OrderDetails>>, AppError> {
    Ok(Json(services::list_orders(&state).await?))
}

#[instrument(skip(state))]
pub async fn list_user_orders(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> Result<Json<Vec<OrderDetails>>, AppError> {
    Ok(Json(services::list_orders_by_user(&state, user_id).await?))
}

#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<OrderDetails>, AppError> {
    Ok(Json(services::get_order(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateOrderRequest>,
) -> Result<Json<OrderDetails>, AppError> {
    let patch = payload.validate()?;
    Ok(Json(services::update_order(&state, id, patch).await?))
}

#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Deleted>, AppError> {
    services::delete_order(&state, id).await?;
    Ok(Json(Deleted::new("order", id)))
}

#[instrument(skip(state))]
pub async fn list_order_products(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(membership::list_products(&state, id).await?))
}

#[instrument(skip(state))]
pub async fn add_product(
    State(state): State<AppState>,
    AppPath((id, product_id)): AppPath<(i64, i64)>,
) -> Result<Json<OrderDetails>, AppError> {
    Ok(Json(membership::add_product(&state, id, product_id).await?))
}

#[instrument(skip(state))]
pub async fn remove_product(
    State(state): State<AppState>,
    AppPath((id, product_id)): AppPath<(i64, i64)>,
) -> Result<Json<OrderDetails>, AppError> {
    Ok(Json(membership::remove_product(&state, id, product_id).await?))
}

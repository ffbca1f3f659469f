use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    products::{
        dto::{CreateProductRequest, UpdateProductRequest},
        repo_types::Product,
        services,
    },
    response::Deleted,
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let new = payload.validate()?;
    let product = services::create_product(&state, new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(services::list_products(&state).await?))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(services::get_product(&state, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<Json<Product>, AppError> {
    let patch = payload.validate()?;
    Ok(Json(services::update_product(&state, id, patch).await?))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Deleted>, AppError> {
    services::delete_product(&state, id).await?;
    Ok(Json(Deleted::new("product", id)))
}

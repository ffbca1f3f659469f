use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod membership;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::order_routes())
        .merge(handlers::membership_routes())
}

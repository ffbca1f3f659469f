use axum::{
    async_trait,
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{AppError, FieldErrors};

/// `Json<T>` whose rejections use the service's error body.
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                warn!(error = %rejection.body_text(), "rejected request body");
                Err(AppError::Validation(FieldErrors::single("body", body_message(&rejection))))
            }
        }
    }
}

fn body_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected application/json".into(),
        other => other.body_text(),
    }
}

/// `Path<T>` whose rejections use the service's error body, keyed by the
/// offending route parameter.
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(AppPath(value)),
            Err(PathRejection::FailedToDeserializePathParams(e)) => {
                warn!(error = %e.body_text(), "rejected path parameters");
                let field = match e.kind() {
                    ErrorKind::ParseErrorAtKey { key, .. } => Some(key.clone()),
                    ErrorKind::ParseErrorAtIndex { index, .. } => {
                        param_name(parts, state, *index).await
                    }
                    _ => None,
                };
                let message = match e.kind() {
                    ErrorKind::ParseErrorAtKey { .. }
                    | ErrorKind::ParseErrorAtIndex { .. }
                    | ErrorKind::ParseError { .. } => "must be an integer".to_string(),
                    _ => e.body_text(),
                };
                Err(AppError::Validation(FieldErrors::single(
                    field.unwrap_or_else(|| "id".into()),
                    message,
                )))
            }
            Err(other) => Err(AppError::Internal(anyhow::anyhow!(other.body_text()))),
        }
    }
}

/// Name of the `index`-th parameter of the matched route.
async fn param_name<S: Send + Sync>(parts: &mut Parts, state: &S, index: usize) -> Option<String> {
    let raw = RawPathParams::from_request_parts(parts, state).await.ok()?;
    raw.iter().nth(index).map(|(key, _)| key.to_string())
}

use tracing::{info, warn};

use crate::error::{AppError, FieldErrors};
use crate::state::AppState;
use crate::store::StoreError;
use crate::users::repo_types::{NewUser, User, UserPatch};

/// A taken email is reported as a field error on user endpoints.
fn email_conflict(e: StoreError) -> AppError {
    match e {
        StoreError::Duplicate(msg) => {
            warn!(%msg, "email already registered");
            AppError::Validation(FieldErrors::single("email", "is already registered"))
        }
        other => other.into(),
    }
}

pub async fn create_user(st: &AppState, new: NewUser) -> Result<User, AppError> {
    let user = st.store.create_user(new).await.map_err(email_conflict)?;
    info!(user_id = user.id, email = %user.email, "user created");
    Ok(user)
}

pub async fn list_users(st: &AppState) -> Result<Vec<User>, AppError> {
    Ok(st.store.list_users().await?)
}

pub async fn get_user(st: &AppState, id: i64) -> Result<User, AppError> {
    st.store
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::not_found("user", id))
}

pub async fn update_user(st: &AppState, id: i64, patch: UserPatch) -> Result<User, AppError> {
    let user = st
        .store
        .update_user(id, patch)
        .await
        .map_err(email_conflict)?
        .ok_or_else(|| AppError::not_found("user", id))?;
    info!(user_id = id, "user updated");
    Ok(user)
}

/// The user's orders are removed with them.
pub async fn delete_user(st: &AppState, id: i64) -> Result<(), AppError> {
    if !st.store.delete_user(id).await? {
        return Err(AppError::not_found("user", id));
    }
    info!(user_id = id, "user deleted");
    Ok(())
}

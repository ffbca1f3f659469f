use tracing::info;

use crate::error::AppError;
use crate::products::repo_types::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

pub async fn create_product(st: &AppState, new: NewProduct) -> Result<Product, AppError> {
    let product = st.store.create_product(new).await?;
    info!(product_id = product.id, price = %product.price, "product created");
    Ok(product)
}

pub async fn list_products(st: &AppState) -> Result<Vec<Product>, AppError> {
    Ok(st.store.list_products().await?)
}

pub async fn get_product(st: &AppState, id: i64) -> Result<Product, AppError> {
    st.store
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::not_found("product", id))
}

pub async fn update_product(st: &AppState, id: i64, patch: ProductPatch) -> Result<Product, AppError> {
    let product = st
        .store
        .update_product(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("product", id))?;
    info!(product_id = id, "product updated");
    Ok(product)
}

/// Also drops the product from every order that held it.
pub async fn delete_product(st: &AppState, id: i64) -> Result<(), AppError> {
    if !st.store.delete_product(id).await? {
        return Err(AppError::not_found("product", id));
    }
    info!(product_id = id, "product deleted");
    Ok(())
}

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, FieldErrors};
use crate::products::repo_types::{NewProduct, ProductPatch};
use crate::validation::{optional_text, required_text};

/// Largest price the `NUMERIC(12, 2)` column holds.
fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub price: Option<Decimal>,
}

fn check_price(errors: &mut FieldErrors, price: Decimal) -> Option<Decimal> {
    if price < Decimal::ZERO {
        errors.add("price", "must not be negative");
        return None;
    }
    if price.scale() > 2 && price.normalize().scale() > 2 {
        errors.add("price", "must have at most 2 decimal places");
        return None;
    }
    if price > max_price() {
        errors.add("price", "is too large");
        return None;
    }
    Some(price)
}

impl CreateProductRequest {
    pub fn validate(self) -> Result<NewProduct, AppError> {
        let mut errors = FieldErrors::new();
        let product_name = required_text(&mut errors, "product_name", self.product_name);
        let price = match self.price {
            Some(p) => check_price(&mut errors, p),
            None => {
                errors.add("price", "is required");
                None
            }
        };
        match (product_name, price) {
            (Some(product_name), Some(price)) => errors.finish(NewProduct { product_name, price }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

impl UpdateProductRequest {
    pub fn validate(self) -> Result<ProductPatch, AppError> {
        let mut errors = FieldErrors::new();
        let patch = ProductPatch {
            product_name: optional_text(&mut errors, "product_name", self.product_name),
            price: self.price.and_then(|p| check_price(&mut errors, p)),
        };
        errors.finish(patch)
    }
}

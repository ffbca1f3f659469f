use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
};

use crate::error::{AppError, FieldErrors};
use crate::orders::repo_types::{NewOrder, Order, OrderPatch};
use crate::products::repo_types::Product;

#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Option<i64>,
    pub order_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub user_id: Option<i64>,
    pub order_date: Option<String>,
}

/// Order together with its current product set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDetails {
    pub id: i64,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
    pub products: Vec<Product>,
}

impl OrderDetails {
    pub fn new(order: Order, products: Vec<Product>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            order_date: order.order_date,
            products,
        }
    }
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub(crate) fn parse_order_date(errors: &mut FieldErrors, raw: Option<String>) -> Option<OffsetDateTime> {
    let raw = raw?;
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    match Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        Ok(date) => Some(date.midnight().assume_utc()),
        Err(_) => {
            errors.add("order_date", "must be an RFC 3339 timestamp or a YYYY-MM-DD date");
            None
        }
    }
}

impl CreateOrderRequest {
    pub fn validate(self) -> Result<NewOrder, AppError> {
        let mut errors = FieldErrors::new();
        if self.user_id.is_none() {
            errors.add("user_id", "is required");
        }
        let order_date = parse_order_date(&mut errors, self.order_date);
        match self.user_id {
            Some(user_id) => errors.finish(NewOrder { user_id, order_date }),
            None => Err(AppError::Validation(errors)),
        }
    }
}

impl UpdateOrderRequest {
    pub fn validate(self) -> Result<OrderPatch, AppError> {
        let mut errors = FieldErrors::new();
        let order_date = parse_order_date(&mut errors, self.order_date);
        errors.finish(OrderPatch {
            user_id: self.user_id,
            order_date,
        })
    }
}

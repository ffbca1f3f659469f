use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Order row, without its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: i64,
    pub order_date: Option<OffsetDateTime>, // database default when absent
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    pub user_id: Option<i64>,
    pub order_date: Option<OffsetDateTime>,
}

impl OrderPatch {
    pub fn apply(self, order: &mut Order) {
        if let Some(user_id) = self.user_id {
            order.user_id = user_id;
        }
        if let Some(order_date) = self.order_date {
            order.order_date = order_date;
        }
    }
}

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{AddressFields, Id, Patch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    ForDelivery,
    Completed,
    Cancelled,
    Refund,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::ForDelivery => "for_delivery",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refund => "refund",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a customer order for a single product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Id,
    pub product_id: Id,
    pub customer_id: Id,
    pub quantity: i64,
    pub payment_method: Option<String>,
    pub total_amount: Decimal,
    /// Set when `total_amount` came from the caller rather than from `price × quantity`.
    pub total_amount_provided: bool,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    /// Correlates the orders of one checkout.
    pub group_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for placing a new order.
#[derive(Debug, Clone, Default)]
pub struct NewOrder {
    pub product_id: Id,
    pub customer_id: Id,
    pub quantity: i64,
    pub payment_method: Option<String>,
    /// Client-supplied total, kept as raw text until normalized.
    pub total_amount: Option<String>,
    pub group_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub address: AddressFields,
}

/// Payload for updating an existing order.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub quantity: Option<i64>,
    pub payment_method: Patch<String>,
    pub status: Option<OrderStatus>,
    /// ISO-8601 date text; `Clear` resets the date to the day the order was created.
    pub order_date: Patch<String>,
    pub total_amount: Option<String>,
    pub address: AddressFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_in_stored_form() {
        assert_eq!(OrderStatus::default().to_string(), "pending");
        assert_eq!(OrderStatus::ForDelivery.to_string(), "for_delivery");
        assert_eq!(serde_json::to_string(&OrderStatus::ForDelivery).unwrap(), "\"for_delivery\"");
    }
}

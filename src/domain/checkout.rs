use rust_decimal::Decimal;
use serde::Serialize;

use super::{presence, AddressFields};

/// Everything the storefront knew at checkout time, echoed back in the
/// confirmation email. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub payment_method: Option<String>,
    pub coupon_code: Option<String>,
    pub customer: Option<CheckoutCustomer>,
    pub address: Option<AddressFields>,
    pub totals: Option<CheckoutTotals>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutCustomer {
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    pub subtotal: Option<Decimal>,
    pub vat: Option<Decimal>,
    pub delivery_fee: Option<Decimal>,
    pub convenience_fee: Option<Decimal>,
    pub grand_total: Option<Decimal>,
    pub coupon_code: Option<String>,
}

impl CheckoutSummary {
    /// The customer email captured at checkout, if it is non-blank.
    pub fn customer_email(&self) -> Option<String> {
        presence(self.customer.as_ref().and_then(|c| c.email.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_customer_email_is_absent() {
        let mut summary = CheckoutSummary::default();
        assert_eq!(summary.customer_email(), None);

        summary.customer = Some(CheckoutCustomer {
            email: Some("  ".to_string()),
            ..CheckoutCustomer::default()
        });
        assert_eq!(summary.customer_email(), None);

        summary.customer = Some(CheckoutCustomer {
            email: Some("jo@example.com".to_string()),
            ..CheckoutCustomer::default()
        });
        assert_eq!(summary.customer_email().as_deref(), Some("jo@example.com"));
    }
}

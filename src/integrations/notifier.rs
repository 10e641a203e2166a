use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::info;

use super::IntegrationError;
use crate::domain::{CheckoutSummary, Id, Order};
use crate::pricing::round_money;

/// A payment confirmation for one checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub recipient: String,
    pub subject: String,
    pub order_ids: Vec<Id>,
    pub grand_total: Decimal,
    pub summary: CheckoutSummary,
}

impl OrderConfirmation {
    pub fn new(recipient: impl Into<String>, orders: &[Order], summary: CheckoutSummary) -> Self {
        let order_ids: Vec<Id> = orders.iter().map(|o| o.id).collect();
        Self {
            recipient: recipient.into(),
            subject: format!("Order Placed Successfully - {}", references(&order_ids)),
            order_ids,
            grand_total: orders.iter().map(|o| o.total_amount).sum(),
            summary,
        }
    }

    /// Plain-text body: the order references, then whatever the checkout
    /// summary carries. The summary's grand total wins over the order sum.
    pub fn body(&self) -> String {
        let mut lines = vec![format!("Orders: {}", references(&self.order_ids))];

        let summary = &self.summary;
        if let Some(customer) = &summary.customer {
            let name = [customer.first_name.as_deref(), customer.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            if !name.is_empty() {
                lines.push(format!("Customer: {}", name));
            }
            if let Some(mobile) = &customer.mobile {
                lines.push(format!("Mobile: {}", mobile));
            }
        }
        if let Some(method) = &summary.payment_method {
            lines.push(format!("Payment method: {}", method));
        }
        if let Some(address) = &summary.address {
            let parts: Vec<&str> = address.entries().into_iter().filter_map(|(_, v)| v).collect();
            if !parts.is_empty() {
                lines.push(format!("Deliver to: {}", parts.join(", ")));
            }
        }

        let totals = summary.totals.clone().unwrap_or_default();
        for (label, amount) in [
            ("Subtotal", totals.subtotal),
            ("VAT", totals.vat),
            ("Delivery fee", totals.delivery_fee),
            ("Convenience fee", totals.convenience_fee),
        ] {
            if let Some(amount) = amount {
                lines.push(format!("{}: {}", label, round_money(amount)));
            }
        }
        if let Some(coupon) = summary.coupon_code.as_ref().or(totals.coupon_code.as_ref()) {
            lines.push(format!("Coupon: {}", coupon));
        }
        let grand_total = totals.grand_total.unwrap_or(self.grand_total);
        lines.push(format!("Total: {}", round_money(grand_total)));

        lines.join("\n")
    }
}

fn references(order_ids: &[Id]) -> String {
    order_ids
        .iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outbound email delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn payment_confirmation(&self, message: OrderConfirmation) -> Result<(), IntegrationError>;
}

/// Writes confirmations to the log instead of sending them.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn payment_confirmation(&self, message: OrderConfirmation) -> Result<(), IntegrationError> {
        info!(
            recipient = %message.recipient,
            subject = %message.subject,
            body = %message.body(),
            "Payment confirmation sent"
        );
        Ok(())
    }
}

/// Keeps sent confirmations in memory; can be told to fail.
#[derive(Default)]
pub struct MemoryNotifier {
    sent: RwLock<Vec<OrderConfirmation>>,
    fail_on_send: RwLock<bool>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_fail_on_send(&self, fail: bool) {
        *self.fail_on_send.write().await = fail;
    }

    pub async fn sent(&self) -> Vec<OrderConfirmation> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn payment_confirmation(&self, message: OrderConfirmation) -> Result<(), IntegrationError> {
        if *self.fail_on_send.read().await {
            return Err(IntegrationError::Delivery("mail server rejected the message".to_string()));
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}

use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::StoreClient;
use crate::app_system::{MutationError, SuccessPayload};
use crate::domain::{presence, CheckoutSummary, Customer, Id, Identity, Order};
use crate::integrations::{IntegrationError, Notifier, OrderConfirmation};
use crate::store::Database;

pub const NO_ORDERS_FOUND: &str = "No orders found for provided IDs";
pub const NO_MATCHING_ORDERS: &str = "No matching orders found";
pub const RECIPIENT_REQUIRED: &str = "Recipient email is required";
pub const PAYMENT_CONFIRMATION_FAILED: &str = "Failed to send payment confirmation email";

#[derive(Clone)]
pub struct NotificationClient {
    store: StoreClient<Database>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationClient {
    pub fn new(store: StoreClient<Database>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Sends one order email covering `order_ids`.
    ///
    /// The recipient is, in order: the explicit one, the customer captured
    /// in `summary`, the first order's customer. Unknown ids are skipped as
    /// long as at least one order is found.
    #[instrument(skip(self, identity, recipient, summary), fields(identity = %identity))]
    pub async fn send_order_emails(
        &self,
        identity: &Identity,
        order_ids: Vec<Id>,
        recipient: Option<String>,
        summary: Option<CheckoutSummary>,
    ) -> SuccessPayload {
        let summary = summary.unwrap_or_default();
        let (orders, customer_email) = match self.load_orders(order_ids).await {
            Ok(found) => found,
            Err(e) => return SuccessPayload::from_result(Err(e), "Failed to send email"),
        };
        if orders.is_empty() {
            return SuccessPayload::failure(vec![NO_ORDERS_FOUND.to_string()]);
        }
        let Some(recipient) = presence(recipient)
            .or_else(|| summary.customer_email())
            .or(customer_email)
        else {
            return SuccessPayload::failure(vec![RECIPIENT_REQUIRED.to_string()]);
        };

        let message = OrderConfirmation::new(recipient, &orders, summary);
        let subject = message.subject.clone();
        match self.notifier.payment_confirmation(message).await {
            Ok(()) => {
                info!(subject = %subject, "Order email sent");
                SuccessPayload::ok()
            }
            Err(e) => {
                error!(error = %e, "Order email failed");
                let reason = match e {
                    IntegrationError::Delivery(reason) => reason,
                    other => other.to_string(),
                };
                SuccessPayload::failure(vec![format!("Failed to send email: {}", reason)])
            }
        }
    }

    /// Sends the payment confirmation for a finished checkout. Unlike
    /// [`send_order_emails`](Self::send_order_emails) the recipient and the
    /// summary are mandatory, and delivery failures are not itemized.
    #[instrument(skip(self, identity, recipient, summary), fields(identity = %identity))]
    pub async fn send_payment_confirmation(
        &self,
        identity: &Identity,
        order_ids: Vec<Id>,
        recipient: String,
        summary: CheckoutSummary,
    ) -> SuccessPayload {
        let result = self.try_send_payment_confirmation(order_ids, recipient, summary).await;
        SuccessPayload::from_result(result, PAYMENT_CONFIRMATION_FAILED)
    }

    async fn try_send_payment_confirmation(
        &self,
        order_ids: Vec<Id>,
        recipient: String,
        summary: CheckoutSummary,
    ) -> Result<(), MutationError> {
        let (orders, _) = self.load_orders(order_ids).await?;
        if orders.is_empty() {
            return Err(MutationError::not_found(NO_MATCHING_ORDERS));
        }
        let recipient = presence(Some(recipient)).ok_or_else(|| MutationError::invalid(RECIPIENT_REQUIRED))?;

        let message = OrderConfirmation::new(recipient, &orders, summary);
        let subject = message.subject.clone();
        self.notifier.payment_confirmation(message).await?;
        info!(subject = %subject, "Payment confirmation sent");
        Ok(())
    }

    /// Orders found among `order_ids`, in request order, plus the email of
    /// the first order's customer.
    async fn load_orders(&self, order_ids: Vec<Id>) -> Result<(Vec<Order>, Option<String>), MutationError> {
        Ok(self
            .store
            .query(move |db| {
                let orders: Vec<Order> = order_ids.iter().filter_map(|&id| db.find::<Order>(id).cloned()).collect();
                let email = orders
                    .first()
                    .and_then(|o| db.find::<Customer>(o.customer_id))
                    .and_then(|c| presence(Some(c.email.clone())));
                (orders, email)
            })
            .await?)
    }
}

use tracing::{info, instrument};

use crate::actor_framework::StoreClient;
use crate::app_system::{EntityPayload, MutationError, SuccessPayload};
use crate::domain::{Delivery, Id, Identity, NewOrder, Order, OrderPatch};
use crate::ordering::{self, DeleteTarget};
use crate::store::Database;

/// Client for placing, changing and removing orders.
///
/// Every write runs as one store transaction, so an order and its delivery
/// are saved or discarded together.
#[derive(Clone)]
pub struct OrderClient {
    store: StoreClient<Database>,
}

impl_basic_client!(OrderClient, Order, order);

impl OrderClient {
    #[instrument(
        skip(self, identity, input),
        fields(identity = %identity, product_id = input.product_id, customer_id = input.customer_id)
    )]
    pub async fn create_order(&self, identity: &Identity, input: NewOrder) -> EntityPayload<Order> {
        let result = ordering::place(&self.store, input).await;
        if let Ok(order) = &result {
            info!(order_id = order.id, total = %order.total_amount, "Order created");
        }
        EntityPayload::from_result(result, "Failed to create order")
    }

    #[instrument(skip(self, identity, patch), fields(identity = %identity))]
    pub async fn update_order(&self, identity: &Identity, id: Id, patch: OrderPatch) -> EntityPayload<Order> {
        let result = ordering::revise(&self.store, id, patch).await;
        if let Ok(order) = &result {
            info!(order_id = order.id, status = %order.status, "Order updated");
        }
        EntityPayload::from_result(result, "Failed to update order")
    }

    /// Deletes one order, or every order of a group when `group_id` is given.
    #[instrument(skip(self, identity), fields(identity = %identity))]
    pub async fn delete_order(&self, identity: &Identity, id: Option<Id>, group_id: Option<String>) -> SuccessPayload {
        let result = match DeleteTarget::resolve(id, group_id) {
            Ok(target) => ordering::remove(&self.store, target).await.map(|deleted| {
                info!(count = deleted.len(), "Orders deleted");
            }),
            Err(e) => Err(e),
        };
        SuccessPayload::from_result(result, "Failed to delete order")
    }

    #[instrument(skip(self))]
    pub async fn orders_by_group(&self, group_id: String) -> Result<Vec<Order>, MutationError> {
        Ok(self.store.query(move |db| db.orders_by_group(&group_id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn delivery_for_order(&self, order_id: Id) -> Result<Option<Delivery>, MutationError> {
        Ok(self.store.query(move |db| db.delivery_for_order(order_id).cloned()).await?)
    }
}

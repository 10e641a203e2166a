//! Transaction boundary for order writes.
//!
//! The synchronous functions here assume they run inside a store
//! transaction; the async ones open that transaction. An order that was
//! promised a delivery is never visible without it, and a delivery never
//! outlives a failed order write.

use tracing::info;

use crate::actor_framework::StoreClient;
use crate::app_system::MutationError;
use crate::domain::{AddressFields, Delivery, Id, NewOrder, Order, OrderPatch};
use crate::store::Database;

use super::builder::build_order;
use super::delivery::{find_or_create, has_delivery_info, link_default_delivery};
use super::mutator::{delete_orders, update_order, DeleteTarget};

/// Builds and persists an order, then its delivery if address data was given.
pub fn place_order(db: &mut Database, input: NewOrder) -> Result<Order, MutationError> {
    let order = build_order(db, &input)?;
    let order = db.insert(order)?;
    attach_delivery(db, &order, &input.address)?;
    Ok(order)
}

/// Saves the order's delivery and back-fills the customer's default
/// delivery. Does nothing when every address field is blank.
pub(crate) fn attach_delivery(
    db: &mut Database,
    order: &Order,
    fields: &AddressFields,
) -> Result<Option<Delivery>, MutationError> {
    if !has_delivery_info(fields) {
        return Ok(None);
    }
    let delivery = find_or_create(db, order, fields)?;
    if link_default_delivery(db, order.customer_id, delivery.id)? {
        info!(customer_id = order.customer_id, delivery_id = delivery.id, "Default delivery linked");
    }
    Ok(Some(delivery))
}

pub async fn place(store: &StoreClient<Database>, input: NewOrder) -> Result<Order, MutationError> {
    store.transaction(move |db| place_order(db, input)).await
}

pub async fn revise(store: &StoreClient<Database>, id: Id, patch: OrderPatch) -> Result<Order, MutationError> {
    store.transaction(move |db| update_order(db, id, patch)).await
}

pub async fn remove(store: &StoreClient<Database>, target: DeleteTarget) -> Result<Vec<Order>, MutationError> {
    store.transaction(move |db| delete_orders(db, &target)).await
}

use tracing::debug;

use crate::app_system::MutationError;
use crate::domain::{AddressFields, Customer, Delivery, Id, Order};
use crate::store::Database;

use super::builder::CUSTOMER_NOT_FOUND;

/// True iff at least one address field is non-blank.
pub fn has_delivery_info(fields: &AddressFields) -> bool {
    fields
        .entries()
        .into_iter()
        .any(|(_, value)| value.is_some_and(|v| !v.trim().is_empty()))
}

/// Updates the order's delivery in place, or creates it if there is none.
///
/// Only non-blank fields are written, so repeating the call with the same
/// fields leaves a single, unchanged row.
pub fn find_or_create(db: &mut Database, order: &Order, fields: &AddressFields) -> Result<Delivery, MutationError> {
    let existing = db.delivery_for_order(order.id).cloned();
    let is_new = existing.is_none();

    let mut delivery = existing.unwrap_or_else(|| Delivery::new(order.id, Some(order.customer_id)));
    delivery.customer_id = Some(order.customer_id);
    delivery.address.merge_present(fields);

    let delivery = if is_new {
        db.insert(delivery)?
    } else {
        db.update(delivery)?
    };
    debug!(order_id = order.id, delivery_id = delivery.id, created = is_new, "Delivery saved");
    Ok(delivery)
}

/// Makes `delivery_id` the customer's default address if they have none yet.
///
/// Returns whether the customer was changed.
pub fn link_default_delivery(db: &mut Database, customer_id: Id, delivery_id: Id) -> Result<bool, MutationError> {
    let mut customer = db
        .find::<Customer>(customer_id)
        .cloned()
        .ok_or_else(|| MutationError::not_found(CUSTOMER_NOT_FOUND))?;
    if customer.delivery_id.is_some() {
        return Ok(false);
    }
    customer.delivery_id = Some(delivery_id);
    db.update(customer)?;
    Ok(true)
}

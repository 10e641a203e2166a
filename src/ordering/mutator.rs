use chrono::NaiveDate;

use crate::app_system::MutationError;
use crate::domain::{presence, Id, Order, OrderPatch, Patch, Product};
use crate::pricing::{calculate_total, parse_explicit_total};
use crate::store::{Database, StoreError};

use super::builder::{INVALID_QUANTITY, PRODUCT_NOT_FOUND};
use super::coordinator::attach_delivery;

pub const ORDER_NOT_FOUND: &str = "Order not found";
pub const INVALID_ORDER_DATE: &str = "Invalid order date";
pub const MISSING_DELETE_TARGET: &str = "Either id or groupId must be provided";
pub const GROUP_NOT_FOUND: &str = "No orders found for the provided group id.";
pub const DELETE_BLOCKED: &str = "Unable to delete order because related records exist.";

/// Applies a partial update to an order and, if address fields were given,
/// to its delivery. Must run inside a store transaction.
pub fn update_order(db: &mut Database, id: Id, patch: OrderPatch) -> Result<Order, MutationError> {
    let mut order = db
        .find::<Order>(id)
        .cloned()
        .ok_or_else(|| MutationError::not_found(ORDER_NOT_FOUND))?;

    if patch.quantity.is_some_and(|q| q <= 0) {
        return Err(MutationError::invalid(INVALID_QUANTITY));
    }

    match patch.order_date {
        Patch::Unchanged => {}
        Patch::Set(raw) if !raw.trim().is_empty() => order.order_date = parse_order_date(&raw)?,
        Patch::Set(_) | Patch::Clear => order.order_date = order.created_at.date_naive(),
    }

    match parse_explicit_total(patch.total_amount.as_deref())? {
        Some(total) => {
            order.total_amount = total;
            order.total_amount_provided = true;
        }
        None => {
            if let Some(quantity) = patch.quantity {
                let product = db
                    .find::<Product>(order.product_id)
                    .ok_or_else(|| MutationError::not_found(PRODUCT_NOT_FOUND))?;
                order.total_amount = calculate_total(product.price, quantity);
                order.total_amount_provided = false;
            }
        }
    }

    if let Some(quantity) = patch.quantity {
        order.quantity = quantity;
    }
    patch.payment_method.apply_to(&mut order.payment_method);
    order.payment_method = presence(order.payment_method.take());
    if let Some(status) = patch.status {
        order.status = status;
    }

    let order = db.update(order)?;
    attach_delivery(db, &order, &patch.address)?;
    Ok(order)
}

fn parse_order_date(raw: &str) -> Result<NaiveDate, MutationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| MutationError::invalid(INVALID_ORDER_DATE))
}

/// What a delete request points at.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Order(Id),
    Group(String),
}

impl DeleteTarget {
    /// A non-blank group id takes precedence over an order id.
    pub fn resolve(id: Option<Id>, group_id: Option<String>) -> Result<Self, MutationError> {
        match (presence(group_id), id) {
            (Some(group_id), _) => Ok(DeleteTarget::Group(group_id)),
            (None, Some(id)) => Ok(DeleteTarget::Order(id)),
            (None, None) => Err(MutationError::invalid(MISSING_DELETE_TARGET)),
        }
    }
}

/// Deletes the targeted orders. Inside a store transaction this is all
/// or none.
pub fn delete_orders(db: &mut Database, target: &DeleteTarget) -> Result<Vec<Order>, MutationError> {
    let ids: Vec<Id> = match target {
        DeleteTarget::Group(group_id) => {
            let ids: Vec<Id> = db.orders_by_group(group_id).iter().map(|o| o.id).collect();
            if ids.is_empty() {
                return Err(MutationError::not_found(GROUP_NOT_FOUND));
            }
            ids
        }
        DeleteTarget::Order(id) => {
            if db.find::<Order>(*id).is_none() {
                return Err(MutationError::not_found(ORDER_NOT_FOUND));
            }
            vec![*id]
        }
    };

    db.delete_all(&ids).map_err(|e| match e {
        StoreError::ForeignKeyViolation { .. } => MutationError::ConstraintViolation(DELETE_BLOCKED.to_string()),
        other => other.into(),
    })
}

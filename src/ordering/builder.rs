use chrono::Utc;
use rust_decimal::Decimal;

use crate::app_system::MutationError;
use crate::domain::{presence, Customer, NewOrder, Order, OrderStatus, Product};
use crate::pricing::{calculate_total, normalize_total};
use crate::store::Database;

pub const INVALID_QUANTITY: &str = "Order quantity must be greater than zero";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

/// Picks the total for an order: a valid client-supplied total wins and is
/// flagged as explicit, otherwise `price × quantity`.
pub fn resolve_total(explicit: Option<&str>, product: &Product, quantity: i64) -> (Decimal, bool) {
    match normalize_total(explicit) {
        Some(total) => (total, true),
        None => (calculate_total(product.price, quantity), false),
    }
}

/// Validates a checkout line and builds the unsaved order.
///
/// Checks run in a fixed order and stop at the first failure: quantity,
/// then product, then customer. Nothing is written.
pub fn build_order(db: &Database, input: &NewOrder) -> Result<Order, MutationError> {
    if input.quantity <= 0 {
        return Err(MutationError::invalid(INVALID_QUANTITY));
    }
    let product = db
        .find::<Product>(input.product_id)
        .ok_or_else(|| MutationError::not_found(PRODUCT_NOT_FOUND))?;
    let customer = db
        .find::<Customer>(input.customer_id)
        .ok_or_else(|| MutationError::not_found(CUSTOMER_NOT_FOUND))?;

    let (total_amount, total_amount_provided) =
        resolve_total(input.total_amount.as_deref(), product, input.quantity);

    let now = Utc::now();
    Ok(Order {
        id: 0,
        product_id: product.id,
        customer_id: customer.id,
        quantity: input.quantity,
        payment_method: presence(input.payment_method.clone()),
        total_amount,
        total_amount_provided,
        status: OrderStatus::Pending,
        order_date: input.order_date.unwrap_or_else(|| now.date_naive()),
        group_id: presence(input.group_id.clone()),
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seeded() -> (Database, NewOrder) {
        let mut db = Database::new();
        let product = db.insert(Product::new("Cold Brew", dec!(10.99), "drink")).unwrap();
        let customer = db.insert(Customer::new("Ben", "Reyes", "ben@example.com")).unwrap();
        let input = NewOrder {
            product_id: product.id,
            customer_id: customer.id,
            quantity: 3,
            ..NewOrder::default()
        };
        (db, input)
    }

    #[test]
    fn computes_total_from_price_and_quantity() {
        let (db, input) = seeded();
        let order = build_order(&db, &input).unwrap();
        assert_eq!(order.total_amount, dec!(32.97));
        assert!(!order.total_amount_provided);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.order_date, Utc::now().date_naive());
    }

    #[test]
    fn explicit_total_wins_and_is_flagged() {
        let (db, mut input) = seeded();
        input.total_amount = Some("50".to_string());
        let order = build_order(&db, &input).unwrap();
        assert_eq!(order.total_amount, dec!(50.00));
        assert!(order.total_amount_provided);
    }

    #[test]
    fn negative_explicit_total_falls_back_to_computed() {
        let (db, mut input) = seeded();
        input.total_amount = Some("-5.00".to_string());
        let order = build_order(&db, &input).unwrap();
        assert_eq!(order.total_amount, dec!(32.97));
        assert!(!order.total_amount_provided);
    }

    #[test]
    fn validation_short_circuits_in_order() {
        let (db, mut input) = seeded();
        input.quantity = 0;
        input.product_id = 99;
        assert_eq!(build_order(&db, &input), Err(MutationError::invalid(INVALID_QUANTITY)));

        input.quantity = 1;
        input.customer_id = 99;
        assert_eq!(build_order(&db, &input), Err(MutationError::not_found(PRODUCT_NOT_FOUND)));

        input.product_id = 1;
        assert_eq!(build_order(&db, &input), Err(MutationError::not_found(CUSTOMER_NOT_FOUND)));
    }

    #[test]
    fn blank_payment_method_and_group_become_absent() {
        let (db, mut input) = seeded();
        input.payment_method = Some("  ".to_string());
        input.group_id = Some(String::new());
        let order = build_order(&db, &input).unwrap();
        assert_eq!(order.payment_method, None);
        assert_eq!(order.group_id, None);
    }
}

//! In-process relational store.
//!
//! Four tables with the reference rules of the schema enforced on every
//! write. The store itself has no notion of concurrency: it is owned by a
//! single [`StoreActor`](crate::actor_framework::StoreActor), which is what
//! serializes access and provides transactions.

mod records;
mod table;

pub use table::{Record, Table};

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::actor_framework::FrameworkError;
use crate::domain::{Customer, Delivery, Id, Order, Product};

/// Constraint names, as they appear in errors and logs.
pub const ORDERS_PRODUCT_FK: &str = "orders.product_id";
pub const CUSTOMERS_DELIVERY_FK: &str = "customers.delivery_id";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{table} row not found: {id}")]
    NotFound { table: &'static str, id: Id },
    #[error("Validation failed: {}", .0.join(", "))]
    Invalid(Vec<String>),
    #[error("Foreign key violation on {constraint}")]
    ForeignKeyViolation { constraint: &'static str },
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] FrameworkError),
}

#[derive(Debug, Clone, Default)]
pub struct Database {
    products: Table<Product>,
    customers: Table<Customer>,
    orders: Table<Order>,
    deliveries: Table<Delivery>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Reads ---

    pub fn find<T: Record>(&self, id: Id) -> Option<&T> {
        T::table(self).get(id)
    }

    pub fn all<T: Record>(&self) -> Vec<T> {
        T::table(self).iter().cloned().collect()
    }

    pub fn count<T: Record>(&self) -> usize {
        T::table(self).len()
    }

    pub fn orders_by_group(&self, group_id: &str) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| o.group_id.as_deref() == Some(group_id))
            .cloned()
            .collect()
    }

    pub fn delivery_for_order(&self, order_id: Id) -> Option<&Delivery> {
        self.deliveries.iter().find(|d| d.order_id == order_id)
    }

    // --- Writes ---

    /// Validates and inserts a new row, assigning its id and timestamps.
    pub fn insert<T: Record>(&mut self, mut row: T) -> Result<T, StoreError> {
        Self::check(&row, self)?;
        row.stamp(Utc::now(), true);
        let row = T::table_mut(self).insert(row);
        debug!(table = T::TABLE, id = row.id(), "Row inserted");
        Ok(row)
    }

    /// Validates and replaces an existing row, keeping its `created_at`.
    pub fn update<T: Record>(&mut self, mut row: T) -> Result<T, StoreError> {
        if !T::table(self).contains(row.id()) {
            return Err(StoreError::NotFound { table: T::TABLE, id: row.id() });
        }
        Self::check(&row, self)?;
        row.stamp(Utc::now(), false);
        let row = T::table_mut(self).replace(row);
        debug!(table = T::TABLE, id = row.id(), "Row updated");
        Ok(row)
    }

    fn check<T: Record>(row: &T, db: &Database) -> Result<(), StoreError> {
        let errors = row.validate();
        if !errors.is_empty() {
            return Err(StoreError::Invalid(errors));
        }
        row.check_references(db)
    }

    /// Deletes an order together with its delivery.
    ///
    /// Fails if the delivery is still some customer's default address.
    pub fn delete_order(&mut self, id: Id) -> Result<Order, StoreError> {
        if !self.orders.contains(id) {
            return Err(StoreError::NotFound { table: Order::TABLE, id });
        }
        if let Some(delivery_id) = self.delivery_for_order(id).map(|d| d.id) {
            if self.customers.iter().any(|c| c.delivery_id == Some(delivery_id)) {
                return Err(StoreError::ForeignKeyViolation { constraint: CUSTOMERS_DELIVERY_FK });
            }
            self.deliveries.remove(delivery_id);
        }
        let order = self
            .orders
            .remove(id)
            .ok_or(StoreError::NotFound { table: Order::TABLE, id })?;
        debug!(order_id = id, "Order deleted");
        Ok(order)
    }

    /// Deletes every listed order, stopping at the first failure.
    ///
    /// Orders deleted before the failure stay deleted, so callers run this
    /// inside a store transaction (or [`atomically`]) to get all-or-nothing.
    ///
    /// [`atomically`]: crate::actor_framework::atomically
    pub fn delete_all(&mut self, ids: &[Id]) -> Result<Vec<Order>, StoreError> {
        ids.iter().map(|&id| self.delete_order(id)).collect()
    }

    /// Deletes a product no order refers to.
    pub fn delete_product(&mut self, id: Id) -> Result<Product, StoreError> {
        if !self.products.contains(id) {
            return Err(StoreError::NotFound { table: Product::TABLE, id });
        }
        if self.orders.iter().any(|o| o.product_id == id) {
            return Err(StoreError::ForeignKeyViolation { constraint: ORDERS_PRODUCT_FK });
        }
        self.products
            .remove(id)
            .ok_or(StoreError::NotFound { table: Product::TABLE, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::actor_framework::atomically;
    use crate::domain::OrderStatus;

    fn seeded() -> (Database, Product, Customer) {
        let mut db = Database::new();
        let product = db.insert(Product::new("Latte", dec!(4.50), "drink")).unwrap();
        let customer = db.insert(Customer::new("Ana", "Cruz", "ana@example.com")).unwrap();
        (db, product, customer)
    }

    fn order_for(product: &Product, customer: &Customer) -> Order {
        let now = Utc::now();
        Order {
            id: 0,
            product_id: product.id,
            customer_id: customer.id,
            quantity: 2,
            payment_method: None,
            total_amount: dec!(9.00),
            total_amount_provided: false,
            status: OrderStatus::Pending,
            order_date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            group_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let (mut db, product, customer) = seeded();
        let first = db.insert(order_for(&product, &customer)).unwrap();
        let second = db.insert(order_for(&product, &customer)).unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(db.count::<Order>(), 2);
    }

    #[test]
    fn insert_rejects_invalid_rows_and_missing_references() {
        let (mut db, product, customer) = seeded();

        let mut bad = order_for(&product, &customer);
        bad.quantity = 0;
        bad.total_amount = dec!(-1);
        assert_eq!(
            db.insert(bad),
            Err(StoreError::Invalid(vec![
                "Order quantity must be greater than 0".into(),
                "Total amount must be greater than or equal to 0".into(),
            ]))
        );

        let mut orphan = order_for(&product, &customer);
        orphan.product_id = 99;
        assert_eq!(db.insert(orphan), Err(StoreError::Invalid(vec!["Product must exist".into()])));
        assert_eq!(db.count::<Order>(), 0);
    }

    #[test]
    fn update_keeps_created_at() {
        let (mut db, product, customer) = seeded();
        let order = db.insert(order_for(&product, &customer)).unwrap();
        let mut changed = order.clone();
        changed.quantity = 3;
        let saved = db.update(changed).unwrap();
        assert_eq!(saved.created_at, order.created_at);
        assert_eq!(db.find::<Order>(order.id).map(|o| o.quantity), Some(3));

        let mut ghost = order.clone();
        ghost.id = 42;
        assert_eq!(db.update(ghost), Err(StoreError::NotFound { table: "orders", id: 42 }));
    }

    #[test]
    fn only_one_delivery_per_order() {
        let (mut db, product, customer) = seeded();
        let order = db.insert(order_for(&product, &customer)).unwrap();
        db.insert(Delivery::new(order.id, Some(customer.id))).unwrap();
        assert_eq!(
            db.insert(Delivery::new(order.id, None)),
            Err(StoreError::Invalid(vec!["Order has already been taken".into()]))
        );
    }

    #[test]
    fn deleting_an_order_cascades_to_its_delivery() {
        let (mut db, product, customer) = seeded();
        let order = db.insert(order_for(&product, &customer)).unwrap();
        db.insert(Delivery::new(order.id, Some(customer.id))).unwrap();

        db.delete_order(order.id).unwrap();
        assert_eq!(db.count::<Order>(), 0);
        assert_eq!(db.count::<Delivery>(), 0);
    }

    #[test]
    fn default_delivery_blocks_order_deletion() {
        let (mut db, product, mut customer) = seeded();
        let order = db.insert(order_for(&product, &customer)).unwrap();
        let delivery = db.insert(Delivery::new(order.id, Some(customer.id))).unwrap();
        customer.delivery_id = Some(delivery.id);
        db.update(customer).unwrap();

        assert_eq!(
            db.delete_order(order.id),
            Err(StoreError::ForeignKeyViolation { constraint: CUSTOMERS_DELIVERY_FK })
        );
        assert!(db.find::<Order>(order.id).is_some());
    }

    #[test]
    fn delete_all_in_a_transaction_is_all_or_nothing() {
        let (mut db, product, mut customer) = seeded();
        let a = db.insert(order_for(&product, &customer)).unwrap();
        let b = db.insert(order_for(&product, &customer)).unwrap();
        let c = db.insert(order_for(&product, &customer)).unwrap();
        db.insert(Delivery::new(a.id, Some(customer.id))).unwrap();
        let delivery = db.insert(Delivery::new(b.id, Some(customer.id))).unwrap();
        customer.delivery_id = Some(delivery.id);
        db.update(customer).unwrap();

        let result = atomically(&mut db, |db| db.delete_all(&[a.id, b.id, c.id]));
        assert_eq!(result, Err(StoreError::ForeignKeyViolation { constraint: CUSTOMERS_DELIVERY_FK }));
        assert_eq!(db.count::<Order>(), 3);
        assert_eq!(db.count::<Delivery>(), 2);
    }

    #[test]
    fn delete_all_alone_stops_at_the_first_failure() {
        let (mut db, product, mut customer) = seeded();
        let a = db.insert(order_for(&product, &customer)).unwrap();
        let b = db.insert(order_for(&product, &customer)).unwrap();
        let delivery = db.insert(Delivery::new(b.id, Some(customer.id))).unwrap();
        customer.delivery_id = Some(delivery.id);
        db.update(customer).unwrap();

        assert!(db.delete_all(&[a.id, b.id]).is_err());
        assert!(db.find::<Order>(a.id).is_none());
        assert!(db.find::<Order>(b.id).is_some());
    }

    #[test]
    fn product_with_orders_cannot_be_deleted() {
        let (mut db, product, customer) = seeded();
        db.insert(order_for(&product, &customer)).unwrap();
        assert_eq!(
            db.delete_product(product.id),
            Err(StoreError::ForeignKeyViolation { constraint: ORDERS_PRODUCT_FK })
        );
    }
}

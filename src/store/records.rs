use chrono::{DateTime, Utc};

use super::{Database, Record, StoreError, Table};
use crate::domain::{Customer, Delivery, Id, Order, Product};

/// Implements [`Record`] for a row type with `id`, `created_at` and
/// `updated_at` fields stored in the `Database` field of the same name as
/// its table. The braces carry the type's validation hooks.
macro_rules! impl_record {
    ($entity:ty, $table:ident { $($hooks:tt)* }) => {
        impl Record for $entity {
            const TABLE: &'static str = stringify!($table);

            fn id(&self) -> Id {
                self.id
            }

            fn assign_id(&mut self, id: Id) {
                self.id = id;
            }

            fn stamp(&mut self, now: DateTime<Utc>, inserting: bool) {
                if inserting {
                    self.created_at = now;
                }
                self.updated_at = now;
            }

            fn table(db: &Database) -> &Table<Self> {
                &db.$table
            }

            fn table_mut(db: &mut Database) -> &mut Table<Self> {
                &mut db.$table
            }

            $($hooks)*
        }
    };
}

const MAX_FIELD_LEN: usize = 255;
const MAX_REMARKS_LEN: usize = 1000;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn references(errors: Vec<String>) -> Result<(), StoreError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Invalid(errors))
    }
}

impl_record!(Product, products {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if blank(&self.name) {
            errors.push("Name can't be blank".to_string());
        }
        if blank(&self.product_type) {
            errors.push("Product type can't be blank".to_string());
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            errors.push("Product price must be greater than or equal to 0".to_string());
        }
        errors
    }
});

impl_record!(Customer, customers {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if blank(&self.first_name) {
            errors.push("First name can't be blank".to_string());
        }
        if blank(&self.last_name) {
            errors.push("Last name can't be blank".to_string());
        }
        if blank(&self.email) {
            errors.push("Email can't be blank".to_string());
        } else if !looks_like_email(&self.email) {
            errors.push("Email is invalid".to_string());
        }
        errors
    }

    fn check_references(&self, db: &Database) -> Result<(), StoreError> {
        match self.delivery_id {
            Some(id) if !db.deliveries.contains(id) => references(vec!["Delivery must exist".to_string()]),
            _ => Ok(()),
        }
    }
});

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

impl_record!(Order, orders {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.quantity <= 0 {
            errors.push("Order quantity must be greater than 0".to_string());
        }
        if self.total_amount.is_sign_negative() && !self.total_amount.is_zero() {
            errors.push("Total amount must be greater than or equal to 0".to_string());
        }
        errors
    }

    fn check_references(&self, db: &Database) -> Result<(), StoreError> {
        let mut errors = Vec::new();
        if !db.products.contains(self.product_id) {
            errors.push("Product must exist".to_string());
        }
        if !db.customers.contains(self.customer_id) {
            errors.push("Customer must exist".to_string());
        }
        references(errors)
    }
});

impl_record!(Delivery, deliveries {
    fn validate(&self) -> Vec<String> {
        self.address
            .entries()
            .into_iter()
            .filter_map(|(label, value)| {
                let max = if label == "Remarks" { MAX_REMARKS_LEN } else { MAX_FIELD_LEN };
                value
                    .filter(|v| v.chars().count() > max)
                    .map(|_| format!("{} is too long (maximum is {} characters)", label, max))
            })
            .collect()
    }

    fn check_references(&self, db: &Database) -> Result<(), StoreError> {
        let mut errors = Vec::new();
        if !db.orders.contains(self.order_id) {
            errors.push("Order must exist".to_string());
        } else if db
            .deliveries
            .iter()
            .any(|d| d.order_id == self.order_id && d.id != self.id)
        {
            errors.push("Order has already been taken".to_string());
        }
        if let Some(customer_id) = self.customer_id {
            if !db.customers.contains(customer_id) {
                errors.push("Customer must exist".to_string());
            }
        }
        references(errors)
    }
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AddressFields;
    use rust_decimal_macros::dec;

    #[test]
    fn record_tables_are_wired_to_their_rows() {
        assert_eq!(
            [Product::TABLE, Customer::TABLE, Order::TABLE, Delivery::TABLE],
            ["products", "customers", "orders", "deliveries"]
        );

        let mut db = Database::new();
        let product = db.insert(Product::new("Flat White", dec!(4.00), "drink")).unwrap();
        let customer = db.insert(Customer::new("Ira", "Go", "ira@example.com")).unwrap();
        assert_eq!(Product::table(&db).get(product.id), Some(&product));
        assert_eq!(Customer::table(&db).get(customer.id), Some(&customer));
        assert!(Order::table(&db).is_empty());
        assert!(Delivery::table(&db).is_empty());
    }

    #[test]
    fn delivery_fields_have_length_limits() {
        let mut delivery = Delivery::new(1, None);
        delivery.address = AddressFields {
            street: Some("x".repeat(256)),
            remarks: Some("y".repeat(1000)),
            ..AddressFields::default()
        };
        assert_eq!(
            delivery.validate(),
            vec!["Street is too long (maximum is 255 characters)".to_string()]
        );
    }

    #[test]
    fn customer_email_must_look_like_an_address() {
        assert!(looks_like_email("ana@example.com"));
        assert!(!looks_like_email("ana@localhost"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("ana.example.com"));

        let customer = Customer::new("", "Cruz", "nope");
        assert_eq!(
            customer.validate(),
            vec!["First name can't be blank".to_string(), "Email is invalid".to_string()]
        );
    }
}

//! Order-management core for a point-of-sale backend.
//!
//! Products, customers, orders and deliveries live in an in-process store
//! owned by a single actor. Clients talk to it over channels; every write is
//! a transaction that either fully applies or leaves the store untouched.

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod integrations;
pub mod ordering;
pub mod pricing;
pub mod store;

#[cfg(test)]
mod mock_framework;

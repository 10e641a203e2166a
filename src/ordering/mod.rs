//! Order placement and mutation.
//!
//! Everything below [`coordinator`] is synchronous and operates on a
//! `&mut Database` borrowed from inside a store transaction.

pub mod builder;
pub mod coordinator;
pub mod delivery;
pub mod mutator;

pub use builder::{build_order, resolve_total};
pub use coordinator::{place, place_order, remove, revise};
pub use delivery::{find_or_create, has_delivery_info, link_default_delivery};
pub use mutator::{delete_orders, update_order, DeleteTarget};

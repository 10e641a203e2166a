pub mod checkout;
pub mod customer;
pub mod delivery;
pub mod identity;
pub mod order;
pub mod patch;
pub mod product;

pub use checkout::*;
pub use customer::*;
pub use delivery::*;
pub use identity::*;
pub use order::*;
pub use patch::*;
pub use product::*;

/// Primary key shared by every table.
pub type Id = u64;

/// Treats empty and whitespace-only strings as absent.
pub fn presence(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

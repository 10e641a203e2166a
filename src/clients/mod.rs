//! Async facades over the store actor and the external collaborators.
//!
//! Mutations take the caller's [`Identity`](crate::domain::Identity) and
//! always answer with a payload; reads return `Result` directly.

#[macro_use]
mod macros;

pub mod customer_client;
pub mod notification_client;
pub mod order_client;
pub mod product_client;
pub mod upload_client;

pub use customer_client::*;
pub use notification_client::*;
pub use order_client::*;
pub use product_client::*;
pub use upload_client::*;

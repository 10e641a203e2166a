//! Collaborators outside the process: blob storage for product images and
//! the notifier for order confirmation emails.

pub mod blob;
pub mod notifier;

pub use blob::*;
pub use notifier::*;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntegrationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Blob storage error: {0}")]
    Storage(String),
    #[error("Notifier error: {0}")]
    Delivery(String),
}

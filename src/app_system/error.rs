use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::integrations::IntegrationError;
use crate::pricing::PricingError;
use crate::store::StoreError;

/// Errors that can occur during a mutation.
///
/// Every variant is recovered at the client boundary and turned into a
/// payload; none of them reaches the transport layer as a fault.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MutationError {
    /// A referenced row does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Input was rejected; one message per problem.
    #[error("Validation failed: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),
    /// A reference constraint blocked the write.
    #[error("{0}")]
    ConstraintViolation(String),
    /// The store or an external collaborator failed.
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),
}

impl MutationError {
    pub fn not_found(message: impl Into<String>) -> Self {
        MutationError::NotFound(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        MutationError::ValidationFailed(vec![message.into()])
    }

    /// User-facing messages for a payload's `errors` list.
    pub fn messages(&self) -> Vec<String> {
        match self {
            MutationError::ValidationFailed(messages) => messages.clone(),
            MutationError::NotFound(message) | MutationError::ConstraintViolation(message) => {
                vec![message.clone()]
            }
            MutationError::Infrastructure(reason) => vec![reason.clone()],
        }
    }
}

impl From<StoreError> for MutationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => MutationError::NotFound(e.to_string()),
            StoreError::Invalid(messages) => MutationError::ValidationFailed(messages),
            StoreError::ForeignKeyViolation { .. } => MutationError::ConstraintViolation(
                "Unable to complete the operation because related records exist.".to_string(),
            ),
            StoreError::Unavailable(inner) => MutationError::Infrastructure(inner.to_string()),
        }
    }
}

impl From<FrameworkError> for MutationError {
    fn from(e: FrameworkError) -> Self {
        MutationError::Infrastructure(e.to_string())
    }
}

impl From<PricingError> for MutationError {
    fn from(e: PricingError) -> Self {
        MutationError::invalid(e.to_string())
    }
}

impl From<IntegrationError> for MutationError {
    fn from(e: IntegrationError) -> Self {
        MutationError::Infrastructure(e.to_string())
    }
}

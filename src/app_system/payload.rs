use serde::Serialize;
use tracing::{error, warn};

use super::MutationError;

/// Result of a mutation returning an entity: `{ entity, errors }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityPayload<T> {
    pub entity: Option<T>,
    pub errors: Vec<String>,
}

impl<T> EntityPayload<T> {
    pub fn ok(entity: T) -> Self {
        Self { entity: Some(entity), errors: Vec::new() }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self { entity: None, errors }
    }

    /// Converts a mutation result, replacing infrastructure details with
    /// `generic` so internal failures are never shown to the caller.
    pub fn from_result(result: Result<T, MutationError>, generic: &str) -> Self {
        match result {
            Ok(entity) => Self::ok(entity),
            Err(e) => Self::failure(user_errors(e, generic)),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.entity.is_some() && self.errors.is_empty()
    }
}

/// Result of a mutation without an entity: `{ success, errors }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessPayload {
    pub success: bool,
    pub errors: Vec<String>,
}

impl SuccessPayload {
    pub fn ok() -> Self {
        Self { success: true, errors: Vec::new() }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self { success: false, errors }
    }

    pub fn from_result(result: Result<(), MutationError>, generic: &str) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(e) => Self::failure(user_errors(e, generic)),
        }
    }
}

fn user_errors(e: MutationError, generic: &str) -> Vec<String> {
    match e {
        MutationError::Infrastructure(reason) => {
            error!(error = %reason, "{}", generic);
            vec![generic.to_string()]
        }
        other => {
            warn!(error = %other, "Mutation rejected");
            other.messages()
        }
    }
}

use std::fmt;

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

/// Who is performing a mutation.
///
/// Resolved by the transport layer and handed to every mutation explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    User { id: Id, role: Role },
}

impl Identity {
    pub fn user(id: Id) -> Self {
        Identity::User { id, role: Role::User }
    }

    pub fn admin(id: Id) -> Self {
        Identity::User { id, role: Role::Admin }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Anonymous => f.write_str("anonymous"),
            Identity::User { id, role: Role::User } => write!(f, "user:{}", id),
            Identity::User { id, role: Role::Admin } => write!(f, "admin:{}", id),
        }
    }
}

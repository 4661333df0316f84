//! The caller identity handed to admin operations.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;

/// An authenticated caller, as resolved by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Caller identity. Recorded as `userId` in change-log entries.
    pub email: String,
    pub role: String,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Require an admin session: `None` is unauthorized, any other role forbidden.
pub fn authorize(actor: Option<&Actor>) -> Result<&Actor, CoreError> {
    let actor = actor.ok_or_else(|| CoreError::Unauthorized("Sign-in required".into()))?;
    if !actor.is_admin() {
        return Err(CoreError::Forbidden("Admin role required".into()));
    }
    Ok(actor)
}

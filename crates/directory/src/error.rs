//! Directory error model.

use thiserror::Error;

use coverdesk_core::{Action, Resource};

/// Error returned by role and permission directory operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Input failed validation (e.g. empty name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced role or permission does not exist.
    #[error("not found")]
    NotFound,

    /// A permission for this `(resource, action)` pair already exists.
    #[error("permission already exists for {resource}:{action}")]
    Duplicate { resource: Resource, action: Action },
}

impl DirectoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(resource: Resource, action: Action) -> Self {
        Self::Duplicate { resource, action }
    }
}

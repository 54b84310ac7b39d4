// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use taxi_ledger::CoreError;
use taxi_ledger_domain::{DomainError, ErrorKind};
use taxi_ledger_persistence::PersistenceError;
use thiserror::Error;

/// Authorization errors raised before any record is read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The principal's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The driver lies outside the principal's visible scope.
    OutOfScope {
        /// The action that was attempted.
        action: String,
        /// The driver the action targeted.
        driver_id: i64,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::OutOfScope { action, driver_id } => {
                write!(f, "Unauthorized: driver {driver_id} is outside your scope for '{action}'")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// Every variant carries a message that can be shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// A human-readable description of the error.
        message: String,
    },
    /// The request conflicts with the current state of the ledger.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The principal may not perform the action.
    #[error("{message}")]
    Unauthorized {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A collaborator or a patch step failed.
    #[error("Dependency failure: {message}")]
    Dependency {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Returns the error kind, or `None` for internal errors.
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidInput { .. } => Some(ErrorKind::Validation),
            Self::Conflict { .. } => Some(ErrorKind::Conflict),
            Self::Unauthorized { .. } => Some(ErrorKind::Authorization),
            Self::ResourceNotFound { .. } => Some(ErrorKind::NotFound),
            Self::Dependency { .. } => Some(ErrorKind::Dependency),
            Self::Internal { .. } => None,
        }
    }

    pub(crate) fn not_found(resource_type: &str, message: String) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Unauthorized {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::UniqueViolation(msg) => Self::Conflict {
                message: format!("Record already exists: {msg}"),
            },
            PersistenceError::NotFound(msg) => Self::not_found("Record", msg),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

/// Translates a domain error into an API error by kind.
///
/// The domain error's own message is kept so the caller can render it.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err.kind() {
        ErrorKind::Validation => ApiError::InvalidInput { message },
        ErrorKind::Conflict => ApiError::Conflict { message },
        ErrorKind::Authorization => ApiError::Unauthorized { message },
        ErrorKind::NotFound => ApiError::not_found("Record", message),
        ErrorKind::Dependency => ApiError::Dependency { message },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Maps a failed insert to the domain conflict it stands for.
///
/// A unique violation means a concurrent writer won the race; any other
/// failure is passed through unchanged.
pub(crate) fn conflict_on_unique(err: PersistenceError, conflict: DomainError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => translate_domain_error(conflict),
        other => ApiError::from(other),
    }
}

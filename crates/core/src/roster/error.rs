use thiserror::Error;

use crate::storage::{repository_error_to_status_code, RepositoryError};

/// Failures surfaced by the roster engines.
///
/// The engines return these as typed values; only the HTTP layer converts
/// them into a caller-visible status and fixed message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A teacher or student row required for validation was absent.
    #[error("{entity_type} not found{}", .email.as_deref().map(|e| format!(": {e}")).unwrap_or_default())]
    ReferenceNotFound {
        entity_type: &'static str,
        email: Option<String>,
    },
    /// A query's scope collapsed to nothing (e.g. zero teachers exist).
    #[error("no {entity_type} found")]
    NoData { entity_type: &'static str },
    /// The request violated a precondition before reaching the store.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The backing store call itself failed.
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl RosterError {
    pub fn reference_not_found(entity_type: &'static str) -> Self {
        Self::ReferenceNotFound {
            entity_type,
            email: None,
        }
    }

    pub fn reference_not_found_with_email(
        entity_type: &'static str,
        email: impl Into<String>,
    ) -> Self {
        Self::ReferenceNotFound {
            entity_type,
            email: Some(email.into()),
        }
    }

    pub fn no_data(entity_type: &'static str) -> Self {
        Self::NoData { entity_type }
    }
}

/// Maps a [`RosterError`] to an HTTP status code.
///
/// All "expected entity absent" conditions map to 404; store faults keep
/// their repository mapping (503 for connection failures, 500 otherwise).
pub fn roster_error_to_status_code(error: &RosterError) -> u16 {
    match error {
        RosterError::ReferenceNotFound { .. } => 404,
        RosterError::NoData { .. } => 404,
        RosterError::InvalidRequest(_) => 400,
        RosterError::Store(e) => repository_error_to_status_code(e),
    }
}

//! Application state shared across request handlers.
//!
//! The state holds the roster facade behind an `Arc`; the storage backend
//! behind it is injected once at process start (see `main.rs`) rather than
//! living in ambient global state.

use std::sync::Arc;

use roster_core::roster::RosterService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RosterService>,
}

impl AppState {
    /// Creates state over any repository implementing all three roster
    /// repository traits.
    pub fn with_repository<R>(repository: Arc<R>) -> Self
    where
        R: roster_core::storage::StudentRepository
            + roster_core::storage::TeacherRepository
            + roster_core::storage::RegistrationRepository
            + 'static,
    {
        Self {
            roster: Arc::new(RosterService::new(
                repository.clone(),
                repository.clone(),
                repository,
            )),
        }
    }

    /// Creates state backed by the in-memory repository.
    #[cfg(feature = "inmemory")]
    pub fn inmemory() -> Self {
        Self::with_repository(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}

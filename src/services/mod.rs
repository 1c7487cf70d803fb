//! Business logic services

pub mod library;
pub mod notifier;
pub mod search;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, AppResult};

pub use library::LibraryService;

/// Library service shared between collaborators.
///
/// Each operation should run under a single `lock()` so that the
/// check-then-act sequences of lending and returning stay atomic. Observers
/// are called while the lock is held and must not lock the library again.
#[derive(Clone, Debug, Default)]
pub struct SharedLibrary(Arc<Mutex<LibraryService>>);

impl SharedLibrary {
    pub fn new(service: LibraryService) -> Self {
        Self(Arc::new(Mutex::new(service)))
    }

    pub fn lock(&self) -> AppResult<MutexGuard<'_, LibraryService>> {
        self.0
            .lock()
            .map_err(|_| AppError::Internal("library state lock poisoned".to_string()))
    }
}

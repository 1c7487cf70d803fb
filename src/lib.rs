//! Library catalog
//!
//! In-memory management of a small library: books, readers and librarians,
//! lending and returning, search, and notifications on every catalog event.

use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::config::AppConfig;
pub use error::{AppError, AppResult};
pub use services::{LibraryService, SharedLibrary};

/// Application state handed to the console
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub library: SharedLibrary,
}

impl AppState {
    /// Build the shared library according to the configuration
    pub fn new(config: AppConfig) -> Self {
        let mut service = LibraryService::with_policy(config.notifications.delivery);
        if config.notifications.console {
            service.add_observer(Arc::new(cli::NotificationPrinter));
        }
        Self {
            config: Arc::new(config),
            library: SharedLibrary::new(service),
        }
    }
}

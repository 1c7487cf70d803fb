//! Error types for the library catalog

use thiserror::Error;

/// Stable numeric codes shown next to error messages in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    ItemAlreadyExists = 16,
    BadValue = 18,
    UserIdentificationAlreadyExists = 19,
    InvalidReturn = 22,
    NotificationFailure = 23,
    ConfigFailure = 24,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book '{title}' by {author} already exists")]
    DuplicateBook { title: String, author: String },

    #[error("User '{name}' ({role}) already exists")]
    DuplicateUser { name: String, role: String },

    #[error("Book '{title}' by {author} is not in the catalog")]
    BookNotFound { title: String, author: String },

    #[error("Book '{title}' by {author} is already lent")]
    BookUnavailable { title: String, author: String },

    #[error("Book '{title}' cannot be returned by {name}")]
    InvalidReturn { title: String, name: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::DuplicateBook { .. } => ErrorCode::ItemAlreadyExists,
            AppError::DuplicateUser { .. } => ErrorCode::UserIdentificationAlreadyExists,
            AppError::BookNotFound { .. } => ErrorCode::NoSuchItem,
            AppError::BookUnavailable { .. } => ErrorCode::ItemNotAvailable,
            AppError::InvalidReturn { .. } => ErrorCode::InvalidReturn,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Notification(_) => ErrorCode::NotificationFailure,
            AppError::Config(_) => ErrorCode::ConfigFailure,
            AppError::Io(_) | AppError::Internal(_) => ErrorCode::Failure,
        }
    }

    /// True for failures caused by the caller's request rather than the environment
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_)
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

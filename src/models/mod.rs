//! Data models for the library catalog

pub mod book;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, NewBook};
pub use loan::{Availability, Loan};
pub use user::{NewUser, Role, User};

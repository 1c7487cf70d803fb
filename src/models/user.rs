//! User model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    services::notifier::Observer,
};

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Reader,
    Librarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "librarian" => Ok(Role::Librarian),
            _ => Err(AppError::Validation(format!("Unknown user role: {}", s))),
        }
    }
}

/// Registered person, identified by name and role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    pub fn reader(name: impl Into<String>) -> Self {
        Self::new(name, Role::Reader)
    }

    pub fn librarian(name: impl Into<String>) -> Self {
        Self::new(name, Role::Librarian)
    }

    pub fn is_librarian(&self) -> bool {
        self.role == Role::Librarian
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}

impl Observer for User {
    fn notify(&self, message: &str) -> AppResult<()> {
        tracing::info!(user = %self.name, role = %self.role, "{} received notification: {}", self.name, message);
        Ok(())
    }
}

/// Registration form as typed in the console
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub role: String,
}

impl NewUser {
    /// Validate the form and build the user
    pub fn into_user(self) -> AppResult<User> {
        self.validate()?;
        let role = self.role.parse::<Role>()?;
        Ok(User::new(self.name, role))
    }
}

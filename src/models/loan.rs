//! Loan (lending record) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Current holder of a lent book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub borrower: User,
    pub date: DateTime<Utc>,
}

impl Loan {
    pub fn new(borrower: User) -> Self {
        Self {
            borrower,
            date: Utc::now(),
        }
    }
}

/// Lending state of a catalog book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability<'a> {
    Available,
    Lent(&'a User),
}

impl Availability<'_> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

impl std::fmt::Display for Availability<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Lent(user) => write!(f, "lent to {}", user.name),
        }
    }
}

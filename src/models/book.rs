//! Book (catalog entry) model

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;

/// A catalog entry.
///
/// Two books are the same catalog entry when they share title and author;
/// the genre does not take part in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: Some(genre.into()),
        }
    }

    /// Book without a genre
    pub fn untyped(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: None,
        }
    }

    /// Genre as text, empty when unknown
    pub fn genre_str(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.author == other.author
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.author.hash(state);
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.genre {
            Some(genre) if !genre.is_empty() => {
                write!(f, "'{}' by {}, genre: {}", self.title, self.author, genre)
            }
            _ => write!(f, "'{}' by {}", self.title, self.author),
        }
    }
}

/// Add book form as typed in the console
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    pub genre: Option<String>,
}

impl NewBook {
    /// Validate the form and build the book; a blank genre becomes `None`
    pub fn into_book(self) -> AppResult<Book> {
        self.validate()?;
        Ok(Book {
            title: self.title,
            author: self.author,
            genre: self.genre.filter(|g| !g.trim().is_empty()),
        })
    }
}

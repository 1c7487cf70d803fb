//! Book search strategies

use crate::{error::AppError, models::Book};

/// Extracts the text a strategy matches against
pub type FieldAccessor = fn(&Book) -> &str;

fn title(book: &Book) -> &str {
    &book.title
}

fn author(book: &Book) -> &str {
    &book.author
}

fn genre(book: &Book) -> &str {
    book.genre_str()
}

/// Field a search runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Title,
    Author,
    Genre,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [SearchKind::Title, SearchKind::Author, SearchKind::Genre];

    pub fn field(self) -> FieldAccessor {
        match self {
            SearchKind::Title => title,
            SearchKind::Author => author,
            SearchKind::Genre => genre,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Title => "title",
            SearchKind::Author => "author",
            SearchKind::Genre => "genre",
        }
    }

    /// Books whose field contains `query`, ignoring case
    pub fn search<'a>(self, books: &'a [Book], query: &str) -> Vec<&'a Book> {
        search_by(books, self.field(), query)
    }
}

impl std::str::FromStr for SearchKind {
    type Err = AppError;

    /// Accepts the menu number or the field name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "title" => Ok(SearchKind::Title),
            "2" | "author" => Ok(SearchKind::Author),
            "3" | "genre" => Ok(SearchKind::Genre),
            _ => Err(AppError::Validation(format!("Unknown search type: {}", s))),
        }
    }
}

/// Case-insensitive substring match of `query` against one field.
///
/// An empty query matches every book. Input order and duplicates are kept.
pub fn search_by<'a>(books: &'a [Book], field: FieldAccessor, query: &str) -> Vec<&'a Book> {
    let needle = query.to_lowercase();
    books
        .iter()
        .filter(|book| field(book).to_lowercase().contains(&needle))
        .collect()
}

//! Library service: owner of the catalog, its users and the lending map

use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    config::DeliveryPolicy,
    error::{AppError, AppResult},
    models::{Availability, Book, Loan, Role, User},
    services::{
        notifier::{Notifier, Observer, ObserverId},
        search::SearchKind,
    },
};

/// Catalog book with its lending status, for display and export
#[derive(Debug, Clone, Serialize)]
pub struct BookStatus {
    #[serde(flatten)]
    pub book: Book,
    pub borrower: Option<String>,
    pub lent_at: Option<DateTime<Utc>>,
}

/// Serializable view of the whole catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub books: Vec<BookStatus>,
    pub users: Vec<User>,
}

/// Every mutation of books, users and loans goes through this service, so the
/// catalog invariants hold whenever it is observable.
#[derive(Debug, Default)]
pub struct LibraryService {
    books: Vec<Book>,
    users: Vec<User>,
    lending: IndexMap<Book, Loan>,
    notifier: Notifier,
}

impl LibraryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DeliveryPolicy) -> Self {
        Self {
            notifier: Notifier::new(policy),
            ..Self::default()
        }
    }

    /// Add a book unless one with the same title and author exists
    pub fn add_book(&mut self, book: Book) -> AppResult<()> {
        if self.books.contains(&book) {
            tracing::debug!(title = %book.title, author = %book.author, "Rejected duplicate book");
            return Err(AppError::DuplicateBook {
                title: book.title,
                author: book.author,
            });
        }

        let message = format!("book added: {} by {}", book.title, book.author);
        tracing::info!(title = %book.title, author = %book.author, "Book added");
        self.books.push(book);
        self.notifier.notify_all(&message)
    }

    /// Register a user unless one with the same name and role exists
    pub fn register_user(&mut self, user: User) -> AppResult<()> {
        if self.users.contains(&user) {
            tracing::debug!(name = %user.name, role = %user.role, "Rejected duplicate user");
            return Err(AppError::DuplicateUser {
                name: user.name,
                role: user.role.to_string(),
            });
        }

        let message = format!("user registered: {}", user.name);
        tracing::info!(name = %user.name, role = %user.role, "User registered");
        self.users.push(user);
        self.notifier.notify_all(&message)
    }

    /// Books currently lent to `user`, in lending order
    pub fn get_books_for_user(&self, user: &User) -> Vec<&Book> {
        self.lending
            .iter()
            .filter(|(_, loan)| loan.borrower == *user)
            .map(|(book, _)| book)
            .collect()
    }

    /// Lend a catalog book that nobody currently holds
    pub fn lend_book(&mut self, book: &Book, user: &User) -> AppResult<()> {
        let stored = self
            .books
            .iter()
            .find(|b| *b == book)
            .cloned()
            .ok_or_else(|| AppError::BookNotFound {
                title: book.title.clone(),
                author: book.author.clone(),
            })?;

        if let Some(loan) = self.lending.get(&stored) {
            tracing::debug!(
                title = %stored.title,
                holder = %loan.borrower.name,
                "Rejected lend of unavailable book"
            );
            return Err(AppError::BookUnavailable {
                title: stored.title,
                author: stored.author,
            });
        }

        let message = format!("lent: {} to {}", stored.title, user.name);
        tracing::info!(title = %stored.title, borrower = %user.name, "Book lent");
        self.lending.insert(stored, Loan::new(user.clone()));
        self.notifier.notify_all(&message)
    }

    /// Take a book back from the user currently holding it
    pub fn return_book(&mut self, book: &Book, user: &User) -> AppResult<()> {
        match self.lending.get(book) {
            Some(loan) if loan.borrower == *user => {}
            _ => {
                tracing::debug!(title = %book.title, name = %user.name, "Rejected return");
                return Err(AppError::InvalidReturn {
                    title: book.title.clone(),
                    name: user.name.clone(),
                });
            }
        }

        self.lending.shift_remove(book);
        tracing::info!(title = %book.title, borrower = %user.name, "Book returned");
        self.notifier
            .notify_all(&format!("returned: {} by {}", book.title, user.name))
    }

    pub fn add_observer(&mut self, observer: Arc<dyn Observer>) -> ObserverId {
        self.notifier.add(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) {
        self.notifier.remove(id);
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Current loans, in lending order
    pub fn lending(&self) -> impl Iterator<Item = (&Book, &Loan)> {
        self.lending.iter()
    }

    pub fn borrower_of(&self, book: &Book) -> Option<&User> {
        self.lending.get(book).map(|loan| &loan.borrower)
    }

    pub fn availability(&self, book: &Book) -> Availability<'_> {
        match self.borrower_of(book) {
            Some(user) => Availability::Lent(user),
            None => Availability::Available,
        }
    }

    pub fn find_user(&self, name: &str, role: Role) -> Option<&User> {
        self.users.iter().find(|u| u.name == name && u.role == role)
    }

    /// Run a search strategy over the catalog
    pub fn search(&self, kind: SearchKind, query: &str) -> Vec<&Book> {
        kind.search(&self.books, query)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        let books = self
            .books
            .iter()
            .map(|book| {
                let loan = self.lending.get(book);
                BookStatus {
                    book: book.clone(),
                    borrower: loan.map(|l| l.borrower.name.clone()),
                    lent_at: loan.map(|l| l.date),
                }
            })
            .collect();

        CatalogSnapshot {
            books,
            users: self.users.clone(),
        }
    }
}

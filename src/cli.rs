//! Interactive text menu driving the library service

use std::io::{self, BufRead, Write};

use crate::{
    error::{AppError, AppResult},
    models::{Availability, Book, NewBook, NewUser, User},
    services::{notifier::Observer, search::SearchKind, SharedLibrary},
};

/// Prints every catalog notification on standard output
#[derive(Debug, Default)]
pub struct NotificationPrinter;

impl Observer for NotificationPrinter {
    fn notify(&self, message: &str) -> AppResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "[notification]: {}", message)
            .map_err(|e| AppError::Notification(e.to_string()))
    }
}

/// Where the menu loop stands after handling one choice
#[derive(Debug, Clone, PartialEq, Eq)]
enum Session {
    Anonymous,
    LoggedIn(User),
    Quit,
}

/// Menu loop reading choices from `input` and writing to `output`
pub struct Console<R, W> {
    library: SharedLibrary,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(library: SharedLibrary, input: R, output: W) -> Self {
        Self {
            library,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> AppResult<()> {
        let mut session = Session::Anonymous;
        loop {
            let next = match &session {
                Session::Anonymous => self.main_menu(),
                Session::LoggedIn(user) if user.is_librarian() => self.librarian_menu(user.clone()),
                Session::LoggedIn(user) => self.reader_menu(user.clone()),
                Session::Quit => break,
            };

            session = match next {
                Ok(next) => next,
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "error [{}]: {}", e.code() as u32, e)?;
                    session
                }
                Err(e) => return Err(e),
            };
        }
        tracing::debug!("Console session ended");
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one trimmed line; `None` once input is exhausted
    fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Let the user pick one entry by number; `q` or end of input cancels
    fn choose<T: Clone + std::fmt::Display>(&mut self, items: &[T], item_name: &str) -> AppResult<Option<T>> {
        if items.is_empty() {
            writeln!(self.output, "No {} available.", item_name)?;
            return Ok(None);
        }
        writeln!(self.output, "Choose {}:", item_name)?;
        for (idx, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", idx + 1, item)?;
        }
        loop {
            let Some(choice) = self.prompt(&format!("Enter {} number (or 'q' to cancel)", item_name))? else {
                return Ok(None);
            };
            if choice.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match choice.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(items.get(n - 1).cloned()),
                _ => writeln!(self.output, "Invalid choice, try again.")?,
            }
        }
    }

    fn main_menu(&mut self) -> AppResult<Session> {
        writeln!(self.output, "\n--- Main menu ---")?;
        writeln!(self.output, "1. Register")?;
        writeln!(self.output, "2. Log in")?;
        writeln!(self.output, "0. Quit")?;

        let Some(choice) = self.prompt("Choose an option")? else {
            return Ok(Session::Quit);
        };
        match choice.as_str() {
            "1" => self.register(),
            "2" => self.login(),
            "0" => {
                writeln!(self.output, "Goodbye.")?;
                Ok(Session::Quit)
            }
            _ => {
                writeln!(self.output, "Unknown command, try again.")?;
                Ok(Session::Anonymous)
            }
        }
    }

    fn register(&mut self) -> AppResult<Session> {
        writeln!(self.output, "\n--- Register ---")?;
        let Some(name) = self.prompt("Name")? else {
            return Ok(Session::Quit);
        };
        let Some(role) = self.prompt("Role (reader/librarian)")? else {
            return Ok(Session::Quit);
        };

        let user = NewUser { name, role }.into_user()?;
        let result = self.library.lock()?.register_user(user.clone());
        self.applied(result)?;
        writeln!(self.output, "Registered {}.", user)?;
        Ok(Session::LoggedIn(user))
    }

    fn login(&mut self) -> AppResult<Session> {
        let users = self.library.lock()?.users().to_vec();
        if users.is_empty() {
            writeln!(self.output, "No registered users yet. Please register.")?;
            return Ok(Session::Anonymous);
        }
        writeln!(self.output, "\n--- Log in ---")?;
        match self.choose(&users, "user")? {
            Some(user) => {
                writeln!(self.output, "Logged in as {}.", user)?;
                Ok(Session::LoggedIn(user))
            }
            None => Ok(Session::Anonymous),
        }
    }

    fn librarian_menu(&mut self, librarian: User) -> AppResult<Session> {
        writeln!(self.output, "\n--- Library menu ({}, librarian) ---", librarian.name)?;
        writeln!(self.output, "1. Add a book")?;
        writeln!(self.output, "2. Show all books")?;
        writeln!(self.output, "3. Show all users")?;
        writeln!(self.output, "4. Export catalog as JSON")?;
        writeln!(self.output, "0. Log out")?;

        let Some(choice) = self.prompt("Choose an option")? else {
            return Ok(Session::Quit);
        };
        match choice.as_str() {
            "1" => self.add_book()?,
            "2" => self.show_books()?,
            "3" => {
                let users = self.library.lock()?.users().to_vec();
                if users.is_empty() {
                    writeln!(self.output, "No users.")?;
                } else {
                    writeln!(self.output, "Registered users:")?;
                    for user in users {
                        writeln!(self.output, "- {}", user)?;
                    }
                }
            }
            "4" => {
                let snapshot = self.library.lock()?.snapshot();
                let json = serde_json::to_string_pretty(&snapshot)
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                writeln!(self.output, "{}", json)?;
            }
            "0" => {
                writeln!(self.output, "Logged out {}.", librarian.name)?;
                return Ok(Session::Anonymous);
            }
            _ => writeln!(self.output, "Unknown command, try again.")?,
        }
        Ok(Session::LoggedIn(librarian))
    }

    fn reader_menu(&mut self, reader: User) -> AppResult<Session> {
        writeln!(self.output, "\n--- Library menu ({}, reader) ---", reader.name)?;
        writeln!(self.output, "1. Borrow a book")?;
        writeln!(self.output, "2. Return a book")?;
        writeln!(self.output, "3. Show all books")?;
        writeln!(self.output, "4. Show my books")?;
        writeln!(self.output, "5. Search books")?;
        writeln!(self.output, "0. Log out")?;

        let Some(choice) = self.prompt("Choose an option")? else {
            return Ok(Session::Quit);
        };
        match choice.as_str() {
            "1" => {
                let books = self.library.lock()?.books().to_vec();
                if let Some(book) = self.choose(&books, "book")? {
                    let result = self.library.lock()?.lend_book(&book, &reader);
                    self.applied(result)?;
                    writeln!(self.output, "You borrowed {}.", book)?;
                }
            }
            "2" => {
                let mine = self.books_of(&reader)?;
                if mine.is_empty() {
                    writeln!(self.output, "You have no borrowed books.")?;
                } else if let Some(book) = self.choose(&mine, "book to return")? {
                    let result = self.library.lock()?.return_book(&book, &reader);
                    self.applied(result)?;
                    writeln!(self.output, "You returned {}.", book)?;
                }
            }
            "3" => self.show_books()?,
            "4" => {
                let mine = self.books_of(&reader)?;
                if mine.is_empty() {
                    writeln!(self.output, "You have no borrowed books.")?;
                } else {
                    writeln!(self.output, "Your books:")?;
                    for book in mine {
                        writeln!(self.output, "- {}", book)?;
                    }
                }
            }
            "5" => self.search()?,
            "0" => {
                writeln!(self.output, "Logged out {}.", reader.name)?;
                return Ok(Session::Anonymous);
            }
            _ => writeln!(self.output, "Unknown command, try again.")?,
        }
        Ok(Session::LoggedIn(reader))
    }

    /// Outcome of a catalog change. A failed notification does not undo the
    /// change, so it is shown as a warning and the change is reported as done.
    fn applied(&mut self, result: AppResult<()>) -> AppResult<()> {
        match result {
            Err(AppError::Notification(reason)) => {
                tracing::warn!("Catalog change applied but notification failed: {}", reason);
                writeln!(self.output, "warning: notification failed: {}", reason)?;
                Ok(())
            }
            other => other,
        }
    }

    fn books_of(&self, user: &User) -> AppResult<Vec<Book>> {
        Ok(self
            .library
            .lock()?
            .get_books_for_user(user)
            .into_iter()
            .cloned()
            .collect())
    }

    fn add_book(&mut self) -> AppResult<()> {
        let (Some(title), Some(author), Some(genre)) = (
            self.prompt("Title")?,
            self.prompt("Author")?,
            self.prompt("Genre")?,
        ) else {
            return Ok(());
        };

        let book = NewBook {
            title,
            author,
            genre: Some(genre),
        }
        .into_book()?;
        let result = self.library.lock()?.add_book(book);
        self.applied(result)?;
        writeln!(self.output, "Book added.")?;
        Ok(())
    }

    fn show_books(&mut self) -> AppResult<()> {
        let lines = {
            let library = self.library.lock()?;
            library
                .books()
                .iter()
                .map(|book| status_line(book, &library.availability(book)))
                .collect::<Vec<_>>()
        };
        if lines.is_empty() {
            writeln!(self.output, "No books.")?;
        } else {
            writeln!(self.output, "Books in the library:")?;
            for line in lines {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }

    fn search(&mut self) -> AppResult<()> {
        writeln!(self.output, "\n--- Search ---")?;
        for (idx, kind) in SearchKind::ALL.iter().enumerate() {
            writeln!(self.output, "{}. By {}", idx + 1, kind.label())?;
        }
        let Some(choice) = self.prompt("Enter number")? else {
            return Ok(());
        };
        let kind = choice.parse::<SearchKind>()?;
        let Some(query) = self.prompt("Search query")? else {
            return Ok(());
        };

        let lines = {
            let library = self.library.lock()?;
            library
                .search(kind, &query)
                .into_iter()
                .map(|book| status_line(book, &library.availability(book)))
                .collect::<Vec<_>>()
        };
        if lines.is_empty() {
            writeln!(self.output, "No books found.")?;
        } else {
            writeln!(self.output, "Found books:")?;
            for line in lines {
                writeln!(self.output, "{}", line)?;
            }
        }
        Ok(())
    }
}

fn status_line(book: &Book, availability: &Availability<'_>) -> String {
    format!("- {} ({})", book, availability)
}

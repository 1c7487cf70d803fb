//! Catalog invariants and lending state machine

use library_catalog::{
    models::{Book, User},
    services::search::SearchKind,
    AppError, LibraryService,
};

fn clean_code() -> Book {
    Book::new("Clean Code", "Robert Martin", "Software")
}

#[test]
fn test_duplicate_book_rejected() {
    let mut library = LibraryService::new();
    library.add_book(clean_code()).unwrap();

    let err = library
        .add_book(Book::new("Clean Code", "Robert Martin", "Another genre"))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateBook { .. }));
    assert_eq!(library.books().len(), 1);

    // Same title, different author is a different book
    library
        .add_book(Book::new("Clean Code", "Someone Else", "Software"))
        .unwrap();
    assert_eq!(library.books().len(), 2);
}

#[test]
fn test_duplicate_user_rejected() {
    let mut library = LibraryService::new();
    library.register_user(User::reader("Anna")).unwrap();

    let err = library.register_user(User::reader("Anna")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateUser { .. }));

    let err = library.register_user(User::reader("Anna")).unwrap_err();
    assert!(matches!(err, AppError::DuplicateUser { .. }));

    // Same name with another role is a distinct user
    library.register_user(User::librarian("Anna")).unwrap();
    assert_eq!(library.users().len(), 2);
}

#[test]
fn test_lend_return_lend_again() {
    let mut library = LibraryService::new();
    let book = clean_code();
    let anna = User::reader("Anna");
    let ivan = User::reader("Ivan");
    library.add_book(book.clone()).unwrap();

    library.lend_book(&book, &anna).unwrap();
    assert_eq!(library.borrower_of(&book), Some(&anna));
    assert!(!library.availability(&book).is_available());

    library.return_book(&book, &anna).unwrap();
    assert!(library.availability(&book).is_available());
    assert!(library.get_books_for_user(&anna).is_empty());

    library.lend_book(&book, &ivan).unwrap();
    assert_eq!(library.get_books_for_user(&ivan), vec![&book]);
}

#[test]
fn test_lend_unknown_book() {
    let mut library = LibraryService::new();
    let err = library
        .lend_book(&clean_code(), &User::reader("Anna"))
        .unwrap_err();
    assert!(matches!(err, AppError::BookNotFound { .. }));
    assert_eq!(library.lending().count(), 0);
}

#[test]
fn test_lend_already_lent_book() {
    let mut library = LibraryService::new();
    let book = clean_code();
    library.add_book(book.clone()).unwrap();
    library.lend_book(&book, &User::reader("Anna")).unwrap();

    let err = library.lend_book(&book, &User::reader("Ivan")).unwrap_err();
    assert!(matches!(err, AppError::BookUnavailable { .. }));
    assert_eq!(library.borrower_of(&book).map(|u| u.name.as_str()), Some("Anna"));

    // The holder cannot borrow it twice either
    let err = library.lend_book(&book, &User::reader("Anna")).unwrap_err();
    assert!(matches!(err, AppError::BookUnavailable { .. }));
}

#[test]
fn test_invalid_returns() {
    let mut library = LibraryService::new();
    let book = clean_code();
    let anna = User::reader("Anna");
    let ivan = User::reader("Ivan");
    library.add_book(book.clone()).unwrap();

    // Never lent
    let err = library.return_book(&book, &anna).unwrap_err();
    assert!(matches!(err, AppError::InvalidReturn { .. }));

    // Lent to someone else
    library.lend_book(&book, &anna).unwrap();
    let err = library.return_book(&book, &ivan).unwrap_err();
    assert!(matches!(err, AppError::InvalidReturn { .. }));

    // A librarian with the holder's name is not the holder
    let err = library
        .return_book(&book, &User::librarian("Anna"))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReturn { .. }));
    assert_eq!(library.borrower_of(&book), Some(&anna));
}

#[test]
fn test_no_borrowing_limit() {
    let mut library = LibraryService::new();
    let anna = User::reader("Anna");
    for i in 0..20 {
        let book = Book::new(format!("Volume {}", i), "Anonymous", "Serial");
        library.add_book(book.clone()).unwrap();
        library.lend_book(&book, &anna).unwrap();
    }
    assert_eq!(library.get_books_for_user(&anna).len(), 20);
}

#[test]
fn test_search_by_author_in_insertion_order() {
    let mut library = LibraryService::new();
    library.add_book(clean_code()).unwrap();
    library
        .add_book(Book::new("Clean Architecture", "Robert Martin", "Software"))
        .unwrap();
    library
        .add_book(Book::new("Python Tricks", "Dan Bader", "Programming"))
        .unwrap();

    let found = SearchKind::Author.search(library.books(), "Robert Martin");
    let titles: Vec<&str> = found.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Clean Code", "Clean Architecture"]);

    assert_eq!(library.search(SearchKind::Title, "CLEAN").len(), 2);
    assert!(library.search(SearchKind::Title, "zz").is_empty());
}

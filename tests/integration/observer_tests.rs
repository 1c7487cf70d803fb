//! Notification fan-out on catalog events

use std::io;
use std::sync::{Arc, Mutex};

use mockall::{mock, predicate::*, Sequence};
use tracing::Level;

use library_catalog::{
    config::DeliveryPolicy,
    models::{Book, User},
    services::notifier::Observer,
    AppError, AppResult, LibraryService,
};

mock! {
    pub Listener {}

    impl Observer for Listener {
        fn notify(&self, message: &str) -> AppResult<()>;
    }
}

#[test]
fn test_observer_receives_until_removed() {
    let mut library = LibraryService::new();
    let mut ivan = MockListener::new();
    ivan.expect_notify()
        .withf(|message: &str| message.contains("book added"))
        .times(1)
        .returning(|_| Ok(()));

    let id = library.add_observer(Arc::new(ivan));
    library
        .add_book(Book::new("Design Patterns", "GoF", "Software"))
        .unwrap();

    library.remove_observer(id);
    library
        .add_book(Book::new("Python Advanced", "Expert", "Tech"))
        .unwrap();
}

#[test]
fn test_removed_observer_is_never_called() {
    let mut library = LibraryService::new();
    let mut marta = MockListener::new();
    marta.expect_notify().never();

    let id = library.add_observer(Arc::new(marta));
    library.remove_observer(id);
    library.remove_observer(id);

    library
        .add_book(Book::new("Python Advanced", "Expert", "Tech"))
        .unwrap();
}

#[test]
fn test_messages_for_each_event() {
    let mut library = LibraryService::new();
    let mut seq = Sequence::new();
    let mut listener = MockListener::new();
    for expected in [
        "book added: Dune by Frank Herbert",
        "user registered: Ivan",
        "lent: Dune to Ivan",
        "returned: Dune by Ivan",
    ] {
        listener
            .expect_notify()
            .with(eq(expected))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
    }
    library.add_observer(Arc::new(listener));

    let book = Book::new("Dune", "Frank Herbert", "Sci-Fi");
    let ivan = User::reader("Ivan");
    library.add_book(book.clone()).unwrap();
    library.register_user(ivan.clone()).unwrap();
    library.lend_book(&book, &ivan).unwrap();
    library.return_book(&book, &ivan).unwrap();
}

#[test]
fn test_failed_operations_do_not_notify() {
    let mut library = LibraryService::new();
    let book = Book::new("Dune", "Frank Herbert", "Sci-Fi");
    library.add_book(book.clone()).unwrap();
    library.register_user(User::reader("Ivan")).unwrap();

    let mut listener = MockListener::new();
    listener.expect_notify().never();
    library.add_observer(Arc::new(listener));

    assert!(library.add_book(book.clone()).is_err());
    assert!(library.register_user(User::reader("Ivan")).is_err());
    assert!(library
        .lend_book(&Book::untyped("Missing", "Nobody"), &User::reader("Ivan"))
        .is_err());
    assert!(library.return_book(&book, &User::reader("Ivan")).is_err());
}

/// Log sink shared between the test and the subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_user_acts_as_observer() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut library = LibraryService::new();
        let ivan = Arc::new(User::reader("Ivan"));
        let first = library.add_observer(ivan.clone());
        let second = library.add_observer(ivan.clone());
        assert_eq!(first, second);

        library
            .add_book(Book::new("Design Patterns", "GoF", "Software"))
            .unwrap();
        let delivered = logs.contents();
        assert_eq!(delivered.matches("Ivan received notification").count(), 1);
        assert!(delivered.contains("Ivan received notification: book added: Design Patterns by GoF"));

        library.remove_observer(first);
        library
            .add_book(Book::new("Python Advanced", "Expert", "Tech"))
            .unwrap();
        let after_removal = logs.contents();
        assert!(after_removal.contains("Python Advanced"));
        assert_eq!(after_removal.matches("Ivan received notification").count(), 1);
    });
}

#[test]
fn test_strict_delivery_propagates_after_mutation() {
    let mut library = LibraryService::with_policy(DeliveryPolicy::Strict);
    let mut broken = MockListener::new();
    broken
        .expect_notify()
        .returning(|_| Err(AppError::Notification("sink closed".to_string())));
    let mut later = MockListener::new();
    later.expect_notify().never();
    library.add_observer(Arc::new(broken));
    library.add_observer(Arc::new(later));

    let book = Book::new("Dune", "Frank Herbert", "Sci-Fi");
    let err = library.add_book(book.clone()).unwrap_err();
    assert!(matches!(err, AppError::Notification(_)));
    assert!(library.books().contains(&book));
}

#[test]
fn test_isolated_delivery_reaches_everyone() {
    let mut library = LibraryService::with_policy(DeliveryPolicy::Isolated);
    let mut broken = MockListener::new();
    broken
        .expect_notify()
        .times(1)
        .returning(|_| Err(AppError::Notification("sink closed".to_string())));
    let mut later = MockListener::new();
    later.expect_notify().times(1).returning(|_| Ok(()));
    library.add_observer(Arc::new(broken));
    library.add_observer(Arc::new(later));

    library
        .add_book(Book::new("Dune", "Frank Herbert", "Sci-Fi"))
        .unwrap();
}

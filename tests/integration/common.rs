//! Common fixtures for ability integration tests.
//!
//! Provides a `User`/`Book` domain, the `BookPolicy` registered for it, and
//! a factory wired the way an application would wire it at startup.

use std::sync::{
    Arc, Once,
    atomic::{AtomicUsize, Ordering},
};

use ability::{AbilityFactory, Policy, Subject};

/// Role granted every action on books by the pre-check.
pub const ADMIN: &str = "ADMIN";

/// Role allowed to create books.
pub const AUTHOR: &str = "AUTHOR";

/// Role with read access only.
pub const GUEST: &str = "GUEST";

/// The authenticated user checks are made for.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub role: &'static str,
}

impl User {
    pub fn new(id: u64, role: &'static str) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN
    }
}

/// A book owned by the user with `user_id`.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: u64,
    pub user_id: u64,
}

impl Subject for Book {
    fn subject_name() -> &'static str {
        "Book"
    }
}

/// A subject with no registered policy.
#[derive(Debug)]
pub struct Author;

impl Subject for Author {
    fn subject_name() -> &'static str {
        "Author"
    }
}

/// The policy for books.
///
/// - admins may do anything (pre-check)
/// - anyone may list and view
/// - authors may create
/// - owners may update and delete
pub fn book_policy() -> Policy<User> {
    Policy::builder::<Book>()
        .before(|user: &User, _action: &str| user.is_admin().then_some(true))
        .action("viewAny", |_, _| true)
        .action("view", |_, _| true)
        .action("create", |user: &User, _| user.role == AUTHOR)
        .instance_action("update", |user: &User, book: &Book| user.id == book.user_id)
        .instance_action("delete", |user: &User, book: &Book| user.id == book.user_id)
        .build()
}

/// Builds the factory with `BookPolicy` registered under "Book".
pub fn factory() -> AbilityFactory<User> {
    init_tracing();
    AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .build()
        .expect("factory should build")
}

/// Builds a factory whose `Book` constructor counts its invocations.
pub fn counting_factory() -> (AbilityFactory<User>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let factory = AbilityFactory::builder()
        .register("Book", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            book_policy()
        })
        .build()
        .expect("factory should build");
    (factory, calls)
}

/// Installs a test subscriber honoring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

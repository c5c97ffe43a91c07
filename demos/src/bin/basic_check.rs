//! Basic ability check demo.
//!
//! This demo shows the minimal usage pattern: register policies once, create
//! an ability per user, and ask it questions.
//!
//! # Running
//!
//! ```bash
//! cargo run --bin basic_check
//!
//! # With decision events
//! RUST_LOG=ability=debug cargo run --bin basic_check
//! ```

use ability::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct User {
    id: u64,
    role: &'static str,
}

#[derive(Debug, Subject)]
struct Book {
    id: u64,
    user_id: u64,
}

#[derive(Debug, Subject)]
#[subject(name = "Comment")]
struct BookComment {
    author_id: u64,
}

fn book_policy() -> Policy<User> {
    Policy::<User>::builder::<Book>()
        // Admins may do anything with books
        .before(|user, _action| (user.role == "ADMIN").then_some(true))
        .action("viewAny", |_, _| true)
        .action("view", |_, _| true)
        .action("create", |user, _| user.role == "AUTHOR")
        .instance_action("update", |user, book| user.id == book.user_id)
        .instance_action("delete", |user, book| user.id == book.user_id)
        .build()
}

fn comment_policy() -> Policy<User> {
    Policy::<User>::builder::<BookComment>()
        .action("create", |_, _| true)
        .instance_action("delete", |user, comment| user.id == comment.author_id)
        .build()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Build once at startup; fail fast if an expected action is missing
    let factory = AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .share("Comment", comment_policy())
        .config(FactoryConfig::strict())
        .build()?;

    factory.validate(&[
        ("Book", &["viewAny", "view", "create", "update", "delete"]),
        ("Comment", &["create", "delete"]),
    ])?;

    let alice = factory.create(User { id: 1, role: "AUTHOR" })?;
    let root = factory.create(User { id: 2, role: "ADMIN" })?;

    let book = Book { id: 10, user_id: 1 };
    let other = Book { id: 11, user_id: 3 };

    // Instance checks reach ownership rules
    println!("alice can update book {}: {}", book.id, alice.can("update", &book)?);
    println!("alice can update book {}: {}", other.id, alice.can("update", &other)?);

    // Name and type-marker checks do not carry an instance
    println!("alice can create a Book: {}", alice.can("create", "Book")?);
    println!("alice can update some Book: {}", alice.can("update", Book::subject_type())?);

    // The admin pre-check decides before any rule runs
    let decision = root.check("delete", &other)?;
    println!("{:?} delete book {}: {decision}", root.user(), other.id);

    let comment = BookComment { author_id: 2 };
    println!("alice cannot delete comment: {}", alice.cannot("delete", &comment)?);

    // authorize() turns a denial into an error for `?`
    match alice.authorize("delete", &other) {
        Ok(()) => println!("alice deleted book {}", other.id),
        Err(err) if err.kind() == ErrorKind::Forbidden => println!("{err}"),
        Err(err) => return Err(err),
    }

    // A missing action is a configuration error, never a denial
    if let Err(err) = alice.can("publish", &book) {
        println!("misconfigured: {err}");
    }

    println!("\nDemo complete!");
    Ok(())
}

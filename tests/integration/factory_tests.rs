//! Factory integration tests.
//!
//! Covers per-user creation, startup validation, and registration options.

use std::{fmt, sync::atomic::Ordering};

use ability::{AbilityFactory, DuplicatePolicy, ErrorKind, FactoryConfig, Policy};

use crate::common::{AUTHOR, Book, GUEST, User, book_policy, counting_factory, factory};

#[derive(Debug)]
struct StoreUnavailable;

impl fmt::Display for StoreUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("policy store unavailable")
    }
}

impl std::error::Error for StoreUnavailable {}

/// Test that each created ability gets its own policy instances
#[test]
fn test_create_per_user() {
    let (factory, calls) = counting_factory();

    let alice = factory.create(User::new(1, AUTHOR)).expect("create alice");
    let bob = factory.create_for_user(User::new(2, AUTHOR)).expect("create bob");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let book = Book { id: 1, user_id: 1 };
    assert!(alice.can("update", &book).expect("update"));
    assert!(bob.cannot("update", &book).expect("update"));
    assert_eq!(alice.user().id, 1);
    assert_eq!(bob.user().id, 2);
}

/// Test that the mapping constructor registers every pair
#[test]
fn test_new_from_mapping() {
    let factory = AbilityFactory::new([("Book", book_policy), ("Novel", book_policy)]);

    assert_eq!(factory.subject_names(), vec!["Book", "Novel"]);
    let ability = factory.create(User::new(1, GUEST)).expect("create");
    assert!(ability.can("view", "Novel").expect("view"));
}

/// Test startup validation of the expected action table
#[test]
fn test_validate_expected_actions() {
    let factory = factory();
    factory
        .validate(&[("Book", &["viewAny", "view", "create", "update", "delete"])])
        .expect("all book actions are defined");

    let err = factory.validate(&[("Book", &["publish"])]).expect_err("publish is missing");
    assert_eq!(err.kind(), ErrorKind::ActionNotFound);

    let err = factory.validate(&[("Author", &["view"])]).expect_err("Author is missing");
    assert_eq!(err.kind(), ErrorKind::PolicyNotFound);
}

/// Test that constructor failures keep their cause
#[test]
fn test_construction_failure_keeps_source() {
    let factory = AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .try_register("Report", || Err::<Policy<User>, _>(StoreUnavailable))
        .build()
        .expect("failures are deferred to create");

    let err = factory.create(User::new(1, GUEST)).expect_err("Report cannot be built");
    assert_eq!(err.kind(), ErrorKind::PolicyConstruction);
    assert_eq!(err.subject_name(), Some("Report"));

    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("policy store unavailable"));
}

/// Test that strict configuration catches mistakes at build time
#[test]
fn test_strict_config() {
    let err = AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .register("Book", book_policy)
        .config(FactoryConfig::strict())
        .build()
        .expect_err("Book is registered twice");
    assert_eq!(err.kind(), ErrorKind::DuplicatePolicy);

    let err = AbilityFactory::builder()
        .try_register("Report", || Err::<Policy<User>, _>(StoreUnavailable))
        .config(FactoryConfig::strict())
        .build()
        .expect_err("Report cannot be built");
    assert_eq!(err.kind(), ErrorKind::PolicyConstruction);
}

/// Test that a warned duplicate keeps the later registration
#[test]
fn test_warned_duplicate() {
    let deny_everything =
        || Policy::<User>::builder::<Book>().action("view", |_, _| false).build();

    let factory = AbilityFactory::builder()
        .register_subject::<Book>(book_policy)
        .register("Book", deny_everything)
        .config(FactoryConfig::builder().duplicates(DuplicatePolicy::Warn).build())
        .build()
        .expect("duplicates are allowed under Warn");

    assert_eq!(factory.config().duplicates, DuplicatePolicy::Warn);
    let ability = factory.create(User::new(1, GUEST)).expect("create");
    assert!(ability.cannot("view", "Book").expect("view"));
}

/// Test that a shared policy serves every created ability
#[test]
fn test_shared_policy() {
    let factory = AbilityFactory::builder().share("Book", book_policy()).build().expect("build");

    let author = factory.create(User::new(1, AUTHOR)).expect("create");
    let guest = factory.create(User::new(2, GUEST)).expect("create");

    assert!(author.can("create", "Book").expect("create"));
    assert!(guest.cannot("create", "Book").expect("create"));
    assert!(std::sync::Arc::ptr_eq(
        author.policy("Book").expect("registered"),
        guest.policy("Book").expect("registered"),
    ));
}

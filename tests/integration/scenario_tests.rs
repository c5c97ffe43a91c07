//! End-to-end scenarios over the book fixtures.

use ability::{DecisionReason, ErrorKind, Subject};

use crate::common::{ADMIN, AUTHOR, Book, GUEST, User, factory};

/// Scenario A: owners may update their own books only
#[test]
fn test_ownership() {
    let ability = factory().create(User::new(1, AUTHOR)).expect("create");

    let own = Book { id: 1, user_id: 1 };
    let foreign = Book { id: 1, user_id: 200 };

    assert!(ability.can("update", &own).expect("update own"));
    assert!(!ability.can("update", &foreign).expect("update foreign"));
    assert!(ability.cannot("delete", &foreign).expect("delete foreign"));
}

/// Scenario B: admins pass the pre-check even where the rule would deny
#[test]
fn test_admin_pre_check() {
    let factory = factory();
    let admin = factory.create(User::new(99, ADMIN)).expect("create admin");
    let guest = factory.create(User::new(2, GUEST)).expect("create guest");

    assert!(guest.cannot("create", "Book").expect("guest create"));

    let decision = admin.check("create", Book::subject_type()).expect("admin create");
    assert!(decision.is_allowed());
    assert_eq!(decision.reason(), DecisionReason::PreCheck);

    let foreign = Book { id: 5, user_id: 1 };
    assert!(admin.can("delete", &foreign).expect("admin delete"));
}

/// Scenario C: an undefined action is an error, not a denial
#[test]
fn test_undefined_action() {
    let ability = factory().create(User::new(1, ADMIN)).expect("create");

    let err = ability.can("publish", "Book").expect_err("publish is not defined");
    assert_eq!(err.kind(), ErrorKind::ActionNotFound);
    assert_eq!(err.action(), Some("publish"));
    assert_eq!(err.subject_name(), Some("Book"));
}

/// Guests may browse but not change anything
#[test]
fn test_guest_permissions() {
    let ability = factory().create(User::new(3, GUEST)).expect("create");
    let book = Book { id: 1, user_id: 3 };

    assert!(ability.can("viewAny", "Book").expect("viewAny"));
    assert!(ability.can("view", &book).expect("view"));
    assert!(ability.cannot("create", "Book").expect("create"));
    assert!(ability.can("update", &book).expect("guests own their books too"));
    assert!(ability.cannot("update", "Book").expect("no instance, no ownership"));
}

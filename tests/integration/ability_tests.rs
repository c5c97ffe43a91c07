//! Ability check integration tests.
//!
//! Covers subject resolution, pre-check short-circuiting, and the
//! distinction between denials and configuration errors.

use ability::{Ability, DecisionReason, ErrorKind, PreCheck, Subject, SubjectRef, testing::MockPolicy};
use test_case::test_case;

use crate::common::{ADMIN, AUTHOR, Author, Book, GUEST, User, factory};

/// Test that every subject form reaches the same policy
#[test_case(SubjectRef::from("Book") ; "name")]
#[test_case(SubjectRef::from(Book::subject_type()) ; "type marker")]
#[test_case(SubjectRef::of::<Book>() ; "type marker via of")]
#[test_case(SubjectRef::from(String::from("Book")) ; "owned name")]
fn test_subject_forms_resolve_to_book_policy(subject: SubjectRef<'static>) {
    let ability = factory().create(User::new(1, GUEST)).expect("create");

    assert!(ability.can("view", subject.clone()).expect("view is defined"));
    assert!(ability.cannot("create", subject).expect("create is defined"));
}

/// Test that only the instance form reaches instance-dependent rules
#[test]
fn test_instance_only_rules() {
    let ability = factory().create(User::new(1, AUTHOR)).expect("create");
    let book = Book { id: 10, user_id: 1 };

    assert!(ability.can("update", &book).expect("update"));
    assert!(ability.can("update", book.as_subject()).expect("update"));
    assert!(ability.cannot("update", "Book").expect("update"));
    assert!(ability.cannot("update", Book::subject_type()).expect("update"));
}

/// Test that the rule sees the instance exactly when one is given
#[test]
fn test_rule_receives_instance_only_for_instance_form() {
    let mock = MockPolicy::<Book>::new().returns("view", true);
    let ability = Ability::with_policies(User::new(1, GUEST), [mock.policy()]);

    ability.can("view", "Book").expect("name");
    ability.can("view", Book::subject_type()).expect("marker");
    ability.can("view", &Book { id: 1, user_id: 1 }).expect("instance");

    let seen: Vec<bool> = mock.calls().iter().map(|c| c.had_instance()).collect();
    assert_eq!(seen, vec![false, false, true]);
}

/// Test that a missing policy is an error, never a denial
#[test]
fn test_missing_policy_is_error() {
    let ability = factory().create(User::new(1, ADMIN)).expect("create");

    for result in [ability.can("view", &Author), ability.cannot("view", "Author")] {
        let err = result.expect_err("Author has no policy");
        assert_eq!(err.kind(), ErrorKind::PolicyNotFound);
        assert_eq!(err.subject_name(), Some("Author"));
        assert!(err.is_configuration_error());
    }
}

/// Test that the pre-check decides without consulting the rule
#[test_case(PreCheck::Allow, true ; "allow")]
#[test_case(PreCheck::Deny, false ; "deny")]
fn test_decisive_pre_check(pre_check: PreCheck, expected: bool) {
    let mock = MockPolicy::<Book>::new().returns("view", !expected).before_returns(pre_check);
    let ability = Ability::with_policies(User::new(1, GUEST), [mock.policy()]);

    let decision = ability.check("view", "Book").expect("view");
    assert_eq!(decision.is_allowed(), expected);
    assert_eq!(decision.reason(), DecisionReason::PreCheck);
    mock.verify_not_called("view");
}

/// Test that a pre-check without an opinion defers to the rule
#[test_case(true ; "rule allows")]
#[test_case(false ; "rule denies")]
fn test_no_opinion_defers(rule: bool) {
    let mock = MockPolicy::<Book>::new().returns("view", rule).before_returns(PreCheck::NoOpinion);
    let ability = Ability::with_policies(User::new(1, GUEST), [mock.policy()]);

    assert_eq!(ability.can("view", "Book").expect("view"), rule);
    assert_eq!(mock.calls_for("view"), 1);
    assert_eq!(mock.before_calls(), 1);
}

/// Test that authorize turns denials into Forbidden errors
#[test]
fn test_authorize() {
    let ability = factory().create(User::new(2, GUEST)).expect("create");
    let book = Book { id: 3, user_id: 1 };

    ability.authorize("view", &book).expect("guests may view");

    let err = ability.authorize("delete", &book).expect_err("guests may not delete");
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(err.kind().http_status_code(), 403);
    assert_eq!(err.action(), Some("delete"));
    assert!(!err.is_configuration_error());

    let err = ability.authorize("publish", &book).expect_err("publish is not defined");
    assert_eq!(err.kind(), ErrorKind::ActionNotFound);
    assert_eq!(err.kind().http_status_code(), 500);
}

/// Test that an ability can be shared across threads
#[test]
fn test_checks_from_multiple_threads() {
    let ability = factory().create(User::new(1, AUTHOR)).expect("create");
    let books: Vec<Book> = (0..8).map(|id| Book { id, user_id: id % 2 }).collect();

    std::thread::scope(|scope| {
        for book in &books {
            let ability = &ability;
            scope.spawn(move || {
                let allowed = ability.can("update", book).expect("update");
                assert_eq!(allowed, book.user_id == 1, "book {}", book.id);
            });
        }
    });
}

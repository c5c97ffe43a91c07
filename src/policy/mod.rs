//! Policies: per-subject action rules plus an optional pre-check.
//!
//! A [`Policy`] is registered under one subject name. It holds a table that
//! maps each action name to a rule `(user, subject?) -> bool`, and may carry a
//! `before` hook that can decide every action up front.
//!
//! ## Example
//!
//! ```rust
//! use ability::{Policy, PreCheck, Subject};
//!
//! struct User { id: u64, admin: bool }
//! struct Book { user_id: u64 }
//!
//! impl Subject for Book {
//!     fn subject_name() -> &'static str { "Book" }
//! }
//!
//! let policy = Policy::<User>::builder::<Book>()
//!     .before(|user, _action| if user.admin { PreCheck::Allow } else { PreCheck::NoOpinion })
//!     .action("view", |_, _| true)
//!     .instance_action("update", |user, book| user.id == book.user_id)
//!     .build();
//!
//! assert_eq!(policy.subject_name(), "Book");
//! assert!(policy.has_action("update"));
//! assert!(!policy.has_action("publish"));
//! ```

mod builder;

use std::{any::Any, collections::HashMap, fmt};

pub use builder::PolicyBuilder;

use crate::{
    Error, Result,
    types::{Decision, PreCheck, Subject, SubjectRef, SubjectType},
};

/// A type-erased action rule.
pub(crate) type Rule<U> = Box<dyn Fn(&U, Option<&(dyn Any + 'static)>) -> bool + Send + Sync>;

/// A type-erased `before` hook.
pub(crate) type BeforeHook<U> = Box<dyn Fn(&U, &str) -> PreCheck + Send + Sync>;

/// The set of action rules registered for one subject.
///
/// Built with [`Policy::builder`]. The action table is fixed once built.
pub struct Policy<U> {
    subject: SubjectType,
    rules: HashMap<String, Rule<U>>,
    before: Option<BeforeHook<U>>,
}

impl<U> Policy<U> {
    /// Starts building a policy for subject type `S`.
    pub fn builder<S: Subject>() -> PolicyBuilder<U, S> {
        PolicyBuilder::new()
    }

    pub(crate) fn from_parts(
        subject: SubjectType,
        rules: HashMap<String, Rule<U>>,
        before: Option<BeforeHook<U>>,
    ) -> Self {
        Self { subject, rules, before }
    }

    /// Returns the subject name this policy was built for.
    #[inline]
    pub fn subject_name(&self) -> &'static str {
        self.subject.name()
    }

    /// Returns the subject type this policy was built for.
    #[inline]
    pub fn subject_type(&self) -> SubjectType {
        self.subject
    }

    /// Returns `true` if the policy defines a rule for `action`.
    #[inline]
    pub fn has_action(&self, action: &str) -> bool {
        self.rules.contains_key(action)
    }

    /// Returns the defined action names, sorted.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    /// Returns `true` if the policy has a `before` hook.
    #[inline]
    pub fn has_before(&self) -> bool {
        self.before.is_some()
    }

    /// Evaluates `action` for `user` against `subject`.
    ///
    /// The subject must already have been routed to this policy by name.
    /// The action rule is looked up first, so an undefined action fails with
    /// `ActionNotFound` even when the pre-check would have decided. An
    /// instance whose concrete type is not the policy's subject type fails
    /// with `SubjectMismatch`. A decisive pre-check returns without invoking
    /// the rule; otherwise the rule runs with `Some(instance)` for instance
    /// subjects and `None` for names and type markers.
    ///
    /// Panics raised by rules or hooks are not caught.
    pub fn evaluate(&self, user: &U, action: &str, subject: &SubjectRef<'_>) -> Result<Decision> {
        let rule = self
            .rules
            .get(action)
            .ok_or_else(|| Error::action_not_found(action, subject.name()))?;

        let instance = match subject.instance() {
            Some(instance) if instance.subject_type().type_id() != self.subject.type_id() => {
                return Err(Error::subject_mismatch(
                    subject.name(),
                    self.subject.type_name(),
                    instance.subject_type().type_name(),
                )
                .with_action(action));
            },
            Some(instance) => Some(instance.value()),
            None => None,
        };

        if let Some(before) = &self.before
            && let Some(allowed) = before(user, action).decision()
        {
            return Ok(Decision::pre_check(allowed));
        }

        Ok(Decision::rule(rule(user, instance)))
    }
}

impl<U> fmt::Debug for Policy<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("subject", &self.subject.name())
            .field("actions", &self.actions())
            .field("before", &self.before.is_some())
            .finish()
    }
}

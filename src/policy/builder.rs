//! Typed builder for [`Policy`].

use std::{any::Any, collections::HashMap, marker::PhantomData};

use super::{BeforeHook, Policy, Rule};
use crate::types::{PreCheck, Subject, SubjectType};

/// Builder for a [`Policy`] over subject type `S`.
///
/// Rules are written against the concrete subject type; the builder erases
/// them into the policy's action table. Registering the same action twice
/// keeps the last rule.
///
/// ## Example
///
/// ```rust
/// use ability::{Policy, Subject};
///
/// struct User { id: u64 }
/// struct Post { author_id: u64 }
///
/// impl Subject for Post {
///     fn subject_name() -> &'static str { "Post" }
/// }
///
/// let policy = Policy::<User>::builder::<Post>()
///     .action("create", |_, _| true)
///     .action("update", |user, post| post.is_some_and(|p| p.author_id == user.id))
///     .build();
///
/// assert_eq!(policy.actions(), vec!["create", "update"]);
/// ```
#[must_use = "a PolicyBuilder does nothing until .build() is called"]
pub struct PolicyBuilder<U, S> {
    rules: HashMap<String, Rule<U>>,
    before: Option<BeforeHook<U>>,
    _subject: PhantomData<fn() -> S>,
}

impl<U, S: Subject> PolicyBuilder<U, S> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { rules: HashMap::new(), before: None, _subject: PhantomData }
    }
}

impl<U, S: Subject> Default for PolicyBuilder<U, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: 'static, S: Subject> PolicyBuilder<U, S> {
    /// Adds a rule for `action`.
    ///
    /// The rule receives `Some(subject)` when the check was made with an
    /// instance and `None` when it was made with a subject name or type
    /// marker, so it must decide sensibly without instance data.
    pub fn action<F>(mut self, action: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&U, Option<&S>) -> bool + Send + Sync + 'static,
    {
        let rule: Rule<U> = Box::new(move |user: &U, subject: Option<&(dyn Any + 'static)>| -> bool {
            rule(user, subject.and_then(|s| s.downcast_ref::<S>()))
        });
        self.rules.insert(action.into(), rule);
        self
    }

    /// Adds a rule for `action` that needs instance data.
    ///
    /// Checks made with a subject name or type marker are denied without
    /// invoking the rule.
    pub fn instance_action<F>(self, action: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&U, &S) -> bool + Send + Sync + 'static,
    {
        self.action(action, move |user: &U, subject: Option<&S>| {
            subject.is_some_and(|s| rule(user, s))
        })
    }

    /// Sets the pre-check run before every action rule.
    ///
    /// The hook may return [`PreCheck`], `bool` (always decisive), or
    /// `Option<bool>` (`None` defers to the action rule).
    pub fn before<F, R>(mut self, hook: F) -> Self
    where
        F: Fn(&U, &str) -> R + Send + Sync + 'static,
        R: Into<PreCheck>,
    {
        let hook: BeforeHook<U> = Box::new(move |user: &U, action: &str| -> PreCheck { hook(user, action).into() });
        self.before = Some(hook);
        self
    }

    /// Builds the policy.
    pub fn build(self) -> Policy<U> {
        Policy::from_parts(SubjectType::of::<S>(), self.rules, self.before)
    }
}

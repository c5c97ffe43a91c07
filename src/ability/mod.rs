//! The evaluation engine: one user bound to the registered policies.
//!
//! ## Architecture
//!
//! ```text
//! can("update", &book)
//!   │
//!   ├── resolve subject name            "Book"
//!   ├── look up policy                  └─ missing → PolicyNotFound
//!   ├── look up action rule             └─ missing → ActionNotFound
//!   ├── before(user, "update")          └─ Allow / Deny → done
//!   └── rule(user, Some(&book))         → bool
//! ```
//!
//! An [`Ability`] is usually created per request by an [`AbilityFactory`],
//! but can also be assembled directly from policy instances.

mod builder;
mod factory;

use std::{collections::HashMap, fmt, sync::Arc};

pub use builder::AbilityFactoryBuilder;
pub use factory::AbilityFactory;

use crate::{
    AccessDenied, Error, Result, tracing_support,
    policy::Policy,
    types::{Decision, DecisionReason, SubjectRef},
};

/// Subject name to policy mapping held by an [`Ability`].
pub type PolicyMap<U> = HashMap<String, Arc<Policy<U>>>;

/// Answers "can this user do X to Y" for one user.
///
/// An `Ability` pairs a user with the policies in effect for one
/// authorization context (typically one request). It holds no other state
/// and never caches: every check evaluates the policy afresh.
///
/// ## Denial ≠ Error
///
/// `can()` returns `Ok(false)` for denied access. `Err` means the check could
/// not be evaluated because the policies are misconfigured, and must be
/// propagated rather than read as a denial.
///
/// ## Example
///
/// ```rust
/// use ability::{Ability, Policy, Subject};
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
///     .instance_action("update", |user, post| user.id == post.author_id)
///     .build();
///
/// let ability = Ability::with_policies(User { id: 1 }, [policy]);
///
/// assert!(ability.can("create", "Post")?);
/// assert!(ability.cannot("update", &Post { author_id: 122 })?);
/// # Ok::<(), ability::Error>(())
/// ```
pub struct Ability<U> {
    user: U,
    policies: PolicyMap<U>,
}

impl<U> Ability<U> {
    /// Creates an ability from a user and a subject-name to policy map.
    pub fn new(user: U, policies: PolicyMap<U>) -> Self {
        tracing_support::record_created(policies.len());
        Self { user, policies }
    }

    /// Creates an ability from policies keyed by their own subject names.
    ///
    /// When two policies share a subject name, the last one wins.
    pub fn with_policies<I>(user: U, policies: I) -> Self
    where
        I: IntoIterator<Item = Policy<U>>,
    {
        let policies = policies
            .into_iter()
            .map(|policy| (policy.subject_name().to_string(), Arc::new(policy)))
            .collect();
        Self::new(user, policies)
    }

    /// Returns the user this ability is bound to.
    #[inline]
    pub fn user(&self) -> &U {
        &self.user
    }

    /// Returns `true` if a policy is registered for `subject`.
    pub fn has_policy(&self, subject: &str) -> bool {
        self.policies.contains_key(subject)
    }

    /// Returns the policy registered for `subject`, if any.
    pub fn policy(&self, subject: &str) -> Option<&Arc<Policy<U>>> {
        self.policies.get(subject)
    }

    /// Returns the registered subject names, sorted.
    pub fn subject_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.policies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluates `action` on `subject` and reports how it was decided.
    ///
    /// This is the single evaluation path behind [`can`](Self::can),
    /// [`cannot`](Self::cannot) and [`authorize`](Self::authorize).
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` if no policy is registered for the subject name
    /// - `ActionNotFound` if the policy defines no rule for `action`
    /// - `SubjectMismatch` if an instance is not of the policy's subject type
    pub fn check<'s>(&self, action: &str, subject: impl Into<SubjectRef<'s>>) -> Result<Decision> {
        let subject = subject.into();
        let subject_name = subject.name();

        let result = match self.policies.get(subject_name) {
            Some(policy) => policy.evaluate(&self.user, action, &subject),
            None => Err(Error::policy_not_found(subject_name).with_action(action)),
        };

        tracing_support::record_check(action, subject_name, &result);
        result
    }

    /// Returns `Ok(true)` if the user may perform `action` on `subject`.
    ///
    /// `subject` may be a subject name (`"Book"`), a type marker
    /// (`Book::subject_type()`), or an instance (`&book`); only an instance
    /// is passed on to the action rule.
    ///
    /// # Errors
    ///
    /// See [`check`](Self::check). Errors are never a denial.
    pub fn can<'s>(&self, action: &str, subject: impl Into<SubjectRef<'s>>) -> Result<bool> {
        self.check(action, subject).map(|decision| decision.is_allowed())
    }

    /// Returns `Ok(true)` if the user may **not** perform `action` on
    /// `subject`.
    ///
    /// The negation of [`can`](Self::can), evaluated exactly once.
    #[doc(alias = "cant")]
    pub fn cannot<'s>(&self, action: &str, subject: impl Into<SubjectRef<'s>>) -> Result<bool> {
        self.can(action, subject).map(|allowed| !allowed)
    }

    /// Returns `Ok(())` if allowed and an error of kind `Forbidden` if denied.
    ///
    /// Use this when a denial should abort the caller with `?`. The error's
    /// source is the [`AccessDenied`] describing the denial. Configuration
    /// errors are returned unchanged.
    pub fn authorize<'s>(&self, action: &str, subject: impl Into<SubjectRef<'s>>) -> Result<()> {
        let subject = subject.into();
        let decision = self.check(action, subject.clone())?;

        if decision.is_allowed() {
            return Ok(());
        }

        let reason = match decision.reason() {
            DecisionReason::PreCheck => "denied by pre-check",
            DecisionReason::Rule => "denied by rule",
        };
        Err(AccessDenied::new(action.to_string(), subject.name().to_string())
            .with_reason(reason)
            .into())
    }
}

impl<U> fmt::Debug for Ability<U>
where
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("user", &self.user)
            .field("subjects", &self.subject_names())
            .finish()
    }
}

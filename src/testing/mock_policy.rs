//! MockPolicy for testing code that consults an ability.

use std::{collections::HashMap, fmt, marker::PhantomData, sync::Arc};

use parking_lot::Mutex;

use crate::{
    policy::Policy,
    types::{PreCheck, Subject},
};

/// Which part of a policy a recorded call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCallKind {
    /// The `before` hook.
    Before,
    /// An action rule.
    Action,
}

/// A single recorded invocation of a [`MockPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    kind: MockCallKind,
    action: String,
    had_instance: bool,
}

impl MockCall {
    /// Returns whether the hook or an action rule was called.
    pub fn kind(&self) -> MockCallKind {
        self.kind
    }

    /// Returns the requested action.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns `true` if the rule received a subject instance.
    ///
    /// Always `false` for `before` calls.
    pub fn had_instance(&self) -> bool {
        self.had_instance
    }
}

/// A recording policy double for subject type `S`.
///
/// `MockPolicy` builds real [`Policy`] values whose rules return configured
/// results and record every invocation. Clones share the call log, so a
/// clone can be moved into a factory constructor while the original is kept
/// for assertions.
///
/// ## Example
///
/// ```rust
/// use ability::{AbilityFactory, PreCheck, Subject, testing::MockPolicy};
///
/// struct Book;
/// impl Subject for Book {
///     fn subject_name() -> &'static str { "Book" }
/// }
///
/// let mock = MockPolicy::<Book>::new()
///     .returns("view", true)
///     .returns("delete", false);
///
/// let factory = AbilityFactory::builder()
///     .register("Book", { let mock = mock.clone(); move || mock.policy() })
///     .build()?;
///
/// let ability = factory.create("alice")?;
/// assert!(ability.can("view", "Book")?);
/// assert!(ability.cannot("delete", &Book)?);
///
/// mock.verify_called("view");
/// assert_eq!(mock.call_count(), 2);
/// # Ok::<(), ability::Error>(())
/// ```
pub struct MockPolicy<S> {
    results: HashMap<String, bool>,
    before: Option<PreCheck>,
    calls: Arc<Mutex<Vec<MockCall>>>,
    _subject: PhantomData<fn() -> S>,
}

impl<S: Subject> MockPolicy<S> {
    /// Creates a mock with no actions and no `before` hook.
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
            before: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            _subject: PhantomData,
        }
    }

    /// Defines `action` with a rule that always returns `result`.
    #[must_use]
    pub fn returns(mut self, action: impl Into<String>, result: bool) -> Self {
        self.results.insert(action.into(), result);
        self
    }

    /// Adds a `before` hook that always returns `pre_check`.
    #[must_use]
    pub fn before_returns(mut self, pre_check: PreCheck) -> Self {
        self.before = Some(pre_check);
        self
    }

    /// Builds a policy from the current configuration.
    ///
    /// Every policy built by this mock (or its clones) records into the same
    /// call log. Configuration changes after this call do not affect
    /// policies already built.
    pub fn policy<U: 'static>(&self) -> Policy<U> {
        let mut builder = Policy::builder::<S>();

        for (action, &result) in &self.results {
            let calls = Arc::clone(&self.calls);
            let recorded = action.clone();
            builder = builder.action(action.clone(), move |_: &U, subject: Option<&S>| -> bool {
                calls.lock().push(MockCall {
                    kind: MockCallKind::Action,
                    action: recorded.clone(),
                    had_instance: subject.is_some(),
                });
                result
            });
        }

        if let Some(pre_check) = self.before {
            let calls = Arc::clone(&self.calls);
            builder = builder.before(move |_: &U, action: &str| -> PreCheck {
                calls.lock().push(MockCall {
                    kind: MockCallKind::Before,
                    action: action.to_string(),
                    had_instance: false,
                });
                pre_check
            });
        }

        builder.build()
    }

    /// Returns the number of action rule calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.kind == MockCallKind::Action).count()
    }

    /// Returns the number of rule calls for `action`.
    pub fn calls_for(&self, action: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.kind == MockCallKind::Action && c.action == action)
            .count()
    }

    /// Returns the number of `before` hook calls.
    pub fn before_calls(&self) -> usize {
        self.calls.lock().iter().filter(|c| c.kind == MockCallKind::Before).count()
    }

    /// Returns every recorded call in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Asserts that the rule for `action` ran at least once.
    ///
    /// # Panics
    ///
    /// Panics if it never ran.
    pub fn verify_called(&self, action: &str) {
        assert!(self.calls_for(action) > 0, "expected rule for \"{action}\" to be called, but it never was");
    }

    /// Asserts that the rule for `action` never ran.
    ///
    /// # Panics
    ///
    /// Panics if it ran.
    pub fn verify_not_called(&self, action: &str) {
        let calls = self.calls_for(action);
        assert!(calls == 0, "expected rule for \"{action}\" not to be called, but it ran {calls} time(s)");
    }

    /// Clears the recorded calls. Configuration is kept.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

impl<S: Subject> Default for MockPolicy<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for MockPolicy<S> {
    fn clone(&self) -> Self {
        Self {
            results: self.results.clone(),
            before: self.before,
            calls: Arc::clone(&self.calls),
            _subject: PhantomData,
        }
    }
}

impl<S: Subject> fmt::Debug for MockPolicy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockPolicy")
            .field("subject", &S::subject_name())
            .field("results", &self.results)
            .field("before", &self.before)
            .field("calls", &self.calls.lock().len())
            .finish()
    }
}

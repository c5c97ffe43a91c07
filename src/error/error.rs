//! Main error type for the ability crate.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The primary error type for ability operations.
///
/// An `Error` from `can()`/`cannot()` is never an authorization outcome. It
/// reports that the policies are wired up wrong, so it must be propagated
/// (typically to a 500 response) instead of being treated as "deny".
///
/// ## Error Hierarchy
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── subject: Option          (resolved subject name, if known)
/// ├── action: Option           (requested action, if known)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use ability::{Error, ErrorKind};
///
/// fn status_for(err: &Error) -> u16 {
///     match err.kind() {
///         ErrorKind::Forbidden => 403,
///         ErrorKind::PolicyNotFound => {
///             eprintln!("no policy for {:?}", err.subject_name());
///             500
///         }
///         kind => kind.http_status_code(),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    subject: Option<String>,
    action: Option<String>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ability::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::DuplicatePolicy, "Book registered twice");
    /// assert_eq!(err.kind(), ErrorKind::DuplicatePolicy);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self { kind, message: message.into(), subject: None, action: None, source: None }
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message without the kind prefix.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the subject name the failing check resolved to, if any.
    #[inline]
    pub fn subject_name(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the action the failing check requested, if any.
    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Returns `true` if this error reports a misconfiguration.
    ///
    /// Equivalent to `self.kind().is_configuration_error()`.
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        self.kind.is_configuration_error()
    }

    /// Sets the subject name for this error.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the action for this error.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors for the evaluation errors

    /// Creates an error for a subject name with no registered policy.
    pub fn policy_not_found(subject: impl Into<String>) -> Self {
        let subject = subject.into();
        Self::new(ErrorKind::PolicyNotFound, format!("no policy registered for subject \"{subject}\""))
            .with_subject(subject)
    }

    /// Creates an error for an action the subject's policy does not define.
    pub fn action_not_found(action: impl Into<String>, subject: impl Into<String>) -> Self {
        let action = action.into();
        let subject = subject.into();
        Self::new(
            ErrorKind::ActionNotFound,
            format!("action \"{action}\" is not defined by the policy for \"{subject}\""),
        )
        .with_action(action)
        .with_subject(subject)
    }

    /// Creates an error for an instance whose type differs from the type the
    /// subject's policy was built for.
    pub fn subject_mismatch(subject: impl Into<String>, expected: &str, found: &str) -> Self {
        let subject = subject.into();
        Self::new(
            ErrorKind::SubjectMismatch,
            format!("policy for \"{subject}\" expects {expected}, got {found}"),
        )
        .with_subject(subject)
    }

    /// Creates an error for a failed policy constructor.
    pub fn policy_construction<E>(subject: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let subject = subject.into();
        Self::new(
            ErrorKind::PolicyConstruction,
            format!("failed to construct policy for \"{subject}\": {source}"),
        )
        .with_subject(subject)
        .with_source(source)
    }

    /// Creates an error for a rejected duplicate registration.
    pub fn duplicate_policy(subject: impl Into<String>) -> Self {
        let subject = subject.into();
        Self::new(
            ErrorKind::DuplicatePolicy,
            format!("subject \"{subject}\" is registered more than once"),
        )
        .with_subject(subject)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, kind.to_string())
    }
}

//! AccessDenied error type for authorization denial.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

/// Error describing an action that was evaluated and denied.
///
/// This type is **distinct from configuration errors** ([`Error`]). It
/// represents a successful evaluation that resulted in denial, not a failure
/// to evaluate.
///
/// - `can()` returns `Ok(false)` for denial (not an error)
/// - `authorize()` returns an [`Error`] of kind `Forbidden` built from this type
///
/// ## Rich Context
///
/// ```rust
/// use ability::AccessDenied;
///
/// let denied = AccessDenied::new("update", "Book").with_reason("pre-check denied");
/// assert_eq!(denied.action(), "update");
/// assert_eq!(denied.subject(), "Book");
/// assert_eq!(denied.reason(), Some("pre-check denied"));
/// ```
///
/// [`Error`]: crate::Error
#[derive(Debug, Clone)]
pub struct AccessDenied {
    action: Cow<'static, str>,
    subject: Cow<'static, str>,
    reason: Option<Cow<'static, str>>,
}

impl AccessDenied {
    /// Creates a new AccessDenied error.
    ///
    /// # Arguments
    ///
    /// * `action` - The action (e.g., "update") that was denied
    /// * `subject` - The resolved subject name (e.g., "Book")
    pub fn new(action: impl Into<Cow<'static, str>>, subject: impl Into<Cow<'static, str>>) -> Self {
        Self { action: action.into(), subject: subject.into(), reason: None }
    }

    /// Returns the action that was denied.
    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the subject name the action was denied on.
    #[inline]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the denial reason, if available.
    #[inline]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Sets the denial reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Cow<'static, str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns a formatted string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("action={}", self.action), format!("subject={}", self.subject)];

        if let Some(ref reason) = self.reason {
            parts.push(format!("reason={}", reason));
        }

        format!("access_denied: {}", parts.join(" "))
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "access denied: cannot {} {}", self.action, self.subject)?;

        if let Some(ref reason) = self.reason {
            write!(f, " ({})", reason)?;
        }

        Ok(())
    }
}

impl StdError for AccessDenied {}

/// Converts a denial into the main `Error` type with kind `Forbidden`,
/// keeping the denial as the error's source.
impl From<AccessDenied> for super::Error {
    fn from(denied: AccessDenied) -> Self {
        super::Error::new(
            super::ErrorKind::Forbidden,
            format!("cannot {} {}", denied.action, denied.subject),
        )
        .with_action(denied.action.clone())
        .with_subject(denied.subject.clone())
        .with_source(denied)
    }
}

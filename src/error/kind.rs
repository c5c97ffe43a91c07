//! Error kind enumeration for categorizing ability errors.

/// Categorization of ability errors.
///
/// This enum provides a stable interface for matching on error types. Every
/// kind except [`Forbidden`](ErrorKind::Forbidden) describes a setup bug: a
/// correctly configured application never observes them in production.
///
/// | ErrorKind            | Meaning                                   | HTTP |
/// |----------------------|-------------------------------------------|------|
/// | `PolicyNotFound`     | No policy registered for the subject name | 500  |
/// | `ActionNotFound`     | Policy has no rule for the action         | 500  |
/// | `SubjectMismatch`    | Instance type differs from policy subject | 500  |
/// | `PolicyConstruction` | A policy constructor failed               | 500  |
/// | `DuplicatePolicy`    | Subject name registered twice (rejected)  | 500  |
/// | `Forbidden`          | `authorize()` was denied                  | 403  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No policy is registered for the resolved subject name.
    #[error("policy not found")]
    PolicyNotFound,

    /// The policy exists but defines no rule for the requested action.
    #[error("action not found")]
    ActionNotFound,

    /// A subject instance was routed by name to a policy built for a
    /// different concrete type.
    #[error("subject type mismatch")]
    SubjectMismatch,

    /// A policy constructor failed while creating an ability.
    ///
    /// The constructor's error is available through `source()`.
    #[error("policy construction failed")]
    PolicyConstruction,

    /// The same subject name was registered twice and the factory is
    /// configured to reject duplicates.
    #[error("duplicate policy")]
    DuplicatePolicy,

    /// The action was evaluated and denied.
    ///
    /// Only produced by `authorize()`; `can()` reports denial as `Ok(false)`.
    #[error("forbidden")]
    Forbidden,
}

impl ErrorKind {
    /// Returns `true` if this kind indicates a misconfiguration rather than
    /// an authorization outcome.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ability::ErrorKind;
    ///
    /// assert!(ErrorKind::PolicyNotFound.is_configuration_error());
    /// assert!(!ErrorKind::Forbidden.is_configuration_error());
    /// ```
    #[inline]
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, ErrorKind::Forbidden)
    }

    /// Returns the HTTP status code a host should answer with.
    ///
    /// Denials map to 403; configuration errors are server bugs and map
    /// to 500.
    #[inline]
    pub fn http_status_code(&self) -> u16 {
        match self {
            ErrorKind::Forbidden => 403,
            ErrorKind::PolicyNotFound
            | ErrorKind::ActionNotFound
            | ErrorKind::SubjectMismatch
            | ErrorKind::PolicyConstruction
            | ErrorKind::DuplicatePolicy => 500,
        }
    }
}

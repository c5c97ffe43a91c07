//! Registry configuration for [`AbilityFactory`](crate::AbilityFactory).

/// What to do when a subject name is registered more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// The last registration wins silently.
    #[default]
    Replace,

    /// The last registration wins and a warning is logged.
    Warn,

    /// Building the factory fails with `ErrorKind::DuplicatePolicy`.
    Reject,
}

impl DuplicatePolicy {
    /// Returns `true` if a duplicate registration is allowed to replace the
    /// earlier one.
    pub fn replaces(&self) -> bool {
        !matches!(self, DuplicatePolicy::Reject)
    }
}

/// Configuration for building an [`AbilityFactory`](crate::AbilityFactory).
///
/// ## Example: Strict Startup
///
/// ```rust
/// use ability::{DuplicatePolicy, FactoryConfig};
///
/// let config = FactoryConfig::builder()
///     .duplicates(DuplicatePolicy::Reject)
///     .validate_on_build(true)
///     .build();
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct FactoryConfig {
    /// Handling of subject names registered more than once.
    #[builder(default)]
    pub duplicates: DuplicatePolicy,

    /// Whether `build()` constructs every registered policy once so
    /// constructor failures surface at startup instead of on first use.
    #[builder(default = false)]
    pub validate_on_build: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl FactoryConfig {
    /// Creates a configuration that rejects duplicates and validates every
    /// constructor while building.
    pub fn strict() -> Self {
        Self::builder().duplicates(DuplicatePolicy::Reject).validate_on_build(true).build()
    }
}

//! Error types for the ability crate.
//!
//! The crate provides two error types:
//! - [`Error`]: Configuration errors raised while evaluating a check
//!   (missing policy, missing action, mismatched subject, failed construction)
//! - [`AccessDenied`]: Authorization denial (the user lacks the ability)
//!
//! ## Key Invariant
//!
//! `can()` returns `Ok(false)` for denied access, not `Err`. An `Err` from
//! `can()` always means the policies are misconfigured and must never be
//! read as "deny". Only `authorize()` converts denial to an error.
//!
//! ```rust,ignore
//! // can() - denial is Ok(false)
//! let allowed = ability.can("update", &book)?;
//!
//! // authorize() - denial is Err with ErrorKind::Forbidden
//! ability.authorize("update", &book)?;
//! ```

mod access_denied;
#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use access_denied::AccessDenied;
pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for ability operations.
pub type Result<T> = std::result::Result<T, Error>;

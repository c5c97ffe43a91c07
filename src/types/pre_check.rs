//! The result of a policy's `before` hook.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a policy-wide pre-check.
///
/// A policy's `before` hook runs ahead of the action rule. `Allow` and `Deny`
/// are final and the action rule is never invoked; `NoOpinion` defers to the
/// action rule.
///
/// Hooks may return anything convertible into `PreCheck`:
///
/// ```rust
/// use ability::PreCheck;
///
/// assert_eq!(PreCheck::from(true), PreCheck::Allow);
/// assert_eq!(PreCheck::from(false), PreCheck::Deny);
/// assert_eq!(PreCheck::from(None::<bool>), PreCheck::NoOpinion);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreCheck {
    /// Grant the action regardless of the action rule.
    Allow,
    /// Deny the action regardless of the action rule.
    Deny,
    /// Defer to the action rule.
    #[default]
    NoOpinion,
}

impl PreCheck {
    /// Returns the final answer if this pre-check decides the outcome.
    #[inline]
    pub fn decision(&self) -> Option<bool> {
        match self {
            PreCheck::Allow => Some(true),
            PreCheck::Deny => Some(false),
            PreCheck::NoOpinion => None,
        }
    }

    /// Returns `true` for `Allow` and `Deny`.
    #[inline]
    pub fn is_decisive(&self) -> bool {
        !matches!(self, PreCheck::NoOpinion)
    }
}

impl From<bool> for PreCheck {
    fn from(allowed: bool) -> Self {
        if allowed { PreCheck::Allow } else { PreCheck::Deny }
    }
}

impl From<Option<bool>> for PreCheck {
    fn from(opinion: Option<bool>) -> Self {
        opinion.map_or(PreCheck::NoOpinion, PreCheck::from)
    }
}

impl fmt::Display for PreCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreCheck::Allow => write!(f, "allow"),
            PreCheck::Deny => write!(f, "deny"),
            PreCheck::NoOpinion => write!(f, "no opinion"),
        }
    }
}

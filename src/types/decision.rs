//! Decision types for ability check results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which part of the policy produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// The policy's `before` hook decided; the action rule was not invoked.
    PreCheck,

    /// The action rule decided.
    Rule,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionReason::PreCheck => write!(f, "pre-check"),
            DecisionReason::Rule => write!(f, "rule"),
        }
    }
}

/// The outcome of a single ability check.
///
/// `Decision` wraps the boolean result with the part of the policy that
/// produced it. It behaves like a boolean for the common case:
///
/// ```rust
/// use ability::{Decision, DecisionReason};
///
/// let decision = Decision::new(true, DecisionReason::Rule);
/// assert!(decision.is_allowed());
/// assert!(decision == true);
///
/// let allowed: bool = decision.into();
/// assert!(allowed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    allowed: bool,
    reason: DecisionReason,
}

impl Decision {
    /// Creates a new decision.
    pub fn new(allowed: bool, reason: DecisionReason) -> Self {
        Self { allowed, reason }
    }

    /// Creates a decision made by a pre-check.
    pub fn pre_check(allowed: bool) -> Self {
        Self::new(allowed, DecisionReason::PreCheck)
    }

    /// Creates a decision made by an action rule.
    pub fn rule(allowed: bool) -> Self {
        Self::new(allowed, DecisionReason::Rule)
    }

    /// Returns `true` if the action is allowed.
    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Returns `true` if the action is denied.
    #[inline]
    pub fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Returns which part of the policy decided.
    #[inline]
    pub fn reason(&self) -> DecisionReason {
        self.reason
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.allowed { "allowed" } else { "denied" };
        write!(f, "{} by {}", outcome, self.reason)
    }
}

impl From<Decision> for bool {
    fn from(decision: Decision) -> Self {
        decision.allowed
    }
}

impl PartialEq<bool> for Decision {
    fn eq(&self, other: &bool) -> bool {
        self.allowed == *other
    }
}

impl PartialEq<Decision> for bool {
    fn eq(&self, other: &Decision) -> bool {
        *self == other.allowed
    }
}

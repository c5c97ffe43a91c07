//! Core types for the ability crate.
//!
//! - [`Subject`], [`SubjectType`], [`SubjectRef`]: what a check is evaluated against
//! - [`PreCheck`]: tri-state outcome of a policy's `before` hook
//! - [`Decision`]: a check result with the part of the policy that produced it

mod decision;
mod pre_check;
mod subject;

pub use decision::{Decision, DecisionReason};
pub use pre_check::PreCheck;
pub use subject::{Subject, SubjectInstance, SubjectRef, SubjectType};

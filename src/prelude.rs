//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use ability::prelude::*;
//! ```
//!
//! This provides access to:
//! - The ability and its factory
//! - Policies and their builder
//! - Subject types
//! - Error types

pub use crate::{
    ability::{Ability, AbilityFactory, AbilityFactoryBuilder},
    config::{DuplicatePolicy, FactoryConfig},
    error::{AccessDenied, Error, ErrorKind, Result},
    policy::{Policy, PolicyBuilder},
    types::{Decision, DecisionReason, PreCheck, Subject, SubjectRef, SubjectType},
};

#[cfg(feature = "derive")]
pub use ability_derive::Subject;

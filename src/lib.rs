//! # ability
//!
//! Policy-based authorization for Rust applications: ask an [`Ability`]
//! whether a user can perform an action on a subject.
//!
//! ## Quick Start
//!
//! ```rust
//! use ability::prelude::*;
//!
//! struct User {
//!     id: u64,
//!     role: &'static str,
//! }
//!
//! struct Book {
//!     user_id: u64,
//! }
//!
//! impl Subject for Book {
//!     fn subject_name() -> &'static str {
//!         "Book"
//!     }
//! }
//!
//! fn book_policy() -> Policy<User> {
//!     Policy::<User>::builder::<Book>()
//!         .before(|user, _action| (user.role == "ADMIN").then_some(true))
//!         .action("view", |_, _| true)
//!         .instance_action("update", |user, book| user.id == book.user_id)
//!         .build()
//! }
//!
//! fn main() -> Result<()> {
//!     // Build once at startup
//!     let factory = AbilityFactory::builder()
//!         .register_subject::<Book>(book_policy)
//!         .build()?;
//!
//!     // Create per request
//!     let ability = factory.create(User { id: 1, role: "AUTHOR" })?;
//!
//!     assert!(ability.can("update", &Book { user_id: 1 })?);
//!     assert!(ability.cannot("update", &Book { user_id: 2 })?);
//!     assert!(ability.cannot("update", "Book")?);
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Subject**: what a check is about; given as a name (`"Book"`), a type
//!   marker (`Book::subject_type()`), or an instance (`&book`)
//! - **Policy**: per-subject table of action rules plus an optional `before`
//!   pre-check that can decide every action up front
//! - **Ability**: one user bound to a set of policies; answers `can`/`cannot`
//! - **AbilityFactory**: registry of policy constructors, creates an ability
//!   per user
//! - **Denial ≠ Error**: `can()` returns `Ok(false)` for denied access. `Err`
//!   means a missing policy or action and must not be read as a denial
//!
//! ## Features
//!
//! - `tracing` (default): Emit decision and configuration events via tracing
//! - `derive`: Enable `#[derive(Subject)]`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod ability;
pub mod config;
pub mod error;
pub mod policy;
pub mod types;

// Testing utilities
pub mod testing;

// Structured events (no-ops without the `tracing` feature)
mod tracing_support;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use ability::{Ability, AbilityFactory, AbilityFactoryBuilder, PolicyMap};
pub use error::{AccessDenied, Error, ErrorKind, Result};
pub use policy::{Policy, PolicyBuilder};
pub use types::{
    Decision, DecisionReason, PreCheck, Subject, SubjectInstance, SubjectRef, SubjectType,
};

// Re-export config types
pub use config::{DuplicatePolicy, FactoryConfig};

// Derive macro, same name as the trait
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use ability_derive::Subject;

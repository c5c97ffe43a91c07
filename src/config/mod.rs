//! Configuration types for the ability crate.
//!
//! - [`FactoryConfig`]: How an `AbilityFactory` treats its registrations
//! - [`DuplicatePolicy`]: Handling of subject names registered twice

mod factory;

pub use factory::{DuplicatePolicy, FactoryConfig};

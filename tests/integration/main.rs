//! Integration tests for the ability crate.
//!
//! These tests exercise the public API end to end: a factory built from
//! the `Book` fixtures in `common`, abilities created from it, and checks
//! made with every subject form.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With decision events printed
//! RUST_LOG=ability=debug cargo test --test integration -- --nocapture
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

mod ability_tests;
mod common;
mod factory_tests;
mod scenario_tests;

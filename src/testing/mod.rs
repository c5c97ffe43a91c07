//! Testing utilities for code that consults an ability.
//!
//! - [`MockPolicy`]: a policy double with configured results and a call log
//!
//! ## Quick Start
//!
//! ```rust
//! use ability::{Ability, Subject, testing::MockPolicy};
//!
//! struct Invoice;
//! impl Subject for Invoice {
//!     fn subject_name() -> &'static str { "Invoice" }
//! }
//!
//! let mock = MockPolicy::<Invoice>::new().returns("pay", false);
//! let ability = Ability::with_policies(42_u64, [mock.policy()]);
//!
//! // Code under test
//! let refused = ability.cannot("pay", &Invoice).unwrap_or(true);
//!
//! assert!(refused);
//! mock.verify_called("pay");
//! ```

mod mock_policy;

pub use mock_policy::{MockCall, MockCallKind, MockPolicy};

//! Structural validation of state trees.
//!
//! Trees are checked once, when they are built, using Stillwater's
//! `Validation` type so that *every* violation is reported together instead
//! of only the first one found.
//!
//! # Example
//!
//! ```rust
//! use hsm::core::StateId;
//! use hsm::validation::{StateOutline, TreeRules};
//!
//! let states = [
//!     StateOutline { name: "root", parent: None },
//!     StateOutline { name: "idle", parent: Some(StateId::ROOT) },
//!     StateOutline { name: "idle", parent: Some(StateId::ROOT) },
//! ];
//!
//! let rules = TreeRules::default();
//! assert!(rules.check(&states).is_failure());
//! ```

pub mod rules;
pub mod violations;

pub use rules::{StateOutline, TreeRules, DEFAULT_MAX_SUBSTATES};
pub use violations::TreeViolation;

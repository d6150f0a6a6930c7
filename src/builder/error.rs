//! Build errors for state tree and machine builders.

use crate::validation::TreeViolation;
use thiserror::Error;

/// Errors that can occur when building state trees and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State tree is malformed: {}", summarize(.0))]
    InvalidTree(Vec<TreeViolation>),

    #[error("Machine context not specified. Call .context(value) before .build()")]
    MissingContext,
}

impl BuildError {
    /// Every violation found, if this is a tree error.
    pub fn violations(&self) -> &[TreeViolation] {
        match self {
            Self::InvalidTree(violations) => violations,
            Self::MissingContext => &[],
        }
    }
}

fn summarize(violations: &[TreeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

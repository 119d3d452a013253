//! # Error Types
//!
//! The checker fails only when the input cannot be walked at all. Data
//! inconsistencies are findings in the returned report, never errors.

use thiserror::Error;

/// Error raised when a document cannot be checked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    /// The document root is not a JSON object.
    #[error("document root must be an object, found {found}")]
    NotATree {
        /// JSON type of the root value.
        found: &'static str,
    },
}

//! # bcd-core: Foundational Types for Browser Compat Data
//!
//! Defines the typed view of a feature's support data that every check in
//! the workspace operates on. A support record is read once from a JSON
//! document and never mutated; everything in this crate is a pure function
//! over borrowed data.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged values, not duck typing.** `version_added` is a
//!    [`VersionValue`] (`Version | Supported | Unsupported | Unknown`) and a
//!    browser's support is a [`SupportStatement`]
//!    (`Single | Multiple | Malformed`). Every consumer pattern-matches on
//!    the tag.
//!
//! 2. **Malformed data matches nothing.** Shapes the schema would reject
//!    collapse into [`SupportStatement::Malformed`] instead of an error, and
//!    every classifier predicate answers `false` for them.
//!
//! 3. **Ordered records.** [`SupportRecord`] preserves document order of
//!    browsers so reports are reproducible.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bcd-*` crates (this is the leaf of the DAG).
//! - No I/O, no global state.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod ordering;
pub mod support;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use error::{json_type_name, BcdError};
pub use ordering::{compare_release, earliest_version, is_strictly_earlier};
pub use support::{SupportEntry, SupportRecord, SupportState, SupportStatement};
pub use version::{Version, VersionValue, APPROXIMATE_MARKER};

//! # bcd-consistency: Parent/Sub-feature Consistency Checker
//!
//! Walks a browser compat data document and reports every place where a
//! sub-feature's support claim contradicts its parent feature's claim.
//!
//! ## Pipeline
//!
//! ```text
//! serde_json::Value ──▶ tree::FeatureNode ──▶ walker::walk ──▶ report::ConsistencyReport
//!                                               │
//!                                               └──▶ rules::check_feature (per feature)
//! ```
//!
//! - [`tree`] - borrowed view identifying features and their sub-features.
//! - [`rules`] - the three consistency rules and the [`Violation`] record.
//! - [`walker`] - depth-first traversal in document order.
//! - [`report`] - per-feature results and console rendering.
//!
//! ## Crate Policy
//!
//! - Depends only on `bcd-core` internally.
//! - Pure and re-entrant: no I/O, no shared state. Checking the same
//!   document twice, or two documents on different threads, gives the
//!   same reports.
//! - Only a non-object document root is an error ([`ConsistencyError`]).
//!   Everything else, including malformed support statements, is either a
//!   finding or silently skipped.

pub mod error;
pub mod report;
pub mod rules;
pub mod tree;
pub mod walker;

pub use error::ConsistencyError;
pub use report::{ConsistencyReport, FeatureReport};
pub use rules::{check_feature, Offender, Violation, ViolationKind};
pub use tree::{FeatureNode, SubFeature, COMPAT_KEY, SUPPORT_KEY};
pub use walker::{check_document, walk};

// Values carried inside violations.
pub use bcd_core::{SupportRecord, Version, VersionValue};

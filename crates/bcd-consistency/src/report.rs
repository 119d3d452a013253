//! # Consistency Report
//!
//! Per-feature results of a check, in document order. Features without
//! violations do not appear.

use std::fmt;

use serde::Serialize;

use crate::rules::{Violation, ViolationKind};

/// Violations found for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureReport {
    /// Dotted identifier of the feature (`api.Foo.bar`).
    pub feature: String,
    /// Keys from the document root to the feature.
    pub path: Vec<String>,
    /// Violations between this feature and its sub-features.
    pub errors: Vec<Violation>,
}

impl FeatureReport {
    /// Build a report entry for the feature at `path`.
    pub fn new(path: Vec<String>, errors: Vec<Violation>) -> Self {
        Self {
            feature: path.join("."),
            path,
            errors,
        }
    }
}

impl fmt::Display for FeatureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.feature.is_empty() {
            f.write_str("(root)")?;
        } else {
            f.write_str(&self.feature)?;
        }
        for violation in &self.errors {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

/// All findings for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConsistencyReport {
    entries: Vec<FeatureReport>,
}

impl ConsistencyReport {
    /// Wrap walker output.
    pub fn new(entries: Vec<FeatureReport>) -> Self {
        Self { entries }
    }

    /// Returns a slice of all feature entries, in document order.
    pub fn entries(&self) -> &[FeatureReport] {
        &self.entries
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_entries(self) -> Vec<FeatureReport> {
        self.entries
    }

    /// Returns true if no violation was found.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of features with at least one violation.
    pub fn feature_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of violations across all features.
    pub fn violation_count(&self) -> usize {
        self.entries.iter().map(|e| e.errors.len()).sum()
    }

    /// Number of violations of one kind.
    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.violations().filter(|v| v.kind == kind).count()
    }

    /// Every violation, in report order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.entries.iter().flat_map(|e| e.errors.iter())
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

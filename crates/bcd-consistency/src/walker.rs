//! # Feature Tree Walker
//!
//! Depth-first, document-order traversal. Every feature is checked against
//! its immediate sub-features; every non-`__compat` object child is then
//! visited whether or not the current node is a feature, so each adjacent
//! parent/sub-feature pair in the tree is checked exactly once.

use serde_json::Value;

use bcd_core::json_type_name;

use crate::error::ConsistencyError;
use crate::report::{ConsistencyReport, FeatureReport};
use crate::rules::check_feature;
use crate::tree::FeatureNode;

/// Check a whole document.
///
/// # Errors
///
/// Returns [`ConsistencyError::NotATree`] if `document` is not a JSON
/// object. A clean document returns an empty report, never an error.
pub fn check_document(document: &Value) -> Result<ConsistencyReport, ConsistencyError> {
    let root = FeatureNode::from_value(document).ok_or(ConsistencyError::NotATree {
        found: json_type_name(document),
    })?;

    let report = ConsistencyReport::new(walk(root, &[]));

    tracing::debug!(
        features = report.feature_count(),
        violations = report.violation_count(),
        "consistency check complete"
    );

    Ok(report)
}

/// Check `node` and everything below it.
///
/// `path` is the list of keys leading to `node`. The node's own entry, if
/// any, precedes the entries of its descendants.
pub fn walk(node: FeatureNode<'_>, path: &[String]) -> Vec<FeatureReport> {
    let own = node.support_record().and_then(|record| {
        let errors = check_feature(&record, &node.subfeatures());
        if errors.is_empty() {
            return None;
        }
        let entry = FeatureReport::new(path.to_vec(), errors);
        tracing::debug!(
            feature = %entry.feature,
            violations = entry.errors.len(),
            "feature has inconsistent sub-features"
        );
        Some(entry)
    });

    own.into_iter()
        .chain(node.children().flat_map(|(key, child)| {
            let mut child_path = path.to_vec();
            child_path.push(key.to_string());
            walk(child, &child_path)
        }))
        .collect()
}

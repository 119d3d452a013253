//! # Consistency Rules
//!
//! Three rules compare a feature's support record with each of its
//! sub-features, one browser at a time:
//!
//! | Rule | Parent condition | Sub-feature offends when |
//! |------|------------------|--------------------------|
//! | [`unsupported_leaks`] | unsupported or removed | not unsupported |
//! | [`unknown_leaks`] | `version_added: null` | claims definite, unremoved support |
//! | [`earlier_implementations`] | known version | earliest version is strictly earlier |
//!
//! Only browsers declared on both sides are compared. A malformed statement
//! on either side removes that pair from every rule. Offenders for the same
//! browser are grouped into one [`Violation`].

use std::fmt;

use serde::{Deserialize, Serialize};

use bcd_core::{
    earliest_version, is_strictly_earlier, SupportEntry, SupportRecord, SupportStatement,
    VersionValue,
};

use crate::tree::SubFeature;

// ─── Violations ──────────────────────────────────────────────────────

/// The kind of inconsistency found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Parent is unsupported but a sub-feature is not.
    Unsupported,
    /// Parent support is unknown but a sub-feature claims support.
    SupportUnknown,
    /// A sub-feature was implemented before its parent.
    SubfeatureEarlierImplementation,
}

impl ViolationKind {
    /// All kinds, in the order they are evaluated.
    pub fn all() -> &'static [ViolationKind] {
        &[
            Self::Unsupported,
            Self::SupportUnknown,
            Self::SubfeatureEarlierImplementation,
        ]
    }

    /// The snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsupported => "unsupported",
            Self::SupportUnknown => "support_unknown",
            Self::SubfeatureEarlierImplementation => "subfeature_earlier_implementation",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sub-feature whose support contradicts the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offender {
    /// Key of the sub-feature.
    pub subfeature: String,
    /// The sub-feature's offending value.
    pub value: VersionValue,
}

/// One inconsistency for one browser, grouping every offending sub-feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Which rule was broken.
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    /// Browser identifier.
    pub browser: String,
    /// The parent's value the sub-features were compared against.
    pub parent_value: VersionValue,
    /// Offending sub-features, in document order.
    pub offenders: Vec<Offender>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: parent {}; sub-features: ",
            self.kind, self.browser, self.parent_value
        )?;
        for (i, offender) in self.offenders.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", offender.subfeature, offender.value)?;
        }
        Ok(())
    }
}

// ─── Rules ───────────────────────────────────────────────────────────

/// Run every rule for one feature. Violations are ordered by rule, then by
/// the parent's browser order.
pub fn check_feature(parent: &SupportRecord, subfeatures: &[SubFeature<'_>]) -> Vec<Violation> {
    let mut violations = unsupported_leaks(parent, subfeatures);
    violations.extend(unknown_leaks(parent, subfeatures));
    violations.extend(earlier_implementations(parent, subfeatures));
    violations
}

/// A browser unsupported in the parent must be unsupported in every
/// sub-feature entry.
pub fn unsupported_leaks(parent: &SupportRecord, subfeatures: &[SubFeature<'_>]) -> Vec<Violation> {
    collect_violations(
        ViolationKind::Unsupported,
        parent,
        subfeatures,
        SupportStatement::is_unsupported,
        SupportStatement::primary_value,
        |_, child| {
            child
                .first_failing(SupportEntry::is_unsupported)
                .map(|entry| entry.version_added.clone())
        },
    )
}

/// A browser with unknown support in the parent must not be definitely
/// supported in a sub-feature.
pub fn unknown_leaks(parent: &SupportRecord, subfeatures: &[SubFeature<'_>]) -> Vec<Violation> {
    collect_violations(
        ViolationKind::SupportUnknown,
        parent,
        subfeatures,
        SupportStatement::is_unknown,
        SupportStatement::primary_value,
        |_, child| {
            child
                .first_failing(SupportEntry::is_support_unclear)
                .map(|entry| entry.version_added.clone())
        },
    )
}

/// No sub-feature may have been added for a browser before the parent was.
pub fn earlier_implementations(
    parent: &SupportRecord,
    subfeatures: &[SubFeature<'_>],
) -> Vec<Violation> {
    collect_violations(
        ViolationKind::SubfeatureEarlierImplementation,
        parent,
        subfeatures,
        SupportStatement::has_known_version,
        earliest_version,
        |parent, child| {
            let parent_version = earliest_version(parent)?;
            let child_version = earliest_version(child)?;
            is_strictly_earlier(child_version, parent_version).then(|| child_version.clone())
        },
    )
}

/// Shared driver: for each parent browser satisfying `applies`, ask
/// `offending_value` about every sub-feature declaring the same browser and
/// group the answers into one violation.
fn collect_violations(
    kind: ViolationKind,
    parent: &SupportRecord,
    subfeatures: &[SubFeature<'_>],
    applies: impl Fn(&SupportStatement) -> bool,
    parent_value_of: impl Fn(&SupportStatement) -> Option<&VersionValue>,
    offending_value: impl Fn(&SupportStatement, &SupportStatement) -> Option<VersionValue>,
) -> Vec<Violation> {
    parent
        .browsers_matching(applies)
        .into_iter()
        .filter_map(|browser| {
            let parent_statement = parent.get(browser)?;
            let parent_value = parent_value_of(parent_statement)?.clone();

            let offenders: Vec<Offender> = subfeatures
                .iter()
                .filter_map(|sub| {
                    let child = sub.support.get(browser)?;
                    if child.is_malformed() {
                        tracing::debug!(
                            subfeature = sub.name,
                            browser,
                            "skipping malformed support statement"
                        );
                        return None;
                    }
                    offending_value(parent_statement, child).map(|value| Offender {
                        subfeature: sub.name.to_string(),
                        value,
                    })
                })
                .collect();

            (!offenders.is_empty()).then(|| Violation {
                kind,
                browser: browser.to_string(),
                parent_value,
                offenders,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> SupportRecord {
        SupportRecord::from_json(&value)
    }

    fn sub(name: &'static str, support: Value) -> SubFeature<'static> {
        SubFeature {
            name,
            support: record(support),
        }
    }

    #[test]
    fn test_unsupported_parent_flags_supported_child() {
        let parent = record(json!({"chrome": {"version_added": false}}));
        let subs = [sub("bar", json!({"chrome": {"version_added": "10"}}))];

        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.kind, ViolationKind::Unsupported);
        assert_eq!(v.browser, "chrome");
        assert_eq!(v.parent_value, VersionValue::Unsupported);
        assert_eq!(v.offenders.len(), 1);
        assert_eq!(v.offenders[0].subfeature, "bar");
        assert_eq!(v.offenders[0].value.to_string(), "10");
    }

    #[test]
    fn test_removed_parent_counts_as_unsupported() {
        let parent = record(json!({"chrome": {"version_added": "4", "version_removed": "30"}}));
        let subs = [
            sub("still", json!({"chrome": {"version_added": "5"}})),
            sub("gone", json!({"chrome": {"version_added": "5", "version_removed": "30"}})),
        ];
        let violations = unsupported_leaks(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].parent_value.to_string(), "4");
        let names: Vec<&str> = violations[0].offenders.iter().map(|o| o.subfeature.as_str()).collect();
        assert_eq!(names, ["still"]);
    }

    #[test]
    fn test_offenders_grouped_per_browser() {
        let parent = record(json!({
            "chrome": {"version_added": false},
            "safari": {"version_added": false}
        }));
        let subs = [
            sub("a", json!({"chrome": {"version_added": "1"}, "safari": {"version_added": false}})),
            sub("b", json!({"chrome": {"version_added": true}, "safari": {"version_added": "3"}})),
        ];
        let violations = unsupported_leaks(&parent, &subs);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].browser, "chrome");
        assert_eq!(violations[0].offenders.len(), 2);
        assert_eq!(violations[1].browser, "safari");
        assert_eq!(violations[1].offenders[0].subfeature, "b");
    }

    #[test]
    fn test_unsupported_child_list_needs_every_entry() {
        let parent = record(json!({"firefox": {"version_added": false}}));
        let subs = [sub(
            "prefixed",
            json!({"firefox": [
                {"version_added": false},
                {"version_added": "20", "prefix": "-moz-"}
            ]}),
        )];
        let violations = unsupported_leaks(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].offenders[0].value.to_string(), "20");
    }

    #[test]
    fn test_unknown_parent_rejects_definite_support() {
        let parent = record(json!({"firefox": {"version_added": null}}));
        let subs = [sub("bar", json!({"firefox": {"version_added": true}}))];
        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::SupportUnknown);
        assert_eq!(violations[0].parent_value, VersionValue::Unknown);
        assert_eq!(violations[0].offenders[0].value, VersionValue::Supported);
    }

    #[test]
    fn test_unknown_parent_accepts_unclear_child() {
        let parent = record(json!({"firefox": {"version_added": null}}));
        for child in [
            json!({"firefox": {"version_added": false}}),
            json!({"firefox": {"version_added": null}}),
            json!({"firefox": {"version_added": "3", "version_removed": "9"}}),
        ] {
            let subs = [sub("bar", child)];
            assert!(check_feature(&parent, &subs).is_empty());
        }
    }

    #[test]
    fn test_earlier_child_version() {
        let parent = record(json!({"safari": {"version_added": "11"}}));
        let subs = [sub("bar", json!({"safari": {"version_added": "9"}}))];
        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::SubfeatureEarlierImplementation);
        assert_eq!(violations[0].parent_value.to_string(), "11");
        assert_eq!(violations[0].offenders[0].value.to_string(), "9");
    }

    #[test]
    fn test_approximate_parent_disables_comparison() {
        let parent = record(json!({"safari": {"version_added": "≤11"}}));
        let subs = [sub("bar", json!({"safari": {"version_added": "9"}}))];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_earlier_uses_reduced_child_version() {
        let parent = record(json!({"safari": {"version_added": "10"}}));
        let subs = [sub(
            "bar",
            json!({"safari": [{"version_added": "12"}, {"version_added": "9"}]}),
        )];
        let violations = earlier_implementations(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].offenders[0].value.to_string(), "9");
    }

    #[test]
    fn test_parent_list_compared_by_earliest_version() {
        let parent = record(json!({"safari": [{"version_added": "12"}, {"version_added": "10"}]}));
        let subs = [sub("bar", json!({"safari": {"version_added": "9"}}))];
        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::SubfeatureEarlierImplementation);
        assert_eq!(violations[0].parent_value.to_string(), "10");
        assert_eq!(violations[0].offenders[0].value.to_string(), "9");
    }

    #[test]
    fn test_parent_list_without_every_version_skips_comparison() {
        let parent = record(json!({"safari": [{"version_added": "12"}, {"version_added": true}]}));
        let subs = [sub("bar", json!({"safari": {"version_added": "9"}}))];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_parent_list_unsupported_reports_first_value() {
        let parent = record(json!({"chrome": [
            {"version_added": false},
            {"version_added": "5", "version_removed": "6"}
        ]}));
        let subs = [sub("bar", json!({"chrome": {"version_added": "7"}}))];
        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Unsupported);
        assert_eq!(violations[0].parent_value, VersionValue::Unsupported);
        assert_eq!(violations[0].offenders[0].value.to_string(), "7");
    }

    #[test]
    fn test_later_or_equal_child_is_fine() {
        let parent = record(json!({"edge": {"version_added": "12"}}));
        let subs = [
            sub("same", json!({"edge": {"version_added": "12"}})),
            sub("later", json!({"edge": {"version_added": "79"}})),
            sub("unknown", json!({"edge": {"version_added": null}})),
        ];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_disjoint_browsers_ignored() {
        let parent = record(json!({"chrome": {"version_added": false}}));
        let subs = [sub("bar", json!({"firefox": {"version_added": "1"}}))];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_malformed_child_is_skipped() {
        let parent = record(json!({"chrome": {"version_added": false}}));
        let subs = [
            sub("broken", json!({"chrome": "mirror"})),
            sub("bad", json!({"chrome": {"version_added": "5"}})),
        ];
        let violations = check_feature(&parent, &subs);
        assert_eq!(violations.len(), 1);
        let names: Vec<&str> = violations[0].offenders.iter().map(|o| o.subfeature.as_str()).collect();
        assert_eq!(names, ["bad"]);
    }

    #[test]
    fn test_malformed_parent_is_skipped() {
        let parent = record(json!({"chrome": [], "safari": 3}));
        let subs = [sub("bar", json!({"chrome": {"version_added": "1"}, "safari": {"version_added": "1"}}))];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_identical_support_has_no_violations() {
        let support = json!({
            "chrome": {"version_added": "10"},
            "firefox": {"version_added": null},
            "safari": {"version_added": false},
            "ie": {"version_added": "6", "version_removed": "9"},
            "opera": [{"version_added": "15"}, {"version_added": "10", "prefix": "-o-"}]
        });
        let parent = record(support.clone());
        let subs = [sub("twin", support)];
        assert!(check_feature(&parent, &subs).is_empty());
    }

    #[test]
    fn test_rule_order_in_output() {
        let parent = record(json!({
            "safari": {"version_added": "11"},
            "firefox": {"version_added": null},
            "chrome": {"version_added": false}
        }));
        let subs = [sub(
            "bar",
            json!({
                "safari": {"version_added": "9"},
                "firefox": {"version_added": "2"},
                "chrome": {"version_added": "1"}
            }),
        )];
        let kinds: Vec<ViolationKind> = check_feature(&parent, &subs).iter().map(|v| v.kind).collect();
        assert_eq!(kinds, ViolationKind::all());
    }

    #[test]
    fn test_violation_serialization() {
        let v = Violation {
            kind: ViolationKind::SupportUnknown,
            browser: "firefox".to_string(),
            parent_value: VersionValue::Unknown,
            offenders: vec![Offender {
                subfeature: "bar".to_string(),
                value: VersionValue::Supported,
            }],
        };
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({
                "type": "support_unknown",
                "browser": "firefox",
                "parent_value": null,
                "offenders": [{"subfeature": "bar", "value": true}]
            })
        );
    }

    #[test]
    fn test_violation_display() {
        let parent = record(json!({"chrome": {"version_added": false}}));
        let subs = [
            sub("a", json!({"chrome": {"version_added": "1"}})),
            sub("b", json!({"chrome": {"version_added": true}})),
        ];
        let v = &unsupported_leaks(&parent, &subs)[0];
        assert_eq!(
            v.to_string(),
            "unsupported [chrome]: parent false; sub-features: a (1), b (true)"
        );
    }
}

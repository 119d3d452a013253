//! # Version Ordering
//!
//! Release ordering over version identifiers and the earliest-version
//! reduction used to compare a parent feature with its sub-features.
//!
//! Releases are compared component-wise on `.`: numeric components as
//! integers, non-numeric components as plain strings, and any numeric
//! component before any non-numeric one. Missing trailing components count
//! as `"0"`, so `"10"` equals `"10.0"` and sorts before `"10.1"`.
//!
//! An approximate version (`"≤11"`) is never strictly earlier or later than
//! anything: [`is_strictly_earlier`] answers `false` whenever either side
//! carries the marker.

use std::cmp::Ordering;

use crate::support::SupportStatement;
use crate::version::VersionValue;

/// Compare two release strings component-wise.
///
/// Callers pass marker-free text (see [`Version::release`](crate::Version::release)).
pub fn compare_release(a: &str, b: &str) -> Ordering {
    let left: Vec<&str> = a.split('.').collect();
    let right: Vec<&str> = b.split('.').collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let x = left.get(i).copied().unwrap_or("0");
        let y = right.get(i).copied().unwrap_or("0");
        let ord = compare_component(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Numeric components sort before non-numeric ones.
fn compare_component(x: &str, y: &str) -> Ordering {
    match (x.parse::<u64>(), y.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => x.cmp(y),
    }
}

/// Whether `a` is a definitely earlier release than `b`.
///
/// `false` unless both values are version identifiers without the
/// approximate marker and `a` sorts strictly before `b`.
pub fn is_strictly_earlier(a: &VersionValue, b: &VersionValue) -> bool {
    match (a.as_version(), b.as_version()) {
        (Some(a), Some(b)) if !a.is_approximate() && !b.is_approximate() => {
            a.compare_release(b) == Ordering::Less
        }
        _ => false,
    }
}

/// Reduce a statement to its earliest `version_added`.
///
/// A single entry yields its `version_added` unchanged, whatever it is. A
/// list yields the lowest version identifier among its entries (ties keep
/// the first), or `None` if no entry names one. Approximate markers are
/// ignored for the reduction but kept on the returned value.
pub fn earliest_version(statement: &SupportStatement) -> Option<&VersionValue> {
    match statement {
        SupportStatement::Single(entry) => Some(&entry.version_added),
        SupportStatement::Multiple(entries) => entries
            .iter()
            .filter_map(|e| {
                e.version_added
                    .as_version()
                    .map(|version| (&e.version_added, version))
            })
            .min_by(|(_, a), (_, b)| a.compare_release(b))
            .map(|(value, _)| value),
        SupportStatement::Malformed { .. } => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::support::SupportEntry;
    use crate::version::Version;
    use proptest::prelude::*;

    fn release() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                (0u32..200).prop_map(|n| n.to_string()),
                "[a-z]{1,4}",
            ],
            1..4,
        )
        .prop_map(|parts| parts.join("."))
    }

    proptest! {
        /// Every release equals itself.
        #[test]
        fn compare_release_reflexive(a in release()) {
            prop_assert_eq!(compare_release(&a, &a), Ordering::Equal);
        }

        /// Swapping operands reverses the ordering.
        #[test]
        fn compare_release_antisymmetric(a in release(), b in release()) {
            prop_assert_eq!(compare_release(&a, &b), compare_release(&b, &a).reverse());
        }

        /// If a <= b and b <= c then a <= c.
        #[test]
        fn compare_release_transitive(a in release(), b in release(), c in release()) {
            let mut sorted = [a, b, c];
            sorted.sort_by(|x, y| compare_release(x, y));
            let [a, b, c] = sorted;
            prop_assert_ne!(compare_release(&a, &b), Ordering::Greater);
            prop_assert_ne!(compare_release(&b, &c), Ordering::Greater);
            prop_assert_ne!(compare_release(&a, &c), Ordering::Greater);
        }

        /// The reduced version does not depend on entry order.
        #[test]
        fn earliest_version_order_independent(parts in prop::collection::vec(release(), 1..5)) {
            let values: Vec<VersionValue> = parts
                .iter()
                .map(|p| VersionValue::Version(Version::parse(p).unwrap()))
                .collect();
            let forward = SupportStatement::Multiple(
                values.iter().cloned().map(SupportEntry::added).collect(),
            );
            let backward = SupportStatement::Multiple(
                values.iter().rev().cloned().map(SupportEntry::added).collect(),
            );
            let a = earliest_version(&forward).and_then(VersionValue::as_version).unwrap();
            let b = earliest_version(&backward).and_then(VersionValue::as_version).unwrap();
            prop_assert_eq!(a.compare_release(b), Ordering::Equal);
        }

        /// An approximate operand never produces "earlier".
        #[test]
        fn approximate_never_strictly_earlier(a in release(), b in release()) {
            let plain = VersionValue::Version(Version::parse(&a).unwrap());
            let approx = VersionValue::Version(Version::parse(&format!("≤{b}")).unwrap());
            prop_assert!(!is_strictly_earlier(&plain, &approx));
            prop_assert!(!is_strictly_earlier(&approx, &plain));
        }

        /// Strictly-earlier is irreflexive and asymmetric.
        #[test]
        fn strictly_earlier_asymmetric(a in release(), b in release()) {
            let a = VersionValue::Version(Version::parse(&a).unwrap());
            let b = VersionValue::Version(Version::parse(&b).unwrap());
            prop_assert!(!is_strictly_earlier(&a, &a));
            prop_assert!(!(is_strictly_earlier(&a, &b) && is_strictly_earlier(&b, &a)));
        }
    }
}

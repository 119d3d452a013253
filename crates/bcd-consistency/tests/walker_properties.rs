//! Property tests over generated feature trees.

use bcd_consistency::{check_document, ViolationKind};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const BROWSERS: &[&str] = &["chrome", "edge", "firefox", "safari"];

fn version_added() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(false)),
        Just(json!(null)),
        Just(json!(true)),
        (1u32..40).prop_map(|n| json!(n.to_string())),
        (1u32..40).prop_map(|n| json!(format!("≤{n}"))),
    ]
}

fn entry() -> impl Strategy<Value = Value> {
    (version_added(), prop::option::of(1u32..60)).prop_map(|(added, removed)| match removed {
        Some(r) => json!({"version_added": added, "version_removed": r.to_string()}),
        None => json!({"version_added": added}),
    })
}

fn statement() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => entry(),
        1 => prop::collection::vec(entry(), 1..3).prop_map(Value::Array),
    ]
}

fn support() -> impl Strategy<Value = Value> {
    prop::collection::vec(prop::option::of(statement()), BROWSERS.len()).prop_map(|statements| {
        let map: Map<String, Value> = BROWSERS
            .iter()
            .zip(statements)
            .filter_map(|(browser, s)| s.map(|s| (browser.to_string(), s)))
            .collect();
        Value::Object(map)
    })
}

fn feature_tree() -> impl Strategy<Value = Value> {
    let leaf = support().prop_map(|s| json!({"__compat": {"support": s}}));
    leaf.prop_recursive(3, 24, 3, |inner| {
        (support(), prop::collection::vec(inner, 0..3)).prop_map(|(s, children)| {
            let mut map = Map::new();
            map.insert("__compat".to_string(), json!({"support": s}));
            for (i, child) in children.into_iter().enumerate() {
                map.insert(format!("sub{i}"), child);
            }
            Value::Object(map)
        })
    })
}

proptest! {
    /// The same document always yields the same report.
    #[test]
    fn check_is_idempotent(doc in feature_tree()) {
        let first = check_document(&doc).unwrap();
        let second = check_document(&doc).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A feature whose only sub-feature has an identical record is clean.
    #[test]
    fn identical_child_support_is_clean(s in support()) {
        let doc = json!({
            "__compat": {"support": s.clone()},
            "twin": {"__compat": {"support": s}}
        });
        prop_assert!(check_document(&doc).unwrap().is_clean());
    }

    /// Every reported offender is an existing sub-feature declaring the browser.
    #[test]
    fn offenders_exist_and_declare_browser(doc in feature_tree()) {
        let report = check_document(&doc).unwrap();
        for entry in report.entries() {
            let mut node = &doc;
            for key in &entry.path {
                node = &node[key.as_str()];
            }
            for violation in &entry.errors {
                prop_assert!(node["__compat"]["support"].get(&violation.browser).is_some());
                for offender in &violation.offenders {
                    let child_support = &node[offender.subfeature.as_str()]["__compat"]["support"];
                    prop_assert!(child_support.get(&violation.browser).is_some());
                }
            }
        }
    }

    /// Approximate parent versions never produce earlier-implementation findings.
    #[test]
    fn approximate_parent_never_earlier(n in 1u32..40, child in support()) {
        let parent: Map<String, Value> = BROWSERS
            .iter()
            .map(|b| (b.to_string(), json!({"version_added": format!("≤{n}")})))
            .collect();
        let doc = json!({
            "__compat": {"support": Value::Object(parent)},
            "child": {"__compat": {"support": child}}
        });
        let report = check_document(&doc).unwrap();
        prop_assert_eq!(report.count_of(ViolationKind::SubfeatureEarlierImplementation), 0);
    }
}

//! # Feature Tree View
//!
//! Borrowed, read-only view over a compat data document. The document is a
//! `serde_json::Value` built with the `preserve_order` feature, so every
//! object iterates in document key order and so does everything derived
//! from it here.
//!
//! ```text
//! {
//!   "api": {                         container (no __compat)
//!     "Foo": {                       feature
//!       "__compat": { "support": { "chrome": {...}, ... } },
//!       "bar": { "__compat": {...} } sub-feature of Foo
//!     }
//!   }
//! }
//! ```

use serde_json::{Map, Value};

use bcd_core::SupportRecord;

/// Reserved key whose presence makes a node a feature.
pub const COMPAT_KEY: &str = "__compat";

/// Key of the support record inside the `__compat` object.
pub const SUPPORT_KEY: &str = "support";

/// One object node in the document.
#[derive(Debug, Clone, Copy)]
pub struct FeatureNode<'a> {
    map: &'a Map<String, Value>,
}

/// An immediate child that is itself a feature, with its parsed record.
#[derive(Debug, Clone)]
pub struct SubFeature<'a> {
    /// Key of the sub-feature within its parent.
    pub name: &'a str,
    /// The sub-feature's support record.
    pub support: SupportRecord,
}

impl<'a> FeatureNode<'a> {
    /// View `value` as a node. `None` unless it is a JSON object.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    /// Whether this node carries an object-valued `__compat` key.
    pub fn is_feature(&self) -> bool {
        self.map.get(COMPAT_KEY).is_some_and(Value::is_object)
    }

    /// The parsed support record; `None` if this node is not a feature.
    ///
    /// A feature whose `__compat` lacks an object `support` has an empty
    /// record.
    pub fn support_record(&self) -> Option<SupportRecord> {
        let compat = self.map.get(COMPAT_KEY)?.as_object()?;
        Some(
            compat
                .get(SUPPORT_KEY)
                .map(SupportRecord::from_json)
                .unwrap_or_default(),
        )
    }

    /// Object-valued children other than `__compat`, in document order.
    pub fn children(&self) -> impl Iterator<Item = (&'a str, FeatureNode<'a>)> + 'a {
        let map = self.map;
        map.iter()
            .filter(|(key, _)| key.as_str() != COMPAT_KEY)
            .filter_map(|(key, value)| FeatureNode::from_value(value).map(|node| (key.as_str(), node)))
    }

    /// Children that are features, in document order.
    pub fn subfeatures(&self) -> Vec<SubFeature<'a>> {
        self.children()
            .filter_map(|(name, node)| node.support_record().map(|support| SubFeature { name, support }))
            .collect()
    }
}

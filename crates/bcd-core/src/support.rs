//! # Support Data and Classifier
//!
//! Typed view of one feature's support record and the predicates the
//! consistency rules are built from.
//!
//! ## States
//!
//! A single entry falls into exactly one [`SupportState`]:
//!
//! ```text
//! version_added:  false ─▶ Unsupported
//!                 null  ─▶ Unknown
//!                 true  ─▶ Supported { since: None }
//!                 "12"  ─▶ Supported { since: Some("12") }
//! version_removed present and not false ─▶ Removed (overrides the above)
//! ```
//!
//! ## List Semantics
//!
//! A browser may carry several entries (prefixed, flagged, or historical
//! implementations). A predicate holds for the browser only if it holds for
//! **every** entry. A [`SupportStatement::Malformed`] statement satisfies no
//! predicate.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::error::{json_type_name, BcdError};
use crate::version::{Version, VersionValue};

// ─── Support State ───────────────────────────────────────────────────

/// Semantic classification of a single support entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportState<'a> {
    /// Never supported (`version_added: false`).
    Unsupported,
    /// Unknown whether supported (`version_added: null`).
    Unknown,
    /// Supported, with the first release when known.
    Supported {
        /// First supporting release, `None` for `version_added: true`.
        since: Option<&'a Version>,
    },
    /// Supported at some point and later removed.
    Removed,
}

// ─── Support Entry ───────────────────────────────────────────────────

/// One support claim for one browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportEntry {
    /// Release support was added in.
    pub version_added: VersionValue,
    /// Release support was removed in. `None` when the key is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_removed: Option<VersionValue>,
}

impl SupportEntry {
    /// An entry with only `version_added` set.
    pub fn added(version_added: VersionValue) -> Self {
        Self {
            version_added,
            version_removed: None,
        }
    }

    /// Read an entry object.
    ///
    /// Fields other than `version_added` and `version_removed` are ignored.
    /// A `version_removed: null` is kept as `Some(Unknown)`, since a present
    /// non-false value counts as removed.
    ///
    /// # Errors
    ///
    /// Returns [`BcdError::MalformedEntry`] if `value` is not an object or
    /// lacks `version_added`, and [`BcdError::InvalidField`] for badly typed
    /// fields.
    pub fn from_json(value: &Value) -> Result<Self, BcdError> {
        let obj = value.as_object().ok_or_else(|| {
            BcdError::MalformedEntry(format!(
                "expected object, found {}",
                json_type_name(value)
            ))
        })?;

        let version_added = obj
            .get("version_added")
            .ok_or_else(|| BcdError::MalformedEntry("missing 'version_added'".to_string()))
            .and_then(|v| read_field("version_added", v))?;

        let version_removed = obj
            .get("version_removed")
            .map(|v| read_field("version_removed", v))
            .transpose()?;

        Ok(Self {
            version_added,
            version_removed,
        })
    }

    /// Whether support was removed (`version_removed` present and not `false`).
    pub fn is_removed(&self) -> bool {
        matches!(&self.version_removed, Some(v) if *v != VersionValue::Unsupported)
    }

    /// Classify this entry.
    pub fn state(&self) -> SupportState<'_> {
        if self.is_removed() {
            return SupportState::Removed;
        }
        match &self.version_added {
            VersionValue::Unsupported => SupportState::Unsupported,
            VersionValue::Unknown => SupportState::Unknown,
            VersionValue::Supported => SupportState::Supported { since: None },
            VersionValue::Version(v) => SupportState::Supported { since: Some(v) },
        }
    }

    /// Never supported, or supported and then removed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.state(), SupportState::Unsupported | SupportState::Removed)
    }

    /// `version_added` is `null`.
    pub fn is_unknown(&self) -> bool {
        self.version_added == VersionValue::Unknown
    }

    /// Anything other than a definite, unremoved support claim.
    pub fn is_support_unclear(&self) -> bool {
        self.is_unsupported() || self.is_unknown()
    }

    /// `version_added` is a version identifier.
    pub fn has_known_version(&self) -> bool {
        self.version_added.as_version().is_some()
    }
}

fn read_field(field: &'static str, value: &Value) -> Result<VersionValue, BcdError> {
    VersionValue::from_json(value).map_err(|e| BcdError::InvalidField {
        field,
        source: Box::new(e),
    })
}

// ─── Support Statement ───────────────────────────────────────────────

/// Everything one support record says about one browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupportStatement {
    /// A single entry object.
    Single(SupportEntry),
    /// A non-empty list of entry objects.
    Multiple(Vec<SupportEntry>),
    /// Anything that is not one of the above.
    Malformed {
        /// What was wrong with the value.
        reason: String,
    },
}

impl SupportStatement {
    /// Read a statement, folding every shape error into `Malformed`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(_) => match SupportEntry::from_json(value) {
                Ok(entry) => Self::Single(entry),
                Err(e) => Self::malformed(e),
            },
            Value::Array(items) if items.is_empty() => Self::Malformed {
                reason: "empty entry list".to_string(),
            },
            Value::Array(items) => {
                match items
                    .iter()
                    .map(SupportEntry::from_json)
                    .collect::<Result<Vec<_>, _>>()
                {
                    Ok(entries) => Self::Multiple(entries),
                    Err(e) => Self::malformed(e),
                }
            }
            other => Self::Malformed {
                reason: format!("expected object or array, found {}", json_type_name(other)),
            },
        }
    }

    fn malformed(error: BcdError) -> Self {
        Self::Malformed {
            reason: error.to_string(),
        }
    }

    /// The entries of this statement; empty for `Malformed`.
    pub fn entries(&self) -> &[SupportEntry] {
        match self {
            Self::Single(entry) => std::slice::from_ref(entry),
            Self::Multiple(entries) => entries,
            Self::Malformed { .. } => &[],
        }
    }

    /// Whether the statement could not be read.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// `version_added` of the first entry.
    pub fn primary_value(&self) -> Option<&VersionValue> {
        self.entries().first().map(|e| &e.version_added)
    }

    /// Whether `predicate` holds for every entry. `false` for `Malformed`.
    pub fn every(&self, predicate: impl Fn(&SupportEntry) -> bool) -> bool {
        !self.is_malformed() && self.entries().iter().all(predicate)
    }

    /// The first entry for which `predicate` does not hold.
    pub fn first_failing(&self, predicate: impl Fn(&SupportEntry) -> bool) -> Option<&SupportEntry> {
        self.entries().iter().find(|e| !predicate(*e))
    }

    /// Every entry is unsupported or removed.
    pub fn is_unsupported(&self) -> bool {
        self.every(SupportEntry::is_unsupported)
    }

    /// Every entry has `version_added: null`.
    pub fn is_unknown(&self) -> bool {
        self.every(SupportEntry::is_unknown)
    }

    /// Every entry is unsupported, removed, or unknown.
    pub fn is_support_unclear(&self) -> bool {
        self.every(SupportEntry::is_support_unclear)
    }

    /// Every entry names a version identifier.
    pub fn has_known_version(&self) -> bool {
        self.every(SupportEntry::has_known_version)
    }
}

impl From<SupportEntry> for SupportStatement {
    fn from(entry: SupportEntry) -> Self {
        Self::Single(entry)
    }
}

// ─── Support Record ──────────────────────────────────────────────────

/// Browser identifier to support statement, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportRecord {
    browsers: IndexMap<String, SupportStatement>,
}

impl SupportRecord {
    /// Read a record from a `support` object. Non-objects yield an empty record.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        obj.iter()
            .map(|(browser, statement)| (browser.clone(), SupportStatement::from_json(statement)))
            .collect()
    }

    /// The statement for `browser`, if declared.
    pub fn get(&self, browser: &str) -> Option<&SupportStatement> {
        self.browsers.get(browser)
    }

    /// Declared browsers with their statements, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SupportStatement)> {
        self.browsers.iter().map(|(b, s)| (b.as_str(), s))
    }

    /// Browsers whose statement satisfies `predicate`, in document order.
    pub fn browsers_matching(
        &self,
        predicate: impl Fn(&SupportStatement) -> bool,
    ) -> Vec<&str> {
        self.iter()
            .filter(|(_, statement)| predicate(statement))
            .map(|(browser, _)| browser)
            .collect()
    }

    /// Number of declared browsers.
    pub fn len(&self) -> usize {
        self.browsers.len()
    }

    /// Returns true if no browser is declared.
    pub fn is_empty(&self) -> bool {
        self.browsers.is_empty()
    }
}

impl FromIterator<(String, SupportStatement)> for SupportRecord {
    fn from_iter<I: IntoIterator<Item = (String, SupportStatement)>>(iter: I) -> Self {
        Self {
            browsers: iter.into_iter().collect(),
        }
    }
}

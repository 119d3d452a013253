//! # Version Identifiers
//!
//! A browser version as written in the data (`"10"`, `"10.1"`, `"≤37"`)
//! and the four-way value space of `version_added` / `version_removed`.
//!
//! ## Approximate Marker
//!
//! A leading `≤` means "supported at or before this release; the exact
//! release is unconfirmed". [`Version::release`] exposes the text without
//! the marker for ordering; the marker itself is kept in [`Version::raw`]
//! so reports echo the value exactly as written.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{json_type_name, BcdError};
use crate::ordering::compare_release;

/// Leading symbol marking a version as approximate.
pub const APPROXIMATE_MARKER: char = '≤';

/// A version identifier, optionally prefixed with [`APPROXIMATE_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    raw: String,
}

impl Version {
    /// Parse a version identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BcdError::InvalidVersion`] if the text is empty once the
    /// approximate marker is removed.
    pub fn parse(raw: &str) -> Result<Self, BcdError> {
        let release = raw.strip_prefix(APPROXIMATE_MARKER).unwrap_or(raw);
        if release.trim().is_empty() {
            return Err(BcdError::InvalidVersion {
                raw: raw.to_string(),
                reason: "empty release".to_string(),
            });
        }
        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// The identifier exactly as written, marker included.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The identifier with any approximate marker removed.
    pub fn release(&self) -> &str {
        self.raw
            .strip_prefix(APPROXIMATE_MARKER)
            .unwrap_or(&self.raw)
    }

    /// Whether the identifier carries the approximate marker.
    pub fn is_approximate(&self) -> bool {
        self.raw.starts_with(APPROXIMATE_MARKER)
    }

    /// Compare release components, ignoring the approximate marker.
    pub fn compare_release(&self, other: &Version) -> Ordering {
        compare_release(self.release(), other.release())
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Version {
    type Err = BcdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = BcdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.raw
    }
}

// ─── Version Value ───────────────────────────────────────────────────

/// The value space of `version_added` and `version_removed`.
///
/// Serializes back to the literal JSON it was read from: a string,
/// `true`, `false`, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum VersionValue {
    /// A version identifier (`"10"`, `"≤11"`).
    Version(Version),
    /// `true`: supported, release unknown.
    Supported,
    /// `false`: never supported.
    Unsupported,
    /// `null`: unknown whether supported.
    Unknown,
}

impl VersionValue {
    /// Read a JSON literal.
    ///
    /// # Errors
    ///
    /// Returns [`BcdError::InvalidVersionValue`] for numbers, arrays and
    /// objects, and [`BcdError::InvalidVersion`] for empty strings.
    pub fn from_json(value: &Value) -> Result<Self, BcdError> {
        match value {
            Value::String(s) => Version::parse(s).map(Self::Version),
            Value::Bool(true) => Ok(Self::Supported),
            Value::Bool(false) => Ok(Self::Unsupported),
            Value::Null => Ok(Self::Unknown),
            other => Err(BcdError::InvalidVersionValue {
                found: json_type_name(other),
            }),
        }
    }

    /// The version identifier, if this value is one.
    pub fn as_version(&self) -> Option<&Version> {
        match self {
            Self::Version(v) => Some(v),
            _ => None,
        }
    }

    /// Convert back into the JSON literal.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Version(v) => Value::String(v.raw().to_string()),
            Self::Supported => Value::Bool(true),
            Self::Unsupported => Value::Bool(false),
            Self::Unknown => Value::Null,
        }
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => write!(f, "{v}"),
            Self::Supported => f.write_str("true"),
            Self::Unsupported => f.write_str("false"),
            Self::Unknown => f.write_str("null"),
        }
    }
}

impl TryFrom<Value> for VersionValue {
    type Error = BcdError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl From<VersionValue> for Value {
    fn from(value: VersionValue) -> Self {
        value.to_json()
    }
}

impl From<Version> for VersionValue {
    fn from(version: Version) -> Self {
        Self::Version(version)
    }
}

//! # Error Types
//!
//! Parse failures for version identifiers and support entries. These are
//! raised only by the typed constructors; the tolerant readers used by the
//! checker fold them into [`SupportStatement::Malformed`](crate::SupportStatement::Malformed).

use thiserror::Error;

/// Error produced while reading support data into typed form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BcdError {
    /// A version identifier was empty or carried only the approximate marker.
    #[error("invalid version identifier {raw:?}: {reason}")]
    InvalidVersion {
        /// The text as it appeared in the document.
        raw: String,
        /// Why the identifier was rejected.
        reason: String,
    },

    /// A version value had an unsupported JSON type.
    #[error("expected string, boolean or null, found {found}")]
    InvalidVersionValue {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A named entry field could not be read.
    #[error("invalid '{field}': {source}")]
    InvalidField {
        /// Entry field the value was read from.
        field: &'static str,
        /// What was wrong with the value.
        #[source]
        source: Box<BcdError>,
    },

    /// A support entry was not shaped like an entry object.
    #[error("malformed support entry: {0}")]
    MalformedEntry(String),
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

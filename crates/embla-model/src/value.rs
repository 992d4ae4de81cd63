//! Typed leaf values of a recording metadata document.
//!
//! Leaves in the document carry a datatype tag (`string`, `datetime`, `r8`,
//! `i2`, `i4`). Each tag maps to one [`TypedValue`] variant; the textual
//! form accepted for each tag is produced back by
//! [`TypedValue::canonical_text`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp pattern used by `datetime` leaves: `YYYY-MM-DDTHH:MM:SS.ffffff`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Datatype tag of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// `string`
    String,
    /// `datetime`
    DateTime,
    /// `r8`: 64-bit float.
    R8,
    /// `i2`: 16-bit integer.
    I2,
    /// `i4`: 32-bit integer.
    I4,
}

impl ValueType {
    /// The tag as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::R8 => "r8",
            Self::I2 => "i2",
            Self::I4 => "i4",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "datetime" => Ok(Self::DateTime),
            "r8" => Ok(Self::R8),
            "i2" => Ok(Self::I2),
            "i4" => Ok(Self::I4),
            other => Err(other.to_string()),
        }
    }
}

/// A decoded leaf value.
///
/// `Absent` marks a leaf without any text and is distinct from
/// `Text(String::new())`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TypedValue {
    Text(String),
    Timestamp(NaiveDateTime),
    Float(f64),
    Integer(i64),
    Absent,
}

impl TypedValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Short variant label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Float(_) => "float",
            Self::Integer(_) => "integer",
            Self::Absent => "absent",
        }
    }

    /// Renders the value in the form its datatype tag accepts.
    ///
    /// Returns `None` for [`TypedValue::Absent`], which has no text.
    pub fn canonical_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Timestamp(value) => Some(value.format(DATETIME_FORMAT).to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Absent => None,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

//! Attribute type tags.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of value an attribute holds.
///
/// The wire tags are the lowercase variant names. `timestamp` is accepted as
/// an alias of `long` since both travel as epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    Boolean,
    Enum,
    Integer,
    Float,
    #[serde(alias = "timestamp")]
    Long,
    String,
    List,
    Object,
}

impl AttributeType {
    /// Timestamps are longs on the wire.
    pub const TIMESTAMP: Self = Self::Long;

    /// Every tag, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Enum,
        Self::Integer,
        Self::Float,
        Self::Long,
        Self::String,
        Self::List,
        Self::Object,
    ];

    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Long => "long",
            Self::String => "string",
            Self::List => "list",
            Self::Object => "object",
        }
    }

    /// True for integer, float and long.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Long)
    }

    /// True for the types that may carry a sub-type (`list`, `object`).
    #[must_use]
    pub const fn accepts_sub_type(self) -> bool {
        matches!(self, Self::List | Self::Object)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(Self::Boolean),
            "enum" => Ok(Self::Enum),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "long" | "timestamp" => Ok(Self::Long),
            "string" => Ok(Self::String),
            "list" => Ok(Self::List),
            "object" => Ok(Self::Object),
            other => Err(Error::InvalidAttributeType(other.to_string())),
        }
    }
}

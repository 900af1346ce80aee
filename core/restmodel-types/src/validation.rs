//! Values produced by a validation pass.
//!
//! Validation failures are never raised; validators return them and the
//! entity collects them into its error map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One failed attribute check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    local_name: String,
    remote_name: String,
    title: String,
    description: String,
}

impl ValidationError {
    /// Creates a validation error for the attribute `local_name` / `remote_name`.
    pub fn new(
        local_name: impl Into<String>,
        remote_name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            local_name: local_name.into(),
            remote_name: remote_name.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[must_use]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Short headline, e.g. "Invalid length".
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Human readable explanation, e.g. "Minimum length should be 3, but is 2".
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.local_name, self.title, self.description)
    }
}

/// What a validator hands back when a check fails.
///
/// Attribute validators produce a structured [`ValidationError`]; custom
/// business rules may return a bare message instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationFailure {
    Attribute(ValidationError),
    Message(String),
}

impl ValidationFailure {
    /// The user facing text: the error description, or the bare message.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::Attribute(err) => err.description(),
            Self::Message(msg) => msg,
        }
    }

    /// Returns the structured error, if this failure carries one.
    #[must_use]
    pub fn as_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Attribute(err) => Some(err),
            Self::Message(_) => None,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(err) => err.fmt(f),
            Self::Message(msg) => f.write_str(msg),
        }
    }
}

impl From<ValidationError> for ValidationFailure {
    fn from(err: ValidationError) -> Self {
        Self::Attribute(err)
    }
}

impl From<String> for ValidationFailure {
    fn from(msg: String) -> Self {
        Self::Message(msg)
    }
}

impl From<&str> for ValidationFailure {
    fn from(msg: &str) -> Self {
        Self::Message(msg.to_string())
    }
}

impl PartialEq<str> for ValidationFailure {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Self::Message(msg) if msg == other)
    }
}

impl PartialEq<&str> for ValidationFailure {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

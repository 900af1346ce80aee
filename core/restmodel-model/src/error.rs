//! Error types for schema definition and entity access.
//!
//! Every variant here is a configuration or programming error. Data problems
//! found while validating an entity are reported as
//! [`ValidationFailure`](restmodel_types::ValidationFailure) values instead.

use thiserror::Error;

/// Errors raised while defining schemas or addressing entity attributes.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A descriptor was defined without a local name and/or attribute type.
    #[error(
        "invalid localName and/or attributeType (localName: {local_name:?}, attributeType: {attribute_type:?})"
    )]
    MissingName {
        local_name: Option<String>,
        attribute_type: Option<String>,
    },

    /// The attribute type tag is not one of the known kinds.
    #[error(transparent)]
    InvalidAttributeType(#[from] restmodel_types::Error),

    /// A single descriptor carries contradictory settings.
    #[error("attribute {attribute}: {reason}")]
    InvalidDescriptor { attribute: String, reason: String },

    /// A schema definition is internally inconsistent.
    #[error("schema {schema}: {reason}")]
    InconsistentSchema { schema: String, reason: String },

    /// A schema with this name is already registered.
    #[error("schema {0} is already registered")]
    DuplicateSchema(String),

    /// A schema extends a parent that has not been registered yet.
    #[error("schema {schema} extends unknown parent {parent}")]
    UnknownParent { schema: String, parent: String },

    /// No schema is registered under this name.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// No schema is registered for this resource name.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// The schema declares no attribute with this local name.
    #[error("{schema} has no attribute {attribute}")]
    UnknownAttribute { schema: String, attribute: String },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    /// True for errors that abort schema definition.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingName { .. }
                | Self::InvalidAttributeType(_)
                | Self::InvalidDescriptor { .. }
                | Self::InconsistentSchema { .. }
                | Self::DuplicateSchema(_)
                | Self::UnknownParent { .. }
        )
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

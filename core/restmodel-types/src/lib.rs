//! Core type definitions for restmodel.
//!
//! This crate defines the leaf types shared by the entity model:
//! - [`AttributeType`] — the closed set of attribute kinds a schema may declare
//! - [`SchemaId`] — arena index of a schema inside a registry
//! - [`ValidationError`] / [`ValidationFailure`] — values produced by a
//!   validation pass
//!
//! Nothing here knows about entities or schemas; those live in
//! `restmodel-model`.

mod attribute;
mod ids;
mod validation;

pub use attribute::AttributeType;
pub use ids::SchemaId;
pub use validation::{ValidationError, ValidationFailure};

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid attribute type: {0}")]
    InvalidAttributeType(String),
}

//! Attribute-descriptor entity model for restmodel.
//!
//! Describes remote resources as typed attribute schemas, validates
//! instances against them, and converts instances to and from wire JSON:
//! - [`AttributeDescriptor`] — metadata and intrinsic checks for one field
//! - [`SchemaDef`] / [`SchemaRegistry`] — declarative schemas, merged across
//!   their inheritance chain once, at registration
//! - [`Entity`] — values of one schema instance, its validator registry and
//!   the error map of the last validation pass
//! - [`Validator`] — the extension point for custom business rules
//!
//! Everything here is synchronous. Validation failures are collected as
//! values; only schema configuration problems are returned as errors.

mod descriptor;
mod entity;
mod error;
mod marshal;
mod schema;
mod validator;
mod value;

pub use descriptor::{AttributeBuilder, AttributeDescriptor, AttributeSpec, SubType};
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use marshal::MarshalOptions;
pub use schema::{Schema, SchemaDef, SchemaRegistry, SchemaRegistryBuilder, SchemaSpec};
pub use validator::{FnValidator, ValidationContext, Validator};
pub use value::{EnumChoice, Value};

pub use restmodel_types::{AttributeType, SchemaId, ValidationError, ValidationFailure};

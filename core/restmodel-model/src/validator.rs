use crate::{AttributeDescriptor, Entity};
use restmodel_types::ValidationFailure;
use serde_json::{Map, Value as JsonValue};

/// A check run against an entity during every validation pass.
///
/// Attribute descriptors implement this for their intrinsic checks. Custom
/// business rules implement it too and are registered on an entity with
/// [`Entity::register_validator`].
///
/// Failures land in the entity's error map under [`Validator::name`], not
/// under the key the validator was registered with. Validators must only
/// read the entity and the context.
pub trait Validator: Send + Sync {
    /// Key of this validator's entry in the error map.
    fn name(&self) -> &str;

    /// Returns `Some` when the check fails.
    ///
    /// `descriptor` is the attribute the validator was registered under, if
    /// that key names an attribute of the entity's schema.
    fn validate(
        &self,
        entity: &Entity,
        descriptor: Option<&AttributeDescriptor>,
        context: &ValidationContext<'_>,
    ) -> Option<ValidationFailure>;
}

/// External input to a validation pass: related entities that cross-entity
/// rules compare against, plus free-form form values.
#[derive(Debug, Default, Clone)]
pub struct ValidationContext<'a> {
    related: Vec<&'a Entity>,
    values: Map<String, JsonValue>,
}

impl<'a> ValidationContext<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity that validators may read.
    #[must_use]
    pub fn with_related(mut self, entity: &'a Entity) -> Self {
        self.related.push(entity);
        self
    }

    /// Adds a form value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Related entities, in the order they were added.
    #[must_use]
    pub fn related(&self) -> &[&'a Entity] {
        &self.related
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }
}

/// A validator backed by a closure.
pub struct FnValidator<F> {
    name: String,
    check: F,
}

impl<F> FnValidator<F> {
    pub fn new(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Entity, Option<&AttributeDescriptor>, &ValidationContext<'_>) -> Option<ValidationFailure>
            + Send
            + Sync,
    {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&Entity, Option<&AttributeDescriptor>, &ValidationContext<'_>) -> Option<ValidationFailure>
        + Send
        + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(
        &self,
        entity: &Entity,
        descriptor: Option<&AttributeDescriptor>,
        context: &ValidationContext<'_>,
    ) -> Option<ValidationFailure> {
        (self.check)(entity, descriptor, context)
    }
}

use crate::schema::{Schema, SchemaRegistry};
use crate::validator::{ValidationContext, Validator};
use crate::{ModelError, ModelResult, Value};
use indexmap::IndexMap;
use restmodel_types::{SchemaId, ValidationFailure};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// An instance of a schema: current attribute values, the validators that
/// run on every pass, and the errors of the most recent pass.
///
/// Attributes are addressed by local name. An attribute that was never
/// assigned (and has no default) is absent, which is distinct from an
/// explicit [`Value::Null`].
#[derive(Clone)]
pub struct Entity {
    registry: Arc<SchemaRegistry>,
    schema: SchemaId,
    pub(crate) values: IndexMap<String, Value>,
    validators: IndexMap<String, Vec<Arc<dyn Validator>>>,
    errors: IndexMap<String, ValidationFailure>,
}

impl Entity {
    /// Creates a blank entity, seeding defaults and one intrinsic validator
    /// per descriptor (keyed by its local name).
    pub(crate) fn new(registry: Arc<SchemaRegistry>, schema: SchemaId) -> Self {
        let mut values = IndexMap::new();
        let mut validators: IndexMap<String, Vec<Arc<dyn Validator>>> = IndexMap::new();
        for descriptor in registry[schema].attributes() {
            if let Some(default) = descriptor.default_value() {
                values.insert(descriptor.local_name().to_string(), default.clone());
            }
            let intrinsic: Arc<dyn Validator> = Arc::clone(descriptor) as Arc<dyn Validator>;
            validators.insert(descriptor.local_name().to_string(), vec![intrinsic]);
        }
        Self {
            registry,
            schema,
            values,
            validators,
            errors: IndexMap::new(),
        }
    }

    // ── Schema ───────────────────────────────────────────────────

    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.registry[self.schema]
    }

    #[must_use]
    pub fn schema_id(&self) -> SchemaId {
        self.schema
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    /// Name of the schema this entity was built from.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.schema().name()
    }

    /// REST resource name, if the schema is addressable on its own.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.schema().resource_name()
    }

    // ── Attribute values ─────────────────────────────────────────

    /// Current value, or `None` if the attribute was never assigned.
    #[must_use]
    pub fn get(&self, local_name: &str) -> Option<&Value> {
        self.values.get(local_name)
    }

    pub fn get_mut(&mut self, local_name: &str) -> Option<&mut Value> {
        self.values.get_mut(local_name)
    }

    #[must_use]
    pub fn get_str(&self, local_name: &str) -> Option<&str> {
        self.get(local_name).and_then(Value::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, local_name: &str) -> Option<bool> {
        self.get(local_name).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_number(&self, local_name: &str) -> Option<f64> {
        self.get(local_name).and_then(Value::as_f64)
    }

    /// Assigns an attribute, returning the previous value.
    ///
    /// Any value is accepted; type and constraint problems surface in the
    /// next validation pass.
    pub fn set(&mut self, local_name: &str, value: impl Into<Value>) -> ModelResult<Option<Value>> {
        if self.schema().attribute(local_name).is_none() {
            return Err(ModelError::UnknownAttribute {
                schema: self.class_name().to_string(),
                attribute: local_name.to_string(),
            });
        }
        Ok(self.values.insert(local_name.to_string(), value.into()))
    }

    /// Returns the attribute to the never-assigned state.
    pub fn unset(&mut self, local_name: &str) -> Option<Value> {
        self.values.shift_remove(local_name)
    }

    /// Value of the schema's identifier attribute.
    #[must_use]
    pub fn identifier(&self) -> Option<&Value> {
        let descriptor = self.schema().identifier()?;
        self.get(descriptor.local_name())
    }

    /// Truthy values keyed by local name, leaving out the association
    /// collection.
    #[must_use]
    pub fn get_defaults(&self) -> IndexMap<String, Value> {
        let association = self.schema().association().map(|d| d.local_name());
        self.values
            .iter()
            .filter(|(name, value)| value.is_truthy() && Some(name.as_str()) != association)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// True when the entity was instantiated from a template.
    #[must_use]
    pub fn is_from_template(&self) -> bool {
        self.get("templateID").is_some_and(Value::is_truthy)
    }

    #[must_use]
    pub fn is_scope_global(&self) -> bool {
        self.get_str("entityScope") == Some("GLOBAL")
    }

    /// True when `owner` holds `user`'s identifier.
    #[must_use]
    pub fn is_owned_by(&self, user: &Entity) -> bool {
        match (self.get("owner"), user.identifier()) {
            (Some(owner), Some(id)) => !owner.is_null() && owner == id,
            _ => false,
        }
    }

    // ── Validators ───────────────────────────────────────────────

    /// Registers a validator under its own name.
    ///
    /// Without `append` the validator replaces whatever was registered under
    /// that name (including an attribute's intrinsic validator). With
    /// `append` it runs in addition to them.
    pub fn register_validator<V: Validator + 'static>(&mut self, validator: V, append: bool) {
        let key = validator.name().to_string();
        self.register_validator_for(key, validator, append);
    }

    /// Registers a validator under an explicit key. When the key is an
    /// attribute's local name, the validator receives that descriptor.
    ///
    /// Errors are still recorded under the validator's own name, so two
    /// validators sharing a name overwrite each other's entry whatever key
    /// they were registered under.
    pub fn register_validator_for<V: Validator + 'static>(
        &mut self,
        key: impl Into<String>,
        validator: V,
        append: bool,
    ) {
        let validator: Arc<dyn Validator> = Arc::new(validator);
        let key = key.into();
        if append && let Some(list) = self.validators.get_mut(&key) {
            list.push(validator);
            return;
        }
        self.validators.insert(key, vec![validator]);
    }

    /// Registration keys and their validators, in registration order.
    pub fn validators(&self) -> impl Iterator<Item = (&str, &[Arc<dyn Validator>])> {
        self.validators
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    // ── Validation pass ──────────────────────────────────────────

    /// Re-runs every registered validator and rebuilds the error map.
    ///
    /// Returns `true` iff no validator failed.
    pub fn is_valid(&mut self, context: &ValidationContext<'_>) -> bool {
        self.errors.clear();
        let errors = self.check_errors(context);
        debug!(
            schema = %self.class_name(),
            errors = errors.len(),
            "validation pass complete"
        );
        self.errors = errors;
        self.errors.is_empty()
    }

    fn check_errors(&self, context: &ValidationContext<'_>) -> IndexMap<String, ValidationFailure> {
        let schema = self.schema();
        let mut errors = IndexMap::new();
        for (key, list) in &self.validators {
            let descriptor = schema.attribute(key).map(Arc::as_ref);
            for validator in list {
                if let Some(failure) = validator.validate(self, descriptor, context) {
                    errors.insert(validator.name().to_string(), failure);
                }
            }
        }
        errors
    }

    /// Failures of the most recent validation pass, keyed by validator name.
    #[must_use]
    pub fn validation_errors(&self) -> &IndexMap<String, ValidationFailure> {
        &self.errors
    }

    #[must_use]
    pub fn validation_error(&self, validator_name: &str) -> Option<&ValidationFailure> {
        self.errors.get(validator_name)
    }
}

impl PartialEq for Entity {
    /// Same schema name and the same assigned values.
    fn eq(&self, other: &Self) -> bool {
        self.class_name() == other.class_name() && self.values == other.values
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("schema", &self.class_name())
            .field("values", &self.values)
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("errors", &self.errors)
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_object().to_string())
    }
}

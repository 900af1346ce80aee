//! Conversion between entities and wire JSON.
//!
//! Wire objects are keyed by each attribute's remote name. Marshaling is
//! permissive: values that cannot be coerced or nested are kept as they
//! came and a warning is logged, leaving rejection to the validation pass.

use crate::descriptor::{AttributeDescriptor, SubType};
use crate::schema::SchemaRegistry;
use crate::{Entity, ModelResult, Value};
use restmodel_types::AttributeType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::warn;

/// Options for [`Entity::to_object_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarshalOptions {
    /// Leave out attributes flagged internal.
    pub inspect: bool,
}

impl MarshalOptions {
    #[must_use]
    pub fn inspect() -> Self {
        Self { inspect: true }
    }
}

impl Entity {
    /// Builds a new entity of schema `name` from wire JSON.
    pub fn from_json(registry: &Arc<SchemaRegistry>, name: &str, json: &JsonValue) -> ModelResult<Self> {
        let mut entity = registry.instantiate(name)?;
        entity.build_from_json(json);
        Ok(entity)
    }

    /// Assigns every attribute whose remote name is present in `json`.
    ///
    /// Presence is what counts: a key holding `null` still assigns `null`.
    /// Attributes missing from `json` keep their current value.
    pub fn build_from_json(&mut self, json: &JsonValue) -> &mut Self {
        let Some(object) = json.as_object() else {
            warn!(
                schema = %self.class_name(),
                "expected a JSON object, nothing assigned"
            );
            return self;
        };
        let descriptors: Vec<Arc<AttributeDescriptor>> = self.schema().attributes().cloned().collect();
        for descriptor in descriptors {
            if let Some(raw) = object.get(descriptor.remote_name()) {
                let value = self.coerce(&descriptor, raw);
                self.values.insert(descriptor.local_name().to_string(), value);
            }
        }
        self
    }

    fn coerce(&self, descriptor: &AttributeDescriptor, raw: &JsonValue) -> Value {
        match (descriptor.attribute_type(), descriptor.sub_type()) {
            (AttributeType::Integer | AttributeType::Float | AttributeType::Long, _) => {
                coerce_number(raw)
            }
            (AttributeType::Enum, _) => enum_member(raw),
            (AttributeType::List, Some(SubType::Primitive(AttributeType::Enum))) => match raw {
                JsonValue::Array(items) => Value::List(items.iter().map(enum_member).collect()),
                other => Value::from(other),
            },
            (AttributeType::Object, Some(SubType::Schema(name))) if !raw.is_null() => {
                self.nested(descriptor, name, raw)
            }
            (AttributeType::List, Some(SubType::Schema(name))) => match raw {
                JsonValue::Array(items) => Value::List(
                    items
                        .iter()
                        .map(|item| self.nested(descriptor, name, item))
                        .collect(),
                ),
                JsonValue::Null => Value::Null,
                other => {
                    warn!(
                        schema = %self.class_name(),
                        attribute = %descriptor.local_name(),
                        "expected a JSON array, keeping raw value"
                    );
                    Value::from(other)
                }
            },
            _ => Value::from(raw),
        }
    }

    /// Builds a nested entity of schema `name`, falling back to the raw
    /// value when the schema is unknown or the JSON is not an object.
    fn nested(&self, descriptor: &AttributeDescriptor, name: &str, raw: &JsonValue) -> Value {
        if !raw.is_object() {
            warn!(
                schema = %self.class_name(),
                attribute = %descriptor.local_name(),
                sub_type = %name,
                "nested value is not a JSON object, keeping raw value"
            );
            return Value::from(raw);
        }
        match self.registry().instantiate(name) {
            Ok(mut child) => {
                child.build_from_json(raw);
                Value::Object(Box::new(child))
            }
            Err(err) => {
                warn!(
                    schema = %self.class_name(),
                    attribute = %descriptor.local_name(),
                    error = %err,
                    "cannot resolve nested schema, keeping raw value"
                );
                Value::from(raw)
            }
        }
    }

    /// Wire representation with default options.
    #[must_use]
    pub fn to_object(&self) -> JsonValue {
        self.to_object_with(MarshalOptions::default())
    }

    /// Wire representation.
    ///
    /// A non-empty association collection replaces the whole field map with
    /// the array of the associated entities' identifiers. Attributes that
    /// were never assigned are omitted.
    #[must_use]
    pub fn to_object_with(&self, options: MarshalOptions) -> JsonValue {
        if let Some(ids) = self.association_ids() {
            return JsonValue::Array(ids);
        }
        let mut object = Map::new();
        for descriptor in self.schema().attributes() {
            if options.inspect && descriptor.is_internal() {
                continue;
            }
            if let Some(value) = self.get(descriptor.local_name()) {
                object.insert(descriptor.remote_name().to_string(), value.to_json());
            }
        }
        JsonValue::Object(object)
    }

    /// Serialized [`Entity::to_object`].
    pub fn build_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.to_object())?)
    }

    fn association_ids(&self) -> Option<Vec<JsonValue>> {
        let association = self.schema().association()?;
        let items = self.get(association.local_name())?.as_list()?;
        if items.is_empty() {
            return None;
        }
        let id_key = self
            .schema()
            .identifier()
            .map_or("ID", AttributeDescriptor::remote_name);
        Some(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(entity) => entity.identifier().map_or(JsonValue::Null, Value::to_json),
                    Value::Map(map) => map.get(id_key).cloned().unwrap_or(JsonValue::Null),
                    other => other.to_json(),
                })
                .collect(),
        )
    }
}

/// Wire strings of enum attributes are member names.
fn enum_member(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::String(name) => Value::Enum(name.clone()),
        other => Value::from(other),
    }
}

/// Numeric coercion: `null`, `false` and empty strings become `null`,
/// numeric strings are parsed, anything else is kept untouched.
fn coerce_number(raw: &JsonValue) -> Value {
    match raw {
        JsonValue::Null | JsonValue::Bool(false) => Value::Null,
        JsonValue::Number(n) => Value::from(n),
        JsonValue::String(s) if s.trim().is_empty() => Value::Null,
        JsonValue::String(s) => parse_number(s.trim()).unwrap_or_else(|| Value::String(s.clone())),
        other => Value::from(other),
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::Integer(i));
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

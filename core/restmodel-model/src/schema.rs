//! Schema definitions and the registry that resolves them.
//!
//! A [`SchemaDef`] lists a schema's own attributes and, optionally, the
//! parent it extends. Registering it merges the parent's descriptors with
//! its own (same local name: the child wins, keeping the parent's position)
//! into one flat [`Schema`]. After [`SchemaRegistryBuilder::build`] the
//! registry is read-only and shared behind an `Arc`.

use crate::descriptor::{AttributeDescriptor, AttributeSpec, SubType};
use crate::{Entity, ModelError, ModelResult};
use indexmap::IndexMap;
use restmodel_types::SchemaId;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::ops::Index;
use std::sync::Arc;
use tracing::warn;

/// Declarative definition of one schema.
#[derive(Debug, Clone)]
pub struct SchemaDef {
    name: String,
    resource_name: Option<String>,
    extends: Option<String>,
    attributes: Vec<AttributeDescriptor>,
}

impl SchemaDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_name: None,
            extends: None,
            attributes: Vec::new(),
        }
    }

    /// REST resource name used to address this schema on the wire.
    #[must_use]
    pub fn resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Inherit the descriptors of an already registered schema.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, descriptor: AttributeDescriptor) -> Self {
        self.attributes.push(descriptor);
        self
    }

    #[must_use]
    pub fn attributes(mut self, descriptors: impl IntoIterator<Item = AttributeDescriptor>) -> Self {
        self.attributes.extend(descriptors);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// JSON form of a [`SchemaDef`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaSpec {
    pub name: String,
    pub resource_name: Option<String>,
    pub extends: Option<String>,
    pub attributes: Vec<AttributeSpec>,
}

impl TryFrom<SchemaSpec> for SchemaDef {
    type Error = ModelError;

    fn try_from(spec: SchemaSpec) -> ModelResult<Self> {
        let attributes = spec
            .attributes
            .into_iter()
            .map(AttributeDescriptor::from_spec)
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(Self {
            name: spec.name,
            resource_name: spec.resource_name,
            extends: spec.extends,
            attributes,
        })
    }
}

/// A resolved schema: the flat, merged descriptor set of one entity type.
#[derive(Debug)]
pub struct Schema {
    id: SchemaId,
    name: String,
    resource_name: Option<String>,
    parent: Option<SchemaId>,
    attributes: IndexMap<String, Arc<AttributeDescriptor>>,
}

impl Schema {
    #[must_use]
    pub fn id(&self) -> SchemaId {
        self.id
    }

    /// Class name; nested values are matched against it.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<SchemaId> {
        self.parent
    }

    /// Descriptors in declaration order, inherited ones first.
    pub fn attributes(&self) -> impl Iterator<Item = &Arc<AttributeDescriptor>> {
        self.attributes.values()
    }

    /// Looks up a descriptor by local name.
    #[must_use]
    pub fn attribute(&self, local_name: &str) -> Option<&Arc<AttributeDescriptor>> {
        self.attributes.get(local_name)
    }

    /// Looks up a descriptor by wire name.
    #[must_use]
    pub fn attribute_by_remote_name(&self, remote_name: &str) -> Option<&Arc<AttributeDescriptor>> {
        self.attributes().find(|d| d.remote_name() == remote_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Descriptors flagged `canSearch`.
    #[must_use]
    pub fn searchable_attributes(&self) -> Vec<&AttributeDescriptor> {
        self.attributes()
            .filter(|d| d.can_search())
            .map(Arc::as_ref)
            .collect()
    }

    /// Local names of the descriptors flagged `isRequired`.
    #[must_use]
    pub fn mandatory_attributes(&self) -> Vec<&str> {
        self.attributes()
            .filter(|d| d.is_required())
            .map(|d| d.local_name())
            .collect()
    }

    /// True when every mandatory attribute is present and truthy in `json`
    /// (keyed by local name).
    #[must_use]
    pub fn has_mandatory_attributes_set(&self, json: &JsonValue) -> bool {
        self.mandatory_attributes().into_iter().all(|name| {
            json.get(name)
                .is_some_and(|v| crate::Value::from(v).is_truthy())
        })
    }

    /// The descriptor flagged `isIdentifier`, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&AttributeDescriptor> {
        self.attributes()
            .find(|d| d.is_identifier())
            .map(Arc::as_ref)
    }

    /// The association collection, if the schema declares one.
    #[must_use]
    pub fn association(&self) -> Option<&AttributeDescriptor> {
        self.attributes()
            .find(|d| d.is_association())
            .map(Arc::as_ref)
    }
}

/// Read-only arena of resolved schemas.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
    by_name: HashMap<String, SchemaId>,
    by_resource: HashMap<String, SchemaId>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    #[must_use]
    pub fn get(&self, id: SchemaId) -> Option<&Schema> {
        self.schemas.get(id.index())
    }

    /// Looks up a schema by class name.
    #[must_use]
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<SchemaId> {
        self.by_name.get(name).copied()
    }

    /// Resolves a REST resource name to its schema.
    #[must_use]
    pub fn schema_for_resource(&self, resource_name: &str) -> Option<&Schema> {
        self.by_resource
            .get(resource_name)
            .and_then(|id| self.get(*id))
    }

    /// True if `id` is `ancestor` or extends it, directly or not.
    #[must_use]
    pub fn extends(&self, id: SchemaId, ancestor: SchemaId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.get(cur).and_then(Schema::parent);
        }
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Creates a blank entity of the named schema.
    pub fn instantiate(self: &Arc<Self>, name: &str) -> ModelResult<Entity> {
        let id = self
            .id_of(name)
            .ok_or_else(|| ModelError::UnknownSchema(name.to_string()))?;
        Ok(Entity::new(Arc::clone(self), id))
    }

    /// Creates a blank entity of the schema serving `resource_name`.
    pub fn instantiate_resource(self: &Arc<Self>, resource_name: &str) -> ModelResult<Entity> {
        let id = self
            .by_resource
            .get(resource_name)
            .copied()
            .ok_or_else(|| ModelError::UnknownResource(resource_name.to_string()))?;
        Ok(Entity::new(Arc::clone(self), id))
    }
}

impl Index<SchemaId> for SchemaRegistry {
    type Output = Schema;

    /// Panics if `id` was not issued by this registry.
    fn index(&self, id: SchemaId) -> &Schema {
        &self.schemas[id.index()]
    }
}

/// Collects schema definitions, resolving inheritance as they arrive.
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    registry: SchemaRegistry,
}

impl SchemaRegistryBuilder {
    /// Registers a schema. Parents must be registered before their children.
    pub fn register(mut self, def: SchemaDef) -> ModelResult<Self> {
        let registry = &mut self.registry;
        if registry.by_name.contains_key(&def.name) {
            return Err(ModelError::DuplicateSchema(def.name));
        }
        let inconsistent = |reason: String| ModelError::InconsistentSchema {
            schema: def.name.clone(),
            reason,
        };

        let mut own = HashSet::new();
        for descriptor in &def.attributes {
            if !own.insert(descriptor.local_name()) {
                return Err(inconsistent(format!(
                    "attribute {} is declared twice",
                    descriptor.local_name()
                )));
            }
        }

        let (parent, mut attributes) = match &def.extends {
            Some(parent_name) => {
                let parent_id = registry.id_of(parent_name).ok_or_else(|| {
                    ModelError::UnknownParent {
                        schema: def.name.clone(),
                        parent: parent_name.clone(),
                    }
                })?;
                (Some(parent_id), registry[parent_id].attributes.clone())
            }
            None => (None, IndexMap::new()),
        };
        for descriptor in &def.attributes {
            attributes.insert(
                descriptor.local_name().to_string(),
                Arc::new(descriptor.clone()),
            );
        }

        let mut remote = HashMap::new();
        for descriptor in attributes.values() {
            if let Some(previous) = remote.insert(descriptor.remote_name(), descriptor.local_name())
            {
                return Err(inconsistent(format!(
                    "attributes {previous} and {} share remote name {}",
                    descriptor.local_name(),
                    descriptor.remote_name()
                )));
            }
        }
        if attributes.values().filter(|d| d.is_association()).count() > 1 {
            return Err(inconsistent(
                "more than one association collection".to_string(),
            ));
        }

        if let Some(resource) = &def.resource_name
            && let Some(owner) = registry.by_resource.get(resource)
        {
            return Err(inconsistent(format!(
                "resource name {resource} is already served by {}",
                registry[*owner].name
            )));
        }

        let slot = u32::try_from(registry.schemas.len())
            .map_err(|_| inconsistent("registry is full".to_string()))?;
        let id = SchemaId::new(slot);
        registry.by_name.insert(def.name.clone(), id);
        if let Some(resource) = &def.resource_name {
            registry.by_resource.insert(resource.clone(), id);
        }
        registry.schemas.push(Schema {
            id,
            name: def.name,
            resource_name: def.resource_name,
            parent,
            attributes,
        });
        Ok(self)
    }

    /// Registers every schema in a JSON document holding one schema object or
    /// an array of them.
    pub fn register_json(mut self, json: &str) -> ModelResult<Self> {
        let specs: Vec<SchemaSpec> = match serde_json::from_str::<JsonValue>(json)? {
            JsonValue::Array(items) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<Result<_, _>>()?,
            single => vec![serde_json::from_value(single)?],
        };
        for spec in specs {
            self = self.register(SchemaDef::try_from(spec)?)?;
        }
        Ok(self)
    }

    /// Freezes the registry. Sub-types naming unknown schemas are reported
    /// but not rejected; marshaling passes such values through untouched.
    #[must_use]
    pub fn build(self) -> Arc<SchemaRegistry> {
        let registry = self.registry;
        for schema in &registry.schemas {
            for descriptor in schema.attributes() {
                if let Some(SubType::Schema(target)) = descriptor.sub_type()
                    && !registry.by_name.contains_key(target)
                {
                    warn!(
                        schema = %schema.name,
                        attribute = %descriptor.local_name(),
                        sub_type = %target,
                        "subType does not name a registered schema"
                    );
                }
            }
        }
        Arc::new(registry)
    }
}

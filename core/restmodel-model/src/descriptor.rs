//! Attribute descriptors: per-field schema metadata plus the intrinsic
//! checks every field runs during a validation pass.
//!
//! A descriptor is built once per schema and shared read-only by every
//! entity of that schema (and of its sub-schemas).

use crate::value::{EnumChoice, Value};
use crate::validator::{ValidationContext, Validator};
use crate::{Entity, ModelError, ModelResult};
use restmodel_types::{AttributeType, ValidationError, ValidationFailure};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

const INVALID_INPUT: &str = "Invalid input";
const MANDATORY_DESCRIPTION: &str = "This value is mandatory";

/// Element or nested type of a `list` / `object` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubType {
    /// A primitive tag; for `object` attributes this means raw JSON.
    Primitive(AttributeType),
    /// The name of a registered schema.
    Schema(String),
}

impl SubType {
    /// Parses a sub-type tag: known type tags become primitives, anything
    /// else is taken as a schema name.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        AttributeType::from_str(tag).map_or_else(|_| Self::Schema(tag.to_string()), Self::Primitive)
    }

    /// Returns the schema name if this sub-type references one.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        match self {
            Self::Schema(name) => Some(name),
            Self::Primitive(_) => None,
        }
    }
}

impl fmt::Display for SubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(f),
            Self::Schema(name) => f.write_str(name),
        }
    }
}

impl From<AttributeType> for SubType {
    fn from(ty: AttributeType) -> Self {
        Self::Primitive(ty)
    }
}

/// Immutable metadata for one named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDescriptor {
    local_name: String,
    remote_name: String,
    attribute_type: AttributeType,
    sub_type: Option<SubType>,
    display_name: String,
    description: Option<String>,
    userlabel: Option<String>,
    choices: Option<Vec<String>>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_value: Option<f64>,
    max_value: Option<f64>,
    default_value: Option<Value>,
    is_required: bool,
    is_read_only: bool,
    is_create_only: bool,
    is_unique: bool,
    can_search: bool,
    can_order: bool,
    is_internal: bool,
    is_password: bool,
    is_email: bool,
    is_identifier: bool,
    is_login: bool,
    is_association: bool,
}

impl AttributeDescriptor {
    /// Starts a descriptor for `local_name` of the given type.
    pub fn builder(local_name: impl Into<String>, attribute_type: AttributeType) -> AttributeBuilder {
        let local_name = local_name.into();
        AttributeBuilder {
            remote_name: None,
            display_name: None,
            inner: Self {
                remote_name: String::new(),
                display_name: String::new(),
                local_name,
                attribute_type,
                sub_type: None,
                description: None,
                userlabel: None,
                choices: None,
                min_length: None,
                max_length: None,
                min_value: None,
                max_value: None,
                default_value: None,
                is_required: false,
                is_read_only: false,
                is_create_only: false,
                is_unique: false,
                can_search: false,
                can_order: false,
                is_internal: false,
                is_password: false,
                is_email: false,
                is_identifier: false,
                is_login: false,
                is_association: false,
            },
        }
    }

    /// Builds a descriptor from a loosely typed spec (e.g. a JSON schema file).
    pub fn from_spec(spec: AttributeSpec) -> ModelResult<Self> {
        let (Some(local_name), Some(type_tag)) = (
            spec.local_name.clone().filter(|n| !n.is_empty()),
            spec.attribute_type.clone().filter(|t| !t.is_empty()),
        ) else {
            return Err(ModelError::MissingName {
                local_name: spec.local_name,
                attribute_type: spec.attribute_type,
            });
        };
        let attribute_type = AttributeType::from_str(&type_tag)?;

        let mut builder = Self::builder(local_name, attribute_type)
            .required(spec.is_required)
            .read_only(spec.is_read_only)
            .create_only(spec.is_create_only)
            .unique(spec.is_unique)
            .searchable(spec.can_search)
            .orderable(spec.can_order)
            .internal(spec.is_internal)
            .password(spec.is_password)
            .email(spec.is_email)
            .identifier(spec.is_identifier)
            .login(spec.is_login)
            .association(spec.is_association);

        if let Some(remote) = spec.remote_name.filter(|n| !n.is_empty()) {
            builder = builder.remote_name(remote);
        }
        if let Some(display) = spec.display_name.filter(|n| !n.is_empty()) {
            builder = builder.display_name(display);
        }
        if let Some(description) = spec.description {
            builder = builder.description(description);
        }
        if let Some(label) = spec.userlabel {
            builder = builder.userlabel(label);
        }
        if let Some(tag) = spec.sub_type {
            builder = builder.sub_type(SubType::parse(&tag));
        }
        if let Some(min) = spec.min_length.and_then(|n| usize::try_from(n).ok()) {
            builder = builder.min_length(min);
        }
        if let Some(max) = spec.max_length.and_then(|n| usize::try_from(n).ok()) {
            builder = builder.max_length(max);
        }
        if let Some(min) = spec.min_value {
            builder = builder.min_value(min);
        }
        if let Some(max) = spec.max_value {
            builder = builder.max_value(max);
        }
        if let Some(choices) = spec.choices {
            builder = builder.choices(choices.iter().map(choice_name));
        }
        if let Some(default) = spec.default_value {
            builder = builder.default_value(default);
        }
        builder.build()
    }

    // ── Metadata ─────────────────────────────────────────────────

    /// In-process identifier.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Wire identifier; equals the local name unless overridden.
    #[must_use]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    #[must_use]
    pub fn sub_type(&self) -> Option<&SubType> {
        self.sub_type.as_ref()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn userlabel(&self) -> Option<&str> {
        self.userlabel.as_deref()
    }

    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    #[must_use]
    pub fn has_choices(&self) -> bool {
        self.choices.is_some()
    }

    #[must_use]
    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    #[must_use]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    #[must_use]
    pub fn min_value(&self) -> Option<f64> {
        self.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Value a fresh entity starts with; `None` leaves the attribute unassigned.
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    #[must_use]
    pub fn is_create_only(&self) -> bool {
        self.is_create_only
    }

    /// Always derived from the read-only and create-only flags.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        !(self.is_create_only || self.is_read_only)
    }

    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    #[must_use]
    pub fn can_search(&self) -> bool {
        self.can_search
    }

    #[must_use]
    pub fn can_order(&self) -> bool {
        self.can_order
    }

    /// Internal attributes are left out of inspect-style representations.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.is_internal
    }

    #[must_use]
    pub fn is_password(&self) -> bool {
        self.is_password
    }

    #[must_use]
    pub fn is_email(&self) -> bool {
        self.is_email
    }

    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.is_identifier
    }

    #[must_use]
    pub fn is_login(&self) -> bool {
        self.is_login
    }

    /// Marks the association collection of a schema.
    #[must_use]
    pub fn is_association(&self) -> bool {
        self.is_association
    }

    // ── Intrinsic validation ─────────────────────────────────────

    /// Whether `value` counts as provided for this attribute.
    ///
    /// Strings must be truthy (an empty string is unset). Every other type
    /// only needs to be present and non-null, so `0` and `false` are set.
    #[must_use]
    pub fn is_value_set(&self, value: Option<&Value>) -> bool {
        match value {
            None => false,
            Some(v) if self.attribute_type == AttributeType::String => v.is_truthy(),
            Some(v) => !v.is_null(),
        }
    }

    /// Runs the intrinsic checks for this attribute against `value`.
    ///
    /// The mandatory check short-circuits everything else. Absent and null
    /// values pass the remaining checks, as do the empty forms of the
    /// attribute's own kind (`""`, `false`, `NaN`). Numbers, zero included,
    /// are always range-checked.
    #[must_use]
    pub fn check(&self, value: Option<&Value>) -> Option<ValidationError> {
        if self.is_required && !self.is_value_set(value) {
            return Some(self.error(INVALID_INPUT, MANDATORY_DESCRIPTION));
        }
        let value = value.filter(|v| !v.is_null())?;

        match self.attribute_type {
            AttributeType::Boolean => match value {
                Value::Bool(_) => None,
                other => Some(self.type_mismatch(AttributeType::Boolean, other)),
            },
            AttributeType::String => match value {
                Value::String(s) if s.is_empty() => None,
                Value::String(s) => self.check_string(s),
                other => Some(self.type_mismatch(AttributeType::String, other)),
            },
            AttributeType::Enum => match value {
                Value::String(s) | Value::Enum(s) if s.is_empty() => None,
                other => self.check_enum(other),
            },
            ty @ (AttributeType::Integer | AttributeType::Float | AttributeType::Long) => {
                match value {
                    Value::Float(f) if f.is_nan() => None,
                    other => self.check_number(ty, other),
                }
            }
            AttributeType::Object => self.check_object(value),
            AttributeType::List => match value {
                Value::List(items) => self.check_list(items),
                other => Some(self.type_mismatch(AttributeType::List, other)),
            },
        }
    }

    fn error(&self, title: &str, description: impl Into<String>) -> ValidationError {
        ValidationError::new(&self.local_name, &self.remote_name, title, description)
    }

    fn type_mismatch(&self, expected: impl fmt::Display, actual: &Value) -> ValidationError {
        self.error(
            "Invalid data type",
            format!("Data type should be {expected}, but is {}", actual.type_name()),
        )
    }

    fn check_string(&self, s: &str) -> Option<ValidationError> {
        let len = s.chars().count();
        if let Some(min) = self.min_length.filter(|min| len < *min) {
            return Some(self.error(
                "Invalid length",
                format!("Minimum length should be {min}, but is {len}"),
            ));
        }
        if let Some(max) = self.max_length.filter(|max| len > *max) {
            return Some(self.error(
                "Invalid length",
                format!("Maximum length should be {max}, but is {len}"),
            ));
        }
        None
    }

    fn check_enum(&self, value: &Value) -> Option<ValidationError> {
        let choices = self.choices.as_ref()?;
        let key = value.choice_key();
        if choices.iter().any(|c| *c == key) {
            return None;
        }
        Some(self.error(
            INVALID_INPUT,
            format!(
                "Allowed values are {}, but value provided is {value}",
                choices.join(",")
            ),
        ))
    }

    fn check_number(&self, expected: AttributeType, value: &Value) -> Option<ValidationError> {
        let Some(n) = value.as_f64() else {
            return Some(self.type_mismatch(expected, value));
        };
        if expected == AttributeType::Integer && !value.is_whole_number() {
            return Some(self.error(
                "Invalid data type",
                format!("Data type should be integer, but is {value}"),
            ));
        }
        if let Some(min) = self.min_value.filter(|m| m.is_finite() && n < *m) {
            return Some(self.error(
                "Invalid value",
                format!("Minimum value should be {min}, but is {value}"),
            ));
        }
        if let Some(max) = self.max_value.filter(|m| m.is_finite() && n > *m) {
            return Some(self.error(
                "Invalid value",
                format!("Maximum value should be {max}, but is {value}"),
            ));
        }
        None
    }

    fn check_object(&self, value: &Value) -> Option<ValidationError> {
        if !matches!(value, Value::Object(_) | Value::Map(_) | Value::List(_)) {
            return Some(self.type_mismatch(AttributeType::Object, value));
        }
        let expected = self.sub_type.as_ref()?.schema_name()?;
        match value {
            Value::Object(entity) if entity.class_name() == expected => None,
            _ => Some(self.error(
                "Invalid subType",
                format!("Expected subType is {expected}"),
            )),
        }
    }

    fn check_list(&self, items: &[Value]) -> Option<ValidationError> {
        let sub_type = self.sub_type.as_ref()?;
        items.iter().find_map(|item| self.check_element(sub_type, item))
    }

    /// Per-element rule, selected by the sub-type. Nested entities are
    /// matched by schema name, not by registry identity.
    fn check_element(&self, sub_type: &SubType, item: &Value) -> Option<ValidationError> {
        match sub_type {
            SubType::Schema(name) => match item {
                Value::Object(entity) if entity.class_name() == name => None,
                other => Some(self.type_mismatch(name, other)),
            },
            SubType::Primitive(ty) => match (ty, item) {
                (AttributeType::String, Value::String(s)) => self.check_string(s),
                (AttributeType::Enum, _) => self.check_enum(item),
                (AttributeType::Integer | AttributeType::Float | AttributeType::Long, _) => {
                    self.check_number(*ty, item)
                }
                (AttributeType::Boolean, Value::Bool(_))
                | (AttributeType::List, Value::List(_))
                | (AttributeType::Object, Value::Object(_) | Value::Map(_) | Value::List(_)) => None,
                (ty, other) => Some(self.type_mismatch(ty, other)),
            },
        }
    }
}

impl Validator for AttributeDescriptor {
    fn name(&self) -> &str {
        &self.local_name
    }

    fn validate(
        &self,
        entity: &Entity,
        descriptor: Option<&AttributeDescriptor>,
        _context: &ValidationContext<'_>,
    ) -> Option<ValidationFailure> {
        let descriptor = descriptor.unwrap_or(self);
        descriptor
            .check(entity.get(descriptor.local_name()))
            .map(ValidationFailure::from)
    }
}

/// Builder for [`AttributeDescriptor`].
#[derive(Debug, Clone)]
pub struct AttributeBuilder {
    inner: AttributeDescriptor,
    remote_name: Option<String>,
    display_name: Option<String>,
}

impl AttributeBuilder {
    /// Wire name; defaults to the local name.
    #[must_use]
    pub fn remote_name(mut self, name: impl Into<String>) -> Self {
        self.remote_name = Some(name.into());
        self
    }

    /// Human label; defaults to the local name.
    #[must_use]
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn userlabel(mut self, label: impl Into<String>) -> Self {
        self.inner.userlabel = Some(label.into());
        self
    }

    #[must_use]
    pub fn sub_type(mut self, sub_type: impl Into<SubType>) -> Self {
        self.inner.sub_type = Some(sub_type.into());
        self
    }

    /// Element or nested type referencing a registered schema by name.
    #[must_use]
    pub fn schema_sub_type(self, schema: impl Into<String>) -> Self {
        self.sub_type(SubType::Schema(schema.into()))
    }

    #[must_use]
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Uses the names of enumeration members as choices.
    #[must_use]
    pub fn enum_choices<E: EnumChoice>(self, members: &[E]) -> Self {
        self.choices(members.iter().map(|m| m.choice_name().to_string()))
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.inner.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.inner.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn min_value(mut self, min: f64) -> Self {
        self.inner.min_value = Some(min);
        self
    }

    #[must_use]
    pub fn max_value(mut self, max: f64) -> Self {
        self.inner.max_value = Some(max);
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.inner.default_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn required(mut self, yes: bool) -> Self {
        self.inner.is_required = yes;
        self
    }

    #[must_use]
    pub fn read_only(mut self, yes: bool) -> Self {
        self.inner.is_read_only = yes;
        self
    }

    #[must_use]
    pub fn create_only(mut self, yes: bool) -> Self {
        self.inner.is_create_only = yes;
        self
    }

    #[must_use]
    pub fn unique(mut self, yes: bool) -> Self {
        self.inner.is_unique = yes;
        self
    }

    #[must_use]
    pub fn searchable(mut self, yes: bool) -> Self {
        self.inner.can_search = yes;
        self
    }

    #[must_use]
    pub fn orderable(mut self, yes: bool) -> Self {
        self.inner.can_order = yes;
        self
    }

    #[must_use]
    pub fn internal(mut self, yes: bool) -> Self {
        self.inner.is_internal = yes;
        self
    }

    #[must_use]
    pub fn password(mut self, yes: bool) -> Self {
        self.inner.is_password = yes;
        self
    }

    #[must_use]
    pub fn email(mut self, yes: bool) -> Self {
        self.inner.is_email = yes;
        self
    }

    #[must_use]
    pub fn identifier(mut self, yes: bool) -> Self {
        self.inner.is_identifier = yes;
        self
    }

    #[must_use]
    pub fn login(mut self, yes: bool) -> Self {
        self.inner.is_login = yes;
        self
    }

    #[must_use]
    pub fn association(mut self, yes: bool) -> Self {
        self.inner.is_association = yes;
        self
    }

    /// Finishes the descriptor, rejecting contradictory settings.
    pub fn build(self) -> ModelResult<AttributeDescriptor> {
        let mut inner = self.inner;
        if inner.local_name.is_empty() {
            return Err(ModelError::MissingName {
                local_name: None,
                attribute_type: Some(inner.attribute_type.to_string()),
            });
        }
        inner.remote_name = self.remote_name.unwrap_or_else(|| inner.local_name.clone());
        inner.display_name = self.display_name.unwrap_or_else(|| inner.local_name.clone());

        let invalid = |reason: String| ModelError::InvalidDescriptor {
            attribute: inner.local_name.clone(),
            reason,
        };
        if let (Some(min), Some(max)) = (inner.min_length, inner.max_length)
            && min > max
        {
            return Err(invalid(format!("minLength {min} exceeds maxLength {max}")));
        }
        if let (Some(min), Some(max)) = (inner.min_value, inner.max_value)
            && min > max
        {
            return Err(invalid(format!("minValue {min} exceeds maxValue {max}")));
        }
        if inner.sub_type.is_some() && !inner.attribute_type.accepts_sub_type() {
            return Err(invalid(format!(
                "subType is only allowed on list and object attributes, not {}",
                inner.attribute_type
            )));
        }
        if inner.choices.is_some()
            && !matches!(inner.attribute_type, AttributeType::Enum | AttributeType::List)
        {
            return Err(invalid(format!(
                "choices are only allowed on enum and list attributes, not {}",
                inner.attribute_type
            )));
        }
        if inner.is_association && inner.attribute_type != AttributeType::List {
            return Err(invalid("association collections must be lists".to_string()));
        }
        Ok(inner)
    }
}

/// Loosely typed descriptor definition, as found in JSON schema files.
///
/// Mirrors the keys the wire metadata uses (`localName`, `attributeType`,
/// `isRequired`, ...). An `isEditable` key is accepted and ignored since
/// editability is always derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeSpec {
    pub local_name: Option<String>,
    pub remote_name: Option<String>,
    pub attribute_type: Option<String>,
    pub sub_type: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub userlabel: Option<String>,
    /// Plain values or objects carrying a `name`.
    pub choices: Option<Vec<JsonValue>>,
    /// Negative values mean unbounded.
    pub min_length: Option<i64>,
    /// Negative values mean unbounded.
    pub max_length: Option<i64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub default_value: Option<JsonValue>,
    pub is_required: bool,
    pub is_read_only: bool,
    pub is_create_only: bool,
    pub is_editable: Option<bool>,
    pub is_unique: bool,
    pub can_search: bool,
    pub can_order: bool,
    pub is_internal: bool,
    pub is_password: bool,
    pub is_email: bool,
    pub is_identifier: bool,
    pub is_login: bool,
    pub is_association: bool,
}

impl TryFrom<AttributeSpec> for AttributeDescriptor {
    type Error = ModelError;

    fn try_from(spec: AttributeSpec) -> ModelResult<Self> {
        Self::from_spec(spec)
    }
}

fn choice_name(choice: &JsonValue) -> String {
    match choice {
        JsonValue::String(s) => s.clone(),
        JsonValue::Object(map) => match map.get("name") {
            Some(JsonValue::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => choice.to_string(),
        },
        other => other.to_string(),
    }
}

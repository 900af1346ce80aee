use crate::schemas::{USER, USER_RESOURCE};
use crate::{EntitiesError, EntitiesResult, UserRole};
use restmodel_model::{Entity, SchemaRegistry, Value};
use serde_json::Value as JsonValue;
use std::sync::Arc;

const ENCRYPTION_CAPABILITY: &str = "ENCRYPTION_ENABLED";

/// The signed-in user: an entity of the `User` schema (or one extending
/// it) with typed accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    entity: Entity,
}

impl User {
    /// Creates a blank user.
    pub fn new(registry: &Arc<SchemaRegistry>) -> EntitiesResult<Self> {
        Ok(Self {
            entity: registry.instantiate_resource(USER_RESOURCE)?,
        })
    }

    /// Builds a user from the wire representation of resource `me`.
    pub fn from_json(registry: &Arc<SchemaRegistry>, json: &JsonValue) -> EntitiesResult<Self> {
        let mut user = Self::new(registry)?;
        user.entity.build_from_json(json);
        Ok(user)
    }

    #[must_use]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    #[must_use]
    pub fn into_entity(self) -> Entity {
        self.entity
    }

    fn text(&self, local_name: &str) -> &str {
        self.entity.get_str(local_name).unwrap_or_default()
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        self.text("firstName")
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        self.text("lastName")
    }

    #[must_use]
    pub fn user_name(&self) -> &str {
        self.text("userName")
    }

    #[must_use]
    pub fn email(&self) -> &str {
        self.text("email")
    }

    #[must_use]
    pub fn enterprise_name(&self) -> &str {
        self.text("enterpriseName")
    }

    /// Role parsed from the `role` attribute; unset means unknown.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.entity
            .get_str("role")
            .map_or(UserRole::Unknown, UserRole::from_name)
    }

    #[must_use]
    pub fn role_name(&self) -> &'static str {
        self.role().label()
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    /// Lower-cased one-line summary: name, login and role, plus the
    /// enterprise for roles that belong to one.
    #[must_use]
    pub fn display_description(&self) -> String {
        let summary = format!(
            "{} ({}) - {}",
            self.full_name(),
            self.user_name(),
            self.role_name()
        );
        let summary = if self.role().is_data_center() {
            summary
        } else {
            format!("{summary} {}", self.enterprise_name())
        };
        summary.to_lowercase()
    }

    #[must_use]
    pub fn is_csp_root(&self) -> bool {
        self.role().has_root()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().has_admin()
    }

    #[must_use]
    pub fn is_security_admin(&self) -> bool {
        self.role().has_security_admin()
    }

    #[must_use]
    pub fn is_network_designer(&self) -> bool {
        self.role().has_org_network_designer()
    }

    #[must_use]
    pub fn is_everybody(&self) -> bool {
        self.role().has_org_user()
    }

    #[must_use]
    pub fn is_operator(&self) -> bool {
        self.role().has_operator()
    }

    #[must_use]
    pub fn is_admin_operator(&self) -> bool {
        self.role().has_admin_operator()
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.role().has_system()
    }

    /// True when the license capabilities include encryption. Accepts the
    /// capability list or a comma separated string.
    #[must_use]
    pub fn is_encryption_enabled(&self) -> bool {
        match self.entity.get("licenseCapabilities") {
            Some(Value::List(items)) => items
                .iter()
                .any(|item| item.as_str() == Some(ENCRYPTION_CAPABILITY)),
            Some(Value::String(s)) => s.split(',').any(|c| c.trim() == ENCRYPTION_CAPABILITY),
            _ => false,
        }
    }
}

impl TryFrom<Entity> for User {
    type Error = EntitiesError;

    /// Accepts entities of the `User` schema or of a schema extending it.
    fn try_from(entity: Entity) -> EntitiesResult<Self> {
        let registry = entity.registry();
        let is_user = registry
            .id_of(USER)
            .is_some_and(|user| registry.extends(entity.schema_id(), user));
        if !is_user {
            return Err(EntitiesError::NotAUser(entity.class_name().to_string()));
        }
        Ok(Self { entity })
    }
}

impl AsRef<Entity> for User {
    fn as_ref(&self) -> &Entity {
        &self.entity
    }
}

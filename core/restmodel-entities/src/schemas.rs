//! Base schema definitions.
//!
//! Concrete resource schemas extend [`ENTITY`] (or [`ROOT_ENTITY`] for
//! sign-in capable resources) and add their own attributes.

use crate::role::UserRole;
use restmodel_model::{AttributeDescriptor, AttributeType, ModelResult, SchemaDef, Value};

pub const ENTITY: &str = "Entity";
pub const ROOT_ENTITY: &str = "RootEntity";
pub const AUDITABLE_ENTITY: &str = "AuditableEntity";
pub const USER: &str = "User";

/// Resource name of the signed-in user.
pub const USER_RESOURCE: &str = "me";

/// Avatar encodings accepted by the `avatarType` attribute.
pub const AVATAR_TYPES: [&str; 3] = ["BASE64", "COMPUTEDURL", "URL"];

fn string(name: &str) -> ModelResult<AttributeDescriptor> {
    AttributeDescriptor::builder(name, AttributeType::String).build()
}

/// A string that starts out as an explicit `null`.
fn nullable_string(name: &str) -> ModelResult<AttributeDescriptor> {
    AttributeDescriptor::builder(name, AttributeType::String)
        .default_value(Value::Null)
        .build()
}

fn timestamp(name: &str, searchable: bool) -> ModelResult<AttributeDescriptor> {
    AttributeDescriptor::builder(name, AttributeType::TIMESTAMP)
        .read_only(true)
        .searchable(searchable)
        .build()
}

/// Identity, ownership and audit attributes shared by every resource.
pub fn entity() -> ModelResult<SchemaDef> {
    Ok(SchemaDef::new(ENTITY).attributes([
        timestamp("creationDate", false)?,
        string("entityScope")?,
        string("externalID")?,
        AttributeDescriptor::builder("ID", AttributeType::String)
            .identifier(true)
            .default_value(Value::Null)
            .build()?,
        string("lastUpdatedBy")?,
        timestamp("lastUpdatedDate", false)?,
        string("owner")?,
        string("parentID")?,
        string("parentType")?,
        AttributeDescriptor::builder("associatedEntities", AttributeType::List)
            .association(true)
            .default_value(Value::List(Vec::new()))
            .build()?,
        string("associatedEntitiesResourceName")?,
    ]))
}

/// An entity whose audit timestamps can be searched.
pub fn auditable_entity() -> ModelResult<SchemaDef> {
    Ok(SchemaDef::new(AUDITABLE_ENTITY).extends(ENTITY).attributes([
        timestamp("creationDate", true)?,
        timestamp("lastUpdatedDate", true)?,
    ]))
}

/// Credentials and API key of an account that can sign in.
pub fn root_entity() -> ModelResult<SchemaDef> {
    let password = |name: &str, required: bool| {
        AttributeDescriptor::builder(name, AttributeType::String)
            .password(true)
            .required(required)
            .default_value(Value::Null)
            .build()
    };
    Ok(SchemaDef::new(ROOT_ENTITY).extends(ENTITY).attributes([
        nullable_string("APIKey")?,
        nullable_string("APIKeyExpiry")?,
        password("newPassword", false)?,
        password("password", true)?,
        password("passwordConfirm", false)?,
        AttributeDescriptor::builder("role", AttributeType::Enum)
            .enum_choices(&UserRole::ALL)
            .default_value(Value::Null)
            .build()?,
        AttributeDescriptor::builder("userName", AttributeType::String)
            .login(true)
            .default_value(Value::Null)
            .build()?,
    ]))
}

/// The signed-in user, served as resource `me`.
pub fn user() -> ModelResult<SchemaDef> {
    let required = |name: &str| {
        AttributeDescriptor::builder(name, AttributeType::String)
            .required(true)
            .default_value(Value::Null)
            .build()
    };
    let flag = |name: &str| {
        AttributeDescriptor::builder(name, AttributeType::Boolean)
            .default_value(Value::Null)
            .build()
    };
    Ok(SchemaDef::new(USER)
        .resource_name(USER_RESOURCE)
        .extends(ROOT_ENTITY)
        .attributes([
            required("firstName")?,
            required("lastName")?,
            AttributeDescriptor::builder("email", AttributeType::String)
                .required(true)
                .email(true)
                .default_value(Value::Null)
                .build()?,
            nullable_string("mobileNumber")?,
            nullable_string("enterpriseName")?,
            nullable_string("avatarData")?,
            AttributeDescriptor::builder("avatarType", AttributeType::Enum)
                .choices(AVATAR_TYPES)
                .default_value(Value::Null)
                .build()?,
            AttributeDescriptor::builder("licenseCapabilities", AttributeType::List)
                .sub_type(AttributeType::String)
                .default_value(Value::Null)
                .build()?,
            flag("statisticsEnabled")?,
            nullable_string("elasticSearchUIAddress")?,
            flag("flowCollectionEnabled")?,
            nullable_string("enterpriseID")?,
        ]))
}

/// Every base schema, parents first.
pub fn all() -> ModelResult<Vec<SchemaDef>> {
    Ok(vec![entity()?, auditable_entity()?, root_entity()?, user()?])
}

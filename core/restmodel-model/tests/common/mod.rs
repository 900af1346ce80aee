//! Shared schema fixtures for model tests.

#![allow(dead_code)]

use restmodel_model::{
    AttributeBuilder, AttributeDescriptor, AttributeType, EnumChoice, SchemaDef, SchemaRegistry,
    Value,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpType {
    DualStack,
    Ipv4,
    Ipv6,
}

impl EnumChoice for IpType {
    fn choice_name(&self) -> &str {
        match self {
            Self::DualStack => "DUALSTACK",
            Self::Ipv4 => "IPV4",
            Self::Ipv6 => "IPV6",
        }
    }
}

pub const IP_TYPES: [IpType; 3] = [IpType::DualStack, IpType::Ipv4, IpType::Ipv6];

pub fn attr(name: &str, ty: AttributeType) -> AttributeBuilder {
    AttributeDescriptor::builder(name, ty)
}

/// Minimal base schema: identifier, ownership and an association collection.
pub fn base_def() -> SchemaDef {
    SchemaDef::new("Entity").attributes([
        attr("ID", AttributeType::String)
            .identifier(true)
            .default_value(Value::Null)
            .build()
            .unwrap(),
        attr("parentID", AttributeType::String).build().unwrap(),
        attr("owner", AttributeType::String).build().unwrap(),
        attr("entityScope", AttributeType::String).build().unwrap(),
        attr("creationDate", AttributeType::TIMESTAMP)
            .read_only(true)
            .build()
            .unwrap(),
        attr("associatedEntities", AttributeType::List)
            .association(true)
            .default_value(Value::List(Vec::new()))
            .build()
            .unwrap(),
    ])
}

pub fn my_entity_def() -> SchemaDef {
    SchemaDef::new("MyEntity")
        .resource_name("childentity")
        .extends("Entity")
        .attributes([
            attr("attr1", AttributeType::String)
                .remote_name("ATTR1")
                .build()
                .unwrap(),
            attr("attr2", AttributeType::String).build().unwrap(),
            attr("attr3", AttributeType::Enum)
                .remote_name("ATTR3")
                .required(true)
                .enum_choices(&IP_TYPES)
                .build()
                .unwrap(),
            attr("attr4", AttributeType::String)
                .min_length(3)
                .max_length(6)
                .build()
                .unwrap(),
            attr("attr5", AttributeType::Boolean).build().unwrap(),
            attr("attr6", AttributeType::Integer).build().unwrap(),
            attr("attr7", AttributeType::Float).build().unwrap(),
            attr("attr8", AttributeType::List)
                .sub_type(AttributeType::Enum)
                .enum_choices(&IP_TYPES)
                .build()
                .unwrap(),
            attr("attr9", AttributeType::List)
                .sub_type(AttributeType::Float)
                .build()
                .unwrap(),
        ])
}

pub fn address_def() -> SchemaDef {
    SchemaDef::new("Address").attributes([
        attr("street", AttributeType::String)
            .required(true)
            .build()
            .unwrap(),
        attr("zip", AttributeType::Integer).build().unwrap(),
    ])
}

/// Schema with nested objects and lists of nested objects.
pub fn holder_def() -> SchemaDef {
    SchemaDef::new("Holder").resource_name("holder").attributes([
        attr("name", AttributeType::String).build().unwrap(),
        attr("home", AttributeType::Object)
            .schema_sub_type("Address")
            .build()
            .unwrap(),
        attr("previous", AttributeType::List)
            .schema_sub_type("Address")
            .build()
            .unwrap(),
        attr("raw", AttributeType::Object)
            .sub_type(AttributeType::Object)
            .build()
            .unwrap(),
        attr("tags", AttributeType::List)
            .sub_type(AttributeType::String)
            .max_length(4)
            .build()
            .unwrap(),
        attr("secret", AttributeType::String)
            .internal(true)
            .build()
            .unwrap(),
    ])
}

pub fn registry() -> Arc<SchemaRegistry> {
    SchemaRegistry::builder()
        .register(base_def())
        .unwrap()
        .register(my_entity_def())
        .unwrap()
        .register(address_def())
        .unwrap()
        .register(holder_def())
        .unwrap()
        .build()
}

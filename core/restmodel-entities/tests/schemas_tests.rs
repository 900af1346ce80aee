use pretty_assertions::assert_eq;
use restmodel_entities::schemas::{self, AUDITABLE_ENTITY, ENTITY, ROOT_ENTITY, USER, USER_RESOURCE};
use restmodel_entities::{UserRole, builtin_registry};
use restmodel_model::{AttributeType, ValidationContext, Value};
use serde_json::json;

// ── Base entity ──────────────────────────────────────────────────

#[test]
fn entity_declares_identity_and_ownership() {
    let reg = builtin_registry().unwrap();
    let entity = reg.schema(ENTITY).unwrap();
    let names: Vec<&str> = entity.attributes().map(|d| d.local_name()).collect();
    assert_eq!(
        names,
        [
            "creationDate",
            "entityScope",
            "externalID",
            "ID",
            "lastUpdatedBy",
            "lastUpdatedDate",
            "owner",
            "parentID",
            "parentType",
            "associatedEntities",
            "associatedEntitiesResourceName",
        ]
    );
    assert_eq!(entity.identifier().unwrap().local_name(), "ID");
    assert_eq!(entity.association().unwrap().local_name(), "associatedEntities");
    assert_eq!(entity.resource_name(), None);
}

#[test]
fn only_timestamps_are_read_only() {
    let reg = builtin_registry().unwrap();
    let entity = reg.schema(ENTITY).unwrap();
    for name in ["creationDate", "lastUpdatedDate"] {
        assert!(!entity.attribute(name).unwrap().is_editable(), "{name}");
    }
    for name in ["entityScope", "externalID", "lastUpdatedBy", "owner", "parentID", "parentType"] {
        assert!(entity.attribute(name).unwrap().is_editable(), "{name}");
    }
    assert!(entity.attribute("associatedEntities").unwrap().is_editable());
    assert_eq!(
        entity.attribute("creationDate").unwrap().attribute_type(),
        AttributeType::Long
    );
}

#[test]
fn ownership_attributes_are_sent_back() {
    let reg = builtin_registry().unwrap();
    let mut entity = reg.instantiate(ENTITY).unwrap();
    entity.set("parentID", "p-1").unwrap();
    entity.set("parentType", "enterprise").unwrap();
    let object = entity.to_object();
    assert_eq!(object["parentID"], json!("p-1"));
    assert_eq!(object["parentType"], json!("enterprise"));
}

#[test]
fn fresh_entity_serializes_identifier_and_empty_association() {
    let reg = builtin_registry().unwrap();
    let entity = reg.instantiate(ENTITY).unwrap();
    assert_eq!(entity.to_object(), json!({ "ID": null, "associatedEntities": [] }));
}

// ── Derived schemas ──────────────────────────────────────────────

#[test]
fn auditable_entity_makes_timestamps_searchable() {
    let reg = builtin_registry().unwrap();
    let auditable = reg.schema(AUDITABLE_ENTITY).unwrap();
    let searchable: Vec<&str> = auditable
        .searchable_attributes()
        .into_iter()
        .map(|d| d.local_name())
        .collect();
    assert_eq!(searchable, ["creationDate", "lastUpdatedDate"]);
    assert!(reg.schema(ENTITY).unwrap().searchable_attributes().is_empty());
    assert_eq!(auditable.len(), reg.schema(ENTITY).unwrap().len());
}

#[test]
fn root_entity_requires_password() {
    let reg = builtin_registry().unwrap();
    let root = reg.schema(ROOT_ENTITY).unwrap();
    assert_eq!(root.mandatory_attributes(), ["password"]);
    assert!(root.attribute("password").unwrap().is_password());
    assert!(root.attribute("passwordConfirm").unwrap().is_password());
    assert!(root.attribute("userName").unwrap().is_login());
}

#[test]
fn user_is_served_as_me() {
    let reg = builtin_registry().unwrap();
    let user = reg.schema_for_resource(USER_RESOURCE).unwrap();
    assert_eq!(user.name(), USER);
    assert_eq!(
        user.mandatory_attributes(),
        ["password", "firstName", "lastName", "email"]
    );
    assert!(reg.extends(user.id(), reg.id_of(ENTITY).unwrap()));
    assert_eq!(
        user.attribute("avatarType").unwrap().choices().unwrap(),
        ["BASE64", "COMPUTEDURL", "URL"]
    );
}

#[test]
fn user_validation_reports_missing_fields() {
    let reg = builtin_registry().unwrap();
    let mut user = reg.instantiate_resource(USER_RESOURCE).unwrap();
    assert!(!user.is_valid(&ValidationContext::new()));
    let mut failed: Vec<&str> = user.validation_errors().keys().map(String::as_str).collect();
    failed.sort_unstable();
    assert_eq!(failed, ["email", "firstName", "lastName", "password"]);

    for (name, value) in [
        ("password", "secret"),
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("email", "ada@example.com"),
    ] {
        user.set(name, value).unwrap();
    }
    user.set("avatarType", "GIF").unwrap();
    assert!(!user.is_valid(&ValidationContext::new()));
    assert_eq!(user.validation_errors().len(), 1);

    user.set("avatarType", Value::Enum("URL".into())).unwrap();
    assert!(user.is_valid(&ValidationContext::new()));
}

#[test]
fn role_choices_are_user_roles() {
    let reg = builtin_registry().unwrap();
    let root = reg.schema(ROOT_ENTITY).unwrap();
    let role = root.attribute("role").unwrap();
    assert_eq!(role.attribute_type(), AttributeType::Enum);
    let expected: Vec<&str> = UserRole::ALL.iter().map(UserRole::as_str).collect();
    assert_eq!(role.choices().unwrap(), expected.as_slice());
}

#[test]
fn unknown_role_fails_validation() {
    let reg = builtin_registry().unwrap();
    let mut user = reg.instantiate_resource(USER_RESOURCE).unwrap();
    for (name, value) in [
        ("password", "secret"),
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("email", "ada@example.com"),
        ("role", "ORGADMIN"),
    ] {
        user.set(name, value).unwrap();
    }
    assert!(user.is_valid(&ValidationContext::new()));

    user.set("role", "SUPERUSER").unwrap();
    assert!(!user.is_valid(&ValidationContext::new()));
    let failure = user.validation_error("role").unwrap();
    assert!(failure.description().ends_with("but value provided is SUPERUSER"));
}

#[test]
fn all_lists_parents_first() {
    let names: Vec<String> = schemas::all()
        .unwrap()
        .iter()
        .map(|def| def.name().to_string())
        .collect();
    assert_eq!(names, [ENTITY, AUDITABLE_ENTITY, ROOT_ENTITY, USER]);
}

use pretty_assertions::assert_eq;
use restmodel_entities::{EntitiesError, User, UserRole, builtin_registry, schemas};
use serde_json::json;

fn user(role: &str) -> User {
    let reg = builtin_registry().unwrap();
    User::from_json(
        &reg,
        &json!({
            "ID": "u-1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "userName": "ALovelace",
            "enterpriseName": "Analytical Engines",
            "role": role
        }),
    )
    .unwrap()
}

// ── Roles ────────────────────────────────────────────────────────

#[test]
fn role_names_parse_and_display() {
    for role in UserRole::ALL {
        assert_eq!(UserRole::from_name(role.as_str()), role);
        assert_eq!(role.to_string(), role.as_str());
    }
    assert_eq!(UserRole::from_name("WIZARD"), UserRole::Unknown);
    assert_eq!("ORGADMIN".parse::<UserRole>().unwrap(), UserRole::OrgAdmin);
    assert_eq!(UserRole::default(), UserRole::Unknown);
}

#[test]
fn role_serde_uses_wire_names() {
    assert_eq!(serde_json::to_value(UserRole::CspRoot).unwrap(), json!("CSPROOT"));
    let role: UserRole = serde_json::from_value(json!("SECURITYADMINISTRATOR")).unwrap();
    assert_eq!(role, UserRole::SecurityAdministrator);
}

#[test]
fn role_predicates_match_single_role() {
    assert!(UserRole::CspRoot.has_root());
    assert!(!UserRole::OrgAdmin.has_root());
    assert!(UserRole::OrgAdmin.has_admin());
    assert!(UserRole::AdminOperator.has_admin_operator());
    assert!(UserRole::CspOperator.has_operator());
    assert!(UserRole::SecurityAdministrator.has_security_admin());
    assert!(UserRole::System.has_system());
    assert!(UserRole::OrgUser.has_org_user());
    assert!(UserRole::OrgNetworkDesigner.has_org_network_designer());
}

// ── User ─────────────────────────────────────────────────────────

#[test]
fn typed_accessors_read_wire_values() {
    let u = user("ORGADMIN");
    assert_eq!(u.first_name(), "Ada");
    assert_eq!(u.last_name(), "Lovelace");
    assert_eq!(u.user_name(), "ALovelace");
    assert_eq!(u.email(), "");
    assert_eq!(u.role(), UserRole::OrgAdmin);
    assert_eq!(u.full_name(), "Ada Lovelace");
    assert!(u.is_admin());
    assert!(!u.is_csp_root());
}

#[test]
fn role_name_follows_role() {
    assert_eq!(user("CSPROOT").role_name(), "data center administrator");
    assert_eq!(user("ORGUSER").role_name(), "standard user of");
    assert_eq!(user("JMS").role_name(), "");
}

#[test]
fn display_description_includes_enterprise_for_org_roles() {
    assert_eq!(
        user("ORGNETWORKDESIGNER").display_description(),
        "ada lovelace (alovelace) - network designer of analytical engines"
    );
    assert_eq!(
        user("CSPOPERATOR").display_description(),
        "ada lovelace (alovelace) - data center operator"
    );
}

#[test]
fn missing_role_is_unknown() {
    let reg = builtin_registry().unwrap();
    let u = User::new(&reg).unwrap();
    assert_eq!(u.role(), UserRole::Unknown);
    assert!(!u.is_system());
    assert!(!u.is_everybody());
}

#[test]
fn encryption_capability_is_detected() {
    let reg = builtin_registry().unwrap();
    let u = User::from_json(
        &reg,
        &json!({ "licenseCapabilities": ["STATS", "ENCRYPTION_ENABLED"] }),
    )
    .unwrap();
    assert!(u.is_encryption_enabled());

    let u = User::from_json(&reg, &json!({ "licenseCapabilities": ["STATS"] })).unwrap();
    assert!(!u.is_encryption_enabled());

    assert!(!User::new(&reg).unwrap().is_encryption_enabled());
}

#[test]
fn only_user_entities_convert() {
    let reg = builtin_registry().unwrap();
    let entity = reg.instantiate(schemas::ROOT_ENTITY).unwrap();
    let err = User::try_from(entity).unwrap_err();
    assert!(matches!(err, EntitiesError::NotAUser(ref name) if name == "RootEntity"));

    let entity = reg.instantiate(schemas::USER).unwrap();
    let user = User::try_from(entity).unwrap();
    assert_eq!(user.entity().resource_name(), Some("me"));
}

#[test]
fn entities_own_their_users_records() {
    let u = user("ORGUSER");
    let reg = u.entity().registry().clone();
    let mut owned = reg.instantiate(schemas::ENTITY).unwrap();
    owned.set("owner", "u-1").unwrap();
    assert!(owned.is_owned_by(u.entity()));
    owned.set("owner", "u-2").unwrap();
    assert!(!owned.is_owned_by(u.as_ref()));
}

//! Runs in its own process: installing the global registry is one-shot.

use restmodel_entities::{EntitiesError, builtin_builder, global, install_global};
use restmodel_model::SchemaDef;
use std::sync::Arc;

#[test]
fn install_global_is_one_shot() {
    let reg = builtin_builder()
        .unwrap()
        .register(SchemaDef::new("Widget").resource_name("widgets").extends("Entity"))
        .unwrap()
        .build();
    install_global(Arc::clone(&reg)).unwrap();

    let installed = global().unwrap();
    assert!(Arc::ptr_eq(&installed, &reg));
    assert!(installed.instantiate_resource("widgets").is_ok());

    let err = install_global(reg).unwrap_err();
    assert!(matches!(err, EntitiesError::AlreadyInstalled));
}

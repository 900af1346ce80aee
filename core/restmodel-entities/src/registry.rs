//! The built-in registry and the process-wide instance.

use crate::{EntitiesError, EntitiesResult, schemas};
use restmodel_model::{ModelResult, SchemaRegistry, SchemaRegistryBuilder};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::info;

static GLOBAL: OnceLock<Arc<SchemaRegistry>> = OnceLock::new();

/// A builder preloaded with the base schemas, ready for resource schemas
/// that extend them.
pub fn builtin_builder() -> ModelResult<SchemaRegistryBuilder> {
    schemas::all()?
        .into_iter()
        .try_fold(SchemaRegistry::builder(), SchemaRegistryBuilder::register)
}

/// A registry holding only the base schemas.
pub fn builtin_registry() -> ModelResult<Arc<SchemaRegistry>> {
    Ok(builtin_builder()?.build())
}

/// Registers the schemas defined in a JSON file (one schema object or an
/// array of them).
pub fn load_schema_file(
    builder: SchemaRegistryBuilder,
    path: impl AsRef<Path>,
) -> EntitiesResult<SchemaRegistryBuilder> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| EntitiesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = builder.register_json(&json)?;
    info!(path = %path.display(), "loaded schema file");
    Ok(builder)
}

/// Installs the process-wide registry. Fails if one is installed already,
/// including the built-in one [`global`] falls back to.
pub fn install_global(registry: Arc<SchemaRegistry>) -> EntitiesResult<()> {
    let schemas = registry.len();
    GLOBAL
        .set(registry)
        .map_err(|_| EntitiesError::AlreadyInstalled)?;
    info!(schemas, "installed global schema registry");
    Ok(())
}

/// The process-wide registry. Installs the built-in registry on first use
/// if none was installed.
pub fn global() -> EntitiesResult<Arc<SchemaRegistry>> {
    if let Some(registry) = GLOBAL.get() {
        return Ok(Arc::clone(registry));
    }
    let builtin = builtin_registry()?;
    Ok(Arc::clone(GLOBAL.get_or_init(|| builtin)))
}

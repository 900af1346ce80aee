//! Built-in schemas and process-level setup for restmodel.
//!
//! Provides the base schemas every remote resource extends (`Entity`,
//! `RootEntity`, `AuditableEntity`) and the signed-in `User` (resource
//! `me`), the [`UserRole`] table, a process-wide registry and logging setup.

mod error;
pub mod logging;
mod registry;
mod role;
pub mod schemas;
mod user;

pub use error::{EntitiesError, EntitiesResult};
pub use logging::{LogLevel, LoggingConfig, init_logging};
pub use registry::{builtin_builder, builtin_registry, global, install_global, load_schema_file};
pub use role::UserRole;
pub use user::User;

//! Error types for built-in schemas and process setup.

use restmodel_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntitiesError {
    /// Schema definition or entity access failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A schema file could not be read.
    #[error("cannot read schema file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process-wide registry was installed already.
    #[error("global schema registry is already installed")]
    AlreadyInstalled,

    /// The entity is not a user.
    #[error("expected a User entity, got {0}")]
    NotAUser(String),

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for entity-level operations.
pub type EntitiesResult<T> = Result<T, EntitiesError>;

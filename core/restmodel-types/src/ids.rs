//! Identifier types for schemas held in a registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a schema inside a `SchemaRegistry`.
///
/// Schemas are stored arena-style; nested references and parent links are
/// resolved to a `SchemaId` once, at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(u32);

impl SchemaId {
    /// Creates a schema ID from an arena slot.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the arena slot as a `usize`, ready for indexing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema#{}", self.0)
    }
}

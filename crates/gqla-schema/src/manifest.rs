//! TOML declaration manifests.
//!
//! A manifest lists type and member declarations as TOML tables. Callables
//! cannot be written in TOML; bind them afterwards with
//! [`DeclarationSet::bind_callable`].
//!
//! ```toml
//! [[types]]
//! identity = "blog::State"
//! kind = "enum"
//! values = [
//!     { name = "DRAFT", value = "draft" },
//!     { name = "PUBLISHED", value = "published" },
//! ]
//!
//! [[members]]
//! declaring_type = "blog::Post"
//! member = "title"
//! kind = "property"
//! declared_type = { shape = "named", name = "string" }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::declaration::{DeclarationSet, MemberDeclaration, TypeDeclaration};
use crate::error::Result;

/// Declarations loaded from a TOML document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
}

impl Manifest {
    /// Parses a manifest.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Manifest` for malformed TOML or unknown shapes.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(input)?;
        debug!(
            types = manifest.types.len(),
            members = manifest.members.len(),
            "Loaded declaration manifest"
        );
        Ok(manifest)
    }

    pub fn into_declarations(self) -> DeclarationSet {
        DeclarationSet {
            types: self.types,
            members: self.members,
        }
    }
}

impl From<Manifest> for DeclarationSet {
    fn from(manifest: Manifest) -> Self {
        manifest.into_declarations()
    }
}

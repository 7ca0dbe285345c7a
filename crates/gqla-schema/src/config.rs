//! Schema builder configuration.
//!
//! Usually embedded in a host's TOML configuration under `[graphql.schema]`:
//!
//! ```toml
//! [graphql.schema]
//! implicit_target_types = true
//! field_collision = "overwrite"
//! strict_references = false
//! ```

use serde::{Deserialize, Serialize};

/// What to do when a second field is attached under an existing (type, field) name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCollisionPolicy {
    /// The later declaration replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail the build with `DuplicateField`.
    Reject,
}

/// Options controlling how declarations are turned into a schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaBuilderConfig {
    /// Create an empty object type when a member targets an undeclared type.
    /// When disabled such members fail with `UnknownExtendsTarget`.
    /// Default: true
    #[serde(default = "default_implicit_target_types")]
    pub implicit_target_types: bool,

    /// Policy for duplicate (type, field) pairs.
    /// Default: overwrite
    #[serde(default)]
    pub field_collision: FieldCollisionPolicy,

    /// Evaluate every deferred type reference at the end of the build,
    /// so unknown type names fail the build instead of the first lookup.
    /// Default: false
    #[serde(default)]
    pub strict_references: bool,
}

fn default_implicit_target_types() -> bool {
    true
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            implicit_target_types: default_implicit_target_types(),
            field_collision: FieldCollisionPolicy::default(),
            strict_references: false,
        }
    }
}

impl SchemaBuilderConfig {
    /// Strict configuration: no implicit types, no overwrites, eager reference checks.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            implicit_target_types: false,
            field_collision: FieldCollisionPolicy::Reject,
            strict_references: true,
        }
    }
}

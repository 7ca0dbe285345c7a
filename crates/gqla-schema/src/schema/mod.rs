//! Schema graph construction.
//!
//! - [`descriptor`] - Type descriptor parsing (`"[Post!]!"`)
//! - [`type_ref`] - Structural type references, including deferred ones
//! - [`registry`] - Name to type node registry with identity aliases
//! - [`meta`] - Type and field nodes
//! - [`field`] - Member declaration to field entry
//! - [`dispatch`] - Field resolution dispatch
//! - [`input`] - Input object decoding and encoding
//! - [`builder`] - Two-pass schema builder
//! - [`graph`] - The finished, read-only schema graph

pub mod builder;
pub mod descriptor;
pub mod dispatch;
pub mod field;
pub mod graph;
pub mod input;
pub mod meta;
pub mod registry;
pub mod type_ref;

pub use builder::SchemaBuilder;
pub use dispatch::{DispatchMode, FieldResolver, ResolveDispatcher};
pub use field::FieldAssembler;
pub use graph::SchemaGraph;
pub use input::{InputField, InputObjectCodec};
pub use meta::{
    Argument, DeprecationStatus, EnumMeta, EnumValue, Field, InputObjectMeta, InterfaceMeta,
    MetaType, ObjectMeta, ScalarMeta, TypeKind,
};
pub use registry::{Catalog, TypeRegistry};
pub use type_ref::{DeferredType, TypeRef};

/// Name of the root query type.
pub const QUERY_TYPE: &str = "Query";

/// Name of the root mutation type.
pub const MUTATION_TYPE: &str = "Mutation";

/// Built-in scalar type names.
pub const BUILTIN_SCALARS: [&str; 5] = ["ID", "String", "Int", "Float", "Boolean"];

/// Host type names that map onto built-in scalars.
pub const SCALAR_ALIASES: [(&str, &str); 4] = [
    ("string", "String"),
    ("int", "Int"),
    ("float", "Float"),
    ("bool", "Boolean"),
];

//! # gqla-schema
//!
//! Builds an executable GraphQL schema graph from declaration records.
//!
//! Declarations describe the host program's types (objects, interfaces,
//! enums, input objects) and members (properties and callables). The
//! [`SchemaBuilder`] registers the types, attaches every member as a field,
//! and gives each field a resolver that routes calls to the right callable
//! with the right arguments.
//!
//! ## Overview
//!
//! Types may be referenced before they are declared: descriptors like
//! `"[Comment!]!"` naming unknown types produce deferred references that are
//! resolved once the build has finished.
//!
//! Callable fields are dispatched in one of three modes:
//!
//! - root operations (`Query` / `Mutation`) get only the field arguments
//! - methods attached to their own type get the owner as receiver
//! - extensions attached to a foreign type get the owner as first argument
//!
//! ## Modules
//!
//! - [`declaration`] - Declaration records and callables
//! - [`manifest`] - Loading declarations from TOML
//! - [`schema`] - Registry, builder and the finished graph
//! - [`config`] - Builder options
//! - [`error`] - Error types

pub mod config;
pub mod declaration;
pub mod error;
pub mod manifest;
pub mod name;
pub mod schema;

pub use config::{FieldCollisionPolicy, SchemaBuilderConfig};
pub use declaration::{
    Callable, Constructor, DeclarationSet, DeclaredType, EnumConstant, InputParameter, Invocation,
    MemberDeclaration, MemberKind, Parameter, TypeDeclaration, TypeShape,
};
pub use error::{FieldError, FieldResult, Result, SchemaError};
pub use manifest::Manifest;
pub use name::Name;
pub use schema::{SchemaBuilder, SchemaGraph, TypeKind, TypeRef};

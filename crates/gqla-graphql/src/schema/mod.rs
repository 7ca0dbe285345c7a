//! Executable schema construction.
//!
//! ## Components
//!
//! - [`ExecutableSchemaBuilder`] - Builds an async-graphql schema from a schema graph
//! - [`types`] - Per-type translation and type reference conversion

mod builder;
pub mod types;

pub use builder::{ExecutableSchemaBuilder, ExecutorConfig};
pub use types::{PLACEHOLDER_FIELD, to_type_ref};

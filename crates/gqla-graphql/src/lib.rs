//! # gqla-graphql
//!
//! Executes schema graphs built by `gqla-schema` with async-graphql.
//!
//! The schema graph is translated into an `async_graphql::dynamic::Schema`
//! whose resolvers all route back into the graph: arguments are decoded
//! into host values, the field's resolver runs, and the result is encoded
//! for the executor.
//!
//! ## Configuration
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`schema`] - Executable schema building
//! - [`resolvers`] - Field resolvers and value conversion
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod resolvers;
pub mod schema;

// Re-export main types
pub use config::GraphQLConfig;
pub use error::GraphQLError;
pub use schema::{ExecutableSchemaBuilder, ExecutorConfig};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;

//! Executable schema builder.
//!
//! This module provides `ExecutableSchemaBuilder`, which translates a finished
//! [`SchemaGraph`] into an async-graphql dynamic [`Schema`]. Every object
//! field resolves through the graph, so the executor never sees host values
//! directly.

use std::sync::Arc;

use async_graphql::dynamic::{Schema, SchemaBuilder};
use gqla_schema::schema::{MUTATION_TYPE, MetaType, QUERY_TYPE};
use gqla_schema::{DeclarationSet, SchemaGraph};
use tracing::{debug, trace};

use super::types::TypeTranslator;
use crate::config::GraphQLConfig;
use crate::error::GraphQLError;

/// Execution limits applied to the built schema.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds an executable GraphQL schema from a schema graph.
///
/// # Example
///
/// ```ignore
/// let graph = SchemaBuilder::default().build(&declarations)?;
/// let schema = ExecutableSchemaBuilder::new(ExecutorConfig::default())
///     .build(Arc::new(graph))?;
///
/// let response = schema.execute("{ posts { title } }").await;
/// ```
pub struct ExecutableSchemaBuilder {
    config: ExecutorConfig,
}

impl ExecutableSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Builds both the schema graph and the executable schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the declarations are invalid,
    /// or if the executor rejects the translated schema.
    pub fn from_declarations(
        declarations: &DeclarationSet,
        config: &GraphQLConfig,
    ) -> Result<Schema, GraphQLError> {
        config.validate()?;
        let graph = gqla_schema::SchemaBuilder::new(config.schema.clone()).build(declarations)?;
        Self::new(config.to_executor_config()).build(Arc::new(graph))
    }

    /// Builds the executable schema.
    ///
    /// Deferred type references are evaluated here. The `Mutation` root is
    /// left out when it has no fields.
    ///
    /// # Errors
    ///
    /// Returns an error if a deferred reference names an unknown type, or if
    /// schema construction fails.
    pub fn build(&self, graph: Arc<SchemaGraph>) -> Result<Schema, GraphQLError> {
        debug!(types = graph.type_count(), "Starting GraphQL schema build");

        let has_mutations = !graph.mutation_type().fields.is_empty();
        let mutation = has_mutations.then_some(MUTATION_TYPE);
        let mut schema_builder = Schema::build(QUERY_TYPE, mutation, None);

        schema_builder = self.register_types(schema_builder, &graph, has_mutations)?;

        // Configure limits
        let mut schema_builder = schema_builder.limit_depth(self.config.max_depth);
        schema_builder = schema_builder.limit_complexity(self.config.max_complexity);

        // Enable/disable introspection
        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        debug!("GraphQL schema build complete");
        Ok(schema)
    }

    /// Registers every graph type. Scalars in the graph are the executor's
    /// built-ins and are not registered again.
    fn register_types(
        &self,
        mut builder: SchemaBuilder,
        graph: &Arc<SchemaGraph>,
        has_mutations: bool,
    ) -> Result<SchemaBuilder, GraphQLError> {
        let translator = TypeTranslator::new(graph.clone());

        for meta in graph.types() {
            builder = match meta {
                MetaType::Scalar(_) => continue,
                MetaType::Object(object) if object.name == MUTATION_TYPE && !has_mutations => {
                    continue;
                }
                MetaType::Object(object) => builder.register(translator.object(object)?),
                MetaType::Interface(interface) => {
                    builder.register(translator.interface(interface)?)
                }
                MetaType::Enum(enumeration) => builder.register(translator.enumeration(enumeration)),
                MetaType::InputObject(input) => builder.register(translator.input_object(input)?),
            };
            trace!(type_name = %meta.name(), kind = %meta.kind(), "Registered type");
        }

        Ok(builder)
    }
}

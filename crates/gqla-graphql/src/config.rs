//! GraphQL configuration.
//!
//! Configuration can be specified in a host's TOML file under `[graphql]`.
//!
//! # Example Configuration
//!
//! ```toml
//! [graphql]
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//!
//! [graphql.schema]
//! field_collision = "reject"
//! ```

use gqla_schema::SchemaBuilderConfig;
use serde::{Deserialize, Serialize};

use crate::error::GraphQLError;
use crate::schema::ExecutorConfig;

/// GraphQL layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLConfig {
    /// Maximum query depth allowed.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Enable GraphQL introspection queries.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,

    /// Options for building the schema graph from declarations.
    #[serde(default)]
    pub schema: SchemaBuilderConfig,
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

fn default_introspection() -> bool {
    true
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            introspection: default_introspection(),
            schema: SchemaBuilderConfig::default(),
        }
    }
}

impl GraphQLConfig {
    /// Parses the configuration from a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, GraphQLError> {
        let config: Self =
            toml::from_str(input).map_err(|e| GraphQLError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), GraphQLError> {
        if self.max_depth == 0 {
            return Err(GraphQLError::InvalidConfig(
                "graphql.max_depth must be > 0".into(),
            ));
        }
        if self.max_complexity == 0 {
            return Err(GraphQLError::InvalidConfig(
                "graphql.max_complexity must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Converts this config to an ExecutorConfig.
    #[must_use]
    pub fn to_executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_depth: self.max_depth,
            max_complexity: self.max_complexity,
            introspection_enabled: self.introspection,
        }
    }
}

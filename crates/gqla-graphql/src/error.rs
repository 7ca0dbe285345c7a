//! Error types for the GraphQL layer.

use std::fmt;

use gqla_schema::SchemaError;

/// Errors that can occur while producing an executable schema.
#[derive(Debug)]
pub enum GraphQLError {
    /// The declarations did not form a valid schema graph, or a deferred
    /// type reference could not be resolved.
    Schema(SchemaError),

    /// The executor rejected the translated schema.
    SchemaBuildFailed(String),

    /// Invalid configuration values.
    InvalidConfig(String),
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => {
                write!(f, "Invalid schema declarations: {err}")
            }
            Self::SchemaBuildFailed(msg) => {
                write!(f, "Failed to build GraphQL schema: {msg}")
            }
            Self::InvalidConfig(msg) => {
                write!(f, "Invalid GraphQL configuration: {msg}")
            }
        }
    }
}

impl std::error::Error for GraphQLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(err) => Some(err),
            _ => None,
        }
    }
}

impl GraphQLError {
    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Schema(SchemaError::UnknownType { .. }) => "UNKNOWN_TYPE",
            Self::Schema(_) => "INVALID_SCHEMA",
            Self::SchemaBuildFailed(_) => "SCHEMA_BUILD_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

impl From<SchemaError> for GraphQLError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

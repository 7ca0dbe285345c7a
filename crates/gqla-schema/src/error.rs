use thiserror::Error;

use crate::name::NameParseError;
use crate::schema::TypeKind;

/// Errors raised while building a schema graph.
///
/// Every variant is a configuration error: the build stops at the first one
/// and no graph is produced. `UnknownType` is the exception in timing only,
/// since it surfaces when a deferred reference is finally evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Type {name} is already declared as {existing}, cannot declare it again as {requested}")]
    DuplicateTypeName {
        name: String,
        existing: TypeKind,
        requested: TypeKind,
    },

    #[error("Type {name} is {existing}, but {requested} was requested")]
    TypeKindMismatch {
        name: String,
        existing: TypeKind,
        requested: TypeKind,
    },

    #[error("Type {object} has {interface} as an interface, but {interface} is {actual}")]
    NotAnInterface {
        object: String,
        interface: String,
        actual: TypeKind,
    },

    #[error("Failed to find deferred type for {name}. Known types: {}", known.join(", "))]
    UnknownType { name: String, known: Vec<String> },

    #[error("Deferred type {name} was evaluated before the registry was finalized")]
    RegistryNotFinalized { name: String },

    #[error("Can't use '{0}' as a type - it needs an explicit type override, eg type: \"[String]\"")]
    AmbiguousContainerType(String),

    #[error("Malformed type descriptor {0:?}")]
    MalformedDescriptor(String),

    #[error("{member} has no type annotation and no type override")]
    MissingTypeAnnotation { member: String },

    #[error("{member} is declared as {shape}; only a single named type is supported")]
    UnsupportedTypeShape { member: String, shape: String },

    #[error(
        "Can't expose {member} - it isn't a member of a known type, and it doesn't specify an extends target"
    )]
    MissingExtendsTarget { member: String },

    #[error("{member} is trying to extend {target}, but that type does not exist")]
    UnknownExtendsTarget { member: String, target: String },

    #[error("Field {type_name}.{field} is declared more than once")]
    DuplicateField { type_name: String, field: String },

    #[error("{member} is a callable field but has no callable bound to it")]
    MissingCallable { member: String },

    #[error(transparent)]
    InvalidName(#[from] NameParseError),

    #[error("Invalid declaration manifest: {0}")]
    Manifest(String),
}

impl SchemaError {
    /// Create a new UnknownType error
    pub fn unknown_type(name: impl Into<String>, known: Vec<String>) -> Self {
        Self::UnknownType {
            name: name.into(),
            known,
        }
    }

    /// Create a new MissingTypeAnnotation error
    pub fn missing_type_annotation(member: impl Into<String>) -> Self {
        Self::MissingTypeAnnotation {
            member: member.into(),
        }
    }

    /// Create a new Manifest error
    pub fn manifest(message: impl Into<String>) -> Self {
        Self::Manifest(message.into())
    }

    /// Whether the error can only be detected once deferred references are evaluated.
    pub fn is_deferred(&self) -> bool {
        matches!(
            self,
            Self::UnknownType { .. } | Self::RegistryNotFinalized { .. }
        )
    }
}

impl From<toml::de::Error> for SchemaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Manifest(err.to_string())
    }
}

/// Error returned by a field resolver at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SchemaError> for FieldError {
    fn from(err: SchemaError) -> Self {
        Self::new(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

pub type FieldResult<T> = std::result::Result<T, FieldError>;

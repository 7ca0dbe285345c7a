//! Type and field nodes of the schema graph.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use super::dispatch::FieldResolver;
use super::input::InputObjectCodec;
use super::type_ref::TypeRef;
use crate::error::FieldResult;
use crate::name::Name;

/// The kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Enum,
    InputObject,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "a scalar",
            Self::Object => "an object",
            Self::Interface => "an interface",
            Self::Enum => "an enum",
            Self::InputObject => "an input object",
        })
    }
}

/// Whether an item is deprecated, with an optional reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum DeprecationStatus {
    /// The item is not deprecated.
    #[default]
    Current,
    /// The item is deprecated, with an optional reason.
    Deprecated(Option<String>),
}

impl DeprecationStatus {
    /// Deprecated when a reason is present.
    pub fn from_reason(reason: Option<&str>) -> Self {
        match reason {
            Some(reason) => Self::Deprecated(Some(reason.to_string())),
            None => Self::Current,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        matches!(self, Self::Deprecated(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Deprecated(Some(reason)) => Some(reason),
            _ => None,
        }
    }
}

/// An argument of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub description: Option<String>,
    pub arg_type: TypeRef,
    pub default_value: Option<Value>,
}

/// A field of an object or interface.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub arguments: Vec<Argument>,
    pub field_type: TypeRef,
    pub resolver: FieldResolver,
}

impl Field {
    /// Resolves the field against `owner` with positional argument values.
    ///
    /// `args` must follow the order of [`Field::arguments`].
    pub fn resolve(&self, owner: &Value, args: Vec<Value>) -> FieldResult<Value> {
        trace!(field = %self.name, args = args.len(), "Resolving field");
        self.resolver.resolve(owner, args)
    }
}

/// A built-in scalar.
#[derive(Debug, Clone)]
pub struct ScalarMeta {
    pub name: Name,
}

impl ScalarMeta {
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectMeta {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub fields: IndexMap<Name, Field>,
    pub interface_names: Vec<Name>,
}

impl ObjectMeta {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
            fields: IndexMap::new(),
            interface_names: Vec::new(),
        }
    }

    pub fn implements(&self, interface: &str) -> bool {
        self.interface_names.iter().any(|i| i == interface)
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceMeta {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub fields: IndexMap<Name, Field>,
}

impl InterfaceMeta {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
            fields: IndexMap::new(),
        }
    }
}

/// One value of an enum: public constant name and the underlying host value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: Name,
    pub value: Value,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
}

#[derive(Debug, Clone)]
pub struct EnumMeta {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub values: Vec<EnumValue>,
}

impl EnumMeta {
    pub fn new(name: Name) -> Self {
        Self {
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
            values: Vec::new(),
        }
    }

    /// The underlying value of the constant `name`.
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.name == name).map(|v| &v.value)
    }

    /// The constant name of an underlying value.
    pub fn name_of(&self, value: &Value) -> Option<&Name> {
        self.values.iter().find(|v| &v.value == value).map(|v| &v.name)
    }
}

#[derive(Debug, Clone)]
pub struct InputObjectMeta {
    pub name: Name,
    pub description: Option<String>,
    pub deprecation_status: DeprecationStatus,
    pub codec: InputObjectCodec,
}

impl InputObjectMeta {
    pub fn new(name: Name) -> Self {
        Self {
            codec: InputObjectCodec::empty(),
            name,
            description: None,
            deprecation_status: DeprecationStatus::Current,
        }
    }
}

/// A named type node.
#[derive(Debug, Clone)]
pub enum MetaType {
    Scalar(ScalarMeta),
    Object(ObjectMeta),
    Interface(InterfaceMeta),
    Enum(EnumMeta),
    InputObject(InputObjectMeta),
}

impl MetaType {
    pub fn name(&self) -> &Name {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Scalar(_) => None,
            Self::Object(ObjectMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_deref(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::Enum(_) => TypeKind::Enum,
            Self::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Sets the description, leaving an existing one when `description` is `None`.
    /// Built-in scalars keep no description.
    pub fn set_description(&mut self, text: Option<&str>) {
        let Some(text) = text else {
            return;
        };
        let slot = match self {
            Self::Scalar(_) => return,
            Self::Object(ObjectMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description,
        };
        *slot = Some(text.to_string());
    }

    /// Sets the deprecation status. Scalars cannot be deprecated.
    pub fn set_deprecation(&mut self, status: DeprecationStatus) {
        match self {
            Self::Scalar(_) => {}
            Self::Object(ObjectMeta {
                deprecation_status, ..
            })
            | Self::Interface(InterfaceMeta {
                deprecation_status, ..
            })
            | Self::Enum(EnumMeta {
                deprecation_status, ..
            })
            | Self::InputObject(InputObjectMeta {
                deprecation_status, ..
            }) => *deprecation_status = status,
        }
    }

    /// Fields of an object or interface.
    ///
    /// Only objects and interfaces have fields. This method always returns `None` for other types.
    pub fn fields(&self) -> Option<&IndexMap<Name, Field>> {
        match self {
            Self::Object(ObjectMeta { fields, .. }) | Self::Interface(InterfaceMeta { fields, .. }) => {
                Some(fields)
            }
            _ => None,
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut IndexMap<Name, Field>> {
        match self {
            Self::Object(ObjectMeta { fields, .. }) | Self::Interface(InterfaceMeta { fields, .. }) => {
                Some(fields)
            }
            _ => None,
        }
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields().and_then(|fields| fields.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_type_kind_display() {
        assert_eq!(TypeKind::Enum.to_string(), "an enum");
        assert_eq!(TypeKind::InputObject.to_string(), "an input object");
    }

    #[test]
    fn test_deprecation_status() {
        assert_eq!(DeprecationStatus::from_reason(None), DeprecationStatus::Current);
        let status = DeprecationStatus::from_reason(Some("use slug"));
        assert!(status.is_deprecated());
        assert_eq!(status.reason(), Some("use slug"));
        assert_eq!(DeprecationStatus::Deprecated(None).reason(), None);
    }

    #[test]
    fn test_enum_value_mapping() {
        let mut meta = EnumMeta::new(name("State"));
        for (constant, value) in [("DRAFT", "draft"), ("PUBLISHED", "published")] {
            meta.values.push(EnumValue {
                name: name(constant),
                value: json!(value),
                description: None,
                deprecation_status: DeprecationStatus::Current,
            });
        }

        assert_eq!(meta.value_of("PUBLISHED"), Some(&json!("published")));
        assert_eq!(meta.name_of(&json!("draft")).map(Name::as_str), Some("DRAFT"));
        assert!(meta.value_of("ARCHIVED").is_none());
    }

    #[test]
    fn test_only_objects_and_interfaces_have_fields() {
        let object = MetaType::Object(ObjectMeta::new(name("Post")));
        assert!(object.fields().is_some());

        let mut scalar = MetaType::Scalar(ScalarMeta::new(name("String")));
        assert!(scalar.fields().is_none());
        scalar.set_description(Some("Text"));
        assert_eq!(scalar.description(), None);
    }

    #[test]
    fn test_set_description_keeps_existing() {
        let mut object = MetaType::Object(ObjectMeta::new(name("Post")));
        object.set_description(Some("A blog post"));
        object.set_description(None);
        assert_eq!(object.description(), Some("A blog post"));
    }
}

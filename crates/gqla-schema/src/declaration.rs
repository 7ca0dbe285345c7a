//! Declaration records consumed by the schema builder.
//!
//! Declarations are produced up front by whatever discovers the host program's
//! types and members (code generation, registration calls, a TOML manifest).
//! The builder treats them as immutable input and never looks behind them.
//!
//! ## Identities and public names
//!
//! Every declaration carries a free-form *identity* (for example the host
//! path `blog::models::Post`). The public GraphQL name defaults to the last
//! `::` segment of the identity and can be overridden. The builder records an
//! alias from identity to public name, so type descriptors may use either.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, FieldResult, Result, SchemaError};

/// Arguments handed to a [`Callable`] when its field is resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// The implicit receiver (`self`), only set for owning methods.
    pub receiver: Option<Value>,
    /// Positional arguments, in parameter declaration order.
    pub args: Vec<Value>,
}

impl Invocation {
    pub fn new(receiver: Option<Value>, args: Vec<Value>) -> Self {
        Self { receiver, args }
    }

    /// Returns the receiver, failing if the callable was invoked without one.
    pub fn receiver(&self) -> FieldResult<&Value> {
        self.receiver
            .as_ref()
            .ok_or_else(|| FieldError::new("callable was invoked without a receiver"))
    }

    /// Returns the positional argument at `index`, or `Null` when absent.
    pub fn arg(&self, index: usize) -> &Value {
        self.args.get(index).unwrap_or(&Value::Null)
    }
}

type CallableFn = dyn Fn(Invocation) -> FieldResult<Value> + Send + Sync;

/// A host function or method backing a field.
#[derive(Clone)]
pub struct Callable(Arc<CallableFn>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Invocation) -> FieldResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, invocation: Invocation) -> FieldResult<Value> {
        (self.0)(invocation)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable")
    }
}

type ConstructorFn = dyn Fn(Vec<Value>) -> FieldResult<Value> + Send + Sync;

/// Builds the in-memory value of an input object from its field values,
/// passed positionally in field declaration order.
#[derive(Clone)]
pub struct Constructor(Arc<ConstructorFn>);

impl Constructor {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> FieldResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn construct(&self, values: Vec<Value>) -> FieldResult<Value> {
        (self.0)(values)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Constructor")
    }
}

/// The type the host declared for a member or parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DeclaredType {
    /// A single named type, e.g. `String` or `?User`.
    Named {
        name: String,
        #[serde(default)]
        nullable: bool,
    },
    /// A union of named types, e.g. `int|string`.
    Union { members: Vec<String> },
    /// An intersection of named types.
    Intersection { members: Vec<String> },
}

impl DeclaredType {
    /// A non-null named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            nullable: false,
        }
    }

    /// A nullable named type.
    pub fn nullable(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            nullable: true,
        }
    }

    /// Converts the declared type into a type descriptor.
    ///
    /// `String` becomes `"String!"`, `?String` becomes `"String"`.
    pub fn to_descriptor(&self, member: &str) -> Result<String> {
        match self {
            Self::Named { name, nullable } => Ok(if *nullable {
                name.clone()
            } else {
                format!("{name}!")
            }),
            Self::Union { members } => Err(SchemaError::UnsupportedTypeShape {
                member: member.to_string(),
                shape: members.join("|"),
            }),
            Self::Intersection { members } => Err(SchemaError::UnsupportedTypeShape {
                member: member.to_string(),
                shape: members.join("&"),
            }),
        }
    }
}

/// Kind-specific part of a [`TypeDeclaration`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    Object {
        #[serde(default)]
        interfaces: Vec<String>,
    },
    Interface,
    Enum {
        values: Vec<EnumConstant>,
    },
    InputObject {
        fields: Vec<InputParameter>,
        #[serde(skip)]
        constructor: Option<Constructor>,
    },
}

/// One constant of an enum declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstant {
    pub name: String,
    pub value: Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

impl EnumConstant {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            description: None,
            deprecation_reason: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }
}

/// One constructor parameter of an input object declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    /// Type descriptor, e.g. `"String!"`.
    #[serde(rename = "type")]
    pub descriptor: String,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

impl InputParameter {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            default: None,
            description: None,
        }
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A type-level declaration: object, interface, enum or input object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub identity: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    #[serde(flatten)]
    pub shape: TypeShape,
}

impl TypeDeclaration {
    fn with_shape(identity: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            identity: identity.into(),
            name: None,
            description: None,
            deprecation_reason: None,
            shape,
        }
    }

    pub fn object(identity: impl Into<String>) -> Self {
        Self::with_shape(identity, TypeShape::Object { interfaces: vec![] })
    }

    pub fn interface(identity: impl Into<String>) -> Self {
        Self::with_shape(identity, TypeShape::Interface)
    }

    pub fn enumeration(identity: impl Into<String>, values: Vec<EnumConstant>) -> Self {
        Self::with_shape(identity, TypeShape::Enum { values })
    }

    pub fn input_object(identity: impl Into<String>, fields: Vec<InputParameter>) -> Self {
        Self::with_shape(
            identity,
            TypeShape::InputObject {
                fields,
                constructor: None,
            },
        )
    }

    /// Overrides the public name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    /// Adds an interface claim. Only meaningful for object declarations.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        if let TypeShape::Object { interfaces } = &mut self.shape {
            interfaces.push(interface.into());
        }
        self
    }

    /// Sets the constructor used to decode values. Only meaningful for input objects.
    #[must_use]
    pub fn constructor(mut self, ctor: Constructor) -> Self {
        if let TypeShape::InputObject { constructor, .. } = &mut self.shape {
            *constructor = Some(ctor);
        }
        self
    }

    /// The public name: the override, or the last path segment of the identity.
    pub fn public_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| last_segment(&self.identity))
    }
}

/// How a member becomes a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// A stored attribute read off the owner value.
    Property,
    /// A callable attached to its declaring type or to an `extends` target.
    FieldMethod,
    /// A callable attached to the root `Query` type.
    Query,
    /// A callable attached to the root `Mutation` type.
    Mutation,
}

/// A declared parameter of a callable member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, rename = "type")]
    pub declared_type: Option<DeclaredType>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A property or callable eligible to become a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDeclaration {
    /// Identity of the type the member is physically part of; `None` for free functions.
    #[serde(default)]
    pub declaring_type: Option<String>,
    /// The member's own name; properties are read under this name.
    pub member: String,
    pub kind: MemberKind,
    /// Public field name override.
    #[serde(default)]
    pub name: Option<String>,
    /// Type descriptor override, e.g. `"[Post!]!"`.
    #[serde(default, rename = "type")]
    pub type_override: Option<String>,
    /// The member's declared value or return type.
    #[serde(default)]
    pub declared_type: Option<DeclaredType>,
    #[serde(default)]
    pub extends: Option<String>,
    /// Argument type descriptors keyed by parameter name.
    #[serde(default)]
    pub args: IndexMap<String, String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    #[serde(skip)]
    pub callable: Option<Callable>,
}

impl MemberDeclaration {
    fn new(
        declaring_type: Option<String>,
        member: impl Into<String>,
        kind: MemberKind,
        callable: Option<Callable>,
    ) -> Self {
        Self {
            declaring_type,
            member: member.into(),
            kind,
            name: None,
            type_override: None,
            declared_type: None,
            extends: None,
            args: IndexMap::new(),
            parameters: Vec::new(),
            description: None,
            deprecation_reason: None,
            callable,
        }
    }

    /// A stored property of `declaring_type`.
    pub fn property(
        declaring_type: impl Into<String>,
        member: impl Into<String>,
        declared_type: DeclaredType,
    ) -> Self {
        Self::new(
            Some(declaring_type.into()),
            member,
            MemberKind::Property,
            None,
        )
        .returns(declared_type)
    }

    /// A method of `declaring_type` exposed as a field.
    pub fn method(
        declaring_type: impl Into<String>,
        member: impl Into<String>,
        callable: Callable,
    ) -> Self {
        Self::new(
            Some(declaring_type.into()),
            member,
            MemberKind::FieldMethod,
            Some(callable),
        )
    }

    /// A free function exposed as a field; it must name its target with [`extends`].
    ///
    /// [`extends`]: MemberDeclaration::extends
    pub fn function(member: impl Into<String>, callable: Callable) -> Self {
        Self::new(None, member, MemberKind::FieldMethod, Some(callable))
    }

    /// A root query field.
    pub fn query(member: impl Into<String>, callable: Callable) -> Self {
        Self::new(None, member, MemberKind::Query, Some(callable))
    }

    /// A root mutation field.
    pub fn mutation(member: impl Into<String>, callable: Callable) -> Self {
        Self::new(None, member, MemberKind::Mutation, Some(callable))
    }

    /// Sets the declaring type, e.g. for a static method exposed as a query.
    #[must_use]
    pub fn declared_on(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }

    /// Overrides the public field name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared value/return type.
    #[must_use]
    pub fn returns(mut self, declared_type: DeclaredType) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// Overrides the field type with a descriptor.
    #[must_use]
    pub fn type_override(mut self, descriptor: impl Into<String>) -> Self {
        self.type_override = Some(descriptor.into());
        self
    }

    #[must_use]
    pub fn extends(mut self, target: impl Into<String>) -> Self {
        self.extends = Some(target.into());
        self
    }

    /// Adds a declared parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, declared_type: DeclaredType) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            declared_type: Some(declared_type),
            default: None,
            description: None,
        });
        self
    }

    /// Adds a declared parameter with a default value.
    #[must_use]
    pub fn param_with_default(
        mut self,
        name: impl Into<String>,
        declared_type: DeclaredType,
        default: impl Into<Value>,
    ) -> Self {
        self.parameters.push(Parameter {
            name: name.into(),
            declared_type: Some(declared_type),
            default: Some(default.into()),
            description: None,
        });
        self
    }

    /// Describes the already added parameter `name`.
    #[must_use]
    pub fn param_description(mut self, name: &str, description: impl Into<String>) -> Self {
        if let Some(param) = self.parameters.iter_mut().find(|p| p.name == name) {
            param.description = Some(description.into());
        }
        self
    }

    /// Overrides the argument type of parameter `name`.
    #[must_use]
    pub fn arg_type(mut self, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        self.args.insert(name.into(), descriptor.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: impl Into<String>) -> Self {
        self.deprecation_reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn callable(mut self, callable: Callable) -> Self {
        self.callable = Some(callable);
        self
    }

    /// The public field name: the override, or the last path segment of the member name.
    pub fn field_name(&self) -> &str {
        self.name
            .as_deref()
            .unwrap_or_else(|| last_segment(&self.member))
    }

    /// Human readable label used in error messages, e.g. `blog::Post::author`.
    pub fn label(&self) -> String {
        match &self.declaring_type {
            Some(owner) => format!("{owner}::{}", self.member),
            None => self.member.clone(),
        }
    }
}

/// The complete, ordered input of a schema build.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    pub types: Vec<TypeDeclaration>,
    pub members: Vec<MemberDeclaration>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(declaration);
        self
    }

    #[must_use]
    pub fn with_member(mut self, declaration: MemberDeclaration) -> Self {
        self.members.push(declaration);
        self
    }

    /// Binds a callable to a member loaded without one (e.g. from a manifest).
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Manifest` if no such member was declared.
    pub fn bind_callable(
        &mut self,
        declaring_type: Option<&str>,
        member: &str,
        callable: Callable,
    ) -> Result<()> {
        let target = self
            .members
            .iter_mut()
            .find(|m| m.declaring_type.as_deref() == declaring_type && m.member == member)
            .ok_or_else(|| {
                SchemaError::manifest(format!(
                    "no member {member} declared on {}",
                    declaring_type.unwrap_or("<free function>")
                ))
            })?;
        target.callable = Some(callable);
        Ok(())
    }
}

/// Strips everything up to the last `::` of a host path.
pub(crate) fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

//! The finished schema graph.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{trace, warn};

use super::meta::{Field, InterfaceMeta, MetaType, ObjectMeta};
use super::registry::TypeRegistry;
use super::type_ref::TypeRef;
use super::{MUTATION_TYPE, QUERY_TYPE};
use crate::error::{FieldError, FieldResult, Result, SchemaError};
use crate::name::Name;

/// Key an object value may carry to name its concrete type.
pub const TYPENAME_KEY: &str = "__typename";

/// Immutable, shareable result of a schema build.
#[derive(Debug)]
pub struct SchemaGraph {
    types: IndexMap<Name, MetaType>,
    aliases: HashMap<String, Name>,
}

impl SchemaGraph {
    pub(crate) fn new(registry: TypeRegistry) -> Self {
        let (types, aliases) = registry.finish();
        Self { types, aliases }
    }

    pub fn query_type(&self) -> &ObjectMeta {
        match self.types.get(QUERY_TYPE) {
            Some(MetaType::Object(query)) => query,
            _ => unreachable!("the registry always holds the Query object type"),
        }
    }

    pub fn mutation_type(&self) -> &ObjectMeta {
        match self.types.get(MUTATION_TYPE) {
            Some(MetaType::Object(mutation)) => mutation,
            _ => unreachable!("the registry always holds the Mutation object type"),
        }
    }

    /// All registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &MetaType> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Looks a type up by public name or declaration identity.
    pub fn type_by_name(&self, name: &str) -> Option<&MetaType> {
        let canonical = self.aliases.get(name).map_or(name, Name::as_str);
        self.types.get(canonical)
    }

    /// The type at the core of `type_ref`, evaluating deferred references.
    pub fn lookup(&self, type_ref: &TypeRef) -> Result<&MetaType> {
        let name = type_ref.named_type()?;
        self.types.get(&name).ok_or_else(|| {
            SchemaError::unknown_type(
                name.as_str(),
                self.types.keys().map(ToString::to_string).collect(),
            )
        })
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&Field> {
        self.type_by_name(type_name)?.field_by_name(field_name)
    }

    /// Resolves `type_name.field_name` against `owner`.
    pub fn resolve_field(
        &self,
        type_name: &str,
        field_name: &str,
        owner: &Value,
        args: Vec<Value>,
    ) -> FieldResult<Value> {
        let field = self.field(type_name, field_name).ok_or_else(|| {
            FieldError::new(format!("Unknown field {type_name}.{field_name}"))
        })?;
        field.resolve(owner, args)
    }

    /// Object types claiming the interface `interface`.
    pub fn implementors(&self, interface: &str) -> Vec<&ObjectMeta> {
        self.types
            .values()
            .filter_map(|meta| match meta {
                MetaType::Object(object) if object.implements(interface) => Some(object),
                _ => None,
            })
            .collect()
    }

    /// Picks the concrete object type of an interface value: the type named
    /// by its `__typename` key, or the interface's only implementor.
    pub fn concrete_type(&self, interface: &str, value: &Value) -> Option<&Name> {
        if let Some(typename) = value.get(TYPENAME_KEY).and_then(Value::as_str) {
            return match self.type_by_name(typename) {
                Some(MetaType::Object(object)) if object.implements(interface) => {
                    trace!(interface, concrete = %object.name, "Concrete type from __typename");
                    Some(&object.name)
                }
                _ => {
                    warn!(interface, typename, "__typename does not name an implementor");
                    None
                }
            };
        }
        let mut implementors = self.implementors(interface).into_iter();
        match (implementors.next(), implementors.next()) {
            (Some(only), None) => Some(&only.name),
            _ => {
                warn!(interface, "Cannot determine concrete type of interface value");
                None
            }
        }
    }

    /// Evaluates every deferred reference in the graph.
    ///
    /// # Errors
    ///
    /// The first reference naming a type that was never registered.
    pub fn check_references(&self) -> Result<()> {
        for meta in self.types.values() {
            match meta {
                MetaType::Object(ObjectMeta { fields, .. })
                | MetaType::Interface(InterfaceMeta { fields, .. }) => {
                    for field in fields.values() {
                        field.field_type.named_type()?;
                        for argument in &field.arguments {
                            argument.arg_type.named_type()?;
                        }
                    }
                }
                MetaType::InputObject(input) => {
                    for field in &input.codec.fields {
                        field.field_type.named_type()?;
                    }
                }
                MetaType::Scalar(_) | MetaType::Enum(_) => {}
            }
        }
        Ok(())
    }
}

//! Type registry used while the schema is being built.
//!
//! Maps public names to type nodes and declaration identities to public
//! names. Lookups that miss produce deferred references bound to the
//! registry's [`Catalog`], which is published once by [`TypeRegistry::finish`].

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use super::meta::{
    EnumMeta, InputObjectMeta, InterfaceMeta, MetaType, ObjectMeta, ScalarMeta, TypeKind,
};
use super::type_ref::{DeferredType, TypeRef};
use super::{BUILTIN_SCALARS, MUTATION_TYPE, QUERY_TYPE, SCALAR_ALIASES};
use crate::declaration::last_segment;
use crate::error::{Result, SchemaError};
use crate::name::Name;

/// Snapshot of registered names and aliases, published when the build finishes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    names: IndexSet<Name>,
    aliases: HashMap<String, Name>,
}

impl Catalog {
    pub fn insert(&mut self, name: Name) {
        self.names.insert(name);
    }

    pub fn alias(&mut self, identity: impl Into<String>, name: Name) {
        self.aliases.insert(identity.into(), name);
    }

    /// Substitutes an alias, then looks the name up.
    pub fn resolve(&self, raw: &str) -> Option<&Name> {
        let canonical = self.aliases.get(raw).map_or(raw, Name::as_str);
        self.names.get(canonical)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &Name> {
        self.names.iter()
    }
}

/// Registry of named types under construction.
#[derive(Debug)]
pub struct TypeRegistry {
    types: IndexMap<Name, MetaType>,
    aliases: HashMap<String, Name>,
    catalog: Arc<OnceLock<Catalog>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry holding the built-in scalars, their host aliases,
    /// and empty `Query` and `Mutation` root types.
    pub fn new() -> Self {
        let mut registry = Self {
            types: IndexMap::new(),
            aliases: HashMap::new(),
            catalog: Arc::new(OnceLock::new()),
        };
        for scalar in BUILTIN_SCALARS {
            let name = Name::new_unchecked(scalar);
            registry
                .types
                .insert(name.clone(), MetaType::Scalar(ScalarMeta::new(name)));
        }
        for (alias, scalar) in SCALAR_ALIASES {
            registry.aliases.insert(alias.to_string(), Name::new_unchecked(scalar));
        }
        for root in [QUERY_TYPE, MUTATION_TYPE] {
            let name = Name::new_unchecked(root);
            registry
                .types
                .insert(name.clone(), MetaType::Object(ObjectMeta::new(name)));
        }
        registry
    }

    /// Substitutes an alias, returning the name unchanged when there is none.
    pub fn alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, Name::as_str)
    }

    /// Records `identity` as an alias of the public name `name`.
    pub fn add_alias(&mut self, identity: &str, name: &Name) {
        if identity != name.as_str() {
            self.aliases.insert(identity.to_string(), name.clone());
        }
    }

    /// The public name a declaration identity maps to: its alias if one was
    /// recorded, otherwise the last path segment of the identity.
    pub fn public_name_of<'a>(&'a self, identity: &'a str) -> &'a str {
        match self.aliases.get(identity) {
            Some(name) => name.as_str(),
            None => last_segment(identity),
        }
    }

    /// Alias-aware lookup.
    pub fn get(&self, name: &str) -> Option<&MetaType> {
        self.types.get(self.alias(name))
    }

    /// Exact lookup by public name, ignoring aliases.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut MetaType> {
        self.types.get_mut(name)
    }

    /// Kind of the type registered under the public name `name`.
    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(MetaType::kind)
    }

    pub fn type_names(&self) -> Vec<String> {
        self.types.keys().map(ToString::to_string).collect()
    }

    /// Returns a reference to `name`, deferred if the type is not registered yet.
    pub fn maybe_get_type(&self, name: &str) -> TypeRef {
        match self.types.get_key_value(self.alias(name)) {
            Some((registered, _)) => TypeRef::Named(registered.clone()),
            None => TypeRef::Deferred(DeferredType::new(name, self.catalog.clone())),
        }
    }

    /// Same as [`maybe_get_type`](Self::maybe_get_type). Input and output kinds
    /// are not cross-checked here.
    pub fn maybe_get_input_type(&self, name: &str) -> TypeRef {
        self.maybe_get_type(name)
    }

    fn get_or_create(&mut self, name: &Name, create: impl FnOnce() -> MetaType) -> &mut MetaType {
        self.types.entry(name.clone()).or_insert_with(|| {
            let created = create();
            debug!(type_name = %name, kind = ?created.kind(), "Registered type");
            created
        })
    }

    pub fn get_or_create_object_type(&mut self, name: &Name) -> Result<&mut ObjectMeta> {
        match self.get_or_create(name, || MetaType::Object(ObjectMeta::new(name.clone()))) {
            MetaType::Object(meta) => Ok(meta),
            other => Err(mismatch(name, other.kind(), TypeKind::Object)),
        }
    }

    pub fn get_or_create_interface_type(&mut self, name: &Name) -> Result<&mut InterfaceMeta> {
        match self.get_or_create(name, || {
            MetaType::Interface(InterfaceMeta::new(name.clone()))
        }) {
            MetaType::Interface(meta) => Ok(meta),
            other => Err(mismatch(name, other.kind(), TypeKind::Interface)),
        }
    }

    pub fn get_or_create_enum_type(&mut self, name: &Name) -> Result<&mut EnumMeta> {
        match self.get_or_create(name, || MetaType::Enum(EnumMeta::new(name.clone()))) {
            MetaType::Enum(meta) => Ok(meta),
            other => Err(mismatch(name, other.kind(), TypeKind::Enum)),
        }
    }

    pub fn get_or_create_input_object_type(
        &mut self,
        name: &Name,
    ) -> Result<&mut InputObjectMeta> {
        match self.get_or_create(name, || {
            MetaType::InputObject(InputObjectMeta::new(name.clone()))
        }) {
            MetaType::InputObject(meta) => Ok(meta),
            other => Err(mismatch(name, other.kind(), TypeKind::InputObject)),
        }
    }

    /// Publishes the catalog so deferred references can resolve, and hands
    /// out the registered types and aliases.
    pub fn finish(self) -> (IndexMap<Name, MetaType>, HashMap<String, Name>) {
        let mut catalog = Catalog::default();
        for name in self.types.keys() {
            catalog.insert(name.clone());
        }
        for (identity, name) in &self.aliases {
            catalog.alias(identity.clone(), name.clone());
        }
        let published = self.catalog.set(catalog).is_ok();
        debug_assert!(published, "type catalog published twice");
        debug!(types = self.types.len(), "Type registry finalized");
        (self.types, self.aliases)
    }
}

fn mismatch(name: &Name, existing: TypeKind, requested: TypeKind) -> SchemaError {
    SchemaError::TypeKindMismatch {
        name: name.to_string(),
        existing,
        requested,
    }
}

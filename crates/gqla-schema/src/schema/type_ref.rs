//! Structural type references.
//!
//! A [`TypeRef`] is built from a descriptor while types may still be missing.
//! Names not yet registered become [`TypeRef::Deferred`]: the reference keeps
//! the raw name and a handle to the registry's write-once [`Catalog`], and is
//! only resolved when something needs the target type.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::registry::Catalog;
use crate::error::{Result, SchemaError};
use crate::name::Name;

/// A reference to a type, possibly wrapped in list and non-null modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A type that was registered when the reference was created.
    Named(Name),
    /// A type resolved lazily, after the registry is finalized.
    Deferred(DeferredType),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: Name) -> Self {
        Self::Named(name)
    }

    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// The named (or deferred) reference at the core of the wrappers.
    pub fn innermost(&self) -> &TypeRef {
        match self {
            Self::List(inner) | Self::NonNull(inner) => inner.innermost(),
            other => other,
        }
    }

    /// The raw name at the core of the wrappers, without resolving it.
    pub fn raw_name(&self) -> &str {
        match self {
            Self::Named(name) => name.as_str(),
            Self::Deferred(deferred) => deferred.name(),
            Self::List(inner) | Self::NonNull(inner) => inner.raw_name(),
        }
    }

    /// Resolves the core type name, evaluating a deferred reference if needed.
    pub fn named_type(&self) -> Result<Name> {
        match self {
            Self::Named(name) => Ok(name.clone()),
            Self::Deferred(deferred) => deferred.resolve(),
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }

    /// Returns a copy with every deferred reference replaced by its resolved name.
    pub fn resolved(&self) -> Result<TypeRef> {
        Ok(match self {
            Self::Named(name) => Self::Named(name.clone()),
            Self::Deferred(deferred) => Self::Named(deferred.resolve()?),
            Self::List(inner) => Self::list(inner.resolved()?),
            Self::NonNull(inner) => Self::non_null(inner.resolved()?),
        })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.innermost(), Self::Deferred(_))
    }
}

/// Prints the reference in descriptor form, e.g. `[Post!]!`.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Deferred(deferred) => f.write_str(deferred.name()),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A type name captured before its type was registered.
#[derive(Clone)]
pub struct DeferredType {
    name: String,
    catalog: Arc<OnceLock<Catalog>>,
}

impl DeferredType {
    pub(crate) fn new(name: impl Into<String>, catalog: Arc<OnceLock<Catalog>>) -> Self {
        Self {
            name: name.into(),
            catalog,
        }
    }

    /// The name as written in the descriptor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the captured name against the finalized catalog.
    ///
    /// # Errors
    ///
    /// `RegistryNotFinalized` before the build has finished, `UnknownType`
    /// if no type (or alias) with this name was ever registered.
    pub fn resolve(&self) -> Result<Name> {
        let catalog = self
            .catalog
            .get()
            .ok_or_else(|| SchemaError::RegistryNotFinalized {
                name: self.name.clone(),
            })?;
        catalog.resolve(&self.name).cloned().ok_or_else(|| {
            SchemaError::unknown_type(
                &self.name,
                catalog.type_names().map(|n| n.to_string()).collect(),
            )
        })
    }
}

impl PartialEq for DeferredType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DeferredType {}

impl fmt::Debug for DeferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredType")
            .field("name", &self.name)
            .field("finalized", &self.catalog.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_descriptor_form() {
        let post = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(name(
            "Post",
        )))));
        assert_eq!(post.to_string(), "[Post!]!");
        assert_eq!(post.raw_name(), "Post");
        assert!(post.is_non_null());
    }

    #[test]
    fn test_deferred_before_finalize() {
        let catalog = Arc::new(OnceLock::new());
        let deferred = DeferredType::new("Comment", catalog);
        assert_eq!(
            deferred.resolve().unwrap_err(),
            SchemaError::RegistryNotFinalized {
                name: "Comment".into()
            }
        );
    }

    #[test]
    fn test_deferred_resolves_after_finalize() {
        let catalog = Arc::new(OnceLock::new());
        let known = TypeRef::list(TypeRef::Deferred(DeferredType::new(
            "blog::Comment",
            catalog.clone(),
        )));
        let unknown = DeferredType::new("Missing", catalog.clone());

        let mut finished = Catalog::default();
        finished.insert(name("Comment"));
        finished.alias("blog::Comment", name("Comment"));
        catalog.set(finished).unwrap();

        assert_eq!(known.named_type().unwrap(), "Comment");
        assert_eq!(known.resolved().unwrap().to_string(), "[Comment]");
        assert_eq!(
            unknown.resolve().unwrap_err(),
            SchemaError::unknown_type("Missing", vec!["Comment".into()])
        );
    }
}

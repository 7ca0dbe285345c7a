//! Type descriptor parsing.
//!
//! Descriptors use GraphQL's type notation: `Name`, `Name!`, `[Name]`,
//! `[Name!]!`, nested arbitrarily. Bare names may be public names or
//! declaration identities; unregistered names become deferred references.

use tracing::trace;

use super::registry::TypeRegistry;
use super::type_ref::TypeRef;
use crate::error::{Result, SchemaError};

/// Host container name that cannot be mapped without an explicit descriptor.
const AMBIGUOUS_CONTAINER: &str = "array";

/// Parses an output type descriptor.
pub fn parse(descriptor: &str, registry: &TypeRegistry) -> Result<TypeRef> {
    trace!(descriptor, "Parsing type descriptor");
    parse_with(descriptor, descriptor, &|name| registry.maybe_get_type(name))
}

/// Parses an argument or input field descriptor.
pub fn parse_input(descriptor: &str, registry: &TypeRegistry) -> Result<TypeRef> {
    trace!(descriptor, "Parsing input type descriptor");
    parse_with(descriptor, descriptor, &|name| {
        registry.maybe_get_input_type(name)
    })
}

fn parse_with(
    full: &str,
    descriptor: &str,
    lookup: &dyn Fn(&str) -> TypeRef,
) -> Result<TypeRef> {
    if let Some(inner) = descriptor.strip_suffix('!') {
        if inner.ends_with('!') {
            return Err(malformed(full));
        }
        return Ok(TypeRef::non_null(parse_with(full, inner, lookup)?));
    }
    if let Some(rest) = descriptor.strip_prefix('[') {
        let inner = rest.strip_suffix(']').ok_or_else(|| malformed(full))?;
        return Ok(TypeRef::list(parse_with(full, inner, lookup)?));
    }
    if descriptor.is_empty()
        || descriptor.contains(['[', ']', '!'])
        || descriptor.contains(char::is_whitespace)
    {
        return Err(malformed(full));
    }
    if descriptor == AMBIGUOUS_CONTAINER {
        return Err(SchemaError::AmbiguousContainerType(descriptor.to_string()));
    }
    Ok(lookup(descriptor))
}

fn malformed(descriptor: &str) -> SchemaError {
    SchemaError::MalformedDescriptor(descriptor.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_wrappers() {
        let registry = TypeRegistry::new();
        let parsed = parse("[ID!]!", &registry).unwrap();

        let TypeRef::NonNull(list) = &parsed else {
            panic!("expected non-null, got {parsed:?}");
        };
        let TypeRef::List(item) = list.as_ref() else {
            panic!("expected list, got {list:?}");
        };
        let TypeRef::NonNull(id) = item.as_ref() else {
            panic!("expected non-null item, got {item:?}");
        };
        assert_eq!(id.as_ref(), &TypeRef::Named("ID".parse().unwrap()));
    }

    #[test]
    fn test_descriptor_round_trip() {
        let registry = TypeRegistry::new();
        for descriptor in ["String", "String!", "[String]", "[String!]!", "[[Int]!]", "Post"] {
            assert_eq!(parse(descriptor, &registry).unwrap().to_string(), descriptor);
        }
    }

    #[test]
    fn test_parse_resolves_aliases() {
        let registry = TypeRegistry::new();
        assert_eq!(parse("int!", &registry).unwrap().to_string(), "Int!");
    }

    #[test]
    fn test_unknown_name_is_deferred() {
        let registry = TypeRegistry::new();
        let parsed = parse("[Comment]", &registry).unwrap();
        assert!(parsed.is_deferred());
        assert_eq!(parsed.raw_name(), "Comment");
    }

    #[test]
    fn test_array_is_ambiguous() {
        let registry = TypeRegistry::new();
        assert_eq!(
            parse("array", &registry).unwrap_err(),
            SchemaError::AmbiguousContainerType("array".into())
        );
        assert!(parse("[array]!", &registry).is_err());
    }

    #[test]
    fn test_malformed_descriptors() {
        let registry = TypeRegistry::new();
        for descriptor in ["", "!", "[]", "[String", "String]", "String!!", "[String!", "Str ing"] {
            assert_eq!(
                parse_input(descriptor, &registry).unwrap_err(),
                SchemaError::MalformedDescriptor(descriptor.to_string()),
                "descriptor {descriptor:?}"
            );
        }
    }
}

//! Turns one member declaration into one field entry.

use tracing::trace;

use super::descriptor;
use super::dispatch::{DispatchMode, FieldResolver, ResolveDispatcher};
use super::meta::{Argument, DeprecationStatus, Field};
use super::registry::TypeRegistry;
use crate::declaration::{MemberDeclaration, MemberKind, Parameter};
use crate::error::{Result, SchemaError};
use crate::name::Name;

/// Builds field entries against a registry.
pub struct FieldAssembler<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> FieldAssembler<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }

    /// Assembles the field `member` contributes to the type `target`.
    pub fn assemble(&self, member: &MemberDeclaration, target: &Name) -> Result<Field> {
        let label = member.label();
        let name: Name = member.field_name().parse()?;
        let field_type = descriptor::parse(&value_descriptor(member, &label)?, self.registry)?;

        let (arguments, resolver) = if member.kind == MemberKind::Property {
            (Vec::new(), FieldResolver::Attribute(member.member.clone()))
        } else {
            let callable = member
                .callable
                .clone()
                .ok_or_else(|| SchemaError::MissingCallable {
                    member: label.clone(),
                })?;
            let declaring_type = member
                .declaring_type
                .as_deref()
                .map(|identity| self.registry.public_name_of(identity));
            let mode = DispatchMode::select(target, declaring_type);
            let skip = usize::from(mode == DispatchMode::Extension);
            let arguments = member
                .parameters
                .iter()
                .skip(skip)
                .map(|param| self.argument(member, param, &label))
                .collect::<Result<Vec<_>>>()?;
            trace!(member = %label, ?mode, "Selected dispatch mode");
            (
                arguments,
                FieldResolver::Dispatch(ResolveDispatcher::new(mode, callable)),
            )
        };

        Ok(Field {
            name,
            description: member.description.clone(),
            deprecation_status: DeprecationStatus::from_reason(member.deprecation_reason.as_deref()),
            arguments,
            field_type,
            resolver,
        })
    }

    fn argument(&self, member: &MemberDeclaration, param: &Parameter, label: &str) -> Result<Argument> {
        let descriptor = match member.args.get(&param.name) {
            Some(descriptor) => descriptor.clone(),
            None => {
                let param_label = format!("{label}(${})", param.name);
                param
                    .declared_type
                    .as_ref()
                    .ok_or_else(|| SchemaError::missing_type_annotation(&param_label))?
                    .to_descriptor(&param_label)?
            }
        };
        Ok(Argument {
            name: param.name.parse()?,
            description: param.description.clone(),
            arg_type: descriptor::parse_input(&descriptor, self.registry)?,
            default_value: param.default.clone(),
        })
    }
}

/// The field's value descriptor: the override, else the declared type.
fn value_descriptor(member: &MemberDeclaration, label: &str) -> Result<String> {
    if let Some(descriptor) = &member.type_override {
        return Ok(descriptor.clone());
    }
    member
        .declared_type
        .as_ref()
        .ok_or_else(|| SchemaError::missing_type_annotation(label))?
        .to_descriptor(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{Callable, DeclaredType};
    use serde_json::{Value, json};

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn echo() -> Callable {
        Callable::new(|inv| Ok(Value::Array(inv.args)))
    }

    #[test]
    fn test_property_field() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::property("blog::Post", "title", DeclaredType::named("string"))
            .description("The title");
        let field = FieldAssembler::new(&registry)
            .assemble(&member, &name("Post"))
            .unwrap();

        assert_eq!(field.name, "title");
        assert_eq!(field.field_type.to_string(), "String!");
        assert!(field.arguments.is_empty());
        assert_eq!(field.description.as_deref(), Some("The title"));
        assert_eq!(field.resolve(&json!({ "title": "Hi" }), vec![]).unwrap(), json!("Hi"));
    }

    #[test]
    fn test_type_override_wins() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::property("blog::Post", "tags", DeclaredType::named("array"))
            .type_override("[String!]!");
        let field = FieldAssembler::new(&registry)
            .assemble(&member, &name("Post"))
            .unwrap();
        assert_eq!(field.field_type.to_string(), "[String!]!");
    }

    #[test]
    fn test_missing_type_annotation() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::query("posts", echo());
        let err = FieldAssembler::new(&registry)
            .assemble(&member, &name("Query"))
            .unwrap_err();
        assert_eq!(err, SchemaError::missing_type_annotation("posts"));
    }

    #[test]
    fn test_extension_skips_owner_parameter() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::function("blog::comments_for", echo())
            .extends("Post")
            .type_override("[String]")
            .param("post", DeclaredType::named("Post"))
            .param_with_default("limit", DeclaredType::named("int"), 10)
            .arg_type("limit", "Int");
        let field = FieldAssembler::new(&registry)
            .assemble(&member, &name("Post"))
            .unwrap();

        assert_eq!(field.name, "comments_for");
        assert_eq!(field.arguments.len(), 1);
        let limit = &field.arguments[0];
        assert_eq!(limit.name, "limit");
        assert_eq!(limit.arg_type.to_string(), "Int");
        assert_eq!(limit.default_value, Some(json!(10)));
        assert_eq!(limit.description, None);
        assert_eq!(field.resolver.mode(), Some(DispatchMode::Extension));
        assert_eq!(
            field.resolve(&json!({ "id": 1 }), vec![json!(5)]).unwrap(),
            json!([{ "id": 1 }, 5])
        );
    }

    #[test]
    fn test_owning_method_keeps_all_parameters() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::method("blog::User", "add_id", echo())
            .returns(DeclaredType::named("string"))
            .param("id", DeclaredType::named("int"))
            .param_description("id", "Number appended to the id");
        let field = FieldAssembler::new(&registry)
            .assemble(&member, &name("User"))
            .unwrap();
        assert_eq!(field.arguments.len(), 1);
        assert_eq!(
            field.arguments[0].description.as_deref(),
            Some("Number appended to the id")
        );
        assert_eq!(field.resolver.mode(), Some(DispatchMode::OwningMethod));
    }

    #[test]
    fn test_missing_callable() {
        let registry = TypeRegistry::new();
        let mut member = MemberDeclaration::mutation("login", echo()).returns(DeclaredType::named("bool"));
        member.callable = None;
        let err = FieldAssembler::new(&registry)
            .assemble(&member, &name("Mutation"))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingCallable {
                member: "login".into()
            }
        );
    }

    #[test]
    fn test_invalid_field_name() {
        let registry = TypeRegistry::new();
        let member = MemberDeclaration::query("posts", echo())
            .name("all-posts")
            .type_override("[String]");
        let err = FieldAssembler::new(&registry)
            .assemble(&member, &name("Query"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName(_)));
    }
}

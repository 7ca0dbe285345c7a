//! Translation of schema graph types into async-graphql dynamic types.

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{
    Enum, EnumItem, Field, FieldFuture, InputObject, InputValue, Interface, InterfaceField,
    Object, TypeRef,
};
use gqla_schema::SchemaGraph;
use gqla_schema::schema::{
    Argument, DeprecationStatus, EnumMeta, InputField, InputObjectMeta, InterfaceMeta, MetaType,
    ObjectMeta,
};
use tracing::trace;

use crate::error::GraphQLError;
use crate::resolvers::{field_resolver, json_to_graphql_value};

/// Field given to object and interface types that declare no fields.
pub const PLACEHOLDER_FIELD: &str = "_placeholder";

/// Converts a graph type reference, evaluating deferred names.
pub fn to_type_ref(type_ref: &gqla_schema::TypeRef) -> Result<TypeRef, GraphQLError> {
    Ok(match type_ref {
        gqla_schema::TypeRef::NonNull(inner) => TypeRef::NonNull(Box::new(to_type_ref(inner)?)),
        gqla_schema::TypeRef::List(inner) => TypeRef::List(Box::new(to_type_ref(inner)?)),
        named => TypeRef::named(named.named_type()?.to_string()),
    })
}

/// Translates the nodes of one schema graph.
pub(crate) struct TypeTranslator {
    graph: Arc<SchemaGraph>,
}

impl TypeTranslator {
    pub(crate) fn new(graph: Arc<SchemaGraph>) -> Self {
        Self { graph }
    }

    /// Translates an object type.
    ///
    /// Fields of claimed interfaces that the object does not declare itself
    /// are added too, resolved through the interface's field entry.
    pub(crate) fn object(&self, meta: &ObjectMeta) -> Result<Object, GraphQLError> {
        let mut object = Object::new(meta.name.as_str());
        if let Some(description) = &meta.description {
            object = object.description(description);
        }

        let mut field_count = 0;
        for field in meta.fields.values() {
            object = object.field(self.field(&meta.name, field)?);
            field_count += 1;
        }

        for interface_name in &meta.interface_names {
            object = object.implement(interface_name.as_str());
            let Some(MetaType::Interface(interface)) = self.graph.type_by_name(interface_name)
            else {
                continue;
            };
            for field in interface.fields.values() {
                if meta.fields.contains_key(&field.name) {
                    continue;
                }
                trace!(
                    object = %meta.name,
                    interface = %interface.name,
                    field = %field.name,
                    "Inheriting interface field"
                );
                object = object.field(self.field(&interface.name, field)?);
                field_count += 1;
            }
            if interface.fields.is_empty() && !meta.fields.contains_key(PLACEHOLDER_FIELD) {
                object = object.field(placeholder_field());
                field_count += 1;
            }
        }

        if field_count == 0 {
            object = object.field(placeholder_field());
        }
        Ok(object)
    }

    fn field(
        &self,
        owner: &str,
        field: &gqla_schema::schema::Field,
    ) -> Result<Field, GraphQLError> {
        let resolver = field_resolver(
            self.graph.clone(),
            owner.to_string(),
            field.name.to_string(),
        );
        let mut translated = Field::new(
            field.name.as_str(),
            to_type_ref(&field.field_type)?,
            resolver,
        );
        if let Some(description) = &field.description {
            translated = translated.description(description);
        }
        if let DeprecationStatus::Deprecated(reason) = &field.deprecation_status {
            translated = translated.deprecation(reason.as_deref());
        }
        for argument in &field.arguments {
            translated = translated.argument(self.argument(argument)?);
        }
        Ok(translated)
    }

    fn argument(&self, argument: &Argument) -> Result<InputValue, GraphQLError> {
        let mut input = InputValue::new(argument.name.as_str(), to_type_ref(&argument.arg_type)?);
        if let Some(description) = &argument.description {
            input = input.description(description);
        }
        if let Some(default) = &argument.default_value {
            input = input.default_value(self.default_value(&argument.arg_type, default));
        }
        Ok(input)
    }

    pub(crate) fn interface(&self, meta: &InterfaceMeta) -> Result<Interface, GraphQLError> {
        let mut interface = Interface::new(meta.name.as_str());
        if let Some(description) = &meta.description {
            interface = interface.description(description);
        }
        for field in meta.fields.values() {
            let mut translated =
                InterfaceField::new(field.name.as_str(), to_type_ref(&field.field_type)?);
            if let Some(description) = &field.description {
                translated = translated.description(description);
            }
            if let DeprecationStatus::Deprecated(reason) = &field.deprecation_status {
                translated = translated.deprecation(reason.as_deref());
            }
            for argument in &field.arguments {
                translated = translated.argument(self.argument(argument)?);
            }
            interface = interface.field(translated);
        }
        if meta.fields.is_empty() {
            interface = interface.field(InterfaceField::new(
                PLACEHOLDER_FIELD,
                TypeRef::named(TypeRef::STRING),
            ));
        }
        Ok(interface)
    }

    pub(crate) fn enumeration(&self, meta: &EnumMeta) -> Enum {
        let mut enumeration = Enum::new(meta.name.as_str());
        if let Some(description) = &meta.description {
            enumeration = enumeration.description(description);
        }
        for value in &meta.values {
            let mut item = EnumItem::new(value.name.as_str());
            if let Some(description) = &value.description {
                item = item.description(description);
            }
            if let DeprecationStatus::Deprecated(reason) = &value.deprecation_status {
                item = item.deprecation(reason.as_deref());
            }
            enumeration = enumeration.item(item);
        }
        enumeration
    }

    pub(crate) fn input_object(&self, meta: &InputObjectMeta) -> Result<InputObject, GraphQLError> {
        let mut input = InputObject::new(meta.name.as_str());
        if let Some(description) = &meta.description {
            input = input.description(description);
        }
        for field in &meta.codec.fields {
            input = input.field(self.input_field(field)?);
        }
        Ok(input)
    }

    fn input_field(&self, field: &InputField) -> Result<InputValue, GraphQLError> {
        let mut input = InputValue::new(field.name.as_str(), to_type_ref(&field.field_type)?);
        if let Some(description) = &field.description {
            input = input.description(description);
        }
        if let Some(default) = &field.default_value {
            input = input.default_value(self.default_value(&field.field_type, default));
        }
        Ok(input)
    }

    /// Encodes a default value for the executor. Enum defaults are given as
    /// underlying values and are mapped to their constant names.
    fn default_value(&self, type_ref: &gqla_schema::TypeRef, default: &serde_json::Value) -> Value {
        match (type_ref, default) {
            (gqla_schema::TypeRef::NonNull(inner), _) => self.default_value(inner, default),
            (gqla_schema::TypeRef::List(inner), serde_json::Value::Array(items)) => Value::List(
                items
                    .iter()
                    .map(|item| self.default_value(inner, item))
                    .collect(),
            ),
            (gqla_schema::TypeRef::Named(_) | gqla_schema::TypeRef::Deferred(_), _) => {
                match self.graph.lookup(type_ref) {
                    Ok(MetaType::Enum(meta)) => meta
                        .name_of(default)
                        .map(|constant| Value::Enum(async_graphql::Name::new(constant.as_str())))
                        .unwrap_or_else(|| json_to_graphql_value(default.clone())),
                    _ => json_to_graphql_value(default.clone()),
                }
            }
            _ => json_to_graphql_value(default.clone()),
        }
    }
}

fn placeholder_field() -> Field {
    Field::new(PLACEHOLDER_FIELD, TypeRef::named(TypeRef::STRING), |_| {
        FieldFuture::new(async { Ok(None::<Value>) })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqla_schema::{DeclarationSet, SchemaBuilder, TypeDeclaration};

    #[test]
    fn test_to_type_ref_keeps_wrappers() {
        let declarations = DeclarationSet::new().with_type(TypeDeclaration::object("blog::Post"));
        let graph = SchemaBuilder::default().build(&declarations).unwrap();
        let Some(MetaType::Object(post)) = graph.type_by_name("Post") else {
            panic!("Post should be an object");
        };
        let post_ref = gqla_schema::TypeRef::non_null(gqla_schema::TypeRef::list(
            gqla_schema::TypeRef::non_null(gqla_schema::TypeRef::named(post.name.clone())),
        ));

        assert_eq!(to_type_ref(&post_ref).unwrap().to_string(), "[Post!]!");
    }
}

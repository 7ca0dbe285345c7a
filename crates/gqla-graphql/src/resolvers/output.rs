//! Encoding resolved host values for the executor.

use async_graphql::dynamic::FieldValue;
use async_graphql::{Name as GraphQLName, Value};
use gqla_schema::schema::MetaType;
use gqla_schema::{SchemaGraph, TypeRef};

use super::json_to_graphql_value;

/// Encodes a resolved value of type `type_ref`.
///
/// `null` becomes `None` at every level; the executor reports nulls in
/// non-null positions. Enum values are mapped back to their constant names
/// and interface values are tagged with their concrete object type.
pub fn to_field_value<'a>(
    graph: &SchemaGraph,
    type_ref: &TypeRef,
    value: serde_json::Value,
) -> async_graphql::Result<Option<FieldValue<'a>>> {
    if value.is_null() {
        return Ok(None);
    }
    match type_ref {
        TypeRef::NonNull(inner) => to_field_value(graph, inner, value),
        TypeRef::List(inner) => {
            let serde_json::Value::Array(items) = value else {
                return Err(async_graphql::Error::new(format!(
                    "Expected a list for {type_ref}, got {value}"
                )));
            };
            let mut encoded = Vec::with_capacity(items.len());
            for item in items {
                encoded.push(to_field_value(graph, inner, item)?.unwrap_or(FieldValue::NULL));
            }
            Ok(Some(FieldValue::list(encoded)))
        }
        TypeRef::Named(_) | TypeRef::Deferred(_) => match graph.lookup(type_ref)? {
            MetaType::Scalar(_) | MetaType::Object(_) => {
                Ok(Some(FieldValue::value(json_to_graphql_value(value))))
            }
            MetaType::Enum(meta) => {
                let constant = meta.name_of(&value).ok_or_else(|| {
                    async_graphql::Error::new(format!("{value} is not a value of {}", meta.name))
                })?;
                Ok(Some(FieldValue::value(Value::Enum(GraphQLName::new(
                    constant.as_str(),
                )))))
            }
            MetaType::Interface(meta) => {
                let concrete = graph.concrete_type(&meta.name, &value).ok_or_else(|| {
                    async_graphql::Error::new(format!(
                        "Cannot determine the concrete type of {} value",
                        meta.name
                    ))
                })?;
                let concrete = concrete.to_string();
                Ok(Some(
                    FieldValue::value(json_to_graphql_value(value)).with_type(concrete),
                ))
            }
            MetaType::InputObject(meta) => Err(async_graphql::Error::new(format!(
                "{} is an input type and cannot be returned from a field",
                meta.name
            ))),
        },
    }
}

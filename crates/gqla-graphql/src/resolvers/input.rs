//! Decoding executor input values into host values.

use async_graphql::Value;
use gqla_schema::schema::MetaType;
use gqla_schema::{FieldError, FieldResult, SchemaGraph, TypeRef};
use serde_json::Map;

/// Decodes an argument or input field value of type `type_ref`.
///
/// Enum constants become their underlying values and input objects go
/// through their codec; scalars are passed on as JSON.
pub fn decode_input(
    graph: &SchemaGraph,
    type_ref: &TypeRef,
    value: Value,
) -> FieldResult<serde_json::Value> {
    if matches!(value, Value::Null) {
        return Ok(serde_json::Value::Null);
    }
    match type_ref {
        TypeRef::NonNull(inner) => decode_input(graph, inner, value),
        TypeRef::List(inner) => match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| decode_input(graph, inner, item))
                .collect::<FieldResult<Vec<_>>>()
                .map(serde_json::Value::Array),
            // input coercion accepts a single item where a list is expected
            single => Ok(serde_json::Value::Array(vec![decode_input(
                graph, inner, single,
            )?])),
        },
        TypeRef::Named(_) | TypeRef::Deferred(_) => match graph.lookup(type_ref)? {
            MetaType::Enum(meta) => {
                let constant = match &value {
                    Value::Enum(name) => name.as_str(),
                    Value::String(name) => name.as_str(),
                    other => {
                        return Err(FieldError::new(format!(
                            "Expected a {} constant, got {other}",
                            meta.name
                        )));
                    }
                };
                meta.value_of(constant).cloned().ok_or_else(|| {
                    FieldError::new(format!("{constant} is not a value of {}", meta.name))
                })
            }
            MetaType::InputObject(meta) => {
                let Value::Object(fields) = value else {
                    return Err(FieldError::new(format!(
                        "Expected an object for input type {}",
                        meta.name
                    )));
                };
                let mut supplied = Map::new();
                for (key, field_value) in fields {
                    let decoded = match meta.codec.field_by_name(key.as_str()) {
                        Some(field) => decode_input(graph, &field.field_type, field_value)?,
                        // the codec reports unknown keys
                        None => to_json(field_value)?,
                    };
                    supplied.insert(key.to_string(), decoded);
                }
                meta.codec.decode(supplied)
            }
            MetaType::Scalar(_) => to_json(value),
            other => Err(FieldError::new(format!(
                "{} is not an input type",
                other.name()
            ))),
        },
    }
}

fn to_json(value: Value) -> FieldResult<serde_json::Value> {
    value
        .into_json()
        .map_err(|e| FieldError::new(format!("Invalid input value: {e}")))
}

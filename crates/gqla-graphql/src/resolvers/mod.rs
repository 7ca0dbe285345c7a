//! Field resolvers for the executable schema.
//!
//! Every object field gets the same resolver shape: read the parent value,
//! decode the arguments in declaration order, call [`Field::resolve`] on the
//! schema graph, and encode the result for the executor.
//!
//! [`Field::resolve`]: gqla_schema::schema::Field::resolve

mod input;
mod output;

use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{FieldFuture, ResolverContext};
use gqla_schema::SchemaGraph;
use tracing::trace;

pub use input::decode_input;
pub use output::to_field_value;

/// Converts a serde_json value to an async-graphql value.
pub(crate) fn json_to_graphql_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(async_graphql::Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::List(arr.into_iter().map(json_to_graphql_value).collect())
        }
        serde_json::Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| (async_graphql::Name::new(k), json_to_graphql_value(v)))
                .collect(),
        ),
    }
}

/// Reads the parent value of a field as JSON. Root fields see `null`.
fn parent_json(ctx: &ResolverContext<'_>) -> serde_json::Value {
    ctx.parent_value
        .as_value()
        .and_then(|parent| parent.clone().into_json().ok())
        .unwrap_or(serde_json::Value::Null)
}

/// Creates the resolver for `type_name.field_name`.
///
/// The field is looked up on `type_name` in the graph, so fields an object
/// inherits from an interface pass the interface's name.
pub fn field_resolver(
    graph: Arc<SchemaGraph>,
    type_name: String,
    field_name: String,
) -> impl Fn(ResolverContext<'_>) -> FieldFuture<'_> + Send + Sync + Clone {
    move |ctx| {
        let graph = graph.clone();
        let type_name = type_name.clone();
        let field_name = field_name.clone();
        FieldFuture::new(async move {
            let field = graph.field(&type_name, &field_name).ok_or_else(|| {
                async_graphql::Error::new(format!("Unknown field {type_name}.{field_name}"))
            })?;

            let owner = parent_json(&ctx);
            let mut args = Vec::with_capacity(field.arguments.len());
            for argument in &field.arguments {
                let supplied = ctx
                    .args
                    .get(argument.name.as_str())
                    .map(|accessor| accessor.as_value().clone());
                let value = match supplied {
                    Some(value) => decode_input(&graph, &argument.arg_type, value)?,
                    None => argument
                        .default_value
                        .clone()
                        .unwrap_or(serde_json::Value::Null),
                };
                args.push(value);
            }

            trace!(type_name = %type_name, field = %field_name, "Resolving field");
            let result = field.resolve(&owner, args)?;
            to_field_value(&graph, &field.field_type, result)
        })
    }
}

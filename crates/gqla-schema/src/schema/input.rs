//! Input object decoding and encoding.
//!
//! Each input object keeps its declared field list with defaults. Decoding
//! fills missing fields from defaults and hands the values, in declaration
//! order, to the type's constructor (or collects them into an ordered object
//! when there is none).

use serde_json::{Map, Value};

use super::descriptor;
use super::registry::TypeRegistry;
use super::type_ref::TypeRef;
use crate::declaration::{Constructor, InputParameter};
use crate::error::{FieldError, FieldResult, Result};
use crate::name::Name;

/// One declared field of an input object.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: Name,
    pub field_type: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct InputObjectCodec {
    pub fields: Vec<InputField>,
    pub constructor: Option<Constructor>,
}

impl InputObjectCodec {
    /// A codec with no fields and no constructor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the codec from declared constructor parameters.
    pub fn build(
        parameters: &[InputParameter],
        constructor: Option<Constructor>,
        registry: &TypeRegistry,
    ) -> Result<Self> {
        let fields = parameters
            .iter()
            .map(|param| -> Result<InputField> {
                Ok(InputField {
                    name: param.name.parse()?,
                    field_type: descriptor::parse_input(&param.descriptor, registry)?,
                    default_value: param.default.clone(),
                    description: param.description.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fields,
            constructor,
        })
    }

    pub fn field_by_name(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Decodes supplied field values into the input object's value.
    ///
    /// # Errors
    ///
    /// Fails on keys that are not declared fields, and on non-null fields
    /// that end up null after defaults are applied.
    pub fn decode(&self, mut supplied: Map<String, Value>) -> FieldResult<Value> {
        let mut values = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = supplied
                .remove(field.name.as_str())
                .or_else(|| field.default_value.clone())
                .unwrap_or(Value::Null);
            if value.is_null() && field.field_type.is_non_null() {
                return Err(FieldError::new(format!(
                    "Missing value for non-null input field {}",
                    field.name
                )));
            }
            values.push(value);
        }
        if let Some(unknown) = supplied.keys().next() {
            return Err(FieldError::new(format!("Unknown input field {unknown}")));
        }

        match &self.constructor {
            Some(constructor) => constructor.construct(values),
            None => Ok(Value::Object(
                self.fields
                    .iter()
                    .map(|f| f.name.to_string())
                    .zip(values)
                    .collect(),
            )),
        }
    }

    /// Reads each declared field off an object value.
    pub fn encode(&self, value: &Value) -> FieldResult<Map<String, Value>> {
        let Value::Object(object) = value else {
            return Err(FieldError::new(format!(
                "Cannot encode non-object value {value} as an input object"
            )));
        };
        Ok(self
            .fields
            .iter()
            .map(|f| {
                let field_value = object.get(f.name.as_str()).cloned().unwrap_or(Value::Null);
                (f.name.to_string(), field_value)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_input_codec(constructor: Option<Constructor>) -> InputObjectCodec {
        let registry = TypeRegistry::new();
        InputObjectCodec::build(
            &[
                InputParameter::new("name", "String!"),
                InputParameter::new("email", "String").default_value("no-reply@example.com"),
            ],
            constructor,
            &registry,
        )
        .unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_decode_applies_defaults() {
        let codec = user_input_codec(None);
        assert_eq!(
            codec.decode(object(json!({ "name": "Ada" }))).unwrap(),
            json!({ "name": "Ada", "email": "no-reply@example.com" })
        );
        assert_eq!(
            codec
                .decode(object(json!({ "email": "ada@example.com", "name": "Ada" })))
                .unwrap(),
            json!({ "name": "Ada", "email": "ada@example.com" })
        );
    }

    #[test]
    fn test_decode_errors() {
        let codec = user_input_codec(None);
        let missing = codec.decode(Map::new()).unwrap_err();
        assert!(missing.message().contains("name"));

        let unknown = codec
            .decode(object(json!({ "name": "Ada", "age": 3 })))
            .unwrap_err();
        assert_eq!(unknown.message(), "Unknown input field age");
    }

    #[test]
    fn test_decode_uses_constructor() {
        let codec = user_input_codec(Some(Constructor::new(|values| {
            let name = values[0].as_str().unwrap_or_default();
            let email = values[1].as_str().unwrap_or_default();
            Ok(json!(format!("{name} <{email}>")))
        })));
        assert_eq!(
            codec.decode(object(json!({ "name": "Ada" }))).unwrap(),
            json!("Ada <no-reply@example.com>")
        );
    }

    #[test]
    fn test_encode_then_decode() {
        let codec = user_input_codec(None);
        let decoded = codec.decode(object(json!({ "name": "Ada" }))).unwrap();
        let encoded = codec.encode(&decoded).unwrap();
        assert_eq!(codec.decode(encoded).unwrap(), decoded);
        assert!(codec.encode(&json!("Ada")).is_err());
    }
}

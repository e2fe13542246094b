//! Schema checking of buffered JSON bodies.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ValidateError, ValidateResult};

/// One schema violation.
///
/// `path` is a JSON pointer to the offending value, empty for the root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFault {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "/: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Anything that can check a JSON document.
pub trait SchemaValidator {
    /// Validate a JSON document, returning every violation found.
    /// Malformed JSON is reported as a single fault at the root.
    fn validate_bytes(&self, data: &[u8]) -> Vec<ValidationFault>;
}

impl<V: SchemaValidator + ?Sized> SchemaValidator for &V {
    fn validate_bytes(&self, data: &[u8]) -> Vec<ValidationFault> {
        (**self).validate_bytes(data)
    }
}

/// A compiled JSON schema. The draft is taken from `$schema`, defaulting
/// to the latest one the validator knows.
pub struct JsonSchema {
    schema: Value,
    validator: jsonschema::Validator,
}

impl JsonSchema {
    /// Compile a schema document. Fails if the document is not a valid
    /// schema.
    pub fn compile(schema: &Value) -> ValidateResult<Self> {
        let validator = jsonschema::validator_for(schema).map_err(|e| ValidateError::Schema {
            path: pointer_or_root(e.instance_path.to_string()),
            reason: e.to_string(),
        })?;
        Ok(Self {
            schema: schema.clone(),
            validator,
        })
    }

    /// The schema document this was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validate an already decoded value.
    pub fn validate(&self, value: &Value) -> Vec<ValidationFault> {
        self.validator
            .iter_errors(value)
            .map(|e| ValidationFault {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

impl fmt::Debug for JsonSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSchema")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator for JsonSchema {
    fn validate_bytes(&self, data: &[u8]) -> Vec<ValidationFault> {
        match serde_json::from_slice::<Value>(data) {
            Ok(value) => self.validate(&value),
            Err(e) => vec![ValidationFault {
                path: String::new(),
                message: format!("invalid JSON: {e}"),
            }],
        }
    }
}

fn pointer_or_root(path: String) -> String {
    if path.is_empty() {
        "/".into()
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(schema: Value) -> JsonSchema {
        JsonSchema::compile(&schema).unwrap()
    }

    fn paths(faults: &[ValidationFault]) -> Vec<&str> {
        let mut paths: Vec<_> = faults.iter().map(|f| f.path.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    // ---- compilation ----

    #[test]
    fn rejects_invalid_schemas() {
        let err = JsonSchema::compile(&json!({"type": "thing"})).unwrap_err();
        assert!(matches!(err, ValidateError::Schema { .. }), "{err}");
        assert!(JsonSchema::compile(&json!({"minLength": -1})).is_err());
        assert!(JsonSchema::compile(&json!({"required": "a"})).is_err());
    }

    #[test]
    fn keeps_source_document() {
        let schema = compile(json!({"type": "array"}));
        assert_eq!(schema.schema(), &json!({"type": "array"}));
        assert!(format!("{schema:?}").starts_with("JsonSchema"));
    }

    // ---- validation ----

    #[test]
    fn boolean_schemas() {
        assert!(compile(json!(true)).validate(&json!({"any": 1})).is_empty());
        let faults = compile(json!(false)).validate(&json!(1));
        assert_eq!(paths(&faults), vec![""]);
    }

    #[test]
    fn nested_faults_carry_pointers() {
        let schema = compile(json!({
            "type": "array",
            "items": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string", "minLength": 2},
                    "age": {"type": "integer", "minimum": 0},
                    "kind": {"enum": ["x", "y"]}
                }
            }
        }));
        let faults = schema.validate(&json!([
            {"name": "ok", "age": 30},
            {"name": "ok", "age": -1},
            {"name": "z", "kind": "q"}
        ]));
        assert_eq!(paths(&faults), vec!["/1/age", "/2/kind", "/2/name"]);
    }

    #[test]
    fn keywords_beyond_basic_types() {
        let cases = [
            (json!({"type": "array", "minItems": 1}), json!([])),
            (
                json!({"additionalProperties": false, "properties": {"a": {}}}),
                json!({"a": 1, "b": 2}),
            ),
            (
                json!({"type": "array", "items": {"pattern": "^[0-9]+$"}}),
                json!(["abc"]),
            ),
            (
                json!({
                    "type": "array",
                    "items": {"$ref": "#/$defs/int"},
                    "$defs": {"int": {"type": "integer"}}
                }),
                json!(["x"]),
            ),
        ];
        for (schema, body) in cases {
            let faults = compile(schema.clone()).validate(&body);
            assert_eq!(faults.len(), 1, "{schema} over {body}: {faults:?}");
        }
    }

    #[test]
    fn malformed_bytes_are_one_fault() {
        let faults = compile(json!(true)).validate_bytes(b"[1,");
        assert_eq!(faults.len(), 1);
        assert!(faults[0].message.starts_with("invalid JSON"));
        assert_eq!(faults[0].to_string(), format!("/: {}", faults[0].message));
    }
}

//! Parser for `.json` parameter files.

use std::path::Path;

use serde_json::Value as JsonValue;

use super::SourceParser;
use crate::error::ParamError;
use crate::model::{Params, Value};

pub struct JsonParser;

impl SourceParser for JsonParser {
    fn supports(path: &Path) -> bool {
        super::has_extension(path, &["json"])
    }

    fn parse(content: &str, path: &Path) -> Result<Params, ParamError> {
        let raw: JsonValue = serde_json::from_str(content).map_err(|e| ParamError::Format {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let JsonValue::Object(object) = raw else {
            return Err(ParamError::Format {
                path: path.to_path_buf(),
                message: "top level must be an object".to_string(),
            });
        };
        object
            .into_iter()
            .map(|(key, value)| {
                let value = convert(&key, value, path)?;
                Ok::<_, ParamError>((key, value))
            })
            .collect()
    }
}

fn convert(key: &str, value: JsonValue, path: &Path) -> Result<Value, ParamError> {
    let unsupported = |found: &str| ParamError::UnsupportedValue {
        path: path.to_path_buf(),
        key: key.to_string(),
        found: found.to_string(),
    };
    match value {
        JsonValue::Null => Ok(Value::None),
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .ok_or_else(|| unsupported("number")),
        JsonValue::String(s) => Ok(Value::Str(s)),
        JsonValue::Array(items) => items
            .into_iter()
            .map(|item| convert(key, item, path))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        JsonValue::Object(_) => Err(unsupported("object")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_entries_become_overrides() {
        let content = r#"{"n_iter": 40, "ratio": 2.0, "label": "deep", "mask": null, "ids": [1, 2]}"#;
        let p = JsonParser::parse(content, Path::new("run.json")).expect("parse ok");
        assert_eq!(p.get("n_iter"), Some(&Value::Int(40)));
        assert_eq!(p.get("ratio"), Some(&Value::Float(2.0)));
        assert_eq!(p.get("label"), Some(&Value::from("deep")));
        assert_eq!(p.get("mask"), Some(&Value::None));
        assert_eq!(p.get("ids"), Some(&Value::from(vec![1, 2])));
    }

    #[test]
    fn rejects_nested_objects_and_arrays_at_top() {
        let err = JsonParser::parse(r#"{"opts": {"a": 1}}"#, Path::new("run.json"))
            .expect_err("nested");
        assert!(matches!(err, ParamError::UnsupportedValue { ref found, .. } if found == "object"));
        let err = JsonParser::parse("[1, 2]", Path::new("run.json")).expect_err("array");
        assert!(matches!(err, ParamError::Format { .. }));
    }
}

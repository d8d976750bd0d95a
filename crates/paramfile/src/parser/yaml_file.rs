//! Parser for `.yaml` / `.yml` parameter files.

use std::path::Path;

use serde_yaml::Value as YamlValue;

use super::SourceParser;
use crate::error::ParamError;
use crate::model::{Params, Value};

pub struct YamlParser;

impl SourceParser for YamlParser {
    fn supports(path: &Path) -> bool {
        super::has_extension(path, &["yaml", "yml"])
    }

    fn parse(content: &str, path: &Path) -> Result<Params, ParamError> {
        let format_err = |message: String| ParamError::Format {
            path: path.to_path_buf(),
            message,
        };
        if content
            .lines()
            .all(|l| l.trim().is_empty() || l.trim_start().starts_with('#'))
        {
            return Ok(Params::new());
        }
        let raw: YamlValue = serde_yaml::from_str(content).map_err(|e| format_err(e.to_string()))?;
        let mapping = match raw {
            YamlValue::Mapping(m) => m,
            YamlValue::Null => return Ok(Params::new()),
            other => {
                return Err(format_err(format!(
                    "top level must be a mapping, found {}",
                    kind_of(&other)
                )));
            }
        };
        let mut out = Params::new();
        for (key, value) in mapping {
            let YamlValue::String(key) = key else {
                return Err(format_err(format!(
                    "parameter names must be strings, found {}",
                    kind_of(&key)
                )));
            };
            let value = convert(&key, value, path)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

fn convert(key: &str, value: YamlValue, path: &Path) -> Result<Value, ParamError> {
    match value {
        YamlValue::Null => Ok(Value::None),
        YamlValue::Bool(b) => Ok(Value::Bool(b)),
        YamlValue::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .ok_or_else(|| unsupported(key, "number", path)),
        YamlValue::String(s) => Ok(Value::Str(s)),
        YamlValue::Sequence(items) => items
            .into_iter()
            .map(|item| convert(key, item, path))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        other => Err(unsupported(key, kind_of(&other), path)),
    }
}

fn kind_of(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "bool",
        YamlValue::Number(_) => "number",
        YamlValue::String(_) => "string",
        YamlValue::Sequence(_) => "sequence",
        YamlValue::Mapping(_) => "mapping",
        YamlValue::Tagged(_) => "tagged value",
    }
}

fn unsupported(key: &str, found: &str, path: &Path) -> ParamError {
    ParamError::UnsupportedValue {
        path: path.to_path_buf(),
        key: key.to_string(),
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_sequences() {
        let content = "n_iter: 40\nratio: 0.5\nlabel: deep\nverbose: false\nmask: ~\nbands:\n  - 700\n  - 750\n";
        let p = YamlParser::parse(content, Path::new("run.yaml")).expect("parse ok");
        assert_eq!(p.get("n_iter"), Some(&Value::Int(40)));
        assert_eq!(p.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(p.get("label"), Some(&Value::from("deep")));
        assert_eq!(p.get("verbose"), Some(&Value::Bool(false)));
        assert_eq!(p.get("mask"), Some(&Value::None));
        assert_eq!(p.get("bands"), Some(&Value::from(vec![700, 750])));
    }

    #[test]
    fn empty_document_declares_nothing() {
        let p = YamlParser::parse("", Path::new("run.yaml")).expect("empty ok");
        assert!(p.is_empty());
        let p = YamlParser::parse("# all defaults

", Path::new("run.yaml")).expect("comments ok");
        assert!(p.is_empty());
    }

    #[test]
    fn rejects_nesting_and_non_mappings() {
        let err = YamlParser::parse("outer:\n  inner: 1\n", Path::new("run.yaml"))
            .expect_err("nested");
        assert!(matches!(err, ParamError::UnsupportedValue { ref key, .. } if key == "outer"));

        let err = YamlParser::parse("- 1\n- 2\n", Path::new("run.yaml")).expect_err("sequence");
        assert!(matches!(err, ParamError::Format { .. }));
    }
}

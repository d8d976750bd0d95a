//! Parser for `.toml` parameter files.

use std::path::Path;

use toml::Value as TomlValue;

use super::SourceParser;
use crate::error::ParamError;
use crate::model::{Params, Value};

pub struct TomlParser;

impl SourceParser for TomlParser {
    fn supports(path: &Path) -> bool {
        super::has_extension(path, &["toml"])
    }

    fn parse(content: &str, path: &Path) -> Result<Params, ParamError> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            ParamError::Format {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        table
            .into_iter()
            .map(|(key, value)| {
                let value = convert(&key, value, path)?;
                Ok::<_, ParamError>((key, value))
            })
            .collect()
    }
}

fn convert(key: &str, value: TomlValue, path: &Path) -> Result<Value, ParamError> {
    match value {
        TomlValue::String(s) => Ok(Value::Str(s)),
        TomlValue::Integer(i) => Ok(Value::Int(i)),
        TomlValue::Float(x) => Ok(Value::Float(x)),
        TomlValue::Boolean(b) => Ok(Value::Bool(b)),
        TomlValue::Datetime(dt) => Ok(Value::Str(dt.to_string())),
        TomlValue::Array(items) => items
            .into_iter()
            .map(|item| convert(key, item, path))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        other @ TomlValue::Table(_) => Err(ParamError::UnsupportedValue {
            path: path.to_path_buf(),
            key: key.to_string(),
            found: other.type_str().to_string(),
        }),
    }
}

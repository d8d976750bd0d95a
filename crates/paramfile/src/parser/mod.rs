//! Parameter file parsers.
//!
//! Each format claims file paths through `supports`; its `parse`
//! turns the file's top-level bindings into overrides.

use std::path::Path;

use crate::error::ParamError;
use crate::model::Params;

/// Parser trait implemented by each parameter file format.
pub trait SourceParser {
    fn supports(path: &Path) -> bool;
    fn parse(content: &str, path: &Path) -> Result<Params, ParamError>;
}

mod arith;
pub mod assignment;
pub mod json_file;
mod lexer;
pub mod toml_file;
pub mod yaml_file;

use assignment::AssignmentParser;
use json_file::JsonParser;
use toml_file::TomlParser;
use yaml_file::YamlParser;

/// Parse `content` with the parser selected by `path`'s extension.
/// Files that are not TOML, YAML or JSON are read as assignment files.
pub fn parse_file(path: &Path, content: &str) -> Result<Params, ParamError> {
    if TomlParser::supports(path) {
        TomlParser::parse(content, path)
    } else if YamlParser::supports(path) {
        YamlParser::parse(content, path)
    } else if JsonParser::supports(path) {
        JsonParser::parse(content, path)
    } else {
        AssignmentParser::parse(content, path)
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

fn is_structured(path: &Path) -> bool {
    TomlParser::supports(path) || YamlParser::supports(path) || JsonParser::supports(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    #[test]
    fn dispatch_by_extension() {
        let toml = parse_file(Path::new("p.TOML"), "count = 3\n").expect("toml");
        assert_eq!(toml.get("count"), Some(&Value::Int(3)));

        let yaml = parse_file(Path::new("p.yml"), "count: 3\n").expect("yaml");
        assert_eq!(yaml.get("count"), Some(&Value::Int(3)));

        let json = parse_file(Path::new("p.json"), r#"{"count": 3}"#).expect("json");
        assert_eq!(json.get("count"), Some(&Value::Int(3)));

        let script = parse_file(Path::new("p.py"), "count = 1 + 2\n").expect("script");
        assert_eq!(script.get("count"), Some(&Value::Int(3)));
    }

    #[test]
    fn same_text_differs_by_format() {
        // A valid assignment file is a single string scalar to YAML.
        let err = parse_file(Path::new("p.yaml"), "count = 3\n").expect_err("yaml");
        assert!(matches!(err, ParamError::Format { .. }));
    }
}

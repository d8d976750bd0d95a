//! Load options, optionally read from a TOML config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checking::Checking;
use crate::error::ParamError;

/// Options for [`crate::parse`] and [`crate::parse_mapping`].
///
/// Deserializable so programs can keep them in their own config files:
///
/// ```toml
/// [paramfile]
/// return_undeclared = true
/// checking = 22
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Also return overrides that match no declared parameter.
    pub return_undeclared: bool,
    /// Two-digit control code; see [`Checking`].
    pub checking: Checking,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undeclared(mut self, return_undeclared: bool) -> Self {
        self.return_undeclared = return_undeclared;
        self
    }

    /// Set the two-digit control code.
    pub fn with_checking(mut self, code: u32) -> Self {
        self.checking = Checking::new(code);
        self
    }

    /// Read options from TOML, either at the root or under a `[paramfile]` section.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut raw: toml::Table = content.parse()?;
        let value = match raw.remove("paramfile") {
            Some(section) => section,
            None => toml::Value::Table(raw),
        };
        value.try_into()
    }
}

/// Load options from `path`; `Ok(None)` when the file does not exist.
pub fn load_options(path: &Path) -> Result<Option<ParseOptions>, ParamError> {
    if !path.exists() {
        return Ok(None);
    }
    let s = std::fs::read_to_string(path).map_err(|source| ParamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let options = ParseOptions::from_toml_str(&s).map_err(|e| ParamError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(options))
}

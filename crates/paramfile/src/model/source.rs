//! Where overrides come from.

use std::path::{Path, PathBuf};

use super::params::Params;
use super::value::Value;
use crate::error::ParamError;

/// A parameter source: a parameter file, an in-memory mapping, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Path(PathBuf),
    Mapping(Params),
    Absent,
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for Source {
    fn from(path: &PathBuf) -> Self {
        Source::Path(path.clone())
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<String> for Source {
    fn from(path: String) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<Params> for Source {
    fn from(params: Params) -> Self {
        Source::Mapping(params)
    }
}

impl<T: Into<Source>> From<Option<T>> for Source {
    fn from(source: Option<T>) -> Self {
        source.map(Into::into).unwrap_or(Source::Absent)
    }
}

/// A parameter value naming another source: a string is a file name and
/// `None` means "use the defaults". Anything else is rejected.
impl TryFrom<Value> for Source {
    type Error = ParamError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(path) => Ok(Source::Path(PathBuf::from(path))),
            Value::None => Ok(Source::Absent),
            other => Err(ParamError::InvalidSourceKind {
                found: other.kind(),
            }),
        }
    }
}

//! Error type shared by the loader, parsers and merge engine.

use std::path::PathBuf;

use crate::model::ValueKind;

/// Everything that can abort a parameter load.
///
/// Only strict type checking turns a type mismatch into an error; the warn
/// level reports it as a [`crate::Diagnostic`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    #[error(
        "parameter source must be a file name, a mapping, or absent (to accept defaults); found {found}"
    )]
    InvalidSourceKind { found: ValueKind },

    #[error(
        "tried to assign an input parameter to a value of the wrong type with strict type checking \
         (parameter: {name}, expected: {expected}, found: {found})"
    )]
    TypeMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("default for parameter '{name}' is {found} but it was declared as {expected}")]
    InvalidDefault {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("failed to read parameter file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Script {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid parameter file {}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("unsupported value for '{key}' in {}: {found} (nested tables are not parameters)", path.display())]
    UnsupportedValue {
        path: PathBuf,
        key: String,
        found: String,
    },
}

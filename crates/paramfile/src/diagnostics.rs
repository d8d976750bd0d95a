//! Human-readable diagnostics produced while loading parameters.

use std::fmt;
use std::path::PathBuf;

use crate::model::{Value, ValueKind};

/// One diagnostic line. The merge engine only collects these; the public
/// entry points emit them through `tracing` and return them to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    ReadingFile { path: PathBuf },
    ReadingMapping,
    NoInput,
    TypeMismatch {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
    ParametersSet,
    Defaulted { name: String, value: Value },
    Obtained { name: String, value: Value },
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::TypeMismatch { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ReadingFile { path } => {
                write!(f, "Reading parameters from file: {}", path.display())
            }
            Diagnostic::ReadingMapping => f.write_str("Reading parameters from dictionary."),
            Diagnostic::NoInput => f.write_str("No input, all parameters defaulted."),
            Diagnostic::TypeMismatch { name, .. } => write!(
                f,
                "Warning: Assigned an input parameter to the value of the wrong type. Parameter name: {name}"
            ),
            Diagnostic::ParametersSet => f.write_str("Parameters set."),
            Diagnostic::Defaulted { name, value } => {
                write!(f, "parameter: {name} defaulted to value: {value}")
            }
            Diagnostic::Obtained { name, value } => {
                write!(f, "parameter: {name} obtained value: {value}")
            }
        }
    }
}

/// Write diagnostics to the active `tracing` subscriber.
pub fn emit(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic {
            Diagnostic::TypeMismatch {
                name,
                expected,
                found,
            } => tracing::warn!(
                parameter = %name,
                expected = %expected,
                found = %found,
                "{}",
                diagnostic
            ),
            other => tracing::info!("{}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_read_like_the_report() {
        let d = Diagnostic::Defaulted {
            name: "count".into(),
            value: Value::Int(5),
        };
        assert_eq!(d.to_string(), "parameter: count defaulted to value: 5");
        let d = Diagnostic::Obtained {
            name: "ratio".into(),
            value: Value::Float(2.0),
        };
        assert_eq!(d.to_string(), "parameter: ratio obtained value: 2.0");
        let d = Diagnostic::TypeMismatch {
            name: "count".into(),
            expected: ValueKind::Int,
            found: ValueKind::Str,
        };
        assert!(d.is_warning());
        assert!(d.to_string().ends_with("Parameter name: count"));
        assert!(!Diagnostic::ParametersSet.is_warning());
    }
}

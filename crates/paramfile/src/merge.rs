//! Merge overrides over declared defaults.
//!
//! This is the side-effect free core: it never logs. Callers that want the
//! diagnostics on the console go through [`crate::parse`] or
//! [`crate::parse_mapping`], or pass [`Merged::diagnostics`] to
//! [`crate::diagnostics::emit`] themselves.

use std::collections::{HashMap, HashSet};

use crate::checking::{Checking, Report, TypeCheck};
use crate::diagnostics::Diagnostic;
use crate::error::ParamError;
use crate::model::{Defaults, ParamSpec, Params};

/// Outcome of a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// Same keys as the defaults, each at its default or overridden value.
    pub params: Params,
    /// Overrides that matched no declared parameter, under their own spelling.
    pub undeclared: Params,
    pub diagnostics: Vec<Diagnostic>,
}

/// Merge `overrides` over `defaults` under the given checking policy.
///
/// Keys match when equal after trimming surrounding whitespace; a matched
/// value is stored under the declared key's spelling. Strict type checking
/// aborts on the first mismatch without returning a partial result.
pub fn merge_params(
    overrides: &Params,
    defaults: &Defaults,
    checking: Checking,
) -> Result<Merged, ParamError> {
    let type_check = checking.type_check();
    let report = checking.report();

    // Trimmed name -> first declared parameter with that trimmed name.
    let mut declared: HashMap<&str, (&str, &ParamSpec)> = HashMap::with_capacity(defaults.len());
    for (name, spec) in defaults.iter() {
        declared
            .entry(name.trim())
            .or_insert((name.as_str(), spec));
    }

    let mut params = defaults.values();
    let mut defaulted: HashSet<&str> = defaults.iter().map(|(name, _)| name.as_str()).collect();
    let mut undeclared = Params::new();
    let mut diagnostics = Vec::new();

    for (in_key, in_value) in overrides {
        let Some(&(name, spec)) = declared.get(in_key.trim()) else {
            undeclared.insert(in_key.clone(), in_value.clone());
            continue;
        };
        if type_check != TypeCheck::Off && !spec.accepts(in_value) {
            if type_check == TypeCheck::Strict {
                return Err(ParamError::TypeMismatch {
                    name: name.to_string(),
                    expected: spec.kind,
                    found: in_value.kind(),
                });
            }
            diagnostics.push(Diagnostic::TypeMismatch {
                name: name.to_string(),
                expected: spec.kind,
                found: in_value.kind(),
            });
        }
        params.insert(name.to_string(), in_value.clone());
        defaulted.remove(name);
    }

    if report >= Report::Defaulted {
        diagnostics.push(Diagnostic::ParametersSet);
        for (name, value) in &params {
            if defaulted.contains(name.as_str()) {
                diagnostics.push(Diagnostic::Defaulted {
                    name: name.clone(),
                    value: value.clone(),
                });
            } else if report >= Report::All {
                diagnostics.push(Diagnostic::Obtained {
                    name: name.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    Ok(Merged {
        params,
        undeclared,
        diagnostics,
    })
}

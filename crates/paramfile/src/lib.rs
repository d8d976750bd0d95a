//! Load program parameters from a parameter file or an in-memory mapping,
//! merged over declared defaults.
//!
//! A program declares the parameters it expects together with their default
//! values and types. [`parse`] reads a parameter file (or takes a mapping),
//! replaces defaults with the values it finds, optionally type checks them,
//! and reports which parameters kept their defaults. Entries that match no
//! declared parameter are collected separately.
//!
//! ```no_run
//! use paramfile::{Defaults, ParseOptions, Value};
//!
//! let defaults = Defaults::new().with("n_iter", 10).with("output", "out.fits");
//! let options = ParseOptions::new().with_undeclared(true).with_checking(12);
//! let loaded = paramfile::parse("run.ini", &defaults, &options)?;
//! assert!(matches!(loaded.params["n_iter"], Value::Int(_)));
//! # Ok::<(), paramfile::ParamError>(())
//! ```
//!
//! Parameter files are TOML, YAML or JSON by extension; anything else is an
//! assignment file (`name = expr` per line, see [`parser::assignment`]).

pub mod checking;
pub mod config;
pub mod diagnostics;
mod error;
pub mod loader;
pub mod merge;
pub mod model;
pub mod parser;

pub use checking::{Checking, Report, TypeCheck};
pub use config::ParseOptions;
pub use diagnostics::Diagnostic;
pub use error::ParamError;
pub use model::{Defaults, ParamSpec, Params, Source, Value, ValueKind};

use loader::Resolved;
use merge::Merged;

/// Result of a load.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Every declared parameter, at its default or overridden value.
    pub params: Params,
    /// Undeclared overrides; `Some` only when requested.
    pub undeclared: Option<Params>,
    /// Everything that was reported, in order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Load parameters from `source` over `defaults`.
///
/// An absent source returns the defaults unchanged. Diagnostics are emitted
/// through `tracing` as well as returned.
pub fn parse(
    source: impl Into<Source>,
    defaults: &Defaults,
    options: &ParseOptions,
) -> Result<ParseOutput, ParamError> {
    let source = source.into();
    let mut diagnostics = Vec::new();
    if options.checking.report() >= Report::Defaulted {
        let mode = loader::describe(&source);
        diagnostics::emit(std::slice::from_ref(&mode));
        diagnostics.push(mode);
    }

    match loader::resolve(source)? {
        Resolved::Absent => Ok(ParseOutput {
            params: defaults.values(),
            undeclared: options.return_undeclared.then(Params::new),
            diagnostics,
        }),
        Resolved::Overrides(overrides) => {
            let merged = merge::merge_params(&overrides, defaults, options.checking)?;
            Ok(finish(merged, options, diagnostics))
        }
    }
}

/// Load parameters from an in-memory mapping over `defaults`.
pub fn parse_mapping(
    overrides: &Params,
    defaults: &Defaults,
    options: &ParseOptions,
) -> Result<ParseOutput, ParamError> {
    let merged = merge::merge_params(overrides, defaults, options.checking)?;
    Ok(finish(merged, options, Vec::new()))
}

fn finish(merged: Merged, options: &ParseOptions, mut diagnostics: Vec<Diagnostic>) -> ParseOutput {
    diagnostics::emit(&merged.diagnostics);
    diagnostics.extend(merged.diagnostics);
    ParseOutput {
        params: merged.params,
        undeclared: options.return_undeclared.then_some(merged.undeclared),
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_source_returns_defaults() {
        let defaults = Defaults::new().with("count", 5).with("name", "x");
        let out = parse(Source::Absent, &defaults, &ParseOptions::new().with_undeclared(true))
            .expect("absent");
        assert_eq!(out.params, defaults.values());
        assert_eq!(out.undeclared, Some(Params::new()));
        assert_eq!(out.diagnostics, vec![Diagnostic::NoInput]);
    }

    #[test]
    fn undeclared_only_when_requested() {
        let defaults = Defaults::new().with("count", 5);
        let mut overrides = Params::new();
        overrides.insert("extra".into(), Value::from("y"));
        let out = parse_mapping(&overrides, &defaults, &ParseOptions::new()).expect("parse");
        assert!(out.undeclared.is_none());
        let out = parse_mapping(&overrides, &defaults, &ParseOptions::new().with_undeclared(true))
            .expect("parse");
        assert_eq!(out.undeclared, Some(overrides));
    }

    #[test]
    fn mapping_source_reports_mode_first() {
        let defaults = Defaults::new().with("count", 5);
        let out = parse(Params::new(), &defaults, &ParseOptions::new()).expect("parse");
        assert_eq!(out.diagnostics.first(), Some(&Diagnostic::ReadingMapping));
        let silent = parse(Params::new(), &defaults, &ParseOptions::new().with_checking(1))
            .expect("parse");
        assert!(silent.diagnostics.is_empty());
    }
}

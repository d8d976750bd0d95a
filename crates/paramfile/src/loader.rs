//! Source resolution: turn a [`Source`] into the overrides to merge.

use std::fs;
use std::path::Path;

use crate::diagnostics::Diagnostic;
use crate::error::ParamError;
use crate::model::{Params, Source};
use crate::parser::parse_file;

/// A resolved source. `Absent` means every parameter keeps its default and
/// the merge step is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Overrides(Params),
    Absent,
}

/// The informational line naming how parameters are being read.
pub fn describe(source: &Source) -> Diagnostic {
    match source {
        Source::Path(path) => Diagnostic::ReadingFile { path: path.clone() },
        Source::Mapping(_) => Diagnostic::ReadingMapping,
        Source::Absent => Diagnostic::NoInput,
    }
}

pub fn resolve(source: Source) -> Result<Resolved, ParamError> {
    match source {
        Source::Path(path) => load_file(&path).map(Resolved::Overrides),
        Source::Mapping(overrides) => Ok(Resolved::Overrides(overrides)),
        Source::Absent => Ok(Resolved::Absent),
    }
}

/// Read and parse one parameter file. Errors are not retried.
pub fn load_file(path: &Path) -> Result<Params, ParamError> {
    let content = fs::read_to_string(path).map_err(|source| ParamError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let overrides = parse_file(path, &content)?;
    tracing::debug!(
        "read {} parameter(s) from {}",
        overrides.len(),
        path.display()
    );
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn resolves_each_source_kind() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("run.ini");
        fs::write(&path, "count = 3\n").expect("write");

        match resolve(Source::Path(path)).expect("file") {
            Resolved::Overrides(p) => assert_eq!(p.get("count"), Some(&Value::Int(3))),
            Resolved::Absent => panic!("file source resolved to absent"),
        }

        let mut mapping = Params::new();
        mapping.insert("x".into(), Value::Int(1));
        assert_eq!(
            resolve(Source::Mapping(mapping.clone())).expect("mapping"),
            Resolved::Overrides(mapping)
        );
        assert_eq!(resolve(Source::Absent).expect("absent"), Resolved::Absent);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("nope.ini");
        let err = resolve(Source::Path(path.clone())).expect_err("missing");
        match err {
            ParamError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn describe_names_the_mode() {
        assert_eq!(
            describe(&Source::Path(PathBuf::from("a.ini"))).to_string(),
            "Reading parameters from file: a.ini"
        );
        assert_eq!(
            describe(&Source::Mapping(Params::new())).to_string(),
            "Reading parameters from dictionary."
        );
        assert_eq!(
            describe(&Source::Absent).to_string(),
            "No input, all parameters defaulted."
        );
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Anything that stops the viewer from starting. None of these are retried.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("rendering backend unavailable: {0}")]
    Backend(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read body table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("line {line}: bad value {value:?} for `{field}`")]
    BadValue {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("body table has no sun (a row with distance `-`)")]
    NoSun,
    #[error("line {line}: second sun {name:?}")]
    ExtraSun { line: usize, name: String },
    #[error("line {line}: duplicate body {name:?}")]
    DuplicateBody { line: usize, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("no planet named {0:?}")]
    UnknownBody(String),
}

//! Command implementations for the `mx` CLI.
//!
//! Each command is a plain function taking its arguments; fatal errors are
//! printed and turn into a non-zero exit code here, never deeper down.

mod fmt;
mod parse;
mod report;

use std::io::ErrorKind;

pub use fmt::{format_source, run_format, FmtOptions, FormatResult, Formatted};
pub use parse::{dump_tree, parse_file};
pub use report::{format_problem, format_problems};

/// Everything that can stop a command before or while it touches a file.
#[derive(Debug, thiserror::Error)]
pub enum FmtError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(String),
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot read from stdin: {0}")]
    Stdin(std::io::Error),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("invalid value `{value}` for {option}")]
    InvalidValue { option: &'static str, value: String },
    #[error("{0} needs a value")]
    MissingValue(&'static str),
    #[error("cannot use {0} with {1}")]
    Conflict(&'static str, &'static str),
    #[error("--lines needs exactly one file or --stdin")]
    LinesNeedOneFile,
    #[error(transparent)]
    Config(#[from] mx_fmt::ConfigError),
}

/// Read a whole file as text, mapping the common failures to their own
/// variants.
pub(crate) fn read_file(path: &str) -> Result<String, FmtError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => FmtError::NotFound(path.into()),
        ErrorKind::PermissionDenied => FmtError::PermissionDenied(path.into()),
        ErrorKind::InvalidData => FmtError::InvalidUtf8(path.into()),
        _ => FmtError::Read {
            path: path.into(),
            source,
        },
    })
}

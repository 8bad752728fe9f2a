//! Error types for goscan
//!
//! Uses `thiserror` for library errors. Parse misses, unresolvable packages
//! and missing source files are not errors; they surface as empty results.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for goscan operations
pub type GoResult<T> = Result<T, GoScanError>;

/// Main error type for goscan operations
#[derive(Error, Debug)]
pub enum GoScanError {
    /// IO error tied to a specific path
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory walk failed
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Config file could not be parsed
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// GOOS value not in the known platform list
    #[error("unknown target OS '{os}'")]
    UnknownOs { os: String },

    /// GOARCH value not in the known platform list
    #[error("unknown target architecture '{arch}'")]
    UnknownArch { arch: String },

    /// A `go` subcommand could not be run or exited unsuccessfully
    #[error("`{command}` failed: {message}")]
    ToolchainFailed { command: String, message: String },

    /// Output of a `go` subcommand did not have the expected shape
    #[error("unexpected output from `{command}`: {output}")]
    UnexpectedToolchainOutput { command: String, output: String },
}

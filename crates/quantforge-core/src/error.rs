//! Error types for the quantforge pipeline.
//!
//! Every failure surfaced by the pipeline is a `ForgeError`; the orchestrator
//! propagates stage errors unchanged so the binary can decide once, at the
//! top, how to report them and exit.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for quantforge operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The user asked for a quantization level the table does not know.
    #[error("unknown quantization type: {value} (available: {valid})")]
    UnknownQuantLevel { value: String, valid: String },

    /// An external tool (cmake, converter, quantizer) failed to start or
    /// exited with a non-zero status.
    #[error("external command failed: `{command}`: {reason}")]
    CommandFailed { command: String, reason: String },

    /// The toolchain build reported success but produced no usable binary.
    #[error("quantizer binary not found after build (looked for {primary:?} and {fallback:?})")]
    QuantizerMissing { primary: PathBuf, fallback: PathBuf },

    /// A work item path could not be interpreted (no file name, bad suffix).
    #[error("invalid work item path: {path:?}: {message}")]
    InvalidWorkItem { path: PathBuf, message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for quantforge operations.
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Create an IO error with path context.
    pub fn io(context: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForgeError::Io {
            message: format!("{context}: {source}"),
            path: path.into(),
            source,
        }
    }
}

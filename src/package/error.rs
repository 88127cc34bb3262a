// ABOUTME: Errors from staging, pruning, and archiving a project.
// ABOUTME: Includes manifest read and validation failures.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to read matched path: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("prune command `{command}` failed ({status}): {stderr}")]
    PruneFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("manifest {path} is invalid: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("packaging task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

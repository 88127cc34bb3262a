// ABOUTME: Errors from reading credential key material.
// ABOUTME: Covers missing or malformed key files and unset environment variables.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to read key file {path}: {source}")]
    ReadKeyFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse key file {path}: {source}")]
    ParseKeyFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("missing credential environment variable: {0}")]
    MissingEnvVar(String),
}

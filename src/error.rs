// ABOUTME: Application-wide error types for gcf-deploy.
// ABOUTME: Wraps config, packaging, provider, and deployment failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::package::PackageError;
use crate::provider::ProviderError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

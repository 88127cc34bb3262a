// ABOUTME: Error types for deployment operations.
// ABOUTME: Covers packaging, remote call, version-exists, and operation outcome failures.

use std::time::Duration;

use crate::package::PackageError;
use crate::provider::{OperationError, ProviderError};

/// Errors that end a deployment run.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Packaging or manifest reading failed.
    #[error("packaging failed: {0}")]
    Package(#[from] PackageError),

    /// A remote call failed (including identity resolution).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The versioned archive is already in the bucket and overwrite is off.
    #[error("the function with this version already exists: {object}")]
    VersionExists { object: String },

    /// The create or update operation finished with an error payload.
    #[error(transparent)]
    OperationFailed(OperationError),

    /// The operation was still running when the poll deadline passed.
    #[error("operation {operation} did not finish within {}s", .timeout.as_secs())]
    OperationTimeout {
        operation: String,
        timeout: Duration,
    },

    /// Polling was cancelled by the caller.
    #[error("cancelled while waiting for operation {operation}")]
    Cancelled { operation: String },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Package,
    Credentials,
    RemoteCall,
    VersionExists,
    OperationFailed,
    OperationTimeout,
    Cancelled,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Package(_) => DeployErrorKind::Package,
            DeployError::Provider(ProviderError::Identity(_)) => DeployErrorKind::Credentials,
            DeployError::Provider(_) => DeployErrorKind::RemoteCall,
            DeployError::VersionExists { .. } => DeployErrorKind::VersionExists,
            DeployError::OperationFailed(_) => DeployErrorKind::OperationFailed,
            DeployError::OperationTimeout { .. } => DeployErrorKind::OperationTimeout,
            DeployError::Cancelled { .. } => DeployErrorKind::Cancelled,
        }
    }

    /// The remote operation's error payload, if that is why the run failed.
    pub fn operation_error(&self) -> Option<&OperationError> {
        match self {
            DeployError::OperationFailed(error) => Some(error),
            _ => None,
        }
    }
}

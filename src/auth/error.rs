// ABOUTME: Authorization and identity resolution errors.
// ABOUTME: IdentityError unifies credential and token-exchange failures with a kind accessor.

use snafu::Snafu;

use crate::credentials::CredentialError;

/// Errors from exchanging key material for an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid private key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("failed to sign token request: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("token request rejected ({status}): {error}")]
    Rejected { status: u16, error: String },
}

/// Failure to obtain an identity for remote calls.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum IdentityError {
    #[snafu(display("credential resolution failed: {source}"))]
    Credentials { source: CredentialError },

    #[snafu(display("authorization failed: {source}"))]
    Authorization { source: AuthError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityErrorKind {
    /// Key file missing or unreadable.
    KeyFileUnreadable,
    /// Key file is not a valid service-account key.
    KeyFileMalformed,
    /// A named credential environment variable is unset.
    MissingEnvVar,
    /// The private key could not be used for signing.
    InvalidKey,
    /// The token endpoint could not be reached.
    Unreachable,
    /// The token endpoint refused the assertion.
    Rejected,
}

impl IdentityError {
    pub fn kind(&self) -> IdentityErrorKind {
        match self {
            IdentityError::Credentials { source } => match source {
                CredentialError::ReadKeyFile { .. } => IdentityErrorKind::KeyFileUnreadable,
                CredentialError::ParseKeyFile { .. } => IdentityErrorKind::KeyFileMalformed,
                CredentialError::MissingEnvVar(_) => IdentityErrorKind::MissingEnvVar,
            },
            IdentityError::Authorization { source } => match source {
                AuthError::InvalidKey(_) | AuthError::Signing(_) => IdentityErrorKind::InvalidKey,
                AuthError::Transport(_) => IdentityErrorKind::Unreachable,
                AuthError::Rejected { .. } => IdentityErrorKind::Rejected,
            },
        }
    }
}

impl From<CredentialError> for IdentityError {
    fn from(source: CredentialError) -> Self {
        IdentityError::Credentials { source }
    }
}

impl From<AuthError> for IdentityError {
    fn from(source: AuthError) -> Self {
        IdentityError::Authorization { source }
    }
}

// ABOUTME: Provider error type and not-found normalization.
// ABOUTME: HTTP 404 status and a 404 error.code in the body both count as not found.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::auth::IdentityError;

/// Errors from remote provider calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("remote call failed ({status}): {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode {context} response: {source}")]
    Decode {
        context: &'static str,
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ProviderError {
    /// Whether the remote side reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::Api { status, code, .. } => {
                *status == StatusCode::NOT_FOUND.as_u16() || *code == Some(404)
            }
            _ => false,
        }
    }

    fn from_error_body(status: StatusCode, body: &[u8]) -> Self {
        let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();
        let (code, message) = match envelope {
            Some(ErrorEnvelope { error }) => (error.code, error.message),
            None => (None, String::from_utf8_lossy(body).trim().to_string()),
        };

        ProviderError::Api {
            status: status.as_u16(),
            code,
            message: if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
}

/// Decode a response body, turning non-success statuses into `ProviderError::Api`.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
    context: &'static str,
) -> Result<T, ProviderError> {
    if !status.is_success() {
        return Err(ProviderError::from_error_body(status, body));
    }

    serde_json::from_slice(body).map_err(|source| ProviderError::Decode { context, source })
}

/// Converts not-found failures into an absent value.
pub trait NotFoundExt<T> {
    fn absent_if_not_found(self) -> Result<Option<T>, ProviderError>;
}

impl<T> NotFoundExt<T> for Result<T, ProviderError> {
    fn absent_if_not_found(self) -> Result<Option<T>, ProviderError> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

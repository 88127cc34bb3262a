// ABOUTME: Authentication for Google APIs using service-account key material.
// ABOUTME: Exchanges a signed JWT for an access token and memoizes the resulting identity.

mod error;
mod identity;
mod jwt;

pub use error::{AuthError, IdentityError, IdentityErrorKind};
pub use identity::{Identity, IdentityCell};
pub use jwt::{JwtAuthorizer, TokenClaims};

use async_trait::async_trait;
use std::fmt;

use crate::credentials::KeyMaterial;

/// OAuth scope granting access to all Google Cloud APIs.
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Google's OAuth2 token endpoint.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// A bearer token for authenticated API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Exchanges key material for an access token.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, key: &KeyMaterial, scope: &str) -> Result<AccessToken, AuthError>;
}

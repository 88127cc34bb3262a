// ABOUTME: OAuth2 JWT-bearer grant for service accounts.
// ABOUTME: Signs an RS256 assertion and posts it to the token endpoint.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::{AccessToken, AuthError, Authorizer, DEFAULT_TOKEN_URI};
use crate::credentials::KeyMaterial;

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime accepted by Google (maximum one hour).
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the signed assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(client_email: &str, scope: &str, audience: &str, issued_at: i64) -> Self {
        Self {
            iss: client_email.to_string(),
            scope: scope.to_string(),
            aud: audience.to_string(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize, Default)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Authorizer that performs the JWT-bearer exchange over HTTPS.
#[derive(Debug, Clone)]
pub struct JwtAuthorizer {
    http: reqwest::Client,
    token_uri: String,
}

impl JwtAuthorizer {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_token_uri(http, DEFAULT_TOKEN_URI)
    }

    pub fn with_token_uri(http: reqwest::Client, token_uri: impl Into<String>) -> Self {
        Self {
            http,
            token_uri: token_uri.into(),
        }
    }

    /// Build the signed assertion for `key`.
    pub fn assertion(&self, key: &KeyMaterial, scope: &str) -> Result<String, AuthError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(AuthError::InvalidKey)?;
        let claims = TokenClaims::new(
            &key.client_email,
            scope,
            &self.token_uri,
            Utc::now().timestamp(),
        );

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(AuthError::Signing)
    }
}

#[async_trait]
impl Authorizer for JwtAuthorizer {
    async fn authorize(&self, key: &KeyMaterial, scope: &str) -> Result<AccessToken, AuthError> {
        let assertion = self.assertion(key, scope)?;

        tracing::debug!(
            client_email = %key.client_email,
            token_uri = %self.token_uri,
            "Requesting access token"
        );

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: TokenErrorResponse = response.json().await.unwrap_or_default();
            let error = match body.error_description {
                Some(description) => format!("{}: {}", body.error, description),
                None => body.error,
            };
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                error,
            });
        }

        let body: TokenResponse = response.json().await?;
        Ok(AccessToken::new(body.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_expire_one_hour_after_issue() {
        let claims = TokenClaims::new(
            "svc@p.iam.gserviceaccount.com",
            "scope",
            DEFAULT_TOKEN_URI,
            1_000,
        );
        assert_eq!(claims.iss, "svc@p.iam.gserviceaccount.com");
        assert_eq!(claims.aud, DEFAULT_TOKEN_URI);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn assertion_rejects_malformed_key() {
        let authorizer = JwtAuthorizer::new(reqwest::Client::new());
        let key = KeyMaterial {
            client_email: "svc@p.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
        };
        let err = authorizer
            .assertion(&key, crate::auth::CLOUD_PLATFORM_SCOPE)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidKey(_)));
    }
}

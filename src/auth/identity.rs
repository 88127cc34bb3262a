// ABOUTME: Lazily resolved, memoized identity for remote calls.
// ABOUTME: Single-flight: concurrent callers wait for one resolution; failures are not cached.

use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{AccessToken, Authorizer, CLOUD_PLATFORM_SCOPE, IdentityError};
use crate::credentials::CredentialConfig;

/// An authorized handle: who we are and the token proving it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub client_email: String,
    pub scope: String,
    pub token: AccessToken,
}

/// Resolves an [`Identity`] at most once per cell.
///
/// The token is never refreshed. A failed resolution leaves the cell empty so
/// the next caller starts over from the credential config.
pub struct IdentityCell {
    credentials: CredentialConfig,
    authorizer: Arc<dyn Authorizer>,
    identity: OnceCell<Identity>,
}

impl std::fmt::Debug for IdentityCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCell")
            .field("credentials", &self.credentials)
            .field("resolved", &self.identity.initialized())
            .finish()
    }
}

impl IdentityCell {
    pub fn new(credentials: CredentialConfig, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            credentials,
            authorizer,
            identity: OnceCell::new(),
        }
    }

    /// Get the cached identity, resolving it on first use.
    pub async fn get(&self) -> Result<&Identity, IdentityError> {
        self.identity.get_or_try_init(|| self.resolve()).await
    }

    /// Whether an identity has been resolved yet.
    pub fn is_resolved(&self) -> bool {
        self.identity.initialized()
    }

    async fn resolve(&self) -> Result<Identity, IdentityError> {
        let key = self.credentials.resolve()?;
        let token = self.authorizer.authorize(&key, CLOUD_PLATFORM_SCOPE).await?;

        tracing::info!(client_email = %key.client_email, "Authorized service account");

        Ok(Identity {
            client_email: key.client_email,
            scope: CLOUD_PLATFORM_SCOPE.to_string(),
            token,
        })
    }
}

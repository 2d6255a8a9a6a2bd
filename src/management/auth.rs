use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{errors::AuthError, spotify::TokenProvider, types::Credential};

/// Owns the process-wide bearer credential.
///
/// The token is assumed valid until a catalog call answers 401; callers that
/// see one invoke [`CredentialBroker::acquire`] again. Concurrent acquisitions
/// are not serialized, each success simply overwrites the stored credential.
pub struct CredentialBroker {
    provider: Arc<dyn TokenProvider>,
    credential: RwLock<Option<Credential>>,
}

impl CredentialBroker {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            credential: RwLock::new(None),
        }
    }

    /// Exchanges the client credentials for a new token and stores it.
    ///
    /// On failure the previously stored credential, if any, stays in place.
    pub async fn acquire(&self) -> Result<Credential, AuthError> {
        match self.provider.request_token().await {
            Ok(token) => {
                let credential = Credential::new(token);
                *self.credential.write().await = Some(credential.clone());
                tracing::info!(obtained_at = %credential.obtained_at, "acquired access token");
                Ok(credential)
            }
            Err(e) => {
                tracing::warn!(error = %e, "token exchange failed");
                Err(e)
            }
        }
    }

    pub async fn current(&self) -> Option<Credential> {
        self.credential.read().await.clone()
    }

    /// The stored credential, acquiring one first when none exists yet.
    pub async fn current_or_acquire(&self) -> Result<Credential, AuthError> {
        match self.current().await {
            Some(credential) => Ok(credential),
            None => self.acquire().await,
        }
    }
}

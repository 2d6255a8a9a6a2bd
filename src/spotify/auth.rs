use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::AUTHORIZATION};

use crate::{errors::AuthError, types::TokenResponse, utils};

/// Source of fresh bearer tokens.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn request_token(&self) -> Result<String, AuthError>;
}

/// Client-credentials grant against the Spotify accounts service.
///
/// Posts `grant_type=client_credentials` with HTTP Basic auth built from the
/// client id and secret, and expects a JSON body carrying `access_token`.
pub struct ClientCredentials {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentials {
    pub fn new(client: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            client,
            token_url,
            client_id,
            client_secret,
        }
    }
}

#[async_trait]
impl TokenProvider for ClientCredentials {
    async fn request_token(&self) -> Result<String, AuthError> {
        let response = self
            .client
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth(&self.client_id, &self.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        parse_token_response(&body)
    }
}

/// Pulls the access token out of a token endpoint response body.
pub fn parse_token_response(body: &[u8]) -> Result<String, AuthError> {
    let json: TokenResponse =
        serde_json::from_slice(body).map_err(|e| AuthError::Decoding(e.to_string()))?;

    json.access_token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

//! Server-side OAuth 2.0 token exchanges against the identity provider

use crate::auth::AuthError;
use crate::config::oidc::OidcConfig;
use crate::models::TokenExchangeResult;
use log::{debug, error, info};
use reqwest::Client;
use std::fmt;
use url::Url;

const CODE_REJECTED: &str = "Failed to exchange authorization code";
const REFRESH_REJECTED: &str = "Failed to refresh access token";

/// Client for the provider's token endpoint.
///
/// Holds the client secret; it is added to every upstream request and never
/// accepted from or returned to callers.
#[derive(Clone)]
pub struct TokenExchangeClient {
    client: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
}

impl fmt::Debug for TokenExchangeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchangeClient")
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl TokenExchangeClient {
    pub fn new(client: Client, config: &OidcConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            token_url: config.token_endpoint()?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Authorization Code grant (RFC 6749 Section 4.1.3)
    pub async fn exchange_authorization_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenExchangeResult, AuthError> {
        info!("Exchanging authorization code for tokens");
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        self.request_tokens(&form, CODE_REJECTED).await
    }

    /// Refresh Token grant (RFC 6749 Section 6)
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenExchangeResult, AuthError> {
        info!("Refreshing access token");
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        self.request_tokens(&form, REFRESH_REJECTED).await
    }

    /// Posts the grant to the token endpoint and normalizes the outcome
    async fn request_tokens(
        &self,
        form: &[(&str, &str)],
        rejection: &'static str,
    ) -> Result<TokenExchangeResult, AuthError> {
        debug!("Posting token request to {}", self.token_url);

        let response = self
            .client
            .post(self.token_url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| {
                error!("Token endpoint {} unreachable: {:?}", self.token_url, e);
                AuthError::UpstreamUnavailable
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Token endpoint error {}: {}", status, error_text);
            return Err(AuthError::ExchangeRejected(rejection));
        }

        let tokens: TokenExchangeResult = response.json().await.map_err(|e| {
            error!("Failed to read token endpoint response: {:?}", e);
            AuthError::UpstreamUnavailable
        })?;

        debug!(
            "Token endpoint issued a {} token expiring in {}s",
            tokens.token_type, tokens.expires_in
        );
        Ok(tokens)
    }
}

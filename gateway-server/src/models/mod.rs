use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Authenticated caller, built fresh for every request from verified token claims
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct Identity {
    /// Stable identifier of the user at the identity provider
    pub subject: String,
    /// Display handle
    #[serde(default)]
    pub username: Option<String>,
    /// User's email address
    #[serde(default)]
    pub email: Option<String>,
    /// Permissions derived from realm and client roles
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub permissions: BTreeSet<String>,
}

impl Identity {
    /// Whether the identity carries no subject
    pub fn is_anonymous(&self) -> bool {
        self.subject.is_empty()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Public auth configuration for the frontend. Never carries secrets.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct AuthConfig {
    /// Authorization endpoint the browser is redirected to
    pub authorization_url: String,
    /// OAuth client identifier
    pub client_id: String,
    /// Callback the identity provider redirects back to
    pub redirect_uri: String,
}

/// Request to exchange an authorization code for tokens
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TokenRequest {
    /// Authorization code received on the callback
    pub code: String,
    /// Redirect URI used in the authorization request
    pub redirect_uri: String,
}

/// Request to refresh an access token
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Tokens returned to the frontend after a code or refresh exchange
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct TokenExchangeResult {
    /// The access token string
    pub access_token: String,
    /// Refresh token, if the provider issued one
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type (default: Bearer)
    #[serde(default = "default_token_type", deserialize_with = "token_type_or_default")]
    pub token_type: String,
    /// Access token lifetime in seconds (default: 300)
    #[serde(default = "default_expires_in", deserialize_with = "expires_in_or_default")]
    pub expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_expires_in() -> u64 {
    300
}

// Providers may send an explicit null for these fields
fn token_type_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_token_type))
}

fn expires_in_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_expires_in))
}

/// Analytics score of the calling user
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq)]
pub struct Score {
    pub score: u64,
}

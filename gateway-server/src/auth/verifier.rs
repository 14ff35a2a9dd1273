//! Bearer token verification against the identity provider's published keys

use crate::auth::claims::map_claims;
use crate::auth::AuthError;
use crate::config::oidc::OidcConfig;
use crate::models::Identity;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use log::{debug, error, info, warn};
use moka::future::Cache as MokaCache;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Signature algorithms accepted on access tokens. Symmetric algorithms are
/// refused so a published public key can never be used as an HMAC secret.
const SUPPORTED_ALGORITHMS: &[Algorithm] = &[
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
    Algorithm::ES256,
    Algorithm::ES384,
];

/// Reasons a token failed verification. Only ever logged.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Invalid token: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Unsupported signature algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),
    #[error("Failed to fetch signing keys: {0}")]
    Keys(#[from] Arc<reqwest::Error>),
    #[error("No signing key matches key id {0:?}")]
    KeyNotFound(Option<String>),
}

/// Verifies bearer tokens and builds the caller's [`Identity`].
///
/// The realm's signing keys are cached for `jwks_cache_ttl` seconds and
/// refetched early when a token names a key id the cached set lacks.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    client: Client,
    signing_keys: MokaCache<String, Arc<JwkSet>>,
    certs_url: Url,
    userinfo_url: Url,
    issuer: String,
    audience: Option<String>,
    client_id: String,
}

impl TokenVerifier {
    pub fn new(client: Client, config: &OidcConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            signing_keys: MokaCache::builder()
                .time_to_live(Duration::from_secs(config.jwks_cache_ttl))
                .build(),
            certs_url: config.certs_url()?,
            userinfo_url: config.userinfo_url()?,
            issuer: config.issuer_url(),
            audience: config.audience.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// Verifies the token and returns the identity it was issued to.
    ///
    /// Every failure collapses into [`AuthError::Authentication`]; the cause is
    /// logged here and not returned to the caller.
    pub async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        debug!("Decoding bearer token");

        let claims = match self.decode(token).await {
            Ok(claims) => claims,
            Err(e) => {
                error!("Failed to decode/verify bearer token: {}", e);
                return Err(AuthError::Authentication);
            }
        };

        let userinfo = match self.userinfo(token).await {
            Ok(userinfo) => userinfo,
            Err(e) => {
                debug!("Userinfo unavailable, using token claims only: {}", e);
                Value::Null
            }
        };

        let identity = map_claims(&claims, &userinfo, &self.client_id);
        if identity.is_anonymous() {
            warn!("Rejecting verified token without a subject claim");
            return Err(AuthError::Authentication);
        }

        info!(
            "Authenticated user {:?} with permissions {:?}",
            identity.username, identity.permissions
        );
        Ok(identity)
    }

    /// Checks signature, expiry, issuer and audience, returning the claims
    async fn decode(&self, token: &str) -> Result<Value, VerificationError> {
        let header = decode_header(token)?;
        if !SUPPORTED_ALGORITHMS.contains(&header.alg) {
            return Err(VerificationError::UnsupportedAlgorithm(header.alg));
        }

        let jwk = self.signing_key(header.kid.as_deref()).await?;
        let key = DecodingKey::from_jwk(&jwk)?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let data = decode::<Value>(token, &key, &validation)?;
        Ok(data.claims)
    }

    /// Key matching `kid`, or the first published key when the token names none
    async fn signing_key(&self, kid: Option<&str>) -> Result<Jwk, VerificationError> {
        let select = |keys: &JwkSet| match kid {
            Some(kid) => keys.find(kid).cloned(),
            None => keys.keys.first().cloned(),
        };

        if let Some(jwk) = select(&*self.cached_signing_keys().await?) {
            return Ok(jwk);
        }

        // The provider may have rotated its keys since they were cached
        debug!("Signing key {:?} not cached, refetching the key set", kid);
        self.signing_keys.invalidate(self.certs_url.as_str()).await;
        select(&*self.cached_signing_keys().await?)
            .ok_or_else(|| VerificationError::KeyNotFound(kid.map(str::to_owned)))
    }

    async fn cached_signing_keys(&self) -> Result<Arc<JwkSet>, Arc<reqwest::Error>> {
        self.signing_keys
            .try_get_with_by_ref(self.certs_url.as_str(), async {
                self.fetch_signing_keys().await.map(Arc::new)
            })
            .await
    }

    async fn fetch_signing_keys(&self) -> Result<JwkSet, reqwest::Error> {
        debug!("Fetching signing keys from {}", self.certs_url);
        self.client
            .get(self.certs_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    async fn userinfo(&self, token: &str) -> Result<Value, reqwest::Error> {
        self.client
            .get(self.userinfo_url.clone())
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

use crate::auth::exchange::TokenExchangeClient;
use crate::auth::verifier::TokenVerifier;
use crate::config::oidc::OidcConfig;
use crate::config::GatewayConfig;
use crate::scores::ScoreStore;
use log::warn;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to create identity provider client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Invalid identity provider URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub verifier: Arc<TokenVerifier>,
    pub exchange: Arc<TokenExchangeClient>,
    pub scores: ScoreStore,
}

impl AppState {
    /// Builds the client used for every call to the identity provider
    fn create_idp_client(config: &OidcConfig) -> Result<Client, reqwest::Error> {
        if !config.verify_tls {
            warn!("TLS certificate verification towards the identity provider is disabled");
        }

        Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_tls)
            // Configure connection pool
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
    }

    pub fn new(config: GatewayConfig) -> Result<Self, StateError> {
        let client = Self::create_idp_client(&config.oidc)?;
        let verifier = TokenVerifier::new(client.clone(), &config.oidc)?;
        let exchange = TokenExchangeClient::new(client, &config.oidc)?;

        Ok(Self {
            scores: ScoreStore::new(),
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            exchange: Arc::new(exchange),
        })
    }
}

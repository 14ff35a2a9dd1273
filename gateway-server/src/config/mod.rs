use crate::config::oidc::OidcConfig;
use confique::Config;

pub mod oidc;

/// Optional configuration file, read from the working directory when present
const CONFIG_FILE: &str = "gateway.toml";

/// Main configuration structure for the gateway server
#[derive(Debug, Config, Clone)]
pub struct GatewayConfig {
    /// The port the gateway will listen to (default: 8000)
    #[config(env = "GATEWAY_PORT", default = 8000)]
    pub port: u16,

    /// Public base URL of the browser frontend (default: http://localhost)
    #[config(env = "GATEWAY_FRONTEND_URL", default = "http://localhost")]
    pub frontend_url: String,

    /// Identity provider configuration
    #[config(nested)]
    pub oidc: OidcConfig,
}

impl GatewayConfig {
    /// Loads the configuration from environment variables, then `gateway.toml`
    pub fn new() -> Result<Self, String> {
        Self::builder()
            .env()
            .file(CONFIG_FILE)
            .load()
            .map_err(|e| e.to_string())
    }

    /// The redirect URI the frontend registers its OAuth callback on
    pub fn redirect_uri(&self) -> String {
        format!("{}/callback", self.frontend_url.trim_end_matches('/'))
    }

    #[cfg(test)]
    pub fn for_test_with_mock(idp_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            frontend_url: "http://frontend.test".to_string(),
            oidc: OidcConfig {
                server_url: format!("{}/auth/", idp_mock.uri()),
                realm: "test-realm".to_string(),
                authorization_url: format!(
                    "{}/auth/realms/test-realm/protocol/openid-connect/auth",
                    idp_mock.uri()
                ),
                token_url: format!(
                    "{}/auth/realms/test-realm/protocol/openid-connect/token",
                    idp_mock.uri()
                ),
                client_id: "test-client".to_string(),
                client_secret: "test-client-secret".to_string(),
                issuer: None,
                audience: None,
                verify_tls: true,
                request_timeout: 1,
                connect_timeout: 1,
                jwks_cache_ttl: 300,
            },
        }
    }
}

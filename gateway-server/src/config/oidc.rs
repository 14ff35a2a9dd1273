//! OpenID Connect identity provider configuration

use confique::Config;
use url::Url;

/// Identity provider (Keycloak realm) configuration
#[derive(Debug, Config, Clone)]
pub struct OidcConfig {
    /// Base URL of the identity provider as reachable from this service
    /// (default: http://keycloak:8080/auth/)
    #[config(env = "GATEWAY_OIDC_SERVER_URL", default = "http://keycloak:8080/auth/")]
    pub server_url: String,

    /// Realm holding the users, roles and clients (default: todoist-realm)
    #[config(env = "GATEWAY_OIDC_REALM", default = "todoist-realm")]
    pub realm: String,

    /// Browser-facing authorization endpoint advertised to the frontend
    #[config(
        env = "GATEWAY_OIDC_AUTHORIZATION_URL",
        default = "http://localhost/auth/realms/todoist-realm/protocol/openid-connect/auth"
    )]
    pub authorization_url: String,

    /// Token endpoint used for code and refresh exchanges
    #[config(
        env = "GATEWAY_OIDC_TOKEN_URL",
        default = "http://keycloak:8080/auth/realms/todoist-realm/protocol/openid-connect/token"
    )]
    pub token_url: String,

    /// OAuth client identifier (default: todoist-app)
    #[config(env = "GATEWAY_OIDC_CLIENT_ID", default = "todoist-app")]
    pub client_id: String,

    /// OAuth client secret. Required, there is no default.
    #[config(env = "GATEWAY_OIDC_CLIENT_SECRET")]
    pub client_secret: String,

    /// Expected `iss` claim. Defaults to `{server_url}realms/{realm}`; set it
    /// when browsers reach the provider under a different host.
    #[config(env = "GATEWAY_OIDC_ISSUER")]
    pub issuer: Option<String>,

    /// Expected `aud` claim. Audience is not checked when unset.
    #[config(env = "GATEWAY_OIDC_AUDIENCE")]
    pub audience: Option<String>,

    /// Verify the provider's TLS certificate (default: true)
    #[config(env = "GATEWAY_OIDC_VERIFY_TLS", default = true)]
    pub verify_tls: bool,

    /// Timeout for each request to the provider in seconds (default: 5)
    #[config(env = "GATEWAY_OIDC_REQUEST_TIMEOUT", default = 5)]
    pub request_timeout: u64,

    /// Timeout for establishing a connection to the provider in seconds (default: 2)
    #[config(env = "GATEWAY_OIDC_CONNECT_TIMEOUT", default = 2)]
    pub connect_timeout: u64,

    /// How long the realm's signing keys are reused before refetching, in seconds (default: 300)
    #[config(env = "GATEWAY_OIDC_JWKS_CACHE_TTL", default = 300)]
    pub jwks_cache_ttl: u64,
}

impl OidcConfig {
    /// Realm base URL as a string, always without a trailing slash
    fn realm_base(&self) -> String {
        format!(
            "{}/realms/{}",
            self.server_url.trim_end_matches('/'),
            self.realm
        )
    }

    /// The issuer tokens must carry
    pub fn issuer_url(&self) -> String {
        self.issuer.clone().unwrap_or_else(|| self.realm_base())
    }

    /// Returns the URL of a realm-scoped OpenID Connect endpoint
    fn endpoint(&self, name: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/protocol/openid-connect/{}",
            self.realm_base(),
            name
        ))
    }

    /// The realm's published signing keys (JWKS)
    pub fn certs_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint("certs")
    }

    /// The realm's userinfo endpoint
    pub fn userinfo_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint("userinfo")
    }

    pub fn token_endpoint(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.token_url)
    }
}

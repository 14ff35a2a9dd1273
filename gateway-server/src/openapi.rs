use crate::api::{analytics, auth_config, token, user};
use crate::models::{
    AuthConfig, Identity, RefreshTokenRequest, Score, TokenExchangeResult, TokenRequest,
};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

pub(crate) const AUTH_TAG: &str = "Authentication API";
pub(crate) const USER_TAG: &str = "User API";
pub(crate) const ANALYTICS_TAG: &str = "Analytics API";

/// Name of the bearer security scheme referenced by protected paths
pub(crate) const BEARER_SCHEME: &str = "bearer";

#[derive(OpenApi)]
#[openapi(
    paths(
        user::get_user,
        analytics::read_score,
        analytics::increment_score,
        auth_config::get_auth_config,
        token::exchange_token,
        token::refresh_token,
    ),
    components(schemas(
        Identity,
        Score,
        AuthConfig,
        TokenRequest,
        RefreshTokenRequest,
        TokenExchangeResult,
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = AUTH_TAG, description = "Login configuration and token exchange endpoints"),
        (name = USER_TAG, description = "Authenticated user endpoints"),
        (name = ANALYTICS_TAG, description = "Permission protected analytics endpoints"),
    ),
    info(
        title = "Auth Gateway API",
        description = "OpenID Connect authentication and authorization gateway",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Handler for the OpenAPI JSON specification endpoint
async fn openapi_json_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates a router for OpenAPI documentation routes
pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/openapi.json", get(openapi_json_handler))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}

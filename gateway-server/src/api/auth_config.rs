use crate::headers::presets;
use crate::models::AuthConfig;
use crate::openapi::AUTH_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// How long browsers and proxies may cache the login configuration
const AUTH_CONFIG_MAX_AGE: u32 = 300;

/// Public configuration the frontend needs to start the login redirect
#[utoipa::path(
    get,
    path = "/config/auth",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Login configuration", body = AuthConfig),
    )
)]
pub(crate) async fn get_auth_config(State(state): State<AppState>) -> Response {
    let config = AuthConfig {
        authorization_url: state.config.oidc.authorization_url.clone(),
        client_id: state.config.oidc.client_id.clone(),
        redirect_uri: state.config.redirect_uri(),
    };

    let mut response = Json(config).into_response();
    presets::public_cache(AUTH_CONFIG_MAX_AGE).apply(&mut response);
    response
}

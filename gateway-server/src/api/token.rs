use crate::errors::ApiError;
use crate::headers::presets;
use crate::models::{RefreshTokenRequest, TokenExchangeResult, TokenRequest};
use crate::openapi::AUTH_TAG;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use log::warn;

/// Renders issued tokens, forbidding any cache from storing them
fn token_response(tokens: TokenExchangeResult) -> Response {
    let mut response = Json(tokens).into_response();
    presets::token_response().apply(&mut response);
    response
}

/// Exchanges an authorization code for tokens
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = AUTH_TAG,
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Tokens issued", body = TokenExchangeResult),
        (status = 400, description = "Missing authorization code or malformed body"),
        (status = 401, description = "Authorization code rejected by the identity provider"),
        (status = 503, description = "Identity provider unavailable"),
    )
)]
pub(crate) async fn exchange_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    if request.code.trim().is_empty() {
        warn!("Rejecting token request without an authorization code");
        return Err(ApiError::bad_request("Authorization code is required"));
    }

    let tokens = state
        .exchange
        .exchange_authorization_code(&request.code, &request.redirect_uri)
        .await?;
    Ok(token_response(tokens))
}

/// Exchanges a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokenExchangeResult),
        (status = 400, description = "Missing refresh token or malformed body"),
        (status = 401, description = "Refresh token rejected by the identity provider"),
        (status = 503, description = "Identity provider unavailable"),
    )
)]
pub(crate) async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    if request.refresh_token.trim().is_empty() {
        warn!("Rejecting refresh request without a refresh token");
        return Err(ApiError::bad_request("Refresh token is required"));
    }

    let tokens = state
        .exchange
        .refresh_access_token(&request.refresh_token)
        .await?;
    Ok(token_response(tokens))
}

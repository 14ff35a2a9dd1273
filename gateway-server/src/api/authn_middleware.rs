use crate::auth::gate::PermissionGate;
use crate::auth::AuthError;
use crate::models::Identity;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::header::AUTHORIZATION;
use http::HeaderMap;
use log::{error, warn};

/// Extracts the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let Some(auth_header) = headers.get(AUTHORIZATION) else {
        warn!("Missing Authorization header");
        return Err(AuthError::Authentication);
    };

    let header_str = auth_header.to_str().map_err(|e| {
        warn!("Failed to parse Authorization header to string: {}", e);
        AuthError::Authentication
    })?;

    match header_str.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => {
            warn!("Invalid Authorization header format, expected a bearer token");
            Err(AuthError::Authentication)
        }
    }
}

/// Verifies the bearer token and stores the caller's [`Identity`] in the
/// request extensions for the permission gates and handlers.
pub(super) async fn authentication_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(request.headers())?.to_owned();
    let identity = state.verifier.verify(&token).await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Admits the request only if the authenticated identity satisfies the gate
pub(super) async fn enforce_permissions(
    State(gate): State<PermissionGate>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(identity) = request.extensions().get::<Identity>().cloned() else {
        error!("Permission gate reached without an authenticated identity");
        return Err(AuthError::Authentication);
    };

    gate.check(identity)?;
    Ok(next.run(request).await)
}

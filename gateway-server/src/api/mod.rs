pub(crate) mod analytics;
pub(crate) mod auth_config;
mod authn_middleware;
pub(crate) mod token;
pub(crate) mod user;

use crate::api::analytics::{ANALYTICS_READ, ANALYTICS_WRITE};
use crate::api::authn_middleware::{authentication_middleware, enforce_permissions};
use crate::auth::gate::PermissionGate;
use crate::state::AppState;
use axum::routing::{get, post, put, MethodRouter};
use axum::{middleware, Router};

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// Routes reachable without a bearer token
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/config/auth", get(auth_config::get_auth_config))
        .route("/auth/token", post(token::exchange_token))
        .route("/auth/refresh", post(token::refresh_token))
}

/// Wraps a method router in a gate checking the caller's permissions
fn gated(route: MethodRouter<AppState>, gate: PermissionGate) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(gate, enforce_permissions))
}

/// Creates a router for routes that require a verified bearer token
fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/user",
            gated(get(user::get_user), PermissionGate::authenticated()),
        )
        // Registering the same path again merges the method routers, keeping
        // one gate per method
        .route(
            "/analytics",
            gated(
                get(analytics::read_score),
                PermissionGate::new([ANALYTICS_READ]),
            ),
        )
        .route(
            "/analytics",
            gated(
                put(analytics::increment_score),
                PermissionGate::new([ANALYTICS_WRITE]),
            ),
        )
        // route_layer keeps unmatched paths at 404 instead of 401
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ))
}

//! Bearer token verification, role-to-permission mapping, permission gates and
//! server-side OAuth 2.0 token exchanges against the identity provider.
//!
//! ## Request pipeline
//! - [`verifier::TokenVerifier`] checks the token signature against the realm's
//!   published keys and validates expiry, issuer and (optionally) audience
//! - [`claims::map_claims`] turns verified claims into an [`Identity`]
//! - [`gate::PermissionGate`] rejects identities missing required permissions
//!
//! ## Token exchange
//! - [`exchange::TokenExchangeClient`] performs the authorization code and
//!   refresh token grants, attaching the client secret server-side only
//!
//! [`Identity`]: crate::models::Identity

pub mod claims;
pub mod exchange;
pub mod gate;
pub mod verifier;

use thiserror::Error;

/// Failures of the authentication pipeline and the token exchanges.
///
/// Display strings are client-facing. Diagnostic detail is logged where the
/// error is raised and never carried in the variant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("Invalid or expired token")]
    Authentication,
    #[error("Missing permissions: {}", .missing.join(", "))]
    Authorization { missing: Vec<String> },
    #[error("Authentication service unavailable")]
    UpstreamUnavailable,
    #[error("{0}")]
    ExchangeRejected(&'static str),
}

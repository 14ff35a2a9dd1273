use crate::models::Identity;
use crate::openapi::USER_TAG;
use axum::{Extension, Json};

/// Returns the identity of the authenticated caller
#[utoipa::path(
    get,
    path = "/user",
    tag = USER_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = Identity),
        (status = 401, description = "Missing, invalid or expired bearer token"),
    )
)]
pub(crate) async fn get_user(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}

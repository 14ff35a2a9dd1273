use crate::models::{Identity, Score};
use crate::openapi::ANALYTICS_TAG;
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use log::info;

/// Permission required to read analytics
pub(crate) const ANALYTICS_READ: &str = "analytics:read";
/// Permission required to update analytics
pub(crate) const ANALYTICS_WRITE: &str = "analytics:write";

#[utoipa::path(
    get,
    path = "/analytics",
    tag = ANALYTICS_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current score of the caller", body = Score),
        (status = 401, description = "Missing, invalid or expired bearer token"),
        (status = 403, description = "Caller lacks analytics:read"),
    )
)]
pub(crate) async fn read_score(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<Score> {
    Json(Score {
        score: state.scores.get(&identity.subject).await,
    })
}

#[utoipa::path(
    put,
    path = "/analytics",
    tag = ANALYTICS_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Incremented score of the caller", body = Score),
        (status = 401, description = "Missing, invalid or expired bearer token"),
        (status = 403, description = "Caller lacks analytics:write"),
    )
)]
pub(crate) async fn increment_score(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Json<Score> {
    let score = state.scores.increment(&identity.subject).await;
    info!("Score of '{}' incremented to {}", identity.subject, score);
    Json(Score { score })
}

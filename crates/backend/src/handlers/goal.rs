use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::goal::{service, GoalError};
use crate::shared::data::db::AppState;
use contracts::domain::goal::aggregate::{Goal, GoalDraft};
use contracts::domain::goal::stats::GoalStats;

/// Service errors mapped onto HTTP statuses. The body shape is always
/// `{"error": message}` for compatibility with existing clients; only the
/// status codes are upgraded from the original blanket 500.
pub struct ApiError(GoalError);

impl From<GoalError> for ApiError {
    fn from(err: GoalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            GoalError::Validation(_) => StatusCode::BAD_REQUEST,
            GoalError::DuplicateName(_) => StatusCode::CONFLICT,
            GoalError::NotFound => StatusCode::NOT_FOUND,
            GoalError::Storage(e) => {
                tracing::error!("Storage error: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

fn parse_goal_id(raw: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| ApiError(GoalError::Validation(format!("Invalid goal id: {raw}"))))
}

/// GET /api/
///
/// Expired goals are reconciled before the listing so that a freshly loaded
/// list never shows an expired goal as still active.
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Goal>>, ApiError> {
    service::reconcile_expired(&state.db).await?;
    Ok(Json(service::list_all(&state.db).await?))
}

/// GET /api/goal/details/:goal_id
pub async fn get_details(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<Goal>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    Ok(Json(service::get_by_id(&state.db, id).await?))
}

/// POST /create_goal
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<GoalDraft>,
) -> Result<Json<Goal>, ApiError> {
    Ok(Json(service::create(&state.db, draft).await?))
}

/// PATCH /finish_goal/:goal_id
pub async fn finish(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    service::finish(&state.db, id).await?;
    Ok(Json(json!({ "message": "Goal marked as finished" })))
}

/// PATCH /discard_goal/:goal_id
pub async fn discard(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    service::discard(&state.db, id).await?;
    Ok(Json(json!({ "message": "Goal marked as discarded" })))
}

/// DELETE /delete_goal/:goal_id
pub async fn delete(
    State(state): State<AppState>,
    Path(goal_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_goal_id(&goal_id)?;
    service::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Goal deleted" })))
}

/// GET /api/goal/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<GoalStats>, ApiError> {
    Ok(Json(service::stats(&state.db).await?))
}

use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::handlers;
use crate::shared::data::db::AppState;

/// The complete REST surface. Kept separate from `main` so integration tests
/// can drive the same router against an in-memory store.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/", get(handlers::goal::list_all))
        .route("/api/goal/details/:goal_id", get(handlers::goal::get_details))
        .route("/api/goal/stats", get(handlers::goal::get_stats))
        .route("/create_goal", post(handlers::goal::create))
        .route("/finish_goal/:goal_id", patch(handlers::goal::finish))
        .route("/discard_goal/:goal_id", patch(handlers::goal::discard))
        .route("/delete_goal/:goal_id", delete(handlers::goal::delete))
        .with_state(state)
}

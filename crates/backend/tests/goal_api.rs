use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use tower::util::ServiceExt;

use backend::domain::goal::{service, GoalError};
use backend::routes::app_router;
use backend::shared::data::db::{self, AppState};
use contracts::domain::goal::aggregate::{Goal, GoalDraft, GoalStatus};
use contracts::domain::goal::stats::GoalStats;

async fn memory_state() -> AppState {
    let conn = db::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    AppState::new(conn)
}

fn draft(name: &str, hours_from_now: i64) -> GoalDraft {
    GoalDraft {
        goal_name: name.into(),
        goal_description: "d".into(),
        goal_end_date: Some(Utc::now() + Duration::hours(hours_from_now)),
        resources_link: None,
    }
}

// ============================================================================
// Service-level properties
// ============================================================================

#[tokio::test]
async fn create_returns_stored_goal() {
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("Learn X", 48)).await.unwrap();

    assert_eq!(goal.goal_name, "Learn X");
    assert_eq!(goal.status, GoalStatus::Active);
    assert!(goal.metadata.updated_at >= goal.metadata.created_at);

    let detail = service::get_by_id(&state.db, goal.id.value()).await.unwrap();
    assert_eq!(detail.goal_name, "Learn X");
}

#[tokio::test]
async fn create_accepts_past_deadline() {
    // No date-ordering validation: a deadline in the past is stored as-is
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("Too late", -48)).await.unwrap();
    assert_eq!(goal.status, GoalStatus::Active);
}

#[tokio::test]
async fn duplicate_name_rejected_without_mutation() {
    let state = memory_state().await;
    service::create(&state.db, draft("Learn X", 48)).await.unwrap();

    let mut second = draft("Learn X", 72);
    second.goal_description = "something else".into();
    let err = service::create(&state.db, second).await.unwrap_err();
    assert!(matches!(err, GoalError::DuplicateName(_)));

    // Store unchanged: still one goal, still the first description
    let goals = service::list_all(&state.db).await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].goal_description, "d");
}

#[tokio::test]
async fn concurrent_same_name_creates_yield_conflict_not_storage() {
    // The duplicate pre-check can race; the UNIQUE constraint backstop must
    // still surface as DuplicateName, never as a storage error
    let state = memory_state().await;
    let (a, b) = tokio::join!(
        service::create(&state.db, draft("Same", 48)),
        service::create(&state.db, draft("Same", 48)),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let err = results.into_iter().find_map(Result::err).unwrap();
    assert!(matches!(err, GoalError::DuplicateName(_)));
}

#[tokio::test]
async fn corrupt_status_row_is_a_storage_error() {
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let state = memory_state().await;
    let goal = service::create(&state.db, draft("A", 48)).await.unwrap();

    // Damage the row behind the repository's back
    state
        .db
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE goal SET status = 'done' WHERE id = ?",
            [goal.to_string_id().into()],
        ))
        .await
        .unwrap();

    let err = service::get_by_id(&state.db, goal.id.value()).await.unwrap_err();
    assert!(matches!(err, GoalError::Storage(_)));
    let err = service::list_all(&state.db).await.unwrap_err();
    assert!(matches!(err, GoalError::Storage(_)));
}

#[tokio::test]
async fn missing_fields_fail_validation() {
    let state = memory_state().await;

    let mut no_name = draft("", 48);
    no_name.goal_name = "   ".into();
    assert!(matches!(
        service::create(&state.db, no_name).await.unwrap_err(),
        GoalError::Validation(_)
    ));

    let mut no_description = draft("Run", 48);
    no_description.goal_description = String::new();
    assert!(matches!(
        service::create(&state.db, no_description).await.unwrap_err(),
        GoalError::Validation(_)
    ));

    let mut no_date = draft("Run", 48);
    no_date.goal_end_date = None;
    assert!(matches!(
        service::create(&state.db, no_date).await.unwrap_err(),
        GoalError::Validation(_)
    ));

    assert!(service::list_all(&state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn list_reflects_last_written_state() {
    let state = memory_state().await;
    let a = service::create(&state.db, draft("A", 48)).await.unwrap();
    let b = service::create(&state.db, draft("B", 72)).await.unwrap();
    service::finish(&state.db, a.id.value()).await.unwrap();

    let goals = service::list_all(&state.db).await.unwrap();
    assert_eq!(goals.len(), 2);
    let find = |name: &str| goals.iter().find(|g| g.goal_name == name).unwrap();
    assert_eq!(find("A").status, GoalStatus::Finished);
    assert_eq!(find("B").status, GoalStatus::Active);
    assert_eq!(find("B").id, b.id);
}

#[tokio::test]
async fn finish_touches_updated_at_only() {
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("A", 48)).await.unwrap();

    service::finish(&state.db, goal.id.value()).await.unwrap();
    let detail = service::get_by_id(&state.db, goal.id.value()).await.unwrap();
    assert!(detail.is_finished());
    assert!(!detail.is_discarded());
    assert_eq!(detail.metadata.created_at, goal.metadata.created_at);
    assert!(detail.metadata.updated_at >= goal.metadata.updated_at);
}

#[tokio::test]
async fn discard_is_idempotent() {
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("A", 48)).await.unwrap();

    service::discard(&state.db, goal.id.value()).await.unwrap();
    let once = service::get_by_id(&state.db, goal.id.value()).await.unwrap();
    service::discard(&state.db, goal.id.value()).await.unwrap();
    let twice = service::get_by_id(&state.db, goal.id.value()).await.unwrap();

    assert_eq!(once.status, GoalStatus::Discarded);
    assert_eq!(twice.status, GoalStatus::Discarded);
    assert_eq!(twice.goal_name, once.goal_name);
}

#[tokio::test]
async fn finish_then_discard_ends_discarded() {
    // Under the status enumeration the "both flags true" state cannot exist;
    // the later transition wins.
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("A", 48)).await.unwrap();

    service::finish(&state.db, goal.id.value()).await.unwrap();
    service::discard(&state.db, goal.id.value()).await.unwrap();

    let detail = service::get_by_id(&state.db, goal.id.value()).await.unwrap();
    assert_eq!(detail.status, GoalStatus::Discarded);
    assert!(!detail.is_finished());
}

#[tokio::test]
async fn delete_then_detail_is_not_found() {
    let state = memory_state().await;
    let goal = service::create(&state.db, draft("A", 48)).await.unwrap();

    service::delete(&state.db, goal.id.value()).await.unwrap();
    assert!(matches!(
        service::get_by_id(&state.db, goal.id.value()).await.unwrap_err(),
        GoalError::NotFound
    ));
    assert!(matches!(
        service::delete(&state.db, goal.id.value()).await.unwrap_err(),
        GoalError::NotFound
    ));
}

#[tokio::test]
async fn mutations_on_unknown_id_are_not_found() {
    let state = memory_state().await;
    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        service::finish(&state.db, missing).await.unwrap_err(),
        GoalError::NotFound
    ));
    assert!(matches!(
        service::discard(&state.db, missing).await.unwrap_err(),
        GoalError::NotFound
    ));
}

#[tokio::test]
async fn reconcile_discards_only_expired_active_goals() {
    let state = memory_state().await;
    let short = service::create(&state.db, draft("Short", 1)).await.unwrap();
    let long = service::create(&state.db, draft("Long", 48)).await.unwrap();
    // An expired goal the user already finished must stay finished
    let done = service::create(&state.db, draft("Done", 2)).await.unwrap();
    service::finish(&state.db, done.id.value()).await.unwrap();

    let discarded = service::reconcile_expired(&state.db).await.unwrap();
    assert_eq!(discarded, 1);

    let status_of = |id: uuid::Uuid| {
        let db = state.db.clone();
        async move { service::get_by_id(&db, id).await.unwrap().status }
    };
    assert_eq!(status_of(short.id.value()).await, GoalStatus::Discarded);
    assert_eq!(status_of(long.id.value()).await, GoalStatus::Active);
    assert_eq!(status_of(done.id.value()).await, GoalStatus::Finished);

    // Second pass finds nothing left to discard
    assert_eq!(service::reconcile_expired(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn stats_counts_per_status() {
    let state = memory_state().await;
    let a = service::create(&state.db, draft("A", 48)).await.unwrap();
    let b = service::create(&state.db, draft("B", 48)).await.unwrap();
    service::create(&state.db, draft("C", 48)).await.unwrap();
    service::finish(&state.db, a.id.value()).await.unwrap();
    service::discard(&state.db, b.id.value()).await.unwrap();

    let stats = service::stats(&state.db).await.unwrap();
    assert_eq!(
        stats,
        GoalStats {
            total: 3,
            active: 1,
            finished: 1,
            discarded: 1,
        }
    );
}

// ============================================================================
// Router-level behavior
// ============================================================================

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn create_and_list_over_http() {
    let app = app_router(memory_state().await);

    let end_date = (Utc::now() + Duration::hours(48)).to_rfc3339();
    let response = app
        .clone()
        .oneshot(post_json(
            "/create_goal",
            serde_json::json!({
                "goal_name": "Learn X",
                "goal_description": "d",
                "goal_end_date": end_date,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["status"], "active");
    assert!(created["id"].is_string());

    let response = app.clone().oneshot(request("GET", "/api/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let goals: Vec<Goal> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].goal_name, "Learn X");
}

#[tokio::test]
async fn duplicate_create_is_conflict_with_error_body() {
    let app = app_router(memory_state().await);
    let end_date = (Utc::now() + Duration::hours(48)).to_rfc3339();
    let payload = serde_json::json!({
        "goal_name": "Learn X",
        "goal_description": "d",
        "goal_end_date": end_date,
    });

    let first = app
        .clone()
        .oneshot(post_json("/create_goal", payload.clone()))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .clone()
        .oneshot(post_json("/create_goal", payload))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert!(body["error"].as_str().unwrap().contains("Learn X"));
}

#[tokio::test]
async fn missing_field_create_is_bad_request() {
    let app = app_router(memory_state().await);
    let response = app
        .oneshot(post_json(
            "/create_goal",
            serde_json::json!({ "goal_name": "Learn X" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn lifecycle_over_http() {
    let app = app_router(memory_state().await);
    let end_date = (Utc::now() + Duration::hours(48)).to_rfc3339();
    let response = app
        .clone()
        .oneshot(post_json(
            "/create_goal",
            serde_json::json!({
                "goal_name": "Learn X",
                "goal_description": "d",
                "goal_end_date": end_date,
            }),
        ))
        .await
        .unwrap();
    let created: Goal = serde_json::from_value(body_json(response).await).unwrap();
    let id = created.to_string_id();

    let response = app
        .clone()
        .oneshot(request("PATCH", &format!("/finish_goal/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["message"].is_string());

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/goal/details/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detail: Goal = serde_json::from_value(body_json(response).await).unwrap();
    assert!(detail.is_finished());

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/delete_goal/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request("GET", &format!("/api/goal/details/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = app_router(memory_state().await);
    let response = app
        .clone()
        .oneshot(request("PATCH", "/finish_goal/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn list_load_reconciles_expired_goals() {
    let state = memory_state().await;
    let app = app_router(state.clone());
    // One-hour lifetime span: expired from the moment it exists
    let expired = service::create(&state.db, draft("Expired", 1)).await.unwrap();

    let response = app.clone().oneshot(request("GET", "/api/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let goals: Vec<Goal> = serde_json::from_value(body_json(response).await).unwrap();
    let listed = goals.iter().find(|g| g.id == expired.id).unwrap();
    assert_eq!(listed.status, GoalStatus::Discarded);
}

#[tokio::test]
async fn stats_endpoint_reports_counts() {
    let state = memory_state().await;
    let app = app_router(state.clone());
    let a = service::create(&state.db, draft("A", 48)).await.unwrap();
    service::create(&state.db, draft("B", 48)).await.unwrap();
    service::finish(&state.db, a.id.value()).await.unwrap();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/goal/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: GoalStats = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.finished, 1);
    assert_eq!(stats.active, 1);
}

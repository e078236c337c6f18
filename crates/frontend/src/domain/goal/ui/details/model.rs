//! API calls for the goal details view

use crate::shared::api_utils::send_request;
use contracts::domain::goal::aggregate::{Goal, GoalDraft};

pub async fn fetch_by_id(id: &str) -> Result<Goal, String> {
    let text = send_request("GET", &format!("/api/goal/details/{}", id), None).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn create_goal(draft: &GoalDraft) -> Result<Goal, String> {
    let body = serde_json::to_string(draft).map_err(|e| format!("{e}"))?;
    let text = send_request("POST", "/create_goal", Some(&body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

pub async fn finish_goal(id: &str) -> Result<(), String> {
    send_request("PATCH", &format!("/finish_goal/{}", id), None).await?;
    Ok(())
}

pub async fn discard_goal(id: &str) -> Result<(), String> {
    send_request("PATCH", &format!("/discard_goal/{}", id), None).await?;
    Ok(())
}

pub async fn delete_goal(id: &str) -> Result<(), String> {
    send_request("DELETE", &format!("/delete_goal/{}", id), None).await?;
    Ok(())
}

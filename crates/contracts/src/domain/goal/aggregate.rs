use crate::domain::common::{AggregateId, EntityMetadata};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique goal identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub Uuid);

impl GoalId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for GoalId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(GoalId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================

/// Closed lifecycle state of a goal.
///
/// Replaces the independent `is_finished`/`is_discarded` boolean pair: a goal
/// is in exactly one state, and finish/discard transitions overwrite each
/// other (last write wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Finished,
    Discarded,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Finished => "finished",
            GoalStatus::Discarded => "discarded",
        }
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "finished" => Ok(GoalStatus::Finished),
            "discarded" => Ok(GoalStatus::Discarded),
            other => Err(format!("Unknown goal status: {}", other)),
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A personal goal: a named, described task with a deadline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    pub goal_name: String,
    pub goal_description: String,
    pub goal_end_date: chrono::DateTime<chrono::Utc>,

    pub status: GoalStatus,

    #[serde(rename = "resourcesLink", skip_serializing_if = "Option::is_none")]
    pub resources_link: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Goal {
    /// Build a new goal ready for insertion
    pub fn new_for_insert(
        goal_name: String,
        goal_description: String,
        goal_end_date: chrono::DateTime<chrono::Utc>,
        resources_link: Option<String>,
    ) -> Self {
        Self {
            id: GoalId::new_v4(),
            goal_name,
            goal_description,
            goal_end_date,
            status: GoalStatus::Active,
            resources_link,
            metadata: EntityMetadata::new(),
        }
    }

    /// ID rendered as a string
    pub fn to_string_id(&self) -> String {
        self.id.as_string()
    }

    pub fn is_finished(&self) -> bool {
        self.status == GoalStatus::Finished
    }

    pub fn is_discarded(&self) -> bool {
        self.status == GoalStatus::Discarded
    }

    /// Finished or discarded goals are never touched by reconciliation
    pub fn is_terminal(&self) -> bool {
        self.status != GoalStatus::Active
    }

    pub fn finish(&mut self) {
        self.status = GoalStatus::Finished;
        self.metadata.touch();
    }

    pub fn discard(&mut self) {
        self.status = GoalStatus::Discarded;
        self.metadata.touch();
    }

    /// Field validation. The deadline is deliberately not checked against the
    /// creation time: a goal may be created already past its end date.
    pub fn validate(&self) -> Result<(), String> {
        if self.goal_name.trim().is_empty() {
            return Err("Goal name is required".into());
        }
        if self.goal_description.trim().is_empty() {
            return Err("Goal description is required".into());
        }
        Ok(())
    }

    /// Hook before persisting
    pub fn before_write(&mut self) {
        self.metadata.touch();
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Creation payload. All fields optional at the serde level so that a missing
/// field surfaces as a validation error, not a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GoalDraft {
    #[serde(default)]
    pub goal_name: String,

    #[serde(default)]
    pub goal_description: String,

    #[serde(default)]
    pub goal_end_date: Option<chrono::DateTime<chrono::Utc>>,

    #[serde(rename = "resourcesLink", default)]
    pub resources_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let s = serde_json::to_string(&GoalStatus::Discarded).unwrap();
        assert_eq!(s, "\"discarded\"");
        let back: GoalStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(back, GoalStatus::Active);
    }

    #[test]
    fn status_round_trips_as_str() {
        for status in [
            GoalStatus::Active,
            GoalStatus::Finished,
            GoalStatus::Discarded,
        ] {
            assert_eq!(status.as_str().parse::<GoalStatus>().unwrap(), status);
        }
        assert!("done".parse::<GoalStatus>().is_err());
    }

    #[test]
    fn id_round_trips_through_string() {
        let id = GoalId::new_v4();
        let parsed = GoalId::from_string(&id.as_string()).unwrap();
        assert_eq!(parsed, id);
        assert!(GoalId::from_string("not-a-uuid").is_err());
    }

    #[test]
    fn finish_then_discard_ends_discarded() {
        let mut goal = Goal::new_for_insert(
            "Learn X".into(),
            "d".into(),
            chrono::Utc::now() + chrono::Duration::hours(48),
            None,
        );
        goal.finish();
        assert!(goal.is_finished());
        goal.discard();
        assert!(goal.is_discarded());
        assert!(!goal.is_finished());
    }

    #[test]
    fn draft_tolerates_missing_fields() {
        let draft: GoalDraft = serde_json::from_str(r#"{"goal_name":"Run"}"#).unwrap();
        assert_eq!(draft.goal_name, "Run");
        assert!(draft.goal_description.is_empty());
        assert!(draft.goal_end_date.is_none());
    }

    #[test]
    fn goal_json_flattens_metadata() {
        let goal = Goal::new_for_insert(
            "Learn X".into(),
            "d".into(),
            chrono::Utc::now() + chrono::Duration::hours(48),
            None,
        );
        let value = serde_json::to_value(&goal).unwrap();
        assert!(value.get("created_at").is_some());
        assert!(value.get("updated_at").is_some());
        assert_eq!(value["status"], "active");
        // unused optional link is omitted entirely
        assert!(value.get("resourcesLink").is_none());
    }
}

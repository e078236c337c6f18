//! Date/time formatting helpers for the UI

use contracts::domain::goal::aggregate::{Goal, GoalStatus};
use contracts::domain::goal::deadline;

/// Format a UTC timestamp for table cells
pub fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Human label for a goal's deadline column.
///
/// Active goals show the remaining span in whole days; goals whose span is
/// within the auto-discard threshold read "expired". Terminal goals show
/// their end date instead, the countdown is no longer meaningful.
pub fn deadline_label(goal: &Goal) -> String {
    if goal.status != GoalStatus::Active {
        return goal.goal_end_date.format("%Y-%m-%d").to_string();
    }
    match deadline::display_days(goal) {
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{} days", days),
        None => "expired".to_string(),
    }
}

/// Parse the value of an `<input type="datetime-local">` into a UTC timestamp.
/// Browsers emit "YYYY-MM-DDTHH:MM", some include seconds.
pub fn parse_datetime_local(value: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let naive = chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    Some(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn goal_with_span(hours: i64) -> Goal {
        let mut goal = Goal::new_for_insert("Learn X".into(), "d".into(), chrono::Utc::now(), None);
        goal.goal_end_date = goal.metadata.created_at + Duration::hours(hours);
        goal
    }

    #[test]
    fn test_deadline_label_days() {
        assert_eq!(deadline_label(&goal_with_span(48)), "3 days");
        assert_eq!(deadline_label(&goal_with_span(1)), "expired");
    }

    #[test]
    fn test_deadline_label_terminal_shows_date() {
        let mut goal = goal_with_span(48);
        goal.finish();
        let expected = goal.goal_end_date.format("%Y-%m-%d").to_string();
        assert_eq!(deadline_label(&goal), expected);
    }

    #[test]
    fn test_parse_datetime_local() {
        let parsed = parse_datetime_local("2026-08-24T18:30").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-08-24T18:30:00+00:00");
        assert!(parse_datetime_local("2026-08-24T18:30:15").is_some());
        assert!(parse_datetime_local("invalid").is_none());
    }
}

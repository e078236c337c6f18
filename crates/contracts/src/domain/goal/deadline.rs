//! Pure deadline arithmetic shared by backend reconciliation and frontend
//! rendering.
//!
//! Expiry is defined over the span between a goal's creation time and its
//! declared end date, never against the current wall clock: a goal whose
//! whole lifetime is 24 hours or less is considered expired from the moment
//! it exists. Display and mutation are decoupled — these functions only
//! compute; discarding expired goals is an explicit reconciliation step in
//! the backend service.

use super::aggregate::Goal;

/// Goals whose creation-to-deadline span is at most this many hours are
/// expired and eligible for auto-discard.
pub const AUTO_DISCARD_THRESHOLD_HOURS: i64 = 24;

/// Whole hours between creation and the declared end date
pub fn span_hours(goal: &Goal) -> i64 {
    (goal.goal_end_date - goal.metadata.created_at).num_hours()
}

/// True when the goal's lifetime span is within the auto-discard threshold.
///
/// Compared on minutes: `num_hours()` truncates toward zero, which would
/// lump a 24h30m span in with exactly-24h spans and get it discarded.
pub fn is_expired(goal: &Goal) -> bool {
    let minutes = (goal.goal_end_date - goal.metadata.created_at).num_minutes();
    minutes <= AUTO_DISCARD_THRESHOLD_HOURS * 60
}

/// Deadline rendered in whole days, `None` when the goal is expired.
///
/// A span of 48 hours displays as 3 days (floor(48 / 24) + 1), matching the
/// original presentation.
pub fn display_days(goal: &Goal) -> Option<i64> {
    if is_expired(goal) {
        None
    } else {
        Some(span_hours(goal) / 24 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::goal::aggregate::Goal;
    use chrono::Duration;

    fn goal_with_span(hours: i64) -> Goal {
        let mut goal = Goal::new_for_insert(
            "Learn X".into(),
            "d".into(),
            chrono::Utc::now(),
            None,
        );
        goal.goal_end_date = goal.metadata.created_at + Duration::hours(hours);
        goal
    }

    #[test]
    fn forty_eight_hour_span_displays_three_days() {
        let goal = goal_with_span(48);
        assert_eq!(span_hours(&goal), 48);
        assert!(!is_expired(&goal));
        assert_eq!(display_days(&goal), Some(3));
    }

    #[test]
    fn one_hour_span_is_expired() {
        let goal = goal_with_span(1);
        assert!(is_expired(&goal));
        assert_eq!(display_days(&goal), None);
    }

    #[test]
    fn exactly_twenty_four_hours_is_expired() {
        let goal = goal_with_span(24);
        assert!(is_expired(&goal));
    }

    #[test]
    fn fractional_span_past_threshold_is_not_expired() {
        // 24h30m: strictly more than a day, must survive reconciliation and
        // display as 2 days
        let mut goal = goal_with_span(24);
        goal.goal_end_date = goal.goal_end_date + Duration::minutes(30);
        assert!(!is_expired(&goal));
        assert_eq!(display_days(&goal), Some(2));
    }

    #[test]
    fn twenty_five_hours_displays_two_days() {
        let goal = goal_with_span(25);
        assert!(!is_expired(&goal));
        assert_eq!(display_days(&goal), Some(2));
    }

    #[test]
    fn past_deadline_is_expired() {
        // end date before creation is accepted at create time and simply
        // counts as expired
        let goal = goal_with_span(-5);
        assert!(is_expired(&goal));
        assert_eq!(display_days(&goal), None);
    }
}

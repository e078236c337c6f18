use serde::{Deserialize, Serialize};

/// Aggregate goal counts for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStats {
    pub total: i64,
    pub active: i64,
    pub finished: i64,
    pub discarded: i64,
}

impl GoalStats {
    /// Share of a count relative to the total, as whole percent. Used for the
    /// proportional bars on the dashboard.
    pub fn percent(&self, count: i64) -> i64 {
        if self.total <= 0 {
            0
        } else {
            count * 100 / self.total
        }
    }
}

use sea_orm::DatabaseConnection;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use crate::domain::goal::service;

/// Background worker that discards expired goals on a fixed interval.
///
/// Replaces the original client-side auto-discard: expired goals get
/// discarded even when no browser ever renders them.
pub struct ExpiryWorker {
    db: DatabaseConnection,
    interval_seconds: u64,
}

impl ExpiryWorker {
    pub fn new(db: DatabaseConnection, interval_seconds: u64) -> Self {
        Self {
            db,
            interval_seconds,
        }
    }

    /// Runs forever; spawn onto the runtime.
    pub async fn run_loop(self) {
        info!(
            "Expiry worker started with interval {} seconds",
            self.interval_seconds
        );
        let mut interval = time::interval(time::Duration::from_secs(self.interval_seconds));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            match service::reconcile_expired(&self.db).await {
                Ok(0) => {}
                Ok(n) => info!("Expiry worker discarded {} goal(s)", n),
                Err(e) => error!("Expiry reconciliation failed: {e}"),
            }
        }
    }
}

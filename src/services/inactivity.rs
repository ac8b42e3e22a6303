//! Inactivity scanner
//!
//! Recurring batch job: users with no bet inside the trailing window get a
//! reminder event. The two bulk queries are fatal for a run; everything
//! after that is best-effort per user. The scan keeps no state between
//! runs, so re-running it is always safe.

use chrono::{Duration, Utc};
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{interval, Duration as TokioDuration};
use tracing::{error, info, instrument, warn};

use crate::domain::NotificationEvent;
use crate::error::Result;
use crate::services::traits::{BetActivity, Notifier, UserDirectory};

/// Outcome of one scan run
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Ids of users with no bet inside the window, sorted for stable logs
    pub inactive: Vec<i64>,
    /// Reminders accepted by the dispatch boundary
    pub notified: usize,
    /// Per-user lookups or dispatches that failed (logged, not retried)
    pub failed: usize,
}

/// Periodic reminder job over the bet and user tables
pub struct InactivityScanner {
    activity: Arc<dyn BetActivity>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
    window: Duration,
}

impl InactivityScanner {
    pub fn new(
        activity: Arc<dyn BetActivity>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        window: Duration,
    ) -> Self {
        Self {
            activity,
            users,
            notifier,
            window,
        }
    }

    /// One full scan based purely on current data.
    #[instrument(skip(self))]
    pub async fn run_scan(&self) -> Result<ScanReport> {
        let cutoff = Utc::now() - self.window;

        let active: HashSet<i64> = self.activity.active_user_ids_since(cutoff).await?;
        let all_ids = self.users.all_user_ids().await?;

        let mut inactive: Vec<i64> = all_ids
            .into_iter()
            .filter(|id| !active.contains(id))
            .collect();
        inactive.sort_unstable();

        // Independent per-user fan-out; a failure for one user never
        // aborts the others.
        let results = join_all(inactive.iter().map(|&id| self.remind(id))).await;

        let notified = results.iter().filter(|r| r.is_ok()).count();
        let failed = results.len() - notified;

        info!(
            inactive = inactive.len(),
            notified, failed, "inactivity scan complete"
        );

        Ok(ScanReport {
            inactive,
            notified,
            failed,
        })
    }

    async fn remind(&self, user_id: i64) -> Result<()> {
        let result = async {
            let user = self.users.user_by_id(user_id).await?;
            self.notifier
                .publish(&NotificationEvent::remind_to_bet(user))
                .await
        }
        .await;

        if let Err(ref e) = result {
            warn!(user_id, error = %e, "failed to send inactivity reminder");
        }
        result
    }

    /// Spawn the recurring scan loop. Runs until the task is aborted or
    /// the runtime shuts down.
    pub fn start(self: Arc<Self>, every: TokioDuration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut tick = interval(every);

            loop {
                tick.tick().await;

                if let Err(e) = self.run_scan().await {
                    error!("Inactivity scan failed: {}", e);
                }
            }
        })
    }
}

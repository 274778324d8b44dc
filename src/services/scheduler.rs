use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, Months, TimeZone};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::services::notifier::Notifier;
use crate::services::payment::PaymentService;

const FALLBACK_RETRY: Duration = Duration::from_secs(60 * 60);

/// Monthly reset scheduler.
/// Marks every student unpaid at local midnight on the first of each month.
///
/// Runs independently of report exports; the two resets are not coordinated.
pub struct MonthlyResetScheduler {
    db: SqlitePool,
    notifier: Arc<dyn Notifier>,
}

impl MonthlyResetScheduler {
    pub fn new(db: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Loops forever; abort the task to stop it.
    pub async fn start(self) {
        info!("Starting monthly payment reset scheduler");

        loop {
            let now = Local::now();
            let wait = match next_reset_after(&now) {
                Some(next) => {
                    info!("Next payment reset at {}", next);
                    (next - now).to_std().unwrap_or(Duration::ZERO)
                }
                None => {
                    warn!("Could not compute next reset time, retrying in {:?}", FALLBACK_RETRY);
                    tokio::time::sleep(FALLBACK_RETRY).await;
                    continue;
                }
            };

            tokio::time::sleep(wait).await;

            if let Err(e) = self.run_reset().await {
                // keep the loop alive
                warn!("Failed to reset payments: {:?}", e);
            }
        }
    }

    pub async fn run_reset(&self) -> Result<u64, crate::error::AppError> {
        let service = PaymentService::new(self.db.clone(), self.notifier.clone());
        service.monthly_reset().await
    }
}

/// Midnight on the first day of the month after `now`, in `now`'s time zone.
pub fn next_reset_after<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let first_of_next = now
        .date_naive()
        .with_day(1)?
        .checked_add_months(Months::new(1))?
        .and_hms_opt(0, 0, 0)?;

    now.timezone()
        .from_local_datetime(&first_of_next)
        .earliest()
}

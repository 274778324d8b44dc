use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::{self, repository};
use crate::error::AppError;
use crate::models::{PaymentTransition, Student, current_month_label};
use crate::services::notifier::Notifier;

/// Paid/due month bookkeeping for students.
///
/// None of these operations lock the row. A toggle racing an export or the
/// monthly reset ends with whichever write lands last.
pub struct PaymentService {
    db: SqlitePool,
    notifier: Arc<dyn Notifier>,
}

impl PaymentService {
    pub fn new(db: SqlitePool, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    pub async fn toggle_payment(&self, id: &str) -> Result<Student, AppError> {
        self.toggle_payment_for_month(id, &current_month_label()).await
    }

    pub async fn toggle_payment_for_month(
        &self,
        id: &str,
        label: &str,
    ) -> Result<Student, AppError> {
        let mut student = db::with_timeout(db::SHORT_TIMEOUT, repository::fetch_student(&self.db, id))
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

        let transition = student.toggle_payment(label);
        debug!("student {} toggled: {:?} ({})", student.id, transition, label);

        let saved = db::with_timeout(db::SHORT_TIMEOUT, repository::save_payment(&self.db, &student)).await?;
        if !saved {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        if transition == PaymentTransition::MarkedPaid {
            self.notifier.payment_received(&student).await;
        }

        Ok(student)
    }

    pub async fn reset_due_months(&self, id: &str) -> Result<Student, AppError> {
        let cleared = db::with_timeout(db::SHORT_TIMEOUT, repository::clear_due_months(&self.db, id)).await?;
        if !cleared {
            return Err(AppError::NotFound("Student not found".to_string()));
        }

        db::with_timeout(db::SHORT_TIMEOUT, repository::fetch_student(&self.db, id))
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))
    }

    /// Marks every student unpaid. Due months are left untouched.
    pub async fn monthly_reset(&self) -> Result<u64, AppError> {
        self.monthly_reset_within(db::LIST_TIMEOUT).await
    }

    pub async fn monthly_reset_within(&self, limit: std::time::Duration) -> Result<u64, AppError> {
        let reset = db::with_timeout(limit, repository::reset_all_payment_status(&self.db)).await?;
        info!("Payments reset to false for {} students", reset);
        Ok(reset)
    }
}

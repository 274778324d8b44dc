use async_trait::async_trait;
use tracing::info;

use crate::models::{RankedResult, Student};

/// Outbound messages to students and guardians.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn payment_received(&self, student: &Student);
    async fn result_published(&self, result: &RankedResult);
}

/// Writes notifications to the log instead of delivering them.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn payment_received(&self, student: &Student) {
        info!(
            student = %student.name,
            class = %student.class,
            subject = %student.subject,
            batch = %student.batch_time,
            phone = %student.phone_number,
            "Payment received for student {}",
            student.name
        );
    }

    async fn result_published(&self, result: &RankedResult) {
        info!(
            rank = result.rank,
            student = %result.name,
            phone = %result.phone_number,
            cq = %result.cq,
            mcq = %result.mcq,
            total = result.total,
            "Result published for student {}",
            result.name
        );
    }
}

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::{error, info};

use crate::db::{self, repository};
use crate::error::AppError;
use crate::models::{Student, current_month_label, study_days};
use crate::services::spreadsheet::{self, Cell, ExportedFile, Sheet};

pub const STUDENT_REPORT_HEADERS: [&str; 7] = [
    "Name",
    "Phone Number",
    "Class",
    "Subject",
    "Payment Status",
    "Payment Amount",
    "Study Days",
];

/// Students sharing one batch time, with study days already expanded.
#[derive(Debug, Clone)]
pub struct BatchGroup {
    pub batch_time: String,
    pub students: Vec<Student>,
}

/// Monthly student report. Exporting closes the billing period.
pub struct ReportService {
    db: SqlitePool,
}

impl ReportService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn export(&self) -> Result<ExportedFile, AppError> {
        self.export_for_month(&current_month_label()).await
    }

    pub async fn export_for_month(&self, label: &str) -> Result<ExportedFile, AppError> {
        let students = db::with_timeout(db::EXPORT_TIMEOUT, repository::fetch_students(&self.db)).await?;
        info!("Exporting report for {} students ({})", students.len(), label);

        let groups = group_by_batch_time(students);
        let bytes = spreadsheet::build_workbook(&report_sheets(&groups))?;

        self.close_billing_period(label).await;

        Ok(ExportedFile {
            filename: format!("student_report_of_{}.xlsx", label),
            bytes,
        })
    }

    // Best effort: a failure here is logged and the report is still returned.
    async fn close_billing_period(&self, label: &str) {
        match db::with_timeout(
            db::EXPORT_TIMEOUT,
            repository::append_due_month_for_unpaid(&self.db, label),
        )
        .await
        {
            Ok(n) => info!("Added {} to due months of {} students", label, n),
            Err(e) => error!("Failed to add due months: {}", e),
        }

        match db::with_timeout(db::EXPORT_TIMEOUT, repository::reset_all_payment_status(&self.db)).await {
            Ok(n) => info!("Payments reset to false for {} students", n),
            Err(e) => error!("Failed to reset payments: {}", e),
        }
    }
}

/// Splits students by batch time, groups in order of first appearance.
/// Inside each group codes are expanded and rows ordered by study days.
pub fn group_by_batch_time(students: Vec<Student>) -> Vec<BatchGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<BatchGroup> = Vec::new();

    for mut student in students {
        student.study_days = study_days::expand(&student.study_days).into_owned();
        let slot = *index.entry(student.batch_time.clone()).or_insert_with(|| {
            groups.push(BatchGroup {
                batch_time: student.batch_time.clone(),
                students: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].students.push(student);
    }

    for group in &mut groups {
        group
            .students
            .sort_by_key(|s| study_days::sort_key(&s.study_days));
    }

    groups
}

pub fn report_sheets(groups: &[BatchGroup]) -> Vec<Sheet> {
    if groups.is_empty() {
        return vec![Sheet {
            name: "Students".to_string(),
            headers: STUDENT_REPORT_HEADERS.to_vec(),
            rows: Vec::new(),
        }];
    }

    groups
        .iter()
        .map(|group| Sheet {
            name: group.batch_time.clone(),
            headers: STUDENT_REPORT_HEADERS.to_vec(),
            rows: group
                .students
                .iter()
                .map(|s| {
                    vec![
                        Cell::from(s.name.as_str()),
                        Cell::from(s.phone_number.as_str()),
                        Cell::from(s.class.as_str()),
                        Cell::from(s.subject.as_str()),
                        Cell::Bool(s.payment_status),
                        Cell::Number(s.payment_amount),
                        Cell::from(s.study_days.as_str()),
                    ]
                })
                .collect(),
        })
        .collect()
}

use std::sync::Arc;

use tracing::info;

use crate::error::AppError;
use crate::models::{RankedResult, ResultEntry, current_month_label, study_days};
use crate::services::notifier::Notifier;
use crate::services::spreadsheet::{self, Cell, ExportedFile, Sheet};

pub const RESULT_HEADERS: [&str; 9] = [
    "Rank",
    "Name",
    "Phone Number",
    "Class",
    "Batch",
    "Study Days",
    "CQ",
    "MCQ",
    "Total",
];

/// Parses a raw mark. "Absent" and anything non-numeric count as zero.
pub fn parse_score(raw: &str) -> i64 {
    let raw = raw.trim();
    if raw == "Absent" {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// Totals and ranks entries, highest first. Equal totals keep submission order.
pub fn rank_results(entries: Vec<ResultEntry>) -> Vec<RankedResult> {
    let mut scored: Vec<(i64, ResultEntry)> = entries
        .into_iter()
        .map(|e| (parse_score(&e.cq).saturating_add(parse_score(&e.mcq)), e))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (total, e))| RankedResult {
            rank: i + 1,
            study_days: study_days::expand(&e.study_days).into_owned(),
            name: e.name,
            phone_number: e.phone_number,
            class: e.class,
            batch: e.batch,
            cq: e.cq,
            mcq: e.mcq,
            total,
        })
        .collect()
}

pub fn results_sheet(results: &[RankedResult]) -> Sheet {
    Sheet {
        name: "Results".to_string(),
        headers: RESULT_HEADERS.to_vec(),
        rows: results
            .iter()
            .map(|r| {
                vec![
                    Cell::Number(r.rank as f64),
                    Cell::from(r.name.as_str()),
                    Cell::from(r.phone_number.as_str()),
                    Cell::from(r.class.as_str()),
                    Cell::from(r.batch.as_str()),
                    Cell::from(r.study_days.as_str()),
                    Cell::from(r.cq.as_str()),
                    Cell::from(r.mcq.as_str()),
                    Cell::Number(r.total as f64),
                ]
            })
            .collect(),
    }
}

/// Stateless per call; nothing is persisted.
pub struct ResultsService {
    notifier: Arc<dyn Notifier>,
}

impl ResultsService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub async fn publish(&self, entries: Vec<ResultEntry>) -> Result<ExportedFile, AppError> {
        let ranked = rank_results(entries);
        let bytes = spreadsheet::build_workbook(&[results_sheet(&ranked)])?;

        for result in &ranked {
            self.notifier.result_published(result).await;
        }
        info!("Published results for {} students", ranked.len());

        Ok(ExportedFile {
            filename: format!("results_of_{}.xlsx", current_month_label()),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, cq: &str, mcq: &str) -> ResultEntry {
        ResultEntry {
            name: name.to_string(),
            phone_number: String::new(),
            class: "10".to_string(),
            batch: "6pm".to_string(),
            study_days: "smw".to_string(),
            cq: cq.to_string(),
            mcq: mcq.to_string(),
        }
    }

    #[test]
    fn parses_scores() {
        assert_eq!(parse_score("Absent"), 0);
        assert_eq!(parse_score("7"), 7);
        assert_eq!(parse_score(" 12 "), 12);
        assert_eq!(parse_score("abc"), 0);
        assert_eq!(parse_score(""), 0);
    }

    #[test]
    fn ranks_by_total_descending() {
        let ranked = rank_results(vec![
            entry("A", "10", "5"),
            entry("B", "Absent", "20"),
            entry("C", "30", "Absent"),
        ]);

        let order: Vec<(&str, i64, usize)> = ranked
            .iter()
            .map(|r| (r.name.as_str(), r.total, r.rank))
            .collect();
        assert_eq!(order, vec![("C", 30, 1), ("B", 20, 2), ("A", 15, 3)]);
        assert_eq!(ranked[0].study_days, "Saturday, Monday, Wednesday");
    }

    #[test]
    fn huge_scores_saturate_instead_of_overflowing() {
        let ranked = rank_results(vec![
            entry("Normal", "50", "40"),
            entry("Huge", "9223372036854775807", "1"),
        ]);

        assert_eq!(ranked[0].name, "Huge");
        assert_eq!(ranked[0].total, i64::MAX);
        assert_eq!(ranked[1].total, 90);
    }

    #[test]
    fn equal_totals_keep_submission_order() {
        let ranked = rank_results(vec![
            entry("First", "10", "10"),
            entry("Top", "40", "0"),
            entry("Second", "20", "0"),
            entry("Third", "5", "15"),
        ]);

        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn sheet_has_one_row_per_entry() {
        let ranked = rank_results(vec![entry("A", "1", "2")]);
        let sheet = results_sheet(&ranked);
        assert_eq!(sheet.headers.len(), 9);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0][8], Cell::Number(3.0));
    }
}

use serde::{Deserialize, Serialize};

/// One submitted exam result. Scores arrive as free text, e.g. `"17"` or `"Absent"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub batch: String,
    #[serde(default)]
    pub study_days: String,
    #[serde(default, alias = "CQ")]
    pub cq: String,
    #[serde(default, alias = "MCQ")]
    pub mcq: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub rank: usize,
    pub name: String,
    pub phone_number: String,
    pub class: String,
    pub batch: String,
    pub study_days: String,
    pub cq: String,
    pub mcq: String,
    pub total: i64,
}

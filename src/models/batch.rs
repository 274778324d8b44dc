use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub batch_name: String,
    pub time: String,
    pub days: Vec<String>,
    pub class: String,
    pub subject: String,
    pub total_students: i64,
    pub payment_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBatchRequest {
    #[serde(default)]
    pub batch_name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub total_students: i64,
    #[serde(default)]
    pub payment_amount: f64,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub batch_time: String,
    pub class: String,
    pub subject: String,
    pub payment_status: bool,
    pub payment_amount: f64,
    pub paid_months: Vec<String>,
    pub due_months: Vec<String>,
    /// Study-day code, e.g. `smw`, `stt` or `regular`.
    pub study_days: String,
    pub batch_id: String,
}

/// Outcome of flipping a student's payment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentTransition {
    MarkedPaid,
    MarkedUnpaid,
}

impl Student {
    /// Flips the payment flag for the month `label`.
    ///
    /// Paid students become unpaid and keep their month history. Unpaid
    /// students become paid, `label` is recorded once in `paid_months` and
    /// dropped from `due_months`.
    pub fn toggle_payment(&mut self, label: &str) -> PaymentTransition {
        if self.payment_status {
            self.payment_status = false;
            return PaymentTransition::MarkedUnpaid;
        }

        self.payment_status = true;
        if !self.paid_months.iter().any(|m| m == label) {
            self.paid_months.push(label.to_string());
        }
        self.due_months.retain(|m| m != label);
        PaymentTransition::MarkedPaid
    }

    pub fn apply_update(&mut self, req: UpdateStudentRequest) {
        if let Some(name) = req.name {
            self.name = name;
        }
        if let Some(phone_number) = req.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(batch_time) = req.batch_time {
            self.batch_time = batch_time;
        }
        if let Some(class) = req.class {
            self.class = class;
        }
        if let Some(subject) = req.subject {
            self.subject = subject;
        }
        if let Some(payment_status) = req.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(payment_amount) = req.payment_amount {
            self.payment_amount = payment_amount;
        }
        if let Some(paid_months) = req.paid_months {
            self.paid_months = paid_months;
        }
        if let Some(due_months) = req.due_months {
            self.due_months = due_months;
        }
        if let Some(study_days) = req.study_days {
            self.study_days = study_days;
        }
        if let Some(batch_id) = req.batch_id {
            self.batch_id = batch_id;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub batch_time: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub payment_status: bool,
    #[serde(default)]
    pub payment_amount: f64,
    #[serde(default)]
    pub paid_months: Vec<String>,
    #[serde(default)]
    pub due_months: Vec<String>,
    #[serde(default)]
    pub study_days: String,
    #[serde(default)]
    pub batch_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub batch_time: Option<String>,
    pub class: Option<String>,
    pub subject: Option<String>,
    pub payment_status: Option<bool>,
    pub payment_amount: Option<f64>,
    pub paid_months: Option<Vec<String>>,
    pub due_months: Option<Vec<String>>,
    pub study_days: Option<String>,
    pub batch_id: Option<String>,
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cms_backend::db::{MIGRATOR, repository};
use cms_backend::models::{NewStudentRequest, RankedResult, Student};
use cms_backend::services::Notifier;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// In-memory database; one connection so every query sees the same data.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn new_student(name: &str, batch_time: &str, study_days: &str, paid: bool) -> NewStudentRequest {
    NewStudentRequest {
        name: name.to_string(),
        phone_number: "01711111111".to_string(),
        batch_time: batch_time.to_string(),
        class: "9".to_string(),
        subject: "Chemistry".to_string(),
        payment_status: paid,
        payment_amount: 1200.0,
        paid_months: vec![],
        due_months: vec![],
        study_days: study_days.to_string(),
        batch_id: String::new(),
    }
}

pub async fn seed(pool: &SqlitePool, req: NewStudentRequest) -> Student {
    repository::insert_student(pool, req)
        .await
        .expect("Failed to insert student")
}

/// Records notifications in delivery order.
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn payment_received(&self, student: &Student) {
        self.events.lock().unwrap().push(format!("paid:{}", student.name));
    }

    async fn result_published(&self, result: &RankedResult) {
        self.events
            .lock()
            .unwrap()
            .push(format!("result:{}:{}", result.rank, result.name));
    }
}

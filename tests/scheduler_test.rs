mod common;

use std::time::Duration;

use cms_backend::db::repository;
use cms_backend::services::MonthlyResetScheduler;

use common::{RecordingNotifier, new_student, seed, test_pool};

#[tokio::test]
async fn test_scheduler_run_reset_marks_everyone_unpaid() {
    let pool = test_pool().await;
    seed(&pool, new_student("Rahim", "6pm", "smw", true)).await;
    seed(&pool, new_student("Karim", "7pm", "stt", true)).await;
    let mut with_dues = new_student("Salma", "7pm", "regular", false);
    with_dues.due_months = vec!["August_2025".to_string()];
    seed(&pool, with_dues).await;

    let scheduler = MonthlyResetScheduler::new(pool.clone(), RecordingNotifier::new());
    let touched = scheduler.run_reset().await.expect("reset failed");
    assert_eq!(touched, 3);

    let students = repository::fetch_students(&pool).await.unwrap();
    assert!(students.iter().all(|s| !s.payment_status));

    // no due-month bookkeeping on the scheduled reset
    let salma = students.iter().find(|s| s.name == "Salma").unwrap();
    assert_eq!(salma.due_months, vec!["August_2025"]);
    let rahim = students.iter().find(|s| s.name == "Rahim").unwrap();
    assert!(rahim.due_months.is_empty());
}

#[tokio::test]
async fn test_scheduler_waits_for_first_of_month() {
    let pool = test_pool().await;
    seed(&pool, new_student("Rahim", "6pm", "smw", true)).await;

    let scheduler = MonthlyResetScheduler::new(pool.clone(), RecordingNotifier::new());
    let scheduler_task = tokio::spawn(async move {
        scheduler.start().await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    scheduler_task.abort();

    // the next run is at the start of next month, so nothing has been reset yet
    let rahim = repository::fetch_students(&pool).await.unwrap().remove(0);
    assert!(rahim.payment_status);
}

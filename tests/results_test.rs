mod common;

use cms_backend::models::ResultEntry;
use cms_backend::services::ResultsService;

use common::RecordingNotifier;

fn entry(name: &str, cq: &str, mcq: &str) -> ResultEntry {
    ResultEntry {
        name: name.to_string(),
        phone_number: "01711111111".to_string(),
        class: "10".to_string(),
        batch: "6pm".to_string(),
        study_days: "stt".to_string(),
        cq: cq.to_string(),
        mcq: mcq.to_string(),
    }
}

#[tokio::test]
async fn test_publish_notifies_in_ranked_order() {
    let notifier = RecordingNotifier::new();
    let service = ResultsService::new(notifier.clone());

    let file = service
        .publish(vec![
            entry("Low", "5", "Absent"),
            entry("Mid", "20", "10"),
            entry("Top", "40", "25"),
            entry("AlsoMid", "15", "15"),
        ])
        .await
        .expect("publish failed");

    assert!(file.bytes.starts_with(b"PK"));
    assert!(file.filename.starts_with("results_of_"));
    assert_eq!(
        notifier.events(),
        vec![
            "result:1:Top",
            "result:2:Mid",
            "result:3:AlsoMid",
            "result:4:Low",
        ]
    );
}

#[tokio::test]
async fn test_publish_with_overflowing_scores_still_ranks() {
    let notifier = RecordingNotifier::new();
    let service = ResultsService::new(notifier.clone());

    service
        .publish(vec![
            entry("Normal", "50", "40"),
            entry("Huge", "9223372036854775807", "1"),
        ])
        .await
        .expect("publish failed");

    assert_eq!(notifier.events(), vec!["result:1:Huge", "result:2:Normal"]);
}

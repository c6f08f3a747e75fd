//! Tests for the submission API

use chrono::NaiveDate;
use provider_fetch_queue::core::ProviderRegistry;
use provider_fetch_queue::runtime::{health, list_providers, submit_request, DataRequest, SharedQueue};

fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 20)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

#[test]
fn test_submit_skips_unknown_providers() {
    let queue = SharedQueue::default();
    let request = DataRequest {
        user_id: 42,
        providers: vec!["companies_house".into(), "open_banking".into()],
    };

    let receipt = submit_request(&queue, &request, now()).unwrap();
    assert_eq!(receipt.accepted, vec!["companies_house".to_string()]);
    assert_eq!(receipt.skipped, vec!["open_banking".to_string()]);
    assert_eq!(receipt.queue_size, 1);
    assert_eq!(receipt.status(), "1 Task(s) added to queue");
}

#[test]
fn test_submit_expands_dependencies() {
    let queue = SharedQueue::default();
    let request = DataRequest {
        user_id: 1,
        providers: vec!["credit_check".into()],
    };
    let receipt = submit_request(&queue, &request, now()).unwrap();
    assert_eq!(receipt.queue_size, 2);
    assert_eq!(queue.dequeue().unwrap().provider, "companies_house");
}

#[test]
fn test_request_deserializes() {
    let request: DataRequest =
        serde_json::from_str(r#"{"user_id": 5, "providers": ["bank_statements"]}"#).unwrap();
    assert_eq!(request.user_id, 5);
    assert_eq!(request.providers, vec!["bank_statements".to_string()]);
}

#[test]
fn test_list_providers() {
    let summaries = list_providers(&ProviderRegistry::default_registry());
    let names: Vec<&str> = summaries.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["bank_statements", "companies_house", "credit_check", "id_verification"]
    );
    assert_eq!(summaries[3].base_url, "https://fake.idv.co.uk");
}

#[test]
fn test_health_reports_backlog() {
    let queue = SharedQueue::default();
    let report = health(&queue);
    assert!(report.ok);
    assert_eq!(report.queue_size, 0);
    assert_eq!(report.queue_age_secs, 0);
}

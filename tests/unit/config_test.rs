//! Tests for configuration validation

use std::collections::HashMap;

use provider_fetch_queue::config::{QueueConfig, ServiceConfig, WorkerConfig};

#[test]
fn test_defaults_are_valid() {
    let cfg = ServiceConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.queue.promotion_threshold, 3);
    assert_eq!(cfg.queue.low_priority_providers, vec!["bank_statements".to_string()]);
    assert_eq!(cfg.worker.poll_interval_ms, 1_000);
}

#[test]
fn test_zero_threshold_rejected() {
    let cfg = ServiceConfig {
        queue: QueueConfig {
            promotion_threshold: 0,
            ..QueueConfig::default()
        },
        ..ServiceConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_poll_interval_rejected() {
    let cfg = ServiceConfig {
        worker: WorkerConfig { poll_interval_ms: 0 },
        ..ServiceConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_empty_provider_override_rejected() {
    let cfg = QueueConfig {
        providers: Some(vec![]),
        ..QueueConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_from_json_partial_uses_defaults() {
    let json = r#"{
        "queue": {
            "promotion_threshold": 5,
            "providers": [
                {"name": "open_banking", "base_url": "https://fake.ob.co.uk"},
                {"name": "affordability", "base_url": "https://fake.aff.co.uk", "depends_on": ["open_banking"]}
            ]
        }
    }"#;

    let cfg = ServiceConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.queue.promotion_threshold, 5);
    assert_eq!(cfg.queue.low_priority_providers, vec!["bank_statements".to_string()]);
    assert_eq!(cfg.queue.providers.as_ref().map(Vec::len), Some(2));
    assert_eq!(cfg.worker.poll_interval_ms, 1_000);
}

#[test]
fn test_from_json_rejects_malformed() {
    assert!(ServiceConfig::from_json_str("{ not json").is_err());
    assert!(ServiceConfig::from_json_str(r#"{"worker": {"poll_interval_ms": 0}}"#).is_err());
}

#[test]
fn test_from_vars() {
    let vars: HashMap<&str, &str> = [
        ("QUEUE_PROMOTION_THRESHOLD", "4"),
        ("QUEUE_LOW_PRIORITY_PROVIDERS", "bank_statements, credit_check,"),
        ("WORKER_POLL_INTERVAL_MS", "250"),
    ]
    .into_iter()
    .collect();

    let cfg = ServiceConfig::from_vars(|k| vars.get(k).map(ToString::to_string)).unwrap();
    assert_eq!(cfg.queue.promotion_threshold, 4);
    assert_eq!(
        cfg.queue.low_priority_providers,
        vec!["bank_statements".to_string(), "credit_check".to_string()]
    );
    assert_eq!(cfg.worker.poll_interval_ms, 250);
}

#[test]
fn test_from_vars_rejects_non_numeric() {
    let result = ServiceConfig::from_vars(|k| {
        (k == "QUEUE_PROMOTION_THRESHOLD").then(|| "three".to_string())
    });
    assert!(result.is_err());
}

#[test]
fn test_from_vars_empty_is_default() {
    let cfg = ServiceConfig::from_vars(|_| None).unwrap();
    assert_eq!(cfg, ServiceConfig::default());
}

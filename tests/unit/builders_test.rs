//! Tests for builders

use provider_fetch_queue::builders::{build_queue, build_registry, build_shared_queue};
use provider_fetch_queue::config::{QueueConfig, ServiceConfig};
use provider_fetch_queue::core::{Provider, QueueError, TaskPriority, TaskSubmission};

#[test]
fn test_build_default_queue() {
    let queue = build_queue(&ServiceConfig::default()).unwrap();
    assert_eq!(queue.size(), 0);
    assert_eq!(queue.registry().providers().len(), 4);
}

#[test]
fn test_build_with_custom_registry() {
    let mut cfg = ServiceConfig::default();
    cfg.queue.providers = Some(vec![
        Provider::new("open_banking", "https://fake.ob.co.uk", &[]),
        Provider::new("affordability", "https://fake.aff.co.uk", &["open_banking"]),
    ]);
    cfg.queue.low_priority_providers = vec!["open_banking".into()];

    let mut queue = build_queue(&cfg).unwrap();
    let task = TaskSubmission::new("affordability", 1, "2025-10-20T12:00:00").unwrap();
    assert_eq!(queue.enqueue(task).unwrap(), 2);
    assert_eq!(queue.snapshot()[0].task_priority, TaskPriority::Low);
}

#[test]
fn test_build_rejects_cyclic_registry() {
    let cfg = QueueConfig {
        providers: Some(vec![
            Provider::new("a", "", &["b"]),
            Provider::new("b", "", &["c"]),
            Provider::new("c", "", &["a"]),
        ]),
        ..QueueConfig::default()
    };
    let err = build_registry(&cfg).unwrap_err();
    assert!(matches!(err, QueueError::InvalidProviderGraph(_)));
}

#[test]
fn test_build_rejects_invalid_config() {
    let mut cfg = ServiceConfig::default();
    cfg.queue.promotion_threshold = 0;
    assert!(matches!(build_shared_queue(&cfg), Err(QueueError::Config(_))));
}

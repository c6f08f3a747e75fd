//! Tests for error types

use provider_fetch_queue::core::QueueError;

#[test]
fn test_invalid_timestamp_error() {
    let err = QueueError::InvalidTimestamp("not-a-date".to_string());
    assert_eq!(format!("{}", err), "invalid timestamp: not-a-date");
}

#[test]
fn test_invalid_provider_graph_error() {
    let err = QueueError::InvalidProviderGraph("dependency cycle: a -> a".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid provider graph: dependency cycle: a -> a"
    );
}

#[test]
fn test_config_error() {
    let err = QueueError::Config("parse error".to_string());
    assert_eq!(format!("{}", err), "config error: parse error");
}

#[test]
fn test_converts_into_anyhow() {
    let err: anyhow::Error = QueueError::Config("bad".into()).into();
    assert!(err.downcast_ref::<QueueError>().is_some());
}

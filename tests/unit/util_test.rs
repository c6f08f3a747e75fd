//! Tests for utility functions

use provider_fetch_queue::core::TaskSubmission;
use provider_fetch_queue::util::{init_tracing, init_tracing_with, now_naive};

#[test]
fn test_now_naive_is_accepted_as_submission_time() {
    let before = now_naive();
    let task = TaskSubmission::new("companies_house", 1, now_naive()).unwrap();
    assert!(task.timestamp >= before);
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing_with("provider_fetch_queue=debug");
}

//! Configuration models for the queue, worker, and registry.

pub mod service;

pub use service::{QueueConfig, ServiceConfig, WorkerConfig};

//! Builders to construct queue components from configuration.

pub mod queue_builder;

pub use queue_builder::{build_queue, build_registry, build_shared_queue};

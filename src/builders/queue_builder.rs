//! Builders to construct the scheduling queue from configuration.

use std::sync::Arc;

use crate::config::{QueueConfig, ServiceConfig};
use crate::core::{ProviderRegistry, QueueError, SchedulingQueue};
use crate::runtime::SharedQueue;

/// Build the provider registry, falling back to the built-in providers.
pub fn build_registry(cfg: &QueueConfig) -> Result<ProviderRegistry, QueueError> {
    match &cfg.providers {
        Some(providers) => ProviderRegistry::new(providers.clone()),
        None => Ok(ProviderRegistry::default_registry()),
    }
}

/// Validate `cfg` and build an empty queue from it.
pub fn build_queue(cfg: &ServiceConfig) -> Result<SchedulingQueue, QueueError> {
    cfg.validate()?;
    let registry = build_registry(&cfg.queue)?;
    tracing::debug!(
        providers = registry.providers().len(),
        promotion_threshold = cfg.queue.promotion_threshold,
        "building scheduling queue"
    );
    Ok(SchedulingQueue::new(Arc::new(registry), &cfg.queue))
}

/// [`build_queue`] wrapped for sharing between producers and the worker.
pub fn build_shared_queue(cfg: &ServiceConfig) -> Result<SharedQueue, QueueError> {
    build_queue(cfg).map(SharedQueue::new)
}

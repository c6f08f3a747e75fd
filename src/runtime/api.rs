//! API-facing request/response models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::{ProviderRegistry, QueueError, TaskSubmission, UserId};
use crate::runtime::SharedQueue;

/// Body of a customer data fetch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataRequest {
    /// User to fetch for.
    pub user_id: UserId,
    /// Provider names to fetch.
    pub providers: Vec<String>,
}

/// Outcome of a [`submit_request`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Providers that were enqueued.
    pub accepted: Vec<String>,
    /// Providers skipped because they are not registered.
    pub skipped: Vec<String>,
    /// Backlog size after the request.
    pub queue_size: usize,
}

impl SubmissionReceipt {
    /// Human-readable status line.
    pub fn status(&self) -> String {
        format!("{} Task(s) added to queue", self.accepted.len())
    }
}

/// Name and endpoint of a registered provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// Provider name.
    pub name: String,
    /// Provider endpoint.
    pub base_url: String,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Current backlog size.
    pub queue_size: usize,
    /// Current backlog age in seconds.
    pub queue_age_secs: u64,
}

/// Enqueue one task per requested provider, stamped with `now`.
///
/// Unregistered providers are skipped with a warning rather than failing the
/// request.
pub fn submit_request(
    queue: &SharedQueue,
    request: &DataRequest,
    now: NaiveDateTime,
) -> Result<SubmissionReceipt, QueueError> {
    queue.with_queue(|q| -> Result<SubmissionReceipt, QueueError> {
        let mut receipt = SubmissionReceipt {
            accepted: Vec::new(),
            skipped: Vec::new(),
            queue_size: q.size(),
        };
        for provider in &request.providers {
            if !q.registry().contains(provider) {
                tracing::warn!(provider = %provider, "provider doesn't exist, skipping");
                receipt.skipped.push(provider.clone());
                continue;
            }
            receipt.queue_size = q.enqueue(TaskSubmission::new(
                provider.as_str(),
                request.user_id,
                now,
            )?)?;
            receipt.accepted.push(provider.clone());
        }
        Ok(receipt)
    })
}

/// List registered providers.
pub fn list_providers(registry: &ProviderRegistry) -> Vec<ProviderSummary> {
    registry
        .providers()
        .iter()
        .map(|p| ProviderSummary {
            name: p.name.clone(),
            base_url: p.base_url.clone(),
        })
        .collect()
}

/// Return a health payload.
pub fn health(queue: &SharedQueue) -> Health {
    queue.with_queue(|q| Health {
        ok: true,
        queue_size: q.size(),
        queue_age_secs: q.age(),
    })
}

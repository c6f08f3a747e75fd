//! Host-side adapters: shared queue handle, submission API, and worker loop.

pub mod api;
pub mod shared;
#[cfg(feature = "tokio-runtime")]
pub mod worker;

pub use api::{
    health, list_providers, submit_request, DataRequest, Health, ProviderSummary,
    SubmissionReceipt,
};
pub use shared::SharedQueue;
#[cfg(feature = "tokio-runtime")]
pub use worker::{ProviderFetcher, QueueWorker, WorkerHandle, WorkerStep};

//! Background consumer that drains the queue into a provider fetcher.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::WorkerConfig;
use crate::core::{AppResult, TaskDispatch};
use crate::runtime::SharedQueue;

/// Performs the actual provider fetch for a dispatched task.
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use provider_fetch_queue::core::{AppResult, TaskDispatch};
/// use provider_fetch_queue::runtime::ProviderFetcher;
///
/// struct HttpFetcher { client: reqwest::Client }
///
/// #[async_trait]
/// impl ProviderFetcher for HttpFetcher {
///     async fn fetch(&self, task: TaskDispatch, base_url: Option<String>) -> AppResult<()> {
///         let url = format!("{}/users/{}", base_url.unwrap_or_default(), task.user_id);
///         self.client.get(url).send().await?.error_for_status()?;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait ProviderFetcher: Send + Sync + 'static {
    /// Fetch `task`'s data. `base_url` is `None` for unregistered providers.
    async fn fetch(&self, task: TaskDispatch, base_url: Option<String>) -> AppResult<()>;
}

/// Result of one worker iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerStep {
    /// Queue was empty.
    Idle,
    /// Task fetched successfully.
    Completed(TaskDispatch),
    /// Fetcher returned an error; the task is not retried.
    Failed(TaskDispatch),
}

/// Polls a [`SharedQueue`] and hands each dispatch to a [`ProviderFetcher`].
pub struct QueueWorker<F> {
    queue: SharedQueue,
    fetcher: F,
    poll_interval: Duration,
}

/// Handle to a spawned worker.
pub struct WorkerHandle {
    shutdown: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    /// Signal shutdown and wait for the current iteration to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.join.await {
            tracing::error!("queue worker terminated abnormally: {}", e);
        }
    }
}

impl<F: ProviderFetcher> QueueWorker<F> {
    /// Create a worker over `queue`.
    pub fn new(queue: SharedQueue, fetcher: F, config: &WorkerConfig) -> Self {
        Self {
            queue,
            fetcher,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    /// Dequeue and process at most one task.
    pub async fn run_once(&self) -> WorkerStep {
        let next = self.queue.with_queue(|q| {
            q.dequeue().map(|task| {
                let base_url = q.registry().get(&task.provider).map(|p| p.base_url.clone());
                (task, base_url)
            })
        });
        let Some((task, base_url)) = next else {
            return WorkerStep::Idle;
        };

        tracing::info!(%task, "processing task");
        match self.fetcher.fetch(task.clone(), base_url).await {
            Ok(()) => {
                tracing::info!(%task, "finished task");
                WorkerStep::Completed(task)
            }
            Err(e) => {
                tracing::error!(%task, "fetch failed: {:#}", e);
                WorkerStep::Failed(task)
            }
        }
    }

    /// Loop until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!("queue worker started");
        loop {
            if *shutdown.borrow() {
                break;
            }
            if self.run_once().await == WorkerStep::Idle {
                tokio::select! {
                    () = tokio::time::sleep(self.poll_interval) => {}
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }
        tracing::info!("queue worker shutting down");
    }

    /// Spawn the loop on the current tokio runtime.
    pub fn spawn(self) -> WorkerHandle {
        let (tx, rx) = watch::channel(false);
        let join = tokio::spawn(self.run(rx));
        WorkerHandle { shutdown: tx, join }
    }
}

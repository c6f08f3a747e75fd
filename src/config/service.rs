//! Queue and worker configuration structures.

use serde::{Deserialize, Serialize};

use crate::core::registry::Provider;
use crate::core::QueueError;

/// Users with at least this many backlog entries are promoted.
pub const DEFAULT_PROMOTION_THRESHOLD: usize = 3;
/// Idle sleep between polls of an empty queue.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

/// Scheduling tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Backlog count at which a user's entries are promoted to `High`.
    pub promotion_threshold: usize,
    /// Providers whose tasks default to `Low` task priority.
    pub low_priority_providers: Vec<String>,
    /// Registry override; the built-in providers are used when absent.
    pub providers: Option<Vec<Provider>>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            promotion_threshold: DEFAULT_PROMOTION_THRESHOLD,
            low_priority_providers: vec!["bank_statements".to_string()],
            providers: None,
        }
    }
}

/// Background worker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Milliseconds to sleep when the queue is empty.
    pub poll_interval_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Root service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Queue tunables.
    pub queue: QueueConfig,
    /// Worker settings.
    pub worker: WorkerConfig,
}

impl QueueConfig {
    /// Validate queue configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.promotion_threshold == 0 {
            return Err("promotion_threshold must be greater than 0".into());
        }
        if let Some(providers) = &self.providers {
            if providers.is_empty() {
                return Err("providers must not be empty when set".into());
            }
        }
        Ok(())
    }
}

impl WorkerConfig {
    /// Validate worker configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".into());
        }
        Ok(())
    }
}

impl ServiceConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<(), QueueError> {
        self.queue
            .validate()
            .map_err(|e| QueueError::Config(format!("queue invalid: {e}")))?;
        self.worker
            .validate()
            .map_err(|e| QueueError::Config(format!("worker invalid: {e}")))?;
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, QueueError> {
        let cfg: Self = serde_json::from_str(input)
            .map_err(|e| QueueError::Config(format!("parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading `.env` first.
    ///
    /// Recognized variables: `QUEUE_PROMOTION_THRESHOLD`,
    /// `QUEUE_LOW_PRIORITY_PROVIDERS` (comma separated), `WORKER_POLL_INTERVAL_MS`.
    pub fn from_env() -> Result<Self, QueueError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(QueueError::Config(format!("failed to read .env: {e}")));
            }
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup, falling back to defaults.
    pub fn from_vars<F>(lookup: F) -> Result<Self, QueueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("QUEUE_PROMOTION_THRESHOLD") {
            cfg.queue.promotion_threshold = raw.trim().parse().map_err(|e| {
                QueueError::Config(format!("QUEUE_PROMOTION_THRESHOLD `{raw}`: {e}"))
            })?;
        }
        if let Some(raw) = lookup("QUEUE_LOW_PRIORITY_PROVIDERS") {
            cfg.queue.low_priority_providers = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        if let Some(raw) = lookup("WORKER_POLL_INTERVAL_MS") {
            cfg.worker.poll_interval_ms = raw.trim().parse().map_err(|e| {
                QueueError::Config(format!("WORKER_POLL_INTERVAL_MS `{raw}`: {e}"))
            })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

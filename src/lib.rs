//! # Provider Fetch Queue
//!
//! A fair, dependency-aware scheduling queue for a data-aggregation pipeline.
//!
//! Clients submit requests to fetch data from named external providers on
//! behalf of a user. The queue decides what to fetch next:
//!
//! - **Dependency expansion**: submitting a provider also enqueues every
//!   provider it depends on, deepest first.
//! - **Deduplication**: one pending task per `(user, provider)`; the earliest
//!   submission wins.
//! - **Starvation promotion**: a user with three or more pending tasks is
//!   promoted ahead of one-off requests, anchored at their earliest request.
//! - **Task tiers**: within a user's batch, low-priority providers (bank
//!   statements by default) yield to normal ones.
//!
//! ## Usage
//!
//! ```rust
//! use provider_fetch_queue::core::{SchedulingQueue, TaskSubmission};
//!
//! let mut queue = SchedulingQueue::default();
//! let task = TaskSubmission::new("credit_check", 1, "2025-10-20T12:00:00")?;
//!
//! // credit_check depends on companies_house, which is enqueued first.
//! assert_eq!(queue.enqueue(task)?, 2);
//! assert_eq!(queue.dequeue().map(|d| d.provider).as_deref(), Some("companies_house"));
//! # Ok::<(), provider_fetch_queue::core::QueueError>(())
//! ```
//!
//! The core is single-owner and synchronous. Hosts with several producers and
//! a background consumer share it through [`runtime::SharedQueue`] and drain
//! it with `runtime::QueueWorker` (feature `tokio-runtime`).
//!
//! For complete scenarios, see `tests/queue_scheduling_test.rs`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Scheduling core: task model, priorities, registry, and the queue.
pub mod core;
/// Configuration models for the queue and worker.
pub mod config;
/// Builders to construct queue components from configuration.
pub mod builders;
/// Host adapters: shared handle, submission API, and worker loop.
pub mod runtime;
/// Shared utilities.
pub mod util;

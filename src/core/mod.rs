//! Scheduling core: task model, priorities, provider registry, and the queue.

pub mod error;
pub mod priority;
pub mod queue;
pub mod registry;
pub mod task;

pub use error::{AppResult, QueueError};
pub use priority::{GroupAnchor, TaskPriority, UserPriority};
pub use queue::{QueuedTask, SchedulingQueue};
pub use registry::{Provider, ProviderRegistry};
pub use task::{parse_timestamp, TaskDispatch, TaskMetadata, TaskSubmission, TimestampInput, UserId};

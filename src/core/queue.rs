//! Fair, dependency-aware scheduling queue.
//!
//! The backlog is an unordered set of tasks, at most one per
//! `(user_id, provider)` pair. Every [`SchedulingQueue::dequeue`] re-scores
//! the whole backlog and dispatches the best-ranked entry:
//!
//! 1. Users holding at least `promotion_threshold` entries are promoted to
//!    [`UserPriority::High`] and anchored at their earliest request. A user
//!    that is already `High` (pinned by the caller or promoted earlier) keeps
//!    its tier and anchor.
//! 2. Entries are ordered by user tier, group anchor, task tier, then their
//!    own timestamp.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::QueueConfig;
use crate::core::error::QueueError;
use crate::core::priority::{GroupAnchor, TaskPriority, UserPriority};
use crate::core::registry::ProviderRegistry;
use crate::core::task::{TaskDispatch, TaskSubmission, UserId};

/// A backlog entry with fully hydrated scheduling metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedTask {
    /// Provider name.
    pub provider: String,
    /// Owning user.
    pub user_id: UserId,
    /// Raw submission time.
    pub timestamp: NaiveDateTime,
    /// Current user tier.
    pub user_priority: UserPriority,
    /// Current task tier.
    pub task_priority: TaskPriority,
    /// Current group anchor.
    pub group_earliest_timestamp: GroupAnchor,
}

type RankKey = (UserPriority, GroupAnchor, TaskPriority, NaiveDateTime);

impl QueuedTask {
    const fn rank_key(&self) -> RankKey {
        (
            self.user_priority,
            self.group_earliest_timestamp,
            self.task_priority,
            self.timestamp,
        )
    }

    fn into_dispatch(self) -> TaskDispatch {
        TaskDispatch {
            provider: self.provider,
            user_id: self.user_id,
        }
    }
}

/// Per-user aggregate computed at the start of each dequeue.
#[derive(Debug, Clone, Copy)]
struct UserBacklog {
    count: usize,
    earliest: NaiveDateTime,
}

/// Single-owner scheduling queue. Hosts that share it across tasks must
/// serialize access themselves (see `runtime::SharedQueue`).
#[derive(Debug, Clone)]
pub struct SchedulingQueue {
    registry: Arc<ProviderRegistry>,
    promotion_threshold: usize,
    low_priority_providers: HashSet<String>,
    backlog: Vec<QueuedTask>,
}

impl Default for SchedulingQueue {
    fn default() -> Self {
        Self::new(
            Arc::new(ProviderRegistry::default_registry()),
            &QueueConfig::default(),
        )
    }
}

impl SchedulingQueue {
    /// Create an empty queue over `registry`.
    ///
    /// `config` is not validated here; a zero promotion threshold is raised
    /// to 1, which has the same effect (every user has at least one entry).
    /// Use `builders::build_queue` to validate the whole configuration.
    #[must_use]
    pub fn new(registry: Arc<ProviderRegistry>, config: &QueueConfig) -> Self {
        Self {
            registry,
            promotion_threshold: config.promotion_threshold.max(1),
            low_priority_providers: config.low_priority_providers.iter().cloned().collect(),
            backlog: Vec::new(),
        }
    }

    /// Registry used for dependency expansion.
    #[must_use]
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Submit a task along with any dependencies it is missing.
    ///
    /// Dependencies are merged first, deepest first, then the task itself.
    /// Returns the backlog size afterwards.
    pub fn enqueue(&mut self, submission: TaskSubmission) -> Result<usize, QueueError> {
        let closure = self.registry.dependency_closure(&submission.provider)?;
        let dependencies: Vec<TaskSubmission> = closure
            .iter()
            .map(|name| submission.dependency(name))
            .collect();

        tracing::debug!(
            provider = %submission.provider,
            user_id = submission.user_id,
            dependencies = dependencies.len(),
            "enqueue"
        );

        for task in dependencies.into_iter().chain(std::iter::once(submission)) {
            let queued = self.hydrate(task);
            self.merge(queued);
        }
        Ok(self.backlog.len())
    }

    /// Re-score the backlog and remove the best-ranked entry.
    ///
    /// Returns `None` when there is nothing to dispatch.
    pub fn dequeue(&mut self) -> Option<TaskDispatch> {
        if self.backlog.is_empty() {
            return None;
        }

        let users = self.user_backlogs();
        let threshold = self.promotion_threshold;
        for task in &mut self.backlog {
            if task.user_priority == UserPriority::High {
                continue;
            }
            let user = users[&task.user_id];
            if user.count >= threshold {
                tracing::debug!(
                    user_id = task.user_id,
                    provider = %task.provider,
                    pending = user.count,
                    "promoting task"
                );
                task.user_priority = UserPriority::High;
                task.group_earliest_timestamp = GroupAnchor::At(user.earliest);
            } else {
                task.user_priority = UserPriority::Normal;
                task.group_earliest_timestamp = GroupAnchor::Never;
            }
        }

        self.backlog.sort_by_key(QueuedTask::rank_key);
        let dispatch = self.backlog.remove(0).into_dispatch();
        tracing::info!(%dispatch, remaining = self.backlog.len(), "dispatching task");
        Some(dispatch)
    }

    /// Current backlog length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.backlog.len()
    }

    /// Whether the backlog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backlog.is_empty()
    }

    /// Whole seconds between the oldest and newest raw timestamps; 0 when empty.
    #[must_use]
    pub fn age(&self) -> u64 {
        let mut stamps = self.backlog.iter().map(|t| t.timestamp);
        let Some(first) = stamps.next() else {
            return 0;
        };
        let (oldest, newest) = stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)));
        u64::try_from((newest - oldest).num_seconds()).unwrap_or_default()
    }

    /// Drop every pending entry.
    pub fn purge(&mut self) -> bool {
        let dropped = self.backlog.len();
        self.backlog.clear();
        tracing::info!(dropped, "queue purged");
        true
    }

    /// Entries in their current (last-ranked) order.
    #[must_use]
    pub fn snapshot(&self) -> &[QueuedTask] {
        &self.backlog
    }

    fn default_task_priority(&self, provider: &str) -> TaskPriority {
        if self.low_priority_providers.contains(provider) {
            TaskPriority::Low
        } else {
            TaskPriority::Normal
        }
    }

    fn hydrate(&self, task: TaskSubmission) -> QueuedTask {
        let meta = task.metadata;
        let task_priority = meta
            .task_priority
            .unwrap_or_else(|| self.default_task_priority(&task.provider));
        QueuedTask {
            user_priority: meta.user_priority.unwrap_or(UserPriority::Normal),
            task_priority,
            group_earliest_timestamp: meta.group_earliest_timestamp.unwrap_or_default(),
            provider: task.provider,
            user_id: task.user_id,
            timestamp: task.timestamp,
        }
    }

    /// Keep the earliest submission per `(user_id, provider)`.
    fn merge(&mut self, incoming: QueuedTask) {
        let existing = self
            .backlog
            .iter_mut()
            .find(|t| t.user_id == incoming.user_id && t.provider == incoming.provider);

        match existing {
            Some(slot) if incoming.timestamp < slot.timestamp => {
                tracing::debug!(
                    provider = %incoming.provider,
                    user_id = incoming.user_id,
                    "replacing pending task with earlier submission"
                );
                *slot = incoming;
            }
            Some(_) => {
                tracing::debug!(
                    provider = %incoming.provider,
                    user_id = incoming.user_id,
                    "duplicate submission dropped"
                );
            }
            None => self.backlog.push(incoming),
        }
    }

    fn user_backlogs(&self) -> HashMap<UserId, UserBacklog> {
        let mut users: HashMap<UserId, UserBacklog> = HashMap::new();
        for task in &self.backlog {
            users
                .entry(task.user_id)
                .and_modify(|u| {
                    u.count += 1;
                    u.earliest = u.earliest.min(task.timestamp);
                })
                .or_insert(UserBacklog {
                    count: 1,
                    earliest: task.timestamp,
                });
        }
        users
    }
}

//! Thread-safe handle over a single scheduling queue.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{QueueError, QueuedTask, SchedulingQueue, TaskDispatch, TaskSubmission};

/// Cloneable handle serializing every operation through one mutex.
///
/// Producers (submission handlers) and the consumer (the worker loop) share
/// a clone each; every call holds the lock only for that one operation.
#[derive(Clone, Default)]
pub struct SharedQueue {
    inner: Arc<Mutex<SchedulingQueue>>,
}

impl SharedQueue {
    /// Wrap an existing queue.
    #[must_use]
    pub fn new(queue: SchedulingQueue) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// See [`SchedulingQueue::enqueue`].
    pub fn enqueue(&self, submission: TaskSubmission) -> Result<usize, QueueError> {
        self.inner.lock().enqueue(submission)
    }

    /// See [`SchedulingQueue::dequeue`].
    pub fn dequeue(&self) -> Option<TaskDispatch> {
        self.inner.lock().dequeue()
    }

    /// See [`SchedulingQueue::size`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.lock().size()
    }

    /// See [`SchedulingQueue::age`].
    #[must_use]
    pub fn age(&self) -> u64 {
        self.inner.lock().age()
    }

    /// See [`SchedulingQueue::purge`].
    pub fn purge(&self) -> bool {
        self.inner.lock().purge()
    }

    /// Copy of the current backlog.
    #[must_use]
    pub fn snapshot(&self) -> Vec<QueuedTask> {
        self.inner.lock().snapshot().to_vec()
    }

    /// Run `f` with exclusive access to the queue.
    pub fn with_queue<R>(&self, f: impl FnOnce(&mut SchedulingQueue) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

//! Task submission and dispatch records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::QueueError;
use crate::core::priority::{GroupAnchor, TaskPriority, UserPriority};

/// Identifier of the user a task is fetched on behalf of.
pub type UserId = u64;

/// Scheduling hints carried by a submission.
///
/// Unset fields are filled with defaults when the queue first sees the task
/// and are never overwritten by that step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMetadata {
    /// User tier hint; `High` pins the user ahead of normal traffic.
    pub user_priority: Option<UserPriority>,
    /// Task tier hint.
    pub task_priority: Option<TaskPriority>,
    /// Explicit group anchor.
    pub group_earliest_timestamp: Option<GroupAnchor>,
}

impl TaskMetadata {
    /// Set the user tier hint.
    #[must_use]
    pub const fn with_user_priority(mut self, priority: UserPriority) -> Self {
        self.user_priority = Some(priority);
        self
    }

    /// Override the task tier.
    #[must_use]
    pub const fn with_task_priority(mut self, priority: TaskPriority) -> Self {
        self.task_priority = Some(priority);
        self
    }

    /// Anchor the user's group at a fixed instant.
    #[must_use]
    pub const fn with_group_anchor(mut self, anchor: GroupAnchor) -> Self {
        self.group_earliest_timestamp = Some(anchor);
        self
    }
}

/// Timestamp forms accepted on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampInput {
    /// Already timezone-naive.
    Naive(NaiveDateTime),
    /// Offset-aware; the offset is dropped and the wall-clock reading kept.
    Offset(DateTime<FixedOffset>),
    /// ISO-8601 text.
    Iso(String),
}

impl TimestampInput {
    /// Normalize to a timezone-naive instant.
    pub fn normalize(self) -> Result<NaiveDateTime, QueueError> {
        match self {
            Self::Naive(ts) => Ok(ts),
            Self::Offset(ts) => Ok(ts.naive_local()),
            Self::Iso(text) => parse_timestamp(&text),
        }
    }
}

impl From<NaiveDateTime> for TimestampInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::Naive(value)
    }
}

impl From<DateTime<FixedOffset>> for TimestampInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::Offset(value)
    }
}

impl From<DateTime<Utc>> for TimestampInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Naive(value.naive_utc())
    }
}

impl From<&str> for TimestampInput {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_string())
    }
}

impl From<String> for TimestampInput {
    fn from(value: String) -> Self {
        Self::Iso(value)
    }
}

/// Parse an ISO-8601 timestamp into a naive instant.
///
/// Tries, in order:
/// 1. RFC 3339 with offset: `"2025-06-14T10:30:00+02:00"` (offset dropped)
/// 2. Offset without seconds: `"2025-06-14T10:30+02:00"`, `"2025-06-14T10:30Z"`
/// 3. Naive datetime: `"2025-06-14T10:30:00"`, optional fraction or seconds
/// 4. Space-separated: `"2025-06-14 10:30:00"`
/// 5. Hour only: `"2025-06-14T10"`
/// 6. Bare date: `"2025-06-14"` (midnight)
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, QueueError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    let zoned = value
        .strip_suffix(['Z', 'z'])
        .map_or_else(|| value.to_string(), |rest| format!("{rest}+00:00"));
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, format) {
            return Ok(dt.naive_local());
        }
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ndt);
        }
    }

    // chrono needs a minute field to build a time.
    let with_minutes = format!("{value}:00");
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(&with_minutes, format) {
            return Ok(ndt);
        }
    }

    if let Ok(nd) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(nd.and_time(NaiveTime::MIN));
    }

    Err(QueueError::InvalidTimestamp(value.to_string()))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// A request to fetch one provider's data for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSubmission {
    /// Provider name; need not be registered.
    pub provider: String,
    /// User the fetch is for.
    pub user_id: UserId,
    /// When the request was made.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Scheduling hints.
    #[serde(default)]
    pub metadata: TaskMetadata,
}

impl TaskSubmission {
    /// Build a submission, normalizing the timestamp.
    pub fn new(
        provider: impl Into<String>,
        user_id: UserId,
        timestamp: impl Into<TimestampInput>,
    ) -> Result<Self, QueueError> {
        Ok(Self {
            provider: provider.into(),
            user_id,
            timestamp: timestamp.into().normalize()?,
            metadata: TaskMetadata::default(),
        })
    }

    /// Attach scheduling hints.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Synthetic submission for a dependency of `self`.
    pub(crate) fn dependency(&self, provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            user_id: self.user_id,
            timestamp: self.timestamp,
            metadata: TaskMetadata::default(),
        }
    }
}

/// Minimal unit of work handed to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDispatch {
    /// Provider to fetch.
    pub provider: String,
    /// User to fetch for.
    pub user_id: UserId,
}

impl std::fmt::Display for TaskDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(user {})", self.provider, self.user_id)
    }
}

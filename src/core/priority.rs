//! Two-tier priority model and the group anchor used for dispatch ordering.
//!
//! Derived `Ord` on each type is the dispatch order: smaller values are
//! dispatched first.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Per-user tier. `High` is dispatched ahead of `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UserPriority {
    /// Explicitly pinned or promoted users.
    High = 1,
    /// Default tier.
    Normal = 2,
}

/// Per-task tier, used to break ties inside a user's batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TaskPriority {
    /// Default tier.
    Normal = 1,
    /// Deferred behind normal tasks of the same user.
    Low = 2,
}

impl UserPriority {
    /// Decode a raw hint, returning `None` when it names no known tier.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(n) => match n.as_i64()? {
                1 => Some(Self::High),
                2 => Some(Self::Normal),
                _ => None,
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "high" => Some(Self::High),
                "normal" => Some(Self::Normal),
                _ => None,
            },
            _ => None,
        }
    }
}

impl TaskPriority {
    /// Decode a raw hint, returning `None` when it names no known tier.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(n) => match n.as_i64()? {
                1 => Some(Self::Normal),
                2 => Some(Self::Low),
                _ => None,
            },
            Value::String(s) => match s.to_ascii_lowercase().as_str() {
                "normal" => Some(Self::Normal),
                "low" => Some(Self::Low),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for UserPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw).unwrap_or(Self::Normal))
    }
}

impl<'de> Deserialize<'de> for TaskPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_raw(&raw).unwrap_or(Self::Normal))
    }
}

/// Instant a promoted user's batch is ranked by.
///
/// `Never` is the "infinitely late" sentinel and sorts after every `At`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GroupAnchor {
    /// Anchored at the given instant.
    At(NaiveDateTime),
    /// Not anchored.
    #[default]
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_dispatch_ordering() {
        assert!(UserPriority::High < UserPriority::Normal);
        assert!(TaskPriority::Normal < TaskPriority::Low);
    }

    #[test]
    fn test_anchor_never_sorts_last() {
        let late = NaiveDate::from_ymd_opt(9999, 12, 31)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .unwrap();
        assert!(GroupAnchor::At(late) < GroupAnchor::Never);
        assert_eq!(GroupAnchor::default(), GroupAnchor::Never);
    }

    #[test]
    fn test_lenient_decoding() {
        assert_eq!(UserPriority::from_raw(&json!(1)), Some(UserPriority::High));
        assert_eq!(UserPriority::from_raw(&json!("HIGH")), Some(UserPriority::High));
        assert_eq!(UserPriority::from_raw(&json!(7)), None);
        assert_eq!(TaskPriority::from_raw(&json!(2)), Some(TaskPriority::Low));
        assert_eq!(TaskPriority::from_raw(&json!(null)), None);
    }

    #[test]
    fn test_invalid_hint_deserializes_to_normal() {
        let user: UserPriority = serde_json::from_value(json!(42)).unwrap();
        let task: TaskPriority = serde_json::from_value(json!("urgent")).unwrap();
        assert_eq!(user, UserPriority::Normal);
        assert_eq!(task, TaskPriority::Normal);
    }
}

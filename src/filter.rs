// Filter criteria and sort keys for the task view

use crate::error::BoardError;
use crate::models::{Priority, Status, Task};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Conjunctive filter over the canonical collection
///
/// Every `None` clause is skipped, so the default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Exact match on status
    pub status: Option<Status>,
    /// Exact match on priority
    pub priority: Option<Priority>,
    /// Keep tasks due within `[now, now + N days]`, inclusive
    pub due_within_days: Option<i64>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.due_within_days.is_none()
    }

    /// True if the task satisfies every supplied clause
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if let Some(days) = self.due_within_days {
            if task.due_date < now {
                return false;
            }
            match window_end(now, days) {
                Some(end) => return task.due_date <= end,
                // Window end past the calendar: no due date can satisfy it
                None => return false,
            }
        }
        true
    }
}

fn window_end(now: DateTime<Utc>, days: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_days(days).and_then(|span| now.checked_add_signed(span))
}

/// Coerce free-text due-date range input into a day count
///
/// Non-numeric, empty, NaN and zero input disable the clause rather than
/// being rejected. Fractions truncate toward zero; negatives are kept and
/// produce an empty window. Infinities saturate to `i64::MIN`/`i64::MAX`,
/// whose window end is past the calendar, so they keep nothing.
pub fn parse_due_range(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if value.is_nan() || value == 0.0 {
        return None;
    }
    Some(value.trunc() as i64)
}

/// Sort keys offered by the sort menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    DueDate,
    Priority,
    Status,
}

impl SortKey {
    /// Ascending comparison of two tasks under this key
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => a.due_date.cmp(&b.due_date),
            SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
            SortKey::Status => a.status.rank().cmp(&b.status.rank()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::DueDate => write!(f, "dueDate"),
            SortKey::Priority => write!(f, "priority"),
            SortKey::Status => write!(f, "status"),
        }
    }
}

impl FromStr for SortKey {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| c.is_alphanumeric()).collect();
        match key.to_lowercase().as_str() {
            "duedate" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            _ => Err(BoardError::invalid("sort key", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 9, 30, 0).unwrap()
    }

    fn task(status: Status, priority: Priority, due_in_hours: i64) -> Task {
        Task {
            id: format!("{}-{}-{}", status, priority, due_in_hours),
            title: "t".to_string(),
            description: "d".to_string(),
            due_date: now() + TimeDelta::hours(due_in_hours),
            priority,
            status,
            attached_images: vec![],
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&task(Status::ToDo, Priority::Low, -500), now()));
        assert!(filter.matches(&task(Status::Completed, Priority::High, 5000), now()));
    }

    #[test]
    fn test_status_and_priority_are_conjunctive() {
        let filter = TaskFilter {
            status: Some(Status::ToDo),
            priority: Some(Priority::High),
            due_within_days: None,
        };
        assert!(filter.matches(&task(Status::ToDo, Priority::High, 1), now()));
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 1), now()));
        assert!(!filter.matches(&task(Status::Completed, Priority::High, 1), now()));
    }

    #[test]
    fn test_due_window_is_inclusive() {
        let filter = TaskFilter {
            due_within_days: Some(2),
            ..Default::default()
        };
        // Exactly at both edges
        assert!(filter.matches(&task(Status::ToDo, Priority::Low, 0), now()));
        assert!(filter.matches(&task(Status::ToDo, Priority::Low, 48), now()));
        // Just outside
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 49), now()));
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, -1), now()));
    }

    #[test]
    fn test_negative_window_matches_nothing() {
        let filter = TaskFilter {
            due_within_days: Some(-3),
            ..Default::default()
        };
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 0), now()));
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, -24), now()));
    }

    #[test]
    fn test_window_past_calendar_matches_nothing() {
        let filter = TaskFilter {
            due_within_days: Some(i64::MAX),
            ..Default::default()
        };
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 0), now()));
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 24 * 365 * 100), now()));
        assert!(!filter.matches(&task(Status::ToDo, Priority::Low, -1), now()));
    }

    #[test]
    fn test_infinite_due_range_keeps_nothing() {
        for text in ["inf", "Infinity", "-inf"] {
            let filter = TaskFilter {
                due_within_days: parse_due_range(text),
                ..Default::default()
            };
            assert!(!filter.is_empty(), "{} should enable the clause", text);
            assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 1), now()));
            assert!(!filter.matches(&task(Status::ToDo, Priority::Low, 24 * 30), now()));
        }
    }

    #[test]
    fn test_parse_due_range_permissive() {
        assert_eq!(parse_due_range("5"), Some(5));
        assert_eq!(parse_due_range("  7 "), Some(7));
        assert_eq!(parse_due_range("2.9"), Some(2));
        assert_eq!(parse_due_range("-3"), Some(-3));
        assert_eq!(parse_due_range(""), None);
        assert_eq!(parse_due_range("abc"), None);
        assert_eq!(parse_due_range("0"), None);
        assert_eq!(parse_due_range("NaN"), None);
        assert_eq!(parse_due_range("inf"), Some(i64::MAX));
        assert_eq!(parse_due_range("-Infinity"), Some(i64::MIN));
        assert_eq!(parse_due_range("1e300"), Some(i64::MAX));
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("dueDate".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("due-date".parse::<SortKey>().unwrap(), SortKey::DueDate);
        assert_eq!("Priority".parse::<SortKey>().unwrap(), SortKey::Priority);
        assert_eq!("status".parse::<SortKey>().unwrap(), SortKey::Status);
        assert!("title".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_display() {
        assert_eq!(SortKey::DueDate.to_string(), "dueDate");
        assert_eq!(SortKey::Priority.to_string(), "priority");
    }

    #[test]
    fn test_sort_key_compare() {
        let low = task(Status::Completed, Priority::Low, 10);
        let high = task(Status::ToDo, Priority::High, 5);
        assert_eq!(SortKey::Priority.compare(&low, &high), Ordering::Less);
        assert_eq!(SortKey::Status.compare(&low, &high), Ordering::Greater);
        assert_eq!(SortKey::DueDate.compare(&low, &high), Ordering::Greater);
    }
}

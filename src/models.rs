// Data models for the task board

use crate::error::BoardError;
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single task shown as a row on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub attached_images: Vec<String>,
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank: LOW < MEDIUM < HIGH
    pub const fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::invalid("priority", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    ToDo,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Completed];

    /// Sort rank: TO_DO < IN_PROGRESS < COMPLETED
    pub const fn rank(self) -> u8 {
        match self {
            Status::ToDo => 1,
            Status::InProgress => 2,
            Status::Completed => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Status::ToDo => "TO_DO",
            Status::InProgress => "IN_PROGRESS",
            Status::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::invalid("status", s))
    }
}

/// The fixed set of displayable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnName {
    Title,
    #[serde(rename = "Due Date")]
    DueDate,
    Priority,
    Status,
}

impl ColumnName {
    pub const ALL: [ColumnName; 4] = [
        ColumnName::Title,
        ColumnName::DueDate,
        ColumnName::Priority,
        ColumnName::Status,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ColumnName::Title => "Title",
            ColumnName::DueDate => "Due Date",
            ColumnName::Priority => "Priority",
            ColumnName::Status => "Status",
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnName {
    type Err = BoardError;

    /// Accepts the display name ("Due Date") or a compact form ("duedate", "due-date")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        ColumnName::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == wanted)
            .ok_or_else(|| BoardError::invalid("column", s))
    }
}

/// A column header; its position in the owning sequence is the display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHeader {
    pub id: String,
    pub name: ColumnName,
}

impl TaskHeader {
    pub fn new(id: impl Into<String>, name: ColumnName) -> Self {
        Self { id: id.into(), name }
    }

    /// Title, Due Date, Priority, Status with ids "1".."4"
    pub fn defaults() -> Vec<TaskHeader> {
        ColumnName::ALL
            .iter()
            .enumerate()
            .map(|(i, name)| TaskHeader::new((i + 1).to_string(), *name))
            .collect()
    }
}

impl Record for TaskHeader {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_task() -> Task {
        Task {
            id: "task-1".to_string(),
            title: "Write docs".to_string(),
            description: "Some words.".to_string(),
            due_date: Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap(),
            priority: Priority::High,
            status: Status::InProgress,
            attached_images: vec![],
        }
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn test_status_rank_order() {
        assert!(Status::ToDo.rank() < Status::InProgress.rank());
        assert!(Status::InProgress.rank() < Status::Completed.rank());
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"MEDIUM\"");
        assert_eq!(serde_json::to_string(&Status::ToDo).unwrap(), "\"TO_DO\"");
        assert_eq!(serde_json::to_string(&ColumnName::DueDate).unwrap(), "\"Due Date\"");
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("IN_PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert!("URGENT".parse::<Priority>().is_err());
        assert!("DONE".parse::<Status>().is_err());
    }

    #[test]
    fn test_column_name_from_str() {
        assert_eq!("Due Date".parse::<ColumnName>().unwrap(), ColumnName::DueDate);
        assert_eq!("due-date".parse::<ColumnName>().unwrap(), ColumnName::DueDate);
        assert_eq!("title".parse::<ColumnName>().unwrap(), ColumnName::Title);
        assert!("Owner".parse::<ColumnName>().is_err());
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = sample_task();
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"dueDate\""));
        assert!(json.contains("\"attachedImages\":[]"));
        assert!(json.contains("\"priority\":\"HIGH\""));
    }

    #[test]
    fn test_task_missing_images_defaults_empty() {
        let json = r#"{"id":"t","title":"a","description":"b","dueDate":"2026-01-01T00:00:00Z","priority":"LOW","status":"COMPLETED"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.attached_images.is_empty());
        assert_eq!(task.status, Status::Completed);
    }

    #[test]
    fn test_default_headers() {
        let headers = TaskHeader::defaults();
        let names: Vec<ColumnName> = headers.iter().map(|h| h.name).collect();
        assert_eq!(names, ColumnName::ALL.to_vec());
        assert_eq!(headers[0].id(), "1");
        assert_eq!(headers[3].id(), "4");
    }
}

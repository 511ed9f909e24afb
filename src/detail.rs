// Edit buffer for a single task on the detail screen

use crate::error::BoardError;
use crate::models::{Priority, Status, Task};
use crate::store::{TaskStore, UpdateOutcome};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

/// A single field change keyed by field name
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    DueDate(DateTime<Utc>),
    Priority(Priority),
    Status(Status),
    AttachedImages(Vec<String>),
}

impl FieldUpdate {
    /// Build an update from a field name and its raw text value
    ///
    /// `dueDate` accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse(field: &str, raw: &str) -> Result<Self, BoardError> {
        match field {
            "title" => Ok(FieldUpdate::Title(raw.to_string())),
            "description" => Ok(FieldUpdate::Description(raw.to_string())),
            "dueDate" => parse_due_date(raw).map(FieldUpdate::DueDate),
            "priority" => raw.parse().map(FieldUpdate::Priority),
            "status" => raw.parse().map(FieldUpdate::Status),
            other => Err(BoardError::UnknownField(other.to_string())),
        }
    }

    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::Title(_) => "title",
            FieldUpdate::Description(_) => "description",
            FieldUpdate::DueDate(_) => "dueDate",
            FieldUpdate::Priority(_) => "priority",
            FieldUpdate::Status(_) => "status",
            FieldUpdate::AttachedImages(_) => "attachedImages",
        }
    }
}

fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, BoardError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BoardError::invalid("dueDate", raw))
}

/// What the camera or gallery handed back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Captured(Vec<String>),
    Cancelled,
    PermissionDenied,
}

/// Working copy of a task being edited
///
/// Field changes stay local until [`TaskDraft::save`]. Image attachments are
/// the exception: they go to the store immediately and are mirrored here.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    task: Task,
}

impl TaskDraft {
    pub fn new(task: Task) -> Self {
        Self { task }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        debug!(id = %self.task.id, field = update.field_name(), "apply: called");
        match update {
            FieldUpdate::Title(title) => self.task.title = title,
            FieldUpdate::Description(description) => self.task.description = description,
            FieldUpdate::DueDate(due_date) => self.task.due_date = due_date,
            FieldUpdate::Priority(priority) => self.task.priority = priority,
            FieldUpdate::Status(status) => self.task.status = status,
            FieldUpdate::AttachedImages(images) => self.task.attached_images = images,
        }
    }

    /// Parse and apply a keyed update in one step
    pub fn set(&mut self, field: &str, raw: &str) -> Result<(), BoardError> {
        let update = FieldUpdate::parse(field, raw)?;
        self.apply(update);
        Ok(())
    }

    /// Attach captured images; returns how many were added
    ///
    /// Cancelled or denied captures abort without touching the store or draft.
    pub fn attach(&mut self, store: &mut TaskStore, capture: Capture) -> Result<usize, BoardError> {
        let images = match capture {
            Capture::Captured(images) => images,
            Capture::Cancelled => {
                info!(id = %self.task.id, "Image capture cancelled");
                return Err(BoardError::CaptureCancelled);
            }
            Capture::PermissionDenied => {
                warn!(id = %self.task.id, "Image capture permission denied");
                return Err(BoardError::PermissionDenied);
            }
        };

        let count = images.len();
        store.update_task_images(&self.task.id, images.clone());
        self.task.attached_images.extend(images);
        Ok(count)
    }

    /// Write the draft back into the store's view
    pub fn save(self, store: &mut TaskStore) -> UpdateOutcome {
        debug!(id = %self.task.id, "save: called");
        store.update_task(self.task)
    }
}

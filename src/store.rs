// In-memory task store: canonical collection plus a derived view

use crate::filter::{SortKey, TaskFilter};
use crate::generate::TaskSource;
use crate::models::Task;
use crate::record::position_of;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where in-place edits land
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditPolicy {
    /// Edits touch only the view and are lost on the next filter/sort/reset
    #[default]
    ViewOnly,
    /// Edits are also applied to the canonical task with the same id
    WriteThrough,
}

/// Result of an update against the view collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    NotFound,
}

impl UpdateOutcome {
    pub fn is_applied(self) -> bool {
        self == UpdateOutcome::Applied
    }
}

/// One or many image references, normalized to a list for appending
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRefs(pub Vec<String>);

impl From<&str> for ImageRefs {
    fn from(uri: &str) -> Self {
        Self(vec![uri.to_string()])
    }
}

impl From<String> for ImageRefs {
    fn from(uri: String) -> Self {
        Self(vec![uri])
    }
}

impl From<Vec<String>> for ImageRefs {
    fn from(uris: Vec<String>) -> Self {
        Self(uris)
    }
}

impl From<&[String]> for ImageRefs {
    fn from(uris: &[String]) -> Self {
        Self(uris.to_vec())
    }
}

impl From<Vec<&str>> for ImageRefs {
    fn from(uris: Vec<&str>) -> Self {
        Self(uris.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ImageRefs {
    fn from(uris: [&str; N]) -> Self {
        Self(uris.into_iter().map(String::from).collect())
    }
}

/// Owner of the canonical task collection and the view derived from it
///
/// The view is what gets displayed. Filter and sort always recompute it from
/// the canonical collection, so sorting discards any active filter.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    filtered_tasks: Vec<Task>,
    edit_policy: EditPolicy,
}

impl TaskStore {
    pub fn new(edit_policy: EditPolicy) -> Self {
        Self {
            tasks: Vec::new(),
            filtered_tasks: Vec::new(),
            edit_policy,
        }
    }

    /// Store seeded directly from a task list
    pub fn from_tasks(tasks: Vec<Task>, edit_policy: EditPolicy) -> Self {
        Self {
            filtered_tasks: tasks.clone(),
            tasks,
            edit_policy,
        }
    }

    /// Replace both collections with `count` tasks from the source
    pub fn initialize<S: TaskSource + ?Sized>(&mut self, count: usize, source: &mut S) {
        let tasks = source.generate(count);
        info!(count = tasks.len(), "Initialized task store");
        self.filtered_tasks = tasks.clone();
        self.tasks = tasks;
    }

    /// Canonical collection
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// View collection
    pub fn filtered_tasks(&self) -> &[Task] {
        &self.filtered_tasks
    }

    pub fn edit_policy(&self) -> EditPolicy {
        self.edit_policy
    }

    /// Look up a task in the view collection
    pub fn get(&self, id: &str) -> Option<&Task> {
        position_of(&self.filtered_tasks, id).map(|idx| &self.filtered_tasks[idx])
    }

    // ========================================================================
    // View derivation
    // ========================================================================

    /// Recompute the view from canonical using the current time
    pub fn filter(&mut self, criteria: &TaskFilter) {
        self.filter_at(criteria, Utc::now());
    }

    /// Recompute the view from canonical as of `now`
    pub fn filter_at(&mut self, criteria: &TaskFilter, now: DateTime<Utc>) {
        debug!(?criteria, "filter_at: called");
        self.filtered_tasks = self
            .tasks
            .iter()
            .filter(|task| criteria.matches(task, now))
            .cloned()
            .collect();
        debug!(
            kept = self.filtered_tasks.len(),
            total = self.tasks.len(),
            "filter_at: view recomputed"
        );
    }

    /// Replace the view with a stably sorted copy of canonical
    pub fn sort(&mut self, key: SortKey) {
        debug!(%key, "sort: called");
        let mut sorted = self.tasks.clone();
        sorted.sort_by(|a, b| key.compare(a, b));
        self.filtered_tasks = sorted;
    }

    /// Discard any filter/sort effect
    pub fn reset_filter_and_sort(&mut self) {
        debug!("reset_filter_and_sort: called");
        self.filtered_tasks = self.tasks.clone();
    }

    // ========================================================================
    // In-place edits
    // ========================================================================

    /// Replace the view task with the same id, keeping its position
    pub fn update_task(&mut self, updated: Task) -> UpdateOutcome {
        let Some(idx) = position_of(&self.filtered_tasks, &updated.id) else {
            warn!(id = %updated.id, "Cannot find task");
            return UpdateOutcome::NotFound;
        };

        if self.edit_policy == EditPolicy::WriteThrough {
            if let Some(canonical_idx) = position_of(&self.tasks, &updated.id) {
                self.tasks[canonical_idx] = updated.clone();
            }
        }

        debug!(id = %updated.id, idx, "update_task: replaced");
        self.filtered_tasks[idx] = updated;
        UpdateOutcome::Applied
    }

    /// Append image references to the view task with the given id
    pub fn update_task_images(&mut self, task_id: &str, images: impl Into<ImageRefs>) -> UpdateOutcome {
        let ImageRefs(images) = images.into();

        let Some(idx) = position_of(&self.filtered_tasks, task_id) else {
            warn!(id = %task_id, "Cannot find task");
            return UpdateOutcome::NotFound;
        };

        if self.edit_policy == EditPolicy::WriteThrough {
            if let Some(canonical_idx) = position_of(&self.tasks, task_id) {
                self.tasks[canonical_idx].attached_images.extend(images.iter().cloned());
            }
        }

        debug!(id = %task_id, added = images.len(), "update_task_images: appended");
        self.filtered_tasks[idx].attached_images.extend(images);
        UpdateOutcome::Applied
    }
}

// TaskBoard - In-memory task store and column layout for a task list screen

pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod generate;
pub mod layout;
pub mod models;
pub mod record;
pub mod render;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use detail::{Capture, FieldUpdate, TaskDraft};
pub use error::BoardError;
pub use filter::{SortKey, TaskFilter, parse_due_range};
pub use generate::{TaskGenerator, TaskSource, VecSource};
pub use layout::{ColumnLayout, ResizeGesture};
pub use models::{ColumnName, Priority, Status, Task, TaskHeader};
pub use record::{Record, position_of};
pub use render::{RenderOptions, render_table};
pub use store::{EditPolicy, ImageRefs, TaskStore, UpdateOutcome};

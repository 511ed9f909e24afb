//! CLI argument parsing for taskboard

use crate::filter::SortKey;
use crate::models::{ColumnName, Priority, Status};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(about = "In-memory task board with filter/sort views and a resizable column layout")]
#[command(version = env!("GIT_DESCRIBE"))]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Seed for the task generator
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of tasks to generate
    #[arg(short = 'n', long, global = true)]
    pub count: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the task list after applying filter, sort and layout changes
    List {
        /// Keep only tasks with this status (TO_DO, IN_PROGRESS, COMPLETED)
        #[arg(long)]
        status: Option<Status>,

        /// Keep only tasks with this priority (LOW, MEDIUM, HIGH)
        #[arg(long)]
        priority: Option<Priority>,

        /// Keep tasks due within N days; non-numeric input disables the clause
        #[arg(long, allow_hyphen_values = true)]
        due_within: Option<String>,

        /// Sort by dueDate, priority or status (replaces any filter)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Discard filter and sort before rendering
        #[arg(long)]
        reset: bool,

        /// New column order, comma separated (e.g. status,title,due-date,priority)
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<ColumnName>>,

        /// Drag a column from one position to another, as FROM:TO
        #[arg(long = "move", value_parser = parse_move)]
        moves: Vec<(usize, usize)>,

        /// Drag a column's resize handle, as COLUMN:START_X:END_X
        #[arg(long = "resize", value_parser = parse_resize, allow_hyphen_values = true)]
        resizes: Vec<ResizeArg>,

        /// Print the view as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Edit one task from the list, then show it
    Edit {
        /// Row index in the list (0-based)
        index: usize,

        /// Field update as name=value (title, description, dueDate, priority, status)
        #[arg(long = "set", value_parser = parse_assignment)]
        sets: Vec<(String, String)>,

        /// Attach an image reference (repeatable)
        #[arg(long = "attach")]
        attach: Vec<String>,

        /// Simulate the user cancelling the image picker
        #[arg(long, conflicts_with_all = ["attach", "deny_capture"])]
        cancel_capture: bool,

        /// Simulate the camera/gallery permission being refused
        #[arg(long, conflicts_with = "attach")]
        deny_capture: bool,
    },
}

/// One resize drag from the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeArg {
    pub column: ColumnName,
    pub start_x: f64,
    pub end_x: f64,
}

fn parse_move(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got '{}'", s))?;
    let from = from.trim().parse().map_err(|e| format!("bad FROM in '{}': {}", s, e))?;
    let to = to.trim().parse().map_err(|e| format!("bad TO in '{}': {}", s, e))?;
    Ok((from, to))
}

fn parse_resize(s: &str) -> Result<ResizeArg, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(end), Some(start), Some(column)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected COLUMN:START_X:END_X, got '{}'", s));
    };
    Ok(ResizeArg {
        column: column.parse().map_err(|e| format!("{}", e))?,
        start_x: start.trim().parse().map_err(|e| format!("bad START_X in '{}': {}", s, e))?,
        end_x: end.trim().parse().map_err(|e| format!("bad END_X in '{}': {}", s, e))?,
    })
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{}'", s))
}

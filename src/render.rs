// Row projection and plain-text table rendering

use crate::layout::ColumnLayout;
use crate::models::{ColumnName, Task, TaskHeader};
use colored::Colorize;

pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%Y";
pub const EMPTY_MESSAGE: &str = "No tasks available";

/// Widest cell the text renderer will pad to; layout widths themselves are unbounded
pub const MAX_CELL_CHARS: usize = u16::MAX as usize;

/// Rendering knobs for [`render_table`]
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub date_format: String,
    /// Pixels per character cell when mapping column widths to text
    pub px_per_char: f64,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            px_per_char: 8.0,
            color: true,
        }
    }
}

/// Text shown for one task under one column
pub fn cell_value(task: &Task, column: ColumnName, date_format: &str) -> String {
    match column {
        ColumnName::Title => task.title.clone(),
        ColumnName::DueDate => task.due_date.format(date_format).to_string(),
        ColumnName::Priority => task.priority.to_string(),
        ColumnName::Status => task.status.to_string(),
    }
}

/// Cells for a task in the given column order
pub fn project_row(task: &Task, columns: &[TaskHeader], date_format: &str) -> Vec<String> {
    columns
        .iter()
        .map(|header| cell_value(task, header.name, date_format))
        .collect()
}

fn char_width(width_px: f64, px_per_char: f64) -> usize {
    if px_per_char <= 0.0 {
        return 1;
    }
    // Float-to-int casts saturate: infinity lands on usize::MAX, NaN on 0
    ((width_px / px_per_char).floor() as usize).clamp(1, MAX_CELL_CHARS)
}

/// Pad or truncate to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{}{}", text, " ".repeat(width - len))
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Header plus one line per task, laid out by the current columns and widths
pub fn render_table(tasks: &[Task], layout: &ColumnLayout, opts: &RenderOptions) -> String {
    let widths: Vec<usize> = layout
        .columns()
        .iter()
        .map(|h| char_width(layout.width(h.name), opts.px_per_char))
        .collect();

    let header = layout
        .columns()
        .iter()
        .zip(&widths)
        .map(|(h, w)| fit(h.name.as_str(), *w))
        .collect::<Vec<_>>()
        .join(" ");
    let header = if opts.color {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![header.trim_end().to_string()];
    if tasks.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
        return lines.join("\n");
    }

    for task in tasks {
        let row = project_row(task, layout.columns(), &opts.date_format)
            .iter()
            .zip(&widths)
            .map(|(cell, w)| fit(cell, *w))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

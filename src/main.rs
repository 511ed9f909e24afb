use clap::Parser;
use eyre::{Context, Result};
use std::io::IsTerminal;
use tracing::{debug, info};

use taskboard::cli::{Cli, Command, ResizeArg};
use taskboard::{
    BoardError, Capture, ColumnLayout, ColumnName, Config, SortKey, Task, TaskDraft, TaskFilter, TaskGenerator,
    TaskHeader, TaskStore, UpdateOutcome, parse_due_range, render_table,
};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize logging: {}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

/// Build the store and layout the screen renders from
fn build_board(config: &Config) -> (TaskStore, ColumnLayout) {
    let mut generator = match config.seed {
        Some(seed) => TaskGenerator::seeded(seed),
        None => TaskGenerator::new(),
    }
    .with_horizon_days(config.due_horizon_days);

    let mut store = TaskStore::new(config.edit_policy);
    store.initialize(config.task_count, &mut generator);

    let layout = ColumnLayout::new(config.viewport_width)
        .with_min_width_ratio(config.min_width_ratio)
        .with_max_width_ratio(config.max_width_ratio);

    (store, layout)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(count) = cli.count {
        config.task_count = count;
    }
    info!(task_count = config.task_count, edit_policy = ?config.edit_policy, "Loaded config");

    let (mut store, mut layout) = build_board(&config);

    match cli.command {
        Command::List {
            status,
            priority,
            due_within,
            sort,
            reset,
            columns,
            moves,
            resizes,
            json,
        } => {
            let criteria = TaskFilter {
                status,
                priority,
                due_within_days: due_within.as_deref().and_then(parse_due_range),
            };
            apply_view(&mut store, &criteria, sort, reset);
            apply_layout(&mut layout, columns, &moves, &resizes)?;

            if json {
                println!("{}", serde_json::to_string_pretty(store.filtered_tasks())?);
            } else {
                print_table(&config, store.filtered_tasks(), &layout);
            }
        }
        Command::Edit {
            index,
            sets,
            attach,
            cancel_capture,
            deny_capture,
        } => {
            cmd_edit(&config, &mut store, &layout, index, &sets, attach, cancel_capture, deny_capture)?;
        }
    }

    Ok(())
}

fn apply_view(store: &mut TaskStore, criteria: &TaskFilter, sort: Option<SortKey>, reset: bool) {
    if !criteria.is_empty() {
        store.filter(criteria);
    }
    if let Some(key) = sort {
        store.sort(key);
    }
    if reset {
        store.reset_filter_and_sort();
    }
}

fn apply_layout(
    layout: &mut ColumnLayout,
    columns: Option<Vec<ColumnName>>,
    moves: &[(usize, usize)],
    resizes: &[ResizeArg],
) -> Result<()> {
    if let Some(names) = columns {
        let order: Vec<TaskHeader> = names
            .iter()
            .filter_map(|name| layout.columns().iter().find(|h| h.name == *name).cloned())
            .collect();
        layout.reorder(order).context("Failed to reorder columns")?;
    }

    for (from, to) in moves {
        layout.move_column(*from, *to).context("Failed to move column")?;
    }

    for resize in resizes {
        let gesture = layout.begin_resize(resize.column, resize.start_x);
        let width = layout.update_resize(&gesture, resize.end_x);
        debug!(column = %resize.column, width, "Resized column");
    }

    Ok(())
}

fn print_table(config: &Config, tasks: &[Task], layout: &ColumnLayout) {
    let mut opts = config.render_options();
    opts.color = std::io::stdout().is_terminal();
    println!("{}", render_table(tasks, layout, &opts));
}

#[allow(clippy::too_many_arguments)]
fn cmd_edit(
    config: &Config,
    store: &mut TaskStore,
    layout: &ColumnLayout,
    index: usize,
    sets: &[(String, String)],
    attach: Vec<String>,
    cancel_capture: bool,
    deny_capture: bool,
) -> Result<()> {
    let task = store
        .filtered_tasks()
        .get(index)
        .cloned()
        .ok_or_else(|| BoardError::NotFound(format!("row {}", index)))?;
    let id = task.id.clone();
    let mut draft = TaskDraft::new(task);

    for (field, value) in sets {
        draft
            .set(field, value)
            .with_context(|| format!("Failed to set {}", field))?;
    }

    let capture = if cancel_capture {
        Some(Capture::Cancelled)
    } else if deny_capture {
        Some(Capture::PermissionDenied)
    } else if !attach.is_empty() {
        Some(Capture::Captured(attach))
    } else {
        None
    };

    if let Some(capture) = capture {
        match draft.attach(store, capture) {
            Ok(count) => debug!(count, "Attached images"),
            Err(e) => eprintln!("{}", e),
        }
    }

    if draft.save(store) == UpdateOutcome::NotFound {
        eprintln!("Task {} is no longer in the list; edit discarded", id);
    }

    let edited: Vec<Task> = store.get(&id).cloned().into_iter().collect();
    print_table(config, &edited, layout);
    println!("{}", serde_json::to_string_pretty(&edited)?);
    Ok(())
}

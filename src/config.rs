//! Configuration for taskboard

use crate::generate::DEFAULT_HORIZON_DAYS;
use crate::layout::DEFAULT_MIN_WIDTH_RATIO;
use crate::render::{DEFAULT_DATE_FORMAT, RenderOptions};
use crate::store::EditPolicy;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of synthetic tasks generated at startup
    #[serde(default = "default_task_count")]
    pub task_count: usize,

    /// Viewport width in pixels; column widths are measured against it
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f64,

    /// Column width floor as a fraction of the viewport
    #[serde(default = "default_min_width_ratio")]
    pub min_width_ratio: f64,

    /// Optional column width ceiling as a fraction of the viewport
    #[serde(default)]
    pub max_width_ratio: Option<f64>,

    /// Pixels per character cell when printing the table
    #[serde(default = "default_px_per_char")]
    pub px_per_char: f64,

    /// chrono format string for the Due Date column
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub edit_policy: EditPolicy,

    /// Upper bound for the per-task due date horizon, clamped to `MAX_HORIZON_DAYS`
    #[serde(default = "default_due_horizon_days")]
    pub due_horizon_days: u32,

    /// Fixed seed for the task generator
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_task_count() -> usize {
    20
}

fn default_viewport_width() -> f64 {
    390.0
}

fn default_min_width_ratio() -> f64 {
    DEFAULT_MIN_WIDTH_RATIO
}

fn default_px_per_char() -> f64 {
    8.0
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_due_horizon_days() -> u32 {
    DEFAULT_HORIZON_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task_count: default_task_count(),
            viewport_width: default_viewport_width(),
            min_width_ratio: default_min_width_ratio(),
            max_width_ratio: None,
            px_per_char: default_px_per_char(),
            date_format: default_date_format(),
            edit_policy: EditPolicy::default(),
            due_horizon_days: default_due_horizon_days(),
            seed: None,
            log_level: None,
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from(config_path);
        }

        for path in Self::default_paths().iter() {
            if path.exists() {
                return Self::load_from(path);
            }
        }

        debug!("Config::load: no config file found, using defaults");
        Ok(Config::default())
    }

    /// Read just the log level so logging can start before the full load
    pub fn load_log_level(path: Option<&PathBuf>) -> Option<String> {
        Self::load(path).ok().and_then(|config| config.log_level)
    }

    fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("taskboard").join("config.yml")),
            Some(PathBuf::from("taskboard.yml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "Config::load_from: loaded");
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            date_format: self.date_format.clone(),
            px_per_char: self.px_per_char,
            color: true,
        }
    }
}

// Synthetic task generation for populating a fresh board

use crate::models::{Priority, Status, Task};
use chrono::{DateTime, TimeDelta, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_HORIZON_DAYS: u32 = 10;
/// Largest accepted horizon, roughly a thousand years
pub const MAX_HORIZON_DAYS: u32 = 365_250;

const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do", "eiusmod", "tempor",
    "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis",
    "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
];

const MS_PER_DAY: i64 = 86_400_000;

/// Supplier of the initial task batch
///
/// Implementations must return exactly `count` tasks with unique ids.
pub trait TaskSource {
    fn generate(&mut self, count: usize) -> Vec<Task>;
}

/// Random task generator
///
/// Each task is due somewhere between now and a per-task horizon of
/// 1..=`horizon_days` days.
pub struct TaskGenerator {
    rng: StdRng,
    horizon_days: u32,
}

impl TaskGenerator {
    /// Generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Generator with a fixed seed; field values are reproducible, ids are not
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }

    /// Clamped to `1..=MAX_HORIZON_DAYS`
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        if days > MAX_HORIZON_DAYS {
            warn!(days, max = MAX_HORIZON_DAYS, "with_horizon_days: clamping horizon");
        }
        self.horizon_days = days.clamp(1, MAX_HORIZON_DAYS);
        self
    }

    /// Generate `count` tasks relative to the given instant
    pub fn generate_at(&mut self, count: usize, now: DateTime<Utc>) -> Vec<Task> {
        debug!(count, horizon_days = self.horizon_days, "generate_at: called");
        (0..count).map(|_| self.task(now)).collect()
    }

    fn task(&mut self, now: DateTime<Utc>) -> Task {
        let horizon = self.rng.random_range(1..=self.horizon_days) as i64;
        let offset_ms = self.rng.random_range(0..=horizon * MS_PER_DAY);

        Task {
            id: Uuid::now_v7().to_string(),
            title: self.words(5),
            description: format!("{} {}", self.sentence(), self.sentence()),
            due_date: TimeDelta::try_milliseconds(offset_ms)
                .and_then(|offset| now.checked_add_signed(offset))
                .unwrap_or(now),
            priority: *Priority::ALL.choose(&mut self.rng).unwrap_or(&Priority::Low),
            status: *Status::ALL.choose(&mut self.rng).unwrap_or(&Status::ToDo),
            attached_images: Vec::new(),
        }
    }

    fn words(&mut self, n: usize) -> String {
        (0..n)
            .map(|_| *LOREM.choose(&mut self.rng).unwrap_or(&"lorem"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence(&mut self) -> String {
        let len = self.rng.random_range(4..=10);
        let body = self.words(len);
        let mut chars = body.chars();
        match chars.next() {
            Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }
}

impl Default for TaskGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSource for TaskGenerator {
    fn generate(&mut self, count: usize) -> Vec<Task> {
        self.generate_at(count, Utc::now())
    }
}

/// Fixed task list, handed out in order
pub struct VecSource(pub Vec<Task>);

impl TaskSource for VecSource {
    fn generate(&mut self, count: usize) -> Vec<Task> {
        self.0.iter().take(count).cloned().collect()
    }
}

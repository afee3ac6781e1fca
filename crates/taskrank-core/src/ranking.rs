//! Deterministic ordering of scored tasks.
//!
//! Sort key, in order:
//! 1. `priority_score`, highest first
//! 2. `deadline`, soonest first (missing counts as the configured default)
//! 3. `importance`, highest first (missing counts as the configured default)
//!
//! The underlying sort is stable, so tasks equal on all three keys keep
//! their input order.

use std::cmp::Ordering;

use crate::config::{EngineConfig, TaskDefaults};
use crate::task::ScoredTask;

/// Orders scored tasks.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    defaults: TaskDefaults,
}

impl Ranker {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            defaults: config.defaults,
        }
    }

    /// Ranking order between two scored tasks.
    pub fn compare(&self, a: &ScoredTask, b: &ScoredTask) -> Ordering {
        b.priority_score
            .total_cmp(&a.priority_score)
            .then_with(|| self.deadline(a).cmp(&self.deadline(b)))
            .then_with(|| self.importance(b).cmp(&self.importance(a)))
    }

    /// Sort in place.
    pub fn sort(&self, tasks: &mut [ScoredTask]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }

    /// Consume a batch and return it ranked.
    pub fn rank(&self, mut tasks: Vec<ScoredTask>) -> Vec<ScoredTask> {
        self.sort(&mut tasks);
        tasks
    }

    fn deadline(&self, task: &ScoredTask) -> i64 {
        task.task.deadline.unwrap_or(self.defaults.deadline)
    }

    fn importance(&self, task: &ScoredTask) -> i64 {
        task.task.importance.unwrap_or(self.defaults.importance)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to rank with the default config
pub fn rank(tasks: Vec<ScoredTask>) -> Vec<ScoredTask> {
    Ranker::new().rank(tasks)
}

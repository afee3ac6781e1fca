//! The priority engine: one validated configuration shared by a scorer and
//! a ranker, plus the batch entry points built on them.

use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{ConfigError, RecordError};
use crate::ranking::Ranker;
use crate::record::{normalize_batch, TaskRecord};
use crate::scoring::Scorer;
use crate::task::{ScoredTask, TaskInput};

/// Scores and ranks tasks under a fixed configuration.
///
/// The configuration is validated on construction and cannot change
/// afterwards; build a new engine to use different weights.
#[derive(Debug, Clone, Copy)]
pub struct PriorityEngine {
    config: EngineConfig,
    scorer: Scorer,
    ranker: Ranker,
}

impl PriorityEngine {
    /// Engine with the built-in weights and thresholds.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        Self {
            config,
            scorer: Scorer::new(),
            ranker: Ranker::with_config(&config),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config,
            scorer: Scorer::with_config(config)?,
            ranker: Ranker::with_config(&config),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    pub fn score(&self, task: TaskInput) -> ScoredTask {
        self.scorer.score(task)
    }

    /// Score a raw JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if `value` is not an object.
    pub fn score_value(&self, value: &Value) -> Result<ScoredTask, RecordError> {
        Ok(self.score(TaskInput::from_value(value)?))
    }

    pub fn rank(&self, tasks: Vec<ScoredTask>) -> Vec<ScoredTask> {
        self.ranker.rank(tasks)
    }

    /// Score every task, then rank the batch.
    pub fn prioritize(&self, tasks: impl IntoIterator<Item = TaskInput>) -> Vec<ScoredTask> {
        self.rank(self.scorer.score_all(tasks))
    }

    /// Normalize a JSON batch (array or single object), then prioritize it.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the batch or any element has the wrong
    /// shape. Nothing is scored in that case.
    pub fn prioritize_value(&self, value: &Value) -> Result<Vec<ScoredTask>, RecordError> {
        Ok(self.prioritize(normalize_batch(value)?))
    }

    /// Prioritize stored rows, writing the computed fields back onto them.
    ///
    /// Completed rows are left untouched and excluded from the result
    /// unless `include_completed` is set.
    pub fn prioritize_records(
        &self,
        records: &mut [TaskRecord],
        include_completed: bool,
    ) -> Vec<ScoredTask> {
        let mut scored = Vec::with_capacity(records.len());
        for record in records
            .iter_mut()
            .filter(|record| include_completed || !record.is_completed)
        {
            let task = self.score(record.to_input());
            record.apply(&task);
            scored.push(task);
        }
        self.rank(scored)
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new()
    }
}

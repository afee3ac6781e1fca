//! Task priority scoring.
//!
//! Calculates a priority score (0-100) from three factors:
//! - Deadline proximity (urgency; overdue and due-today are maximal)
//! - User-defined importance (1-10, rescaled to 0-100)
//! - Effort estimation (shorter tasks score higher for quick wins)
//!
//! A feasibility check compares the estimate with the working hours left
//! before the deadline. It is reported alongside the score and never
//! changes the score or the category.

use crate::config::{EngineConfig, TaskDefaults};
use crate::error::ConfigError;
use crate::task::{Category, ScoreDetails, ScoredTask, TaskInput, COMPUTED_FIELDS};

/// Estimates below this many hours are scored as if they took this long.
const MIN_EFFORT_HOURS: f64 = 0.5;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Urgency sub-score (0-100) for a deadline in days.
///
/// - Due today or overdue: 100
/// - 1-2 days: 90 - 10/day (80, 70)
/// - Later: 100 / (days/2 + 1), so day 3 drops to 40
///
/// The jump from 70 to 40 between day 2 and day 3 is part of the curve.
pub fn urgency_score(deadline: i64) -> f64 {
    let days = deadline.max(0) as f64;
    if days <= 0.0 {
        100.0
    } else if days <= 2.0 {
        90.0 - days * 10.0
    } else {
        100.0 / (days * 0.5 + 1.0)
    }
}

/// Importance sub-score: linear rescale of a 1-10 rating. Not clamped.
pub fn importance_score(importance: i64) -> f64 {
    importance as f64 * 10.0
}

/// Effort sub-score (0-100): 100 / (hours + 1), with hours floored at 0.5.
pub fn effort_score(estimated_time: f64) -> f64 {
    100.0 / (estimated_time.max(MIN_EFFORT_HOURS) + 1.0)
}

/// Task attributes after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAttributes {
    pub importance: i64,
    pub deadline: i64,
    pub estimated_time: f64,
}

impl ResolvedAttributes {
    pub fn resolve(task: &TaskInput, defaults: &TaskDefaults) -> Self {
        Self {
            importance: task.importance.unwrap_or(defaults.importance),
            deadline: task.deadline.unwrap_or(defaults.deadline),
            estimated_time: task
                .estimated_time
                .filter(|hours| hours.is_finite())
                .unwrap_or(defaults.estimated_time),
        }
    }
}

/// Outcome of the capacity check.
#[derive(Debug, Clone, PartialEq)]
pub struct Feasibility {
    pub feasible: bool,
    pub available_hours: f64,
    pub reason: Option<String>,
}

/// Priority scorer for tasks
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    config: EngineConfig,
}

impl Scorer {
    /// Create a scorer with the default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a task.
    ///
    /// Never fails: missing or non-finite attributes fall back to the
    /// configured defaults and out-of-range values are absorbed by the
    /// final clamp.
    pub fn score(&self, mut task: TaskInput) -> ScoredTask {
        let attrs = ResolvedAttributes::resolve(&task, &self.config.defaults);

        // 1. Feasibility (informational only)
        let feasibility = self.check_feasibility(&attrs);

        // 2-4. Sub-scores
        let urgency = urgency_score(attrs.deadline);
        let importance = importance_score(attrs.importance);
        let effort = effort_score(attrs.estimated_time);

        // 5. Weighted composite
        let weights = self.config.weights;
        let raw = importance * weights.importance
            + urgency * weights.urgency
            + effort * weights.effort;
        let priority_score = round2(raw.clamp(0.0, 100.0));

        // 6. Category from the rounded score
        let category = self.categorize(priority_score);

        for key in COMPUTED_FIELDS {
            task.extra.remove(key);
        }

        ScoredTask {
            task,
            priority_score,
            category,
            feasible: feasibility.feasible,
            reason: feasibility.reason,
            details: ScoreDetails {
                urgency_score: round2(urgency),
                importance_score: round2(importance),
                effort_score: round2(effort),
                weights,
            },
        }
    }

    /// Compare the estimate with the hours available before the deadline.
    ///
    /// A deadline of today or earlier still counts as one working day.
    pub fn check_feasibility(&self, attrs: &ResolvedAttributes) -> Feasibility {
        let hours_per_day = self.config.capacity.hours_per_day;
        let available_hours = attrs.deadline.max(1) as f64 * hours_per_day;
        let feasible = attrs.estimated_time <= available_hours;
        let reason = (!feasible).then(|| {
            format!(
                "Estimated time ({}h) exceeds available time ({}h at {}h/day).",
                attrs.estimated_time, available_hours, hours_per_day
            )
        });

        Feasibility {
            feasible,
            available_hours,
            reason,
        }
    }

    /// Map a composite score onto a category.
    pub fn categorize(&self, score: f64) -> Category {
        let thresholds = self.config.thresholds;
        if score >= thresholds.high {
            Category::High
        } else if score >= thresholds.medium {
            Category::Medium
        } else {
            Category::Low
        }
    }

    /// Score every task, preserving input order.
    pub fn score_all(&self, tasks: impl IntoIterator<Item = TaskInput>) -> Vec<ScoredTask> {
        tasks.into_iter().map(|task| self.score(task)).collect()
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to score a single task with the default config
pub fn score(task: TaskInput) -> ScoredTask {
    Scorer::new().score(task)
}

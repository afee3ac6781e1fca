//! Task records consumed and produced by the engine.
//!
//! [`TaskInput`] carries the three scored attributes plus any other fields
//! the caller attached. [`ScoredTask`] embeds the input unchanged and adds
//! the computed fields, so unknown fields pass through by composition.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::ScoringWeights;

/// Field names the scorer writes. Input fields with these names are
/// replaced, never duplicated.
pub const COMPUTED_FIELDS: [&str; 5] =
    ["priority_score", "category", "feasible", "reason", "details"];

/// A task as handed to the scorer.
///
/// The scored attributes are optional: a missing value falls back to the
/// engine's configured defaults at scoring time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    /// 1-10 scale (not enforced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i64>,
    /// Days remaining; zero is due today, negative is overdue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<i64>,
    /// Hours required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    /// Any other fields (id, title, ...), carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskInput {
    pub fn new(importance: i64, deadline: i64, estimated_time: f64) -> Self {
        Self {
            importance: Some(importance),
            deadline: Some(deadline),
            estimated_time: Some(estimated_time),
            extra: Map::new(),
        }
    }

    /// Attach a passthrough field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Passthrough `id`, if present.
    pub fn id(&self) -> Option<&Value> {
        self.extra.get("id")
    }

    /// Passthrough `title`, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}

/// Coarse priority bucket derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "High Priority")]
    High,
    #[serde(rename = "Medium Priority")]
    Medium,
    #[serde(rename = "Low Priority")]
    Low,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::High => "High Priority",
            Category::Medium => "Medium Priority",
            Category::Low => "Low Priority",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sub-scores and weights behind a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub urgency_score: f64,
    pub importance_score: f64,
    pub effort_score: f64,
    pub weights: ScoringWeights,
}

/// A task enriched with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: TaskInput,
    /// Composite score in [0, 100], two decimals
    pub priority_score: f64,
    pub category: Category,
    pub feasible: bool,
    /// Why the task is infeasible; `None` when it fits
    #[serde(default)]
    pub reason: Option<String>,
    pub details: ScoreDetails,
}

impl ScoredTask {
    /// Drop the computed fields and recover the input.
    pub fn into_input(self) -> TaskInput {
        self.task
    }
}

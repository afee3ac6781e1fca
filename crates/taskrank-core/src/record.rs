//! Conversion of source representations into [`TaskInput`].
//!
//! Tasks reach the engine either as loose JSON objects (ad-hoc batches) or
//! as persisted [`TaskRecord`] rows. Both are normalized here, once, so the
//! scorer only ever sees `TaskInput`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_kind, RecordError};
use crate::task::{ScoredTask, TaskInput};

/// Parse a number leniently: JSON numbers and numeric strings. Non-finite
/// results are rejected.
pub(crate) fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Parse an integer leniently; fractional values are truncated toward zero.
pub(crate) fn lenient_i64(value: &Value) -> Option<i64> {
    let exact = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    // `as` saturates for values beyond the i64 range.
    exact.or_else(|| lenient_f64(value).map(|n| n.trunc() as i64))
}

impl TaskInput {
    /// Build a task from any JSON object.
    ///
    /// `importance`, `deadline` and `estimated_time` are read leniently;
    /// values that cannot be read as numbers are dropped so the scorer
    /// falls back to its defaults. Every other key is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if `value` is not an object.
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject {
            found: json_kind(value),
        })?;
        Ok(Self::from_map(object.clone()))
    }

    fn from_map(mut fields: Map<String, Value>) -> Self {
        let importance = fields.remove("importance").as_ref().and_then(lenient_i64);
        let deadline = fields.remove("deadline").as_ref().and_then(lenient_i64);
        let estimated_time = fields.remove("estimated_time").as_ref().and_then(lenient_f64);
        Self {
            importance,
            deadline,
            estimated_time,
            extra: fields,
        }
    }
}

/// Normalize a batch: an array of task objects, or a single object.
///
/// # Errors
///
/// Returns [`RecordError::InBatch`] naming the first element that is not an
/// object, or [`RecordError::NotABatch`] for any other top-level value.
pub fn normalize_batch(value: &Value) -> Result<Vec<TaskInput>, RecordError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                TaskInput::from_value(item).map_err(|source| RecordError::InBatch {
                    index,
                    source: Box::new(source),
                })
            })
            .collect(),
        Value::Object(_) => Ok(vec![TaskInput::from_value(value)?]),
        other => Err(RecordError::NotABatch {
            found: json_kind(other),
        }),
    }
}

fn default_category() -> String {
    "Pending".to_string()
}

/// A persisted task row.
///
/// `priority_score`, `category` and `reason` are written back after
/// scoring; everything else is owned by whoever stores the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    /// Days remaining
    pub deadline: i64,
    /// Hours required
    pub estimated_time: f64,
    /// 1-10 scale
    pub importance: i64,
    #[serde(default)]
    pub priority_score: f64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TaskRecord {
    pub fn new(
        title: impl Into<String>,
        importance: i64,
        deadline: i64,
        estimated_time: f64,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            deadline,
            estimated_time,
            importance,
            priority_score: 0.0,
            category: default_category(),
            reason: None,
            is_completed: false,
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// The fields the scorer needs, plus `id` and `title` for the caller.
    pub fn to_input(&self) -> TaskInput {
        let mut input = TaskInput::new(self.importance, self.deadline, self.estimated_time)
            .with_field("title", self.title.clone());
        if let Some(id) = self.id {
            input = input.with_field("id", id);
        }
        input
    }

    /// Copy the computed fields of a scored task onto this row.
    pub fn apply(&mut self, scored: &ScoredTask) {
        self.priority_score = scored.priority_score;
        self.category = scored.category.label().to_string();
        self.reason = scored.reason.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score;
    use serde_json::json;

    #[test]
    fn from_value_reads_numbers_and_keeps_extras() {
        let task = TaskInput::from_value(&json!({
            "id": 3,
            "title": "Pay invoice",
            "importance": 7,
            "deadline": 2,
            "estimated_time": 0.75,
            "owner": "ops"
        }))
        .unwrap();

        assert_eq!(task.importance, Some(7));
        assert_eq!(task.deadline, Some(2));
        assert_eq!(task.estimated_time, Some(0.75));
        assert_eq!(task.extra["owner"], json!("ops"));
        assert!(!task.extra.contains_key("importance"));
    }

    #[test]
    fn from_value_accepts_numeric_strings_and_truncates_fractions() {
        let task = TaskInput::from_value(&json!({
            "importance": "8",
            "deadline": 2.9,
            "estimated_time": " 1.5 "
        }))
        .unwrap();

        assert_eq!(task.importance, Some(8));
        assert_eq!(task.deadline, Some(2));
        assert_eq!(task.estimated_time, Some(1.5));
    }

    #[test]
    fn from_value_drops_malformed_numbers() {
        let task = TaskInput::from_value(&json!({
            "importance": "very",
            "deadline": null,
            "estimated_time": [1, 2]
        }))
        .unwrap();

        assert_eq!(task, TaskInput::default());
        let scored = score(task);
        assert_eq!(scored.details.importance_score, 50.0);
    }

    #[test]
    fn from_value_rejects_non_objects() {
        for value in [json!(null), json!(5), json!("task"), json!([1])] {
            assert!(matches!(
                TaskInput::from_value(&value),
                Err(RecordError::NotAnObject { .. })
            ));
        }
    }

    #[test]
    fn lenient_i64_saturates_huge_values() {
        assert_eq!(lenient_i64(&json!(1e300)), Some(i64::MAX));
        assert_eq!(lenient_i64(&json!(-1e300)), Some(i64::MIN));
        assert_eq!(lenient_i64(&json!(-3)), Some(-3));
        assert_eq!(lenient_i64(&json!(true)), None);
    }

    #[test]
    fn normalize_batch_shapes() {
        assert!(normalize_batch(&json!([])).unwrap().is_empty());
        assert_eq!(normalize_batch(&json!({"importance": 2})).unwrap().len(), 1);
        assert_eq!(
            normalize_batch(&json!([{"importance": 2}, {"deadline": 1}]))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn normalize_batch_reports_bad_element() {
        let err = normalize_batch(&json!([{"importance": 2}, "oops"])).unwrap_err();
        match err {
            RecordError::InBatch { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, RecordError::NotAnObject { found: "string" }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            normalize_batch(&json!(12)),
            Err(RecordError::NotABatch { found: "number" })
        ));
    }

    #[test]
    fn record_defaults_when_deserialized() {
        let record: TaskRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "Draft plan",
            "deadline": 4,
            "estimated_time": 3.0,
            "importance": 6
        }))
        .unwrap();

        assert_eq!(record.category, "Pending");
        assert_eq!(record.priority_score, 0.0);
        assert!(!record.is_completed);
    }

    #[test]
    fn record_to_input_and_apply() {
        let mut record = TaskRecord::new("Migrate DB", 10, 1, 20.0).with_id(42);
        let input = record.to_input();
        assert_eq!(input.id(), Some(&json!(42)));
        assert_eq!(input.title(), Some("Migrate DB"));

        let scored = score(input);
        record.apply(&scored);
        assert_eq!(record.priority_score, 81.48);
        assert_eq!(record.category, "High Priority");
        assert!(record.reason.as_deref().unwrap().contains("20h"));
    }
}

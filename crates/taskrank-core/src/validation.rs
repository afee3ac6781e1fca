//! Field-level validation for user-supplied tasks.
//!
//! The scorer never rejects a task. This module is the stricter gate a
//! caller can put in front of it when tasks come from users:
//! - `importance`: required integer in 1..=10
//! - `deadline`: required integer (days)
//! - `estimated_time`: required number, strictly positive
//! - `title`: optional string of at most 200 characters

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{json_kind, CoreError, RecordError, ValidationError};
use crate::task::TaskInput;

const MIN_IMPORTANCE: i64 = 1;
const MAX_IMPORTANCE: i64 = 10;
const MAX_TITLE_CHARS: usize = 200;

/// A rejected task and why, keyed by field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidTask {
    pub task: Value,
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Outcome of validating a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid_count: usize,
    pub invalid_count: usize,
    pub valid_tasks: Vec<TaskInput>,
    pub invalid_tasks: Vec<InvalidTask>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_count == 0
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if any task was rejected.
    pub fn ensure_valid(&self) -> Result<(), CoreError> {
        if self.is_valid() {
            return Ok(());
        }
        Err(CoreError::Validation {
            invalid: self.invalid_count,
            total: self.valid_count + self.invalid_count,
        })
    }
}

/// Strict integer: JSON integers or integral floats. Strings are accepted
/// when they parse as an integer.
fn strict_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn strict_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn required<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a Value, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
        Some(value) => Ok(value),
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn check_importance(object: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    let value = required(object, "importance")?;
    let importance =
        strict_i64(value).ok_or_else(|| invalid("importance", "A valid integer is required."))?;
    if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&importance) {
        return Err(invalid("importance", "Importance must be between 1 and 10."));
    }
    Ok(())
}

fn check_deadline(object: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    let value = required(object, "deadline")?;
    strict_i64(value).ok_or_else(|| invalid("deadline", "A valid integer is required."))?;
    Ok(())
}

fn check_estimated_time(object: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    let value = required(object, "estimated_time")?;
    let hours =
        strict_f64(value).ok_or_else(|| invalid("estimated_time", "A valid number is required."))?;
    if hours <= 0.0 {
        return Err(invalid("estimated_time", "Estimated time must be positive."));
    }
    Ok(())
}

fn check_title(object: &serde_json::Map<String, Value>) -> Result<(), ValidationError> {
    match object.get("title") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(title)) if title.chars().count() > MAX_TITLE_CHARS => Err(invalid(
            "title",
            "Ensure this field has no more than 200 characters.",
        )),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(invalid("title", "Not a valid string.")),
    }
}

/// Validate one task, returning the normalized input on success.
///
/// # Errors
///
/// Returns every field error found, not just the first.
pub fn validate_task(value: &Value) -> Result<TaskInput, Vec<ValidationError>> {
    let Some(object) = value.as_object() else {
        return Err(vec![ValidationError::NotAnObject {
            found: json_kind(value),
        }]);
    };

    let errors: Vec<ValidationError> = [
        check_importance(object),
        check_deadline(object),
        check_estimated_time(object),
        check_title(object),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    TaskInput::from_value(value).map_err(|_| {
        vec![ValidationError::NotAnObject {
            found: json_kind(value),
        }]
    })
}

/// Split a list of tasks into valid and invalid ones.
///
/// # Errors
///
/// Returns [`RecordError::NotABatch`] if `value` is not a list.
pub fn validate_batch(value: &Value) -> Result<ValidationReport, RecordError> {
    let items = value.as_array().ok_or(RecordError::NotABatch {
        found: json_kind(value),
    })?;

    let mut valid_tasks = Vec::new();
    let mut invalid_tasks = Vec::new();

    for item in items {
        match validate_task(item) {
            Ok(task) => valid_tasks.push(task),
            Err(errors) => {
                let mut by_field: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for error in errors {
                    by_field
                        .entry(error.field().to_string())
                        .or_default()
                        .push(error.to_string());
                }
                invalid_tasks.push(InvalidTask {
                    task: item.clone(),
                    errors: by_field,
                });
            }
        }
    }

    Ok(ValidationReport {
        valid_count: valid_tasks.len(),
        invalid_count: invalid_tasks.len(),
        valid_tasks,
        invalid_tasks,
    })
}

//! TOML-based engine configuration.
//!
//! Holds every constant the scoring formula depends on:
//! - Sub-score weights (importance / urgency / effort)
//! - Category thresholds
//! - Working hours per day used by the feasibility check
//! - Fallback values for fields missing from a task
//!
//! An [`EngineConfig`] is built once, validated, and then copied into the
//! scorer and ranker. Nothing mutates it while tasks are being scored.
//!
//! Configuration is stored at `~/.config/taskrank/engine.toml` unless
//! `TASKRANK_CONFIG` points elsewhere.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "TASKRANK_CONFIG";

/// Tolerance used when checking that the weights sum to 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Relative influence of each sub-score on the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_importance_weight")]
    pub importance: f64,
    #[serde(default = "default_urgency_weight")]
    pub urgency: f64,
    #[serde(default = "default_effort_weight")]
    pub effort: f64,
}

/// Score boundaries between categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    /// Scores at or above this are "High Priority"
    #[serde(default = "default_high_threshold")]
    pub high: f64,
    /// Scores at or above this (and below `high`) are "Medium Priority"
    #[serde(default = "default_medium_threshold")]
    pub medium: f64,
}

/// Capacity assumptions for the feasibility check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,
}

/// Values substituted for fields a task does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskDefaults {
    #[serde(default = "default_importance")]
    pub importance: i64,
    #[serde(default)]
    pub deadline: i64,
    #[serde(default)]
    pub estimated_time: f64,
}

/// Engine configuration.
///
/// Serialized to/from TOML. Every field has a default, so a partial file
/// only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub thresholds: CategoryThresholds,
    #[serde(default)]
    pub capacity: CapacityConfig,
    #[serde(default)]
    pub defaults: TaskDefaults,
}

// Default functions
fn default_importance_weight() -> f64 {
    0.45
}
fn default_urgency_weight() -> f64 {
    0.45
}
fn default_effort_weight() -> f64 {
    0.10
}
fn default_high_threshold() -> f64 {
    70.0
}
fn default_medium_threshold() -> f64 {
    40.0
}
fn default_hours_per_day() -> f64 {
    8.0
}
fn default_importance() -> i64 {
    5
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            importance: default_importance_weight(),
            urgency: default_urgency_weight(),
            effort: default_effort_weight(),
        }
    }
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            medium: default_medium_threshold(),
        }
    }
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
        }
    }
}

impl Default for TaskDefaults {
    fn default() -> Self {
        Self {
            importance: default_importance(),
            deadline: 0,
            estimated_time: 0.0,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: CategoryThresholds::default(),
            capacity: CapacityConfig::default(),
            defaults: TaskDefaults::default(),
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.importance + self.urgency + self.effort
    }

    /// Each weight must lie in [0.0, 1.0] and together they must sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("weights.importance", self.importance),
            ("weights.urgency", self.urgency),
            ("weights.effort", self.effort),
        ];

        for (key, weight) in weights {
            if !(0.0..=1.0).contains(&weight) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be in [0.0, 1.0], got {weight}"),
                });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                key: "weights".to_string(),
                message: format!("weights must sum to 1.0, got {sum}"),
            });
        }

        Ok(())
    }
}

impl CategoryThresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.medium) {
            return Err(ConfigError::InvalidValue {
                key: "thresholds.medium".to_string(),
                message: format!("must be in [0, 100], got {}", self.medium),
            });
        }
        if !(0.0..=100.0).contains(&self.high) {
            return Err(ConfigError::InvalidValue {
                key: "thresholds.high".to_string(),
                message: format!("must be in [0, 100], got {}", self.high),
            });
        }
        if self.medium >= self.high {
            return Err(ConfigError::InvalidValue {
                key: "thresholds".to_string(),
                message: format!(
                    "medium ({}) must be lower than high ({})",
                    self.medium, self.high
                ),
            });
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Check every invariant the scoring formula relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.thresholds.validate()?;

        let hours = self.capacity.hours_per_day;
        if !hours.is_finite() || hours <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "capacity.hours_per_day".to_string(),
                message: format!("must be a positive number, got {hours}"),
            });
        }

        let estimate = self.defaults.estimated_time;
        if !estimate.is_finite() || estimate < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "defaults.estimated_time".to_string(),
                message: format!("must be a non-negative number, got {estimate}"),
            });
        }

        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this schema or
    /// if the resulting configuration violates an invariant.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// `~/.config/taskrank/engine.toml`, or the `-dev` directory when
    /// `TASKRANK_ENV=dev`.
    pub fn default_path() -> PathBuf {
        config_dir().join("engine.toml")
    }

    /// Pick the configuration file: explicit path, then `TASKRANK_CONFIG`,
    /// then the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::default_path(),
        }
    }

    /// Load from disk, or return the default when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if it describes an invalid configuration.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).map_err(|e| match e {
                ConfigError::ParseFailed(message) => ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message,
                },
                other => other,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
            }
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| {
                                    invalid(format!("cannot parse '{value}' as number"))
                                })?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) => {
                        return Err(invalid("cannot assign to a section".to_string()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        if val.is_object() {
            return None;
        }
        Some(val.to_string())
    }

    /// Set a config value by dot-separated key.
    ///
    /// The change is applied only if the resulting configuration is still
    /// valid; otherwise `self` is left untouched. The weights must keep
    /// summing to 1.0, so changing one weight needs [`EngineConfig::set_many`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the new configuration fails validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_many(&[(key, value)])
    }

    /// Set several values at once, validating only the combined result.
    ///
    /// Either every assignment is applied or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if any key is unknown, any value cannot be parsed,
    /// or the resulting configuration fails validation.
    pub fn set_many(&mut self, assignments: &[(&str, &str)]) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        for (key, value) in assignments {
            Self::set_json_value_by_path(&mut json, key, value)?;
        }
        let candidate: EngineConfig = serde_json::from_value(json).map_err(|e| {
            let keys: Vec<&str> = assignments.iter().map(|(key, _)| *key).collect();
            ConfigError::InvalidValue {
                key: keys.join(", "),
                message: e.to_string(),
            }
        })?;
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    /// Every leaf key, in dot-path form.
    pub fn keys() -> Vec<String> {
        let json = serde_json::to_value(Self::default()).unwrap_or_default();
        let mut keys = Vec::new();
        if let Some(sections) = json.as_object() {
            for (section, fields) in sections {
                if let Some(fields) = fields.as_object() {
                    keys.extend(fields.keys().map(|field| format!("{section}.{field}")));
                }
            }
        }
        keys
    }
}

/// Returns `~/.config/taskrank[-dev]/` based on TASKRANK_ENV.
///
/// Set TASKRANK_ENV=dev to use the development directory. The directory is
/// not created here; [`EngineConfig::save_to`] creates it on write.
pub fn config_dir() -> PathBuf {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TASKRANK_ENV").unwrap_or_else(|_| "production".to_string());

    if env == "dev" {
        base_dir.join("taskrank-dev")
    } else {
        base_dir.join("taskrank")
    }
}

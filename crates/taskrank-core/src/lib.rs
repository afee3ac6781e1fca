//! # Taskrank Core Library
//!
//! Deterministic, explainable task prioritization. A task's importance,
//! deadline and estimated effort are turned into a 0-100 score, a category,
//! a feasibility verdict and a breakdown of how the score was reached.
//! Batches are then ordered with a fixed tie-break chain.
//!
//! ## Architecture
//!
//! - **Scorer**: pure function from one task to its scored form
//! - **Ranker**: total, stable ordering over scored tasks
//! - **Config**: immutable weights/thresholds shared by both, TOML-backed
//! - **Records**: normalization of loose JSON and stored rows into
//!   [`TaskInput`], plus stricter validation for user input
//!
//! Nothing in this crate logs or touches the filesystem while scoring;
//! only [`EngineConfig::load_from`] and [`EngineConfig::save_to`] do I/O.
//!
//! ## Key Components
//!
//! - [`PriorityEngine`]: configured scorer + ranker
//! - [`Scorer`]: single-task scoring
//! - [`Ranker`]: batch ordering
//! - [`EngineConfig`]: engine configuration management

pub mod config;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod record;
pub mod scoring;
pub mod task;
pub mod validation;

pub use config::{CapacityConfig, CategoryThresholds, EngineConfig, ScoringWeights, TaskDefaults};
pub use engine::PriorityEngine;
pub use error::{ConfigError, CoreError, RecordError, ValidationError};
pub use ranking::{rank, Ranker};
pub use record::{normalize_batch, TaskRecord};
pub use scoring::{score, Feasibility, Scorer};
pub use task::{Category, ScoreDetails, ScoredTask, TaskInput};
pub use validation::{validate_batch, validate_task, InvalidTask, ValidationReport};

//! Subcommand implementations and the helpers they share.

pub mod config;
pub mod prioritize;
pub mod rank;
pub mod score;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use taskrank_core::error::Result;
use taskrank_core::{CoreError, EngineConfig, PriorityEngine};

pub type CommandResult = Result<()>;

/// Settings shared by every subcommand.
pub struct Context {
    config_path: PathBuf,
}

impl Context {
    pub fn new(explicit_config: Option<PathBuf>) -> Self {
        Self {
            config_path: EngineConfig::resolve_path(explicit_config.as_deref()),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn load_config(&self) -> Result<EngineConfig> {
        let config = EngineConfig::load_from(&self.config_path)?;
        tracing::debug!("engine configuration from {}", self.config_path.display());
        Ok(config)
    }

    pub fn engine(&self) -> Result<PriorityEngine> {
        Ok(PriorityEngine::with_config(self.load_config()?)?)
    }
}

/// `None` and `-` both mean stdin.
pub fn is_stdin(source: Option<&Path>) -> bool {
    source.map_or(true, |p| p == Path::new("-"))
}

/// Read a JSON document from a file or stdin.
pub fn read_json(source: Option<&Path>) -> Result<serde_json::Value> {
    let text = match source {
        Some(path) if !is_stdin(source) => std::fs::read_to_string(path).map_err(|e| {
            CoreError::Custom(format!("failed to read {}: {e}", path.display()))
        })?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&text)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

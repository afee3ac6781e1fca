//! Score and rank a batch of tasks.
//!
//! Input is either an ad-hoc list of task objects (any extra fields are
//! passed through) or, with `--stored`, a list of stored task rows. Stored
//! rows that are completed are skipped unless `--include-completed` is set,
//! and `--write` saves the computed scores back into the input file.

use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::Value;
use taskrank_core::{validate_batch, CoreError, PriorityEngine, TaskRecord};

use super::{is_stdin, print_json, read_json, CommandResult, Context};

#[derive(Args)]
pub struct PrioritizeArgs {
    /// JSON file holding the tasks ("-" or omitted: stdin)
    file: Option<PathBuf>,
    /// Reject the whole batch if any task breaks the field rules
    #[arg(long)]
    strict: bool,
    /// Treat the input as stored task rows
    #[arg(long)]
    stored: bool,
    /// Also score completed rows
    #[arg(long, requires = "stored")]
    include_completed: bool,
    /// Write scores back into FILE
    #[arg(long, requires = "stored")]
    write: bool,
}

pub fn run(ctx: &Context, args: PrioritizeArgs) -> CommandResult {
    if args.write && is_stdin(args.file.as_deref()) {
        return Err(CoreError::Custom("--write needs a file argument".into()));
    }

    let engine = ctx.engine()?;
    let input = read_json(args.file.as_deref())?;

    if args.strict {
        check_strict(&input)?;
    }

    if args.stored {
        prioritize_stored(&engine, input, &args)
    } else {
        let ranked = engine.prioritize_value(&input)?;
        tracing::info!("prioritized {} task(s)", ranked.len());
        print_json(&ranked)
    }
}

fn check_strict(input: &Value) -> CommandResult {
    let batch = match input {
        Value::Object(_) => Value::Array(vec![input.clone()]),
        other => other.clone(),
    };
    let report = validate_batch(&batch)?;
    if report.is_valid() {
        return Ok(());
    }

    tracing::warn!("{} task(s) failed validation", report.invalid_count);
    print_json(&report.invalid_tasks)?;
    report.ensure_valid()
}

fn prioritize_stored(
    engine: &PriorityEngine,
    input: Value,
    args: &PrioritizeArgs,
) -> CommandResult {
    let mut records: Vec<TaskRecord> = serde_json::from_value(input)
        .map_err(|e| CoreError::Custom(format!("expected a list of stored tasks: {e}")))?;

    let completed = records.iter().filter(|r| r.is_completed).count();
    if completed > 0 && !args.include_completed {
        tracing::info!("skipping {completed} completed task(s)");
    }

    let ranked = engine.prioritize_records(&mut records, args.include_completed);
    tracing::info!("prioritized {} stored task(s)", ranked.len());

    if args.write {
        if let Some(path) = args.file.as_deref() {
            write_records(path, &records)?;
        }
    }
    print_json(&ranked)
}

fn write_records(path: &Path, records: &[TaskRecord]) -> CommandResult {
    let content = serde_json::to_string_pretty(records)?;
    std::fs::write(path, content + "\n")
        .map_err(|e| CoreError::Custom(format!("failed to write {}: {e}", path.display())))?;
    tracing::info!("wrote {} record(s) to {}", records.len(), path.display());
    Ok(())
}

//! Score tasks without ranking them.

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use taskrank_core::normalize_batch;

use super::{print_json, read_json, CommandResult, Context};

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file holding a task object or a list of them ("-" or omitted: stdin)
    file: Option<PathBuf>,
}

pub fn run(ctx: &Context, args: ScoreArgs) -> CommandResult {
    let engine = ctx.engine()?;
    let input = read_json(args.file.as_deref())?;

    match &input {
        Value::Object(_) => print_json(&engine.score_value(&input)?),
        _ => {
            let tasks = normalize_batch(&input)?;
            tracing::info!("scoring {} task(s)", tasks.len());
            print_json(&engine.scorer().score_all(tasks))
        }
    }
}

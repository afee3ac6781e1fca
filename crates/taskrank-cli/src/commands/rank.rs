//! Rank tasks that already carry their scores.

use std::path::PathBuf;

use clap::Args;
use taskrank_core::{CoreError, ScoredTask};

use super::{print_json, read_json, CommandResult, Context};

#[derive(Args)]
pub struct RankArgs {
    /// JSON file holding a list of scored tasks ("-" or omitted: stdin)
    file: Option<PathBuf>,
}

pub fn run(ctx: &Context, args: RankArgs) -> CommandResult {
    let engine = ctx.engine()?;
    let input = read_json(args.file.as_deref())?;
    let tasks: Vec<ScoredTask> = serde_json::from_value(input)
        .map_err(|e| CoreError::Custom(format!("expected a list of scored tasks: {e}")))?;

    tracing::info!("ranking {} task(s)", tasks.len());
    print_json(&engine.rank(tasks))
}

//! Check tasks against the field rules and report valid / invalid ones.

use std::path::PathBuf;

use clap::Args;
use taskrank_core::validate_batch;

use super::{print_json, read_json, CommandResult};

#[derive(Args)]
pub struct ValidateArgs {
    /// JSON file holding a list of tasks ("-" or omitted: stdin)
    file: Option<PathBuf>,
}

pub fn run(args: ValidateArgs) -> CommandResult {
    let input = read_json(args.file.as_deref())?;
    let report = validate_batch(&input)?;

    for invalid in &report.invalid_tasks {
        tracing::info!("rejected task: {:?}", invalid.errors);
    }
    print_json(&report)?;
    report.ensure_valid()
}

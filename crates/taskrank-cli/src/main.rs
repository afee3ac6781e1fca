use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskrank", version, about = "Taskrank CLI")]
struct Cli {
    /// Engine configuration file (default: $TASKRANK_CONFIG or ~/.config/taskrank/engine.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Log more (-v info, -vv debug); RUST_LOG is used when absent
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score tasks without ranking them
    Score(commands::score::ScoreArgs),
    /// Score and rank a batch of tasks
    Prioritize(commands::prioritize::PrioritizeArgs),
    /// Rank tasks that were already scored
    Rank(commands::rank::RankArgs),
    /// Check tasks against the field rules
    Validate(commands::validate::ValidateArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = commands::Context::new(cli.config);
    let result = match cli.command {
        Commands::Score(args) => commands::score::run(&ctx, args),
        Commands::Prioritize(args) => commands::prioritize::run(&ctx, args),
        Commands::Rank(args) => commands::rank::run(&ctx, args),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

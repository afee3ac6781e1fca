use clap::Subcommand;
use taskrank_core::{CoreError, EngineConfig};

use super::{print_json, CommandResult, Context};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file location
    Path,
    /// Get a config value
    Get {
        /// Config key (e.g. "weights.effort", "capacity.hours_per_day")
        key: String,
    },
    /// Set one or more config values
    ///
    /// Pairs given together are validated together, so weights can be
    /// changed as a group: `set weights.importance 0.5 weights.urgency 0.4`
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
        /// Further KEY VALUE pairs
        #[arg(value_name = "KEY VALUE")]
        more: Vec<String>,
    },
    /// List all config values
    List,
    /// List all config keys
    Keys,
    /// Reset config to defaults
    Reset,
}

pub fn run(ctx: &Context, action: ConfigAction) -> CommandResult {
    match action {
        ConfigAction::Path => {
            println!("{}", ctx.config_path().display());
        }
        ConfigAction::Get { key } => {
            let config = ctx.load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(CoreError::Custom(format!("unknown key: {key}"))),
            }
        }
        ConfigAction::Set { key, value, more } => {
            if more.len() % 2 != 0 {
                return Err(CoreError::Custom("expected KEY VALUE pairs".into()));
            }
            let mut assignments = vec![(key.as_str(), value.as_str())];
            assignments.extend(more.chunks(2).map(|pair| (pair[0].as_str(), pair[1].as_str())));

            let mut config = ctx.load_config()?;
            config.set_many(&assignments)?;
            config.save_to(ctx.config_path())?;
            for (key, value) in &assignments {
                tracing::info!("set {key} = {value} in {}", ctx.config_path().display());
            }
            println!("ok");
        }
        ConfigAction::List => {
            let config = ctx.load_config()?;
            print_json(&config)?;
        }
        ConfigAction::Keys => {
            for key in EngineConfig::keys() {
                println!("{key}");
            }
        }
        ConfigAction::Reset => {
            EngineConfig::default().save_to(ctx.config_path())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

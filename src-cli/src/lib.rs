//! StudyBuddy - Command-line client
//!
//! Every invocation opens the local store, verifies the stored token, runs
//! one page action and prints a JSON result with the notices it raised.

pub mod cli;
mod commands;
mod state;

use serde_json::Value;
use studybuddy_core::Config;

pub use cli::Cli;
pub use commands::CommandResult;
use state::AppState;

/// Resolve configuration from flags, then the environment, then defaults
pub fn config_for(cli: &Cli) -> studybuddy_core::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(dir) = &cli.data_dir {
        config.database_path = dir.join("studybuddy.db");
    }
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.trim().to_string();
    }

    config.validate()?;
    Ok(config)
}

pub async fn run(cli: Cli) -> anyhow::Result<CommandResult<Value>> {
    let config = config_for(&cli)?;
    let state = AppState::new(config)?;
    state.initialize().await?;

    Ok(execute(&state, cli).await)
}

async fn execute(state: &AppState, cli: Cli) -> CommandResult<Value> {
    let result = match commands::dispatch(state, cli.command).await {
        Ok(data) => CommandResult::ok(data),
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            CommandResult::err(e.to_string())
        }
    };

    result.with_notices(state.app().session().notifier().drain())
}

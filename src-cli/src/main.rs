use anyhow::Result;
use clap::Parser;
use studybuddy_lib::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    studybuddy_core::init_logging();

    let result = run(Cli::parse()).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

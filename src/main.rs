mod api;
mod app;
mod cli;
mod config;
mod error;
mod models;
mod render;
mod search;

use clap::Parser;
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let api = api::build_api(&cli.api_config()?, cli.demo)?;

    match cli.command {
        Command::Search { mode, term } => {
            cli::search::search(api.as_ref(), mode, &term, cli.format).await?
        }
        Command::Term { term } => cli::term::term(api.as_ref(), &term, cli.format).await?,
        Command::Shell => cli::shell::shell(api, cli.format).await?,
    }

    Ok(())
}

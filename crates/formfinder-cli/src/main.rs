//! FormFinder CLI
//!
//! Ask which IRS tax form fits your situation.

use anyhow::Result;
use clap::Parser;
use formfinder_core::{exit_codes, Config, FormFinderError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries results and the MCP stream
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<FormFinderError>()
            .map(|err| err.exit_code())
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Ask(args) => commands::ask::run(args, &config, cli.format).await,
        Commands::Status => commands::status::run(&config, cli.format).await,
        Commands::Forms => commands::forms::run(&config, cli.format).await,
        Commands::Form(args) => commands::form::run(args, &config, cli.format).await,
        Commands::SwitchMode => commands::switch_mode::run(&config, cli.format).await,
        Commands::Mcp => formfinder_mcp::start_server(config).await,
    }
}

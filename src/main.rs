// Triage - Clinic front desk and doctor queue
// Copyright (c) 2025 Triage Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use triage::cli::{load_cli_config, Cli, Commands};
use triage::config::LoggingConfig;
use triage::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging comes from the config file when it loads; commands report
    // config errors themselves, so fall back to console-only here
    let file_config = load_cli_config(cli.config.as_deref()).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Triage desk starting");

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.config.as_deref();
    match &cli.command {
        Commands::Init(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(config).await,
        Commands::Doctors(args) => args.execute(config).await,
        Commands::Medicines(args) => args.execute(config).await,
        Commands::AddDoctor(args) => args.execute(config).await,
        Commands::AddMedicine(args) => args.execute(config).await,
        Commands::Register(args) => args.execute(config).await,
        Commands::Queue(args) => args.execute(config).await,
        Commands::Attend(args) => args.execute(config).await,
        Commands::Remove(args) => args.execute(config).await,
        Commands::Status(args) => args.execute(config).await,
    }
}

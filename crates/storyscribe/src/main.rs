//! Storyscribe CLI binary.
//!
//! This binary provides command-line access to Storyscribe:
//! - Create and edit scripts
//! - Preview, generate and export versions
//! - Serve the JSON HTTP API

use clap::Parser;
use std::process::ExitCode;
use storyscribe::{StoryscribeConfig, open_workshop, telemetry};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Pick up OPENAI_API_KEY from .env
    let _ = dotenvy::dotenv();

    telemetry::init_console_telemetry(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => StoryscribeConfig::from_file(path)?,
        None => StoryscribeConfig::load()?,
    };
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }

    let workshop = open_workshop(&config)?;

    // Execute the requested command
    match cli.command {
        Commands::Scripts { format } => cli::list_scripts(&workshop, format).await?,
        Commands::New { title, brief } => cli::create_script(&workshop, title, brief).await?,
        Commands::Edit { id, title, brief } => {
            cli::edit_script(&workshop, &id, title, brief).await?
        }
        Commands::Versions { id, format } => cli::list_versions(&workshop, &id, format).await?,
        Commands::Show { id, number } => cli::show_version(&workshop, &id, number).await?,
        Commands::Export { id, number, output } => {
            cli::export_version(&workshop, &id, number, &output).await?
        }
        Commands::Models { format } => cli::list_models(&workshop, format)?,
        Commands::Preview { id, draft, format } => {
            cli::preview_request(&workshop, &id, &draft, format).await?
        }
        Commands::Generate { id, draft } => cli::generate_version(&workshop, &id, &draft).await?,
        Commands::Serve { addr } => cli::serve(workshop, addr).await?,
    }

    Ok(())
}

// ABOUTME: Entry point for the gcf-deploy CLI application.
// ABOUTME: Parses arguments, sets up tracing, and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use gcf_deploy::config;
use gcf_deploy::error::Result;
use gcf_deploy::output::Output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut output = Output::new(cli.output_mode());
    output.start_timer();

    if let Err(e) = run(cli, &output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Init {
            project,
            bucket,
            force,
        } => {
            config::init_config(&cwd, project.as_deref(), bucket.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Deploy {
            config,
            overwrite,
            location,
        } => {
            let mut config = commands::load_config(&cwd, config.as_deref())?;
            if overwrite {
                config.overwrite = true;
            }
            if let Some(location) = location {
                config.location = location;
            }
            commands::deploy(config, &cwd, output).await
        }
        Commands::Package { config } => {
            let config = commands::load_config(&cwd, config.as_deref())?;
            commands::package(config, &cwd, output).await
        }
    }
}

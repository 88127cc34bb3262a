// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines global output flags and the deploy, init, and package subcommands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use gcf_deploy::output::OutputMode;

#[derive(Parser)]
#[command(name = "gcf-deploy")]
#[command(about = "Package and deploy Node.js projects to Google Cloud Functions")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a template gcf-deploy.yml in the current directory
    Init {
        /// GCP project id
        #[arg(short, long)]
        project: Option<String>,

        /// Storage bucket for archives
        #[arg(short, long)]
        bucket: Option<String>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Package, upload, and create or update the function
    Deploy {
        /// Config file (discovered in the current directory by default)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Replace an archive already uploaded for this version
        #[arg(long)]
        overwrite: bool,

        /// Region for the bucket and function
        #[arg(short, long)]
        location: Option<String>,
    },

    /// Build the archive without uploading it
    Package {
        /// Config file (discovered in the current directory by default)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the disaster map.
//!
//! Without a subcommand, lets the user interactively select what to run
//! (server, incident list, dashboard, report form).
//!
//! Uses `indicatif-log-bridge` (via [`progress::init_logger`]) to route
//! `log` output through `indicatif::MultiProgress` so that log lines and
//! the loading spinner never fight for the terminal.

mod dashboard;
mod incidents;
mod progress;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Select;
use disaster_map_source::EndpointConfig;
use indicatif::MultiProgress;

#[derive(Parser)]
#[command(name = "disaster_map", about = "Disaster incident monitor for India")]
struct Cli {
    /// Endpoint configuration file (TOML) to use instead of the built-in one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve,
    /// Print the current incidents and per-level counts
    Incidents {
        /// Print normalized incidents as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill in and submit an incident report
    Report,
    /// Browse incidents interactively
    Dashboard,
}

/// Top-level tool selection.
enum Tool {
    Dashboard,
    Incidents,
    Report,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Dashboard, Self::Incidents, Self::Report, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Browse incident dashboard",
            Self::Incidents => "List incidents",
            Self::Report => "Report an incident",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = progress::init_logger();
    let cli = Cli::parse();
    let endpoints = EndpointConfig::load(cli.config.as_deref())?;

    let Some(command) = cli.command else {
        return run_interactive(&multi, endpoints).await;
    };

    match command {
        Commands::Serve => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(disaster_map_server::run_server(
                    endpoints,
                    disaster_map_server::BindConfig::from_env(),
                ))
            })
            .await??;
        }
        Commands::Incidents { json } => incidents::run(&multi, endpoints, json).await?,
        Commands::Report => report::run(endpoints).await?,
        Commands::Dashboard => dashboard::run(&multi, endpoints).await?,
    }

    Ok(())
}

async fn run_interactive(
    multi: &MultiProgress,
    endpoints: EndpointConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Disaster Map");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Dashboard => dashboard::run(multi, endpoints).await?,
        Tool::Incidents => incidents::run(multi, endpoints, false).await?,
        Tool::Report => report::run(endpoints).await?,
        Tool::Server => {
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new()
                    .block_on(disaster_map_server::interactive::run(endpoints))
            })
            .await??;
        }
    }

    Ok(())
}

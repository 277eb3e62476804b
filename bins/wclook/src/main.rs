//! WCLook CLI - nearest public toilets from the command line
//!
//! Fetches the toilet catalog, ranks it by distance from the given
//! position, and renders the ordered list, details, or map links.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use wclook_cli::output::Status;

mod commands;
mod map_links;

/// Find the nearest public toilets
#[derive(Parser)]
#[command(name = "wclook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List toilets sorted by distance from a position
    List {
        /// Your latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Your longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Bypass the already-loaded guard and refetch
        #[arg(long)]
        force: bool,

        /// Show at most this many results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show details for one toilet
    Show {
        /// Toilet identifier
        id: String,

        /// Your latitude, to include the distance
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,

        /// Your longitude, to include the distance
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },

    /// Print map navigation links for a toilet
    Maps {
        /// Toilet identifier
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("wclook=debug,wclook_catalog=debug,wclook_ranking=debug")
            .init();
    }

    let result = match cli.command {
        Commands::List { lat, lon, force, limit } => {
            commands::list::run(lat, lon, force, limit, &cli.format).await
        }
        Commands::Show { id, lat, lon } => {
            commands::show::run(&id, lat.zip(lon), &cli.format).await
        }
        Commands::Maps { id } => commands::maps::run(&id, &cli.format).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Status::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

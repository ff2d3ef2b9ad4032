mod config;
mod consts;
mod controller;
mod logging;
mod model;
mod notifications;
mod provider;
mod session;
mod surface;
mod ui;
mod view_state;

use crate::config::{Config, get_config_dir, get_config_path};
use crate::logging::{get_rust_log_level, init_logging};
use crate::session::{run_export, run_search, run_summary, run_tui_mode, setup_session};
use clap::{ArgAction, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// JSON dataset to investigate instead of the built-in sample
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive investigation dashboard
    Start {
        /// Disable background colors
        #[arg(long, action = ArgAction::SetTrue)]
        no_background: bool,
    },
    /// Search communication records and print the matches
    Search {
        /// MSISDN, record id, application or cell to look for
        query: String,

        /// Only include records of this application type (repeatable)
        #[arg(long = "filter", value_name = "APP")]
        filters: Vec<String>,
    },
    /// Export records as CSV
    Export {
        /// File to write; defaults to ipdr_search_results.csv in the export directory
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Export only the records matching this search
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,
    },
    /// Print headline statistics and application usage
    Summary,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let config_path = get_config_path()?;
    let config = Config::load_or_default(&config_path)
        .map_err(|e| format!("Failed to load config {}: {}", config_path.display(), e))?;

    let log_dir = config.resolved_log_dir(&get_config_dir()?);
    let _logger = init_logging(get_rust_log_level(), &log_dir)?;

    let session = setup_session(config, args.data)?;
    match args.command {
        Command::Start { no_background } => run_tui_mode(session, !no_background).await,
        Command::Search { query, filters } => run_search(session, &query, &filters).await,
        Command::Export { output, query } => run_export(session, output, query.as_deref()).await,
        Command::Summary => run_summary(session).await,
    }
}

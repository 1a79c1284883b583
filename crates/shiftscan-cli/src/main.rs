mod output;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shiftscan")]
#[command(about = "Collect volunteer shift schedules into JSON and CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Read the location directory and query the shift API for every location
    Api {
        /// Directory to write artifacts to (defaults to `SHIFTSCAN_OUTPUT_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print what would be fetched without making any requests
        #[arg(long)]
        dry_run: bool,
    },
    /// Probe per-location list pages and parse shifts from their HTML
    Html {
        /// Directory to write artifacts to (defaults to `SHIFTSCAN_OUTPUT_DIR`)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// YAML file of slug candidates (defaults to `SHIFTSCAN_PROBE_CONFIG_PATH`,
        /// then the built-in list)
        #[arg(long)]
        probe_config: Option<PathBuf>,

        /// Print what would be probed without making any requests
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = shiftscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Api { out_dir, dry_run } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            pipeline::run_api(&config, &out_dir, dry_run).await
        }
        Commands::Html {
            out_dir,
            probe_config,
            dry_run,
        } => {
            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            let probe_config = probe_config.or_else(|| config.probe_config_path.clone());
            pipeline::run_html(&config, &out_dir, probe_config.as_deref(), dry_run).await
        }
    }
}

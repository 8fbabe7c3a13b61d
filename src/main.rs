use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use forecast_consolidator::config::Config;
use forecast_consolidator::consolidator::{ConsolidateError, Consolidator};
use forecast_consolidator::forecast::LayoutMode;

#[derive(Parser)]
#[command(name = "forecast-consolidator")]
#[command(about = "Consolidate daily demand forecast reports into one CSV", long_about = None)]
struct Cli {
    /// Root of the <year>/<month>/<report>.xlsx tree
    #[arg(long, env = "FORECAST_INPUT_DIR")]
    input_dir: Option<PathBuf>,

    /// Consolidated CSV to write (replaced on every run)
    #[arg(long, env = "FORECAST_OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Report file extension to scan for (repeatable, default: xlsx)
    #[arg(long = "extension", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Reject reports whose header row does not match the expected labels
    #[arg(long)]
    strict_layout: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> ExitCode {
    // Load .env file if it exists (ignore errors if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env()?;
    if let Some(input_dir) = cli.input_dir {
        config.input_dir = input_dir;
    }
    if let Some(output_file) = cli.output_file {
        config.output_file = output_file;
    }
    if !cli.extensions.is_empty() {
        config = config.with_extensions(&cli.extensions);
    }
    if cli.strict_layout {
        config = config.with_layout_mode(LayoutMode::Strict);
    }
    config = config.with_progress(!cli.no_progress);

    info!("Starting consolidation with config: {:?}", config);

    let consolidator = Consolidator::new(config);
    match consolidator.run() {
        Ok(summary) => {
            println!("\n{summary}\n");
            Ok(())
        }
        Err(ConsolidateError::EmptyResultSet(summary)) => {
            println!("\n{summary}\n");
            Err(ConsolidateError::EmptyResultSet(summary).into())
        }
        Err(e) => Err(e.into()),
    }
}

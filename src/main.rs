// src/main.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use signal_forge::adapter::StrategyCoordinator;
use signal_forge::application::dto::parser::parse_ir;
use signal_forge::application::dto::BuildOutcome;
use signal_forge::config::Config;
use signal_forge::domain::errors::AppResult;

#[derive(Parser)]
#[command(name = "signal-forge")]
#[command(about = "Turn natural-language trading strategies into compiled signal trees")]
struct Cli {
    /// JSON configuration file (defaults to environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate, validate and compile a strategy description
    Build {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Validate and compile an IR JSON file without calling the translator
    Check { file: PathBuf },
    /// Print the signal catalog
    Catalog {
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Initialize logging
    config.init_logging()?;

    log::info!("Starting signal-forge v{}", env!("CARGO_PKG_VERSION"));

    let coordinator = StrategyCoordinator::new(config);

    let outcome = match cli.command {
        Commands::Catalog { search } => {
            match search {
                Some(pattern) => {
                    for capability in coordinator.catalog().search_by_name(&pattern) {
                        println!("{}", capability.registry_line());
                    }
                }
                None => println!("{}", coordinator.catalog().compact_registry()),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Check { file } => {
            let contents = std::fs::read_to_string(&file)?;
            let ir = parse_ir(&contents)?;
            coordinator.check(&ir)
        }
        Commands::Build { text } => coordinator.build(&text.join(" ")).await,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(match outcome {
        BuildOutcome::Compiled { .. } => ExitCode::SUCCESS,
        BuildOutcome::NeedsClarification { .. } => ExitCode::from(2),
        _ => ExitCode::FAILURE,
    })
}

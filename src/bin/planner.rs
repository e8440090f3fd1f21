//! Runs one planning cycle and exits.
//!
//! Exit code `0` on success, non-zero if anything from the seams or
//! orchestration fails, with the failure logged rather than panicking the
//! process.

use clap::Parser;
use clockwork_rs::config::PlannerConfig;
use clockwork_rs::orchestrator::build_orchestrator;

/// Run one right-based scheduling cycle.
#[derive(Debug, Parser)]
#[command(name = "planner", about = "Runs one right-based scheduling cycle")]
struct Args {
    /// Path to a planner.toml config file. Falls back to conventional
    /// locations, then hard-coded defaults, when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Overrides the configured task fetcher selector.
    #[arg(long)]
    task_fetcher: Option<String>,

    /// Overrides the configured scheduling algorithm selector.
    #[arg(long)]
    algorithm: Option<String>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .target(env_logger::Target::Stdout)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match PlannerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("failed to load config from {}: {}", path, e);
                return std::process::ExitCode::FAILURE;
            }
        },
        None => PlannerConfig::from_default_config(),
    };
    config = config.with_env_overrides();
    if let Some(name) = args.task_fetcher {
        config.task_fetcher = name;
    }
    if let Some(name) = args.algorithm {
        config.algorithm = name;
    }

    let orchestrator = match build_orchestrator(&config) {
        Ok(o) => o,
        Err(e) => {
            log::error!("failed to build orchestrator: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    match orchestrator.run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("planning cycle failed: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

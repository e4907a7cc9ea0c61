mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::FileConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 cvreweight v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let file_config = FileConfig::load(cli.config.as_deref(), &cli.set_values)?;
    let progress = CliProgressHandler::new(!cli.quiet);

    let command_result = match cli.command {
        Commands::Histogram(args) => {
            info!("Dispatching to 'histogram' command.");
            commands::histogram::run(args, &file_config, &progress)
        }
        Commands::Reweight(args) => {
            info!("Dispatching to 'reweight' command.");
            commands::reweight::run(args, &file_config, &progress)
        }
        Commands::Egabf(args) => {
            info!("Dispatching to 'egabf' command.");
            commands::egabf::run(args, &file_config, &progress)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}

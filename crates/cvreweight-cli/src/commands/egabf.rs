use super::print_summary;
use crate::cli::EgabfArgs;
use crate::config::{DefaultsConfig, FileConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cvreweight::engine::diagnostics::TracingSink;
use cvreweight::engine::progress::ProgressReporter;
use cvreweight::workflows::egabf;
use tracing::info;

pub fn run(args: EgabfArgs, file_config: &FileConfig, progress: &CliProgressHandler) -> Result<()> {
    let config = file_config.egabf_config(&args, &DefaultsConfig::default())?;
    info!(
        "egABF reweighting with {} PMF(s), kT = {} kcal/mol.",
        config.pmf_paths.len(),
        config.kbt
    );

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let summary = egabf::run(&config, &TracingSink, &reporter)?;

    print_summary(&summary);
    println!("Weighted trajectory written to {}", config.output_path.display());
    Ok(())
}

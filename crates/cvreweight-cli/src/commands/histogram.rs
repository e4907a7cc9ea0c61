use super::print_summary;
use crate::cli::HistogramArgs;
use crate::config::FileConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cvreweight::engine::diagnostics::TracingSink;
use cvreweight::engine::progress::ProgressReporter;
use cvreweight::workflows::histogram;
use tracing::info;

pub fn run(
    args: HistogramArgs,
    file_config: &FileConfig,
    progress: &CliProgressHandler,
) -> Result<()> {
    let config = file_config.histogram_config(&args)?;
    info!(
        "Building a histogram from {} trajectory file(s).",
        config.trajectories.len()
    );

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let result = histogram::run(&config, &TracingSink, &reporter)?;

    print_summary(&result.summary);
    println!("Histogram written to {}", config.output_path.display());
    Ok(())
}

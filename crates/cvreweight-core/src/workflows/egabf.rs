use super::streams::{column_map, create_output, finish_output, for_each_trajectory, load_pmf};
use crate::engine::config::ReweightConfig;
use crate::engine::diagnostics::DiagnosticSink;
use crate::engine::egabf::MultiAxisWeightEvaluator;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::RunSummary;
use tracing::{info, instrument};

/// Reweights trajectories with the sum of independent 1-D PMFs, `pmf_paths[i]` applying to
/// `columns[i]`.
#[instrument(skip_all, name = "egabf_workflow")]
pub fn run(
    config: &ReweightConfig,
    sink: &dyn DiagnosticSink,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading PMFs",
    });
    let pmfs = config
        .pmf_paths
        .iter()
        .map(|path| load_pmf(path))
        .collect::<Result<Vec<_>, _>>()?;
    let evaluator =
        MultiAxisWeightEvaluator::new(pmfs, column_map(config.columns.clone())?, config.kbt, sink)?;
    reporter.report(Progress::PhaseFinish);

    let mut writer = create_output(&config.output_path)?;
    let summary = for_each_trajectory(&config.trajectories, reporter, |reader, name| {
        evaluator.process_trajectory(reader, &mut writer, name)
    })?;
    finish_output(writer, &config.output_path)?;
    info!("Weighted trajectory written to {}", config.output_path.display());

    Ok(summary)
}

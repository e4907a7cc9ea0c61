use super::streams::{column_map, create_output, finish_output, for_each_trajectory, load_pmf};
use crate::engine::config::ReweightConfig;
use crate::engine::diagnostics::DiagnosticSink;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::RunSummary;
use crate::engine::weights::PmfWeightEvaluator;
use tracing::{info, instrument};

/// Appends `exp(-PMF(x) / kT)` to every in-grid trajectory line, using one N-D PMF.
///
/// All trajectories are written, in order, to the single output file.
#[instrument(skip_all, name = "reweight_workflow")]
pub fn run(
    config: &ReweightConfig,
    sink: &dyn DiagnosticSink,
    reporter: &ProgressReporter,
) -> Result<RunSummary, EngineError> {
    let [pmf_path] = config.pmf_paths.as_slice() else {
        return Err(EngineError::Configuration(format!(
            "Single-PMF reweighting takes exactly one PMF file, got {}",
            config.pmf_paths.len()
        )));
    };

    reporter.report(Progress::PhaseStart {
        name: "Loading PMF",
    });
    let pmf = load_pmf(pmf_path)?;
    let evaluator =
        PmfWeightEvaluator::new(pmf, column_map(config.columns.clone())?, config.kbt, sink)?;
    reporter.report(Progress::PhaseFinish);

    let mut writer = create_output(&config.output_path)?;
    let summary = for_each_trajectory(&config.trajectories, reporter, |reader, name| {
        evaluator.process_trajectory(reader, &mut writer, name)
    })?;
    finish_output(writer, &config.output_path)?;
    info!("Weighted trajectory written to {}", config.output_path.display());

    Ok(summary)
}

use super::streams::{column_map, for_each_trajectory};
use crate::core::field::ScalarField;
use crate::core::io::axis_def::GridDefinition;
use crate::core::io::colvars::ColvarsGrid;
use crate::core::io::traits::GridFieldFile;
use crate::engine::accumulator::HistogramAccumulator;
use crate::engine::config::HistogramConfig;
use crate::engine::diagnostics::DiagnosticSink;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::RunSummary;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct HistogramResult {
    pub histogram: ScalarField,
    pub summary: RunSummary,
}

#[instrument(skip_all, name = "histogram_workflow")]
pub fn run(
    config: &HistogramConfig,
    sink: &dyn DiagnosticSink,
    reporter: &ProgressReporter,
) -> Result<HistogramResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading axes",
    });
    info!("Setting up axes from {}", config.axis_path.display());
    let field = GridDefinition::load_zero_field(&config.axis_path)?;
    let columns = config.columns.clone().map(column_map).transpose()?;
    let mut accumulator = HistogramAccumulator::new(field, columns, sink)?;
    info!("Using columns: {:?}", accumulator.columns().columns());
    reporter.report(Progress::PhaseFinish);

    let summary = for_each_trajectory(&config.trajectories, reporter, |reader, name| {
        accumulator.read_trajectory(reader, name)
    })?;

    reporter.report(Progress::PhaseStart {
        name: "Writing histogram",
    });
    let histogram = accumulator.into_field();
    ColvarsGrid::write_to_path(&histogram, &config.output_path).map_err(|e| {
        EngineError::GridFile {
            path: config.output_path.clone(),
            source: e,
        }
    })?;
    info!("Histogram written to {}", config.output_path.display());
    reporter.report(Progress::PhaseFinish);

    Ok(HistogramResult { histogram, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::HistogramConfigBuilder;
    use crate::engine::diagnostics::CollectingSink;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const AXES: &str = r#"
        [[axes]]
        lower-bound = 0.0
        upper-bound = 2.0
        width = 1.0

        [[axes]]
        lower-bound = 0.0
        upper-bound = 2.0
        width = 1.0
    "#;

    #[test]
    fn histogram_over_several_files_is_written_and_reloadable() {
        let dir = tempdir().unwrap();
        let axes = dir.path().join("axes.toml");
        let traj_a = dir.path().join("a.colvars.traj");
        let traj_b = dir.path().join("b.colvars.traj");
        let output = dir.path().join("hist.dat");
        fs::write(&axes, AXES).unwrap();
        fs::write(&traj_a, "#      step   cv1   cv2\n 0  0.5 1.5\n 10 1.5 1.5\n").unwrap();
        fs::write(&traj_b, "# restart\n 20 0.5 1.5\n 30 9.0 0.0\n 40\n").unwrap();

        let config = HistogramConfigBuilder::new()
            .axis_path(axes)
            .trajectories(vec![traj_a.clone(), traj_b])
            .output_path(output.clone())
            .columns(Some(vec![1, 2]))
            .build()
            .unwrap();
        let sink = CollectingSink::new();
        let result = run(&config, &sink, &ProgressReporter::new()).unwrap();

        assert_eq!(result.histogram.values(), &[0.0, 2.0, 0.0, 1.0]);
        assert_eq!(result.summary.streams.len(), 2);
        assert_eq!(result.summary.streams[0].path, traj_a);
        let total = result.summary.total();
        assert_eq!(total.total_lines, 4);
        assert_eq!(total.valid_lines, 3);
        assert_eq!(result.histogram.sum(), total.valid_lines as f64);

        let reloaded = ColvarsGrid::read_from_path(&output).unwrap();
        assert_eq!(reloaded.values(), result.histogram.values());
    }

    #[test]
    fn missing_trajectory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let axes = dir.path().join("axes.toml");
        fs::write(&axes, AXES).unwrap();
        let config = HistogramConfigBuilder::new()
            .axis_path(axes)
            .trajectories(vec![PathBuf::from("/nonexistent/run.traj")])
            .output_path(dir.path().join("hist.dat"))
            .build()
            .unwrap();
        let sink = CollectingSink::new();
        assert!(matches!(
            run(&config, &sink, &ProgressReporter::new()),
            Err(EngineError::Io { .. })
        ));
    }
}

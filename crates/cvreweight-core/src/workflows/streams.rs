use crate::core::field::ScalarField;
use crate::core::io::colvars::ColvarsGrid;
use crate::core::io::traits::GridFieldFile;
use crate::core::trajectory::ColumnMap;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{LineTally, RunSummary};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) fn load_pmf(path: &Path) -> Result<ScalarField, EngineError> {
    info!("Reading {}", path.display());
    ColvarsGrid::read_from_path(path).map_err(|e| EngineError::GridFile {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn column_map(columns: Vec<usize>) -> Result<ColumnMap, EngineError> {
    ColumnMap::new(columns).map_err(|e| EngineError::Configuration(e.to_string()))
}

pub(crate) fn create_output(path: &Path) -> Result<BufWriter<File>, EngineError> {
    let file = File::create(path).map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

pub(crate) fn finish_output(mut writer: BufWriter<File>, path: &Path) -> Result<(), EngineError> {
    writer.flush().map_err(|e| EngineError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Opens each trajectory in turn and hands it to `consume`, recording one tally per file.
pub(crate) fn for_each_trajectory(
    paths: &[PathBuf],
    reporter: &ProgressReporter,
    mut consume: impl FnMut(BufReader<File>, &str) -> Result<LineTally, EngineError>,
) -> Result<RunSummary, EngineError> {
    let mut summary = RunSummary::default();
    for path in paths {
        let name = path.display().to_string();
        reporter.report(Progress::StreamStart { path: name.clone() });

        let file = File::open(path).map_err(|e| EngineError::Io {
            path: path.clone(),
            source: e,
        })?;
        let tally = consume(BufReader::new(file), &name)?;

        reporter.report(Progress::StreamFinish { tally });
        summary.record(path.clone(), tally);
    }

    let total = summary.total();
    let message = format!(
        "Processed {} trajectory file(s): {} data line(s), {} valid.",
        summary.streams.len(),
        total.total_lines,
        total.valid_lines
    );
    info!("{}", message);
    reporter.report(Progress::Message(message));
    Ok(summary)
}

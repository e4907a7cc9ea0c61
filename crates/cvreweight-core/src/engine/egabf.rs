use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::error::EngineError;
use super::state::LineTally;
use super::utils::records::{parse_value, require_fit, validate_kbt, write_weighted_record};
use crate::core::field::GridField;
use crate::core::grid::error::GridError;
use crate::core::trajectory::{ColumnMap, TrajectoryLine};
use std::io::{BufRead, Write};
use tracing::debug;

/// Reweighting for egABF runs, where the free-energy surface is a sum of independent
/// 1-D PMFs: `w = exp(-(G_1(x_1) + ... + G_n(x_n)) / kT)`.
///
/// Weights are not normalized.
pub struct MultiAxisWeightEvaluator<'a, F: GridField> {
    pmfs: Vec<F>,
    columns: ColumnMap,
    kbt: f64,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, F: GridField> MultiAxisWeightEvaluator<'a, F> {
    /// `pmfs[i]` is evaluated on trajectory column `columns[i]`.
    ///
    /// Fails before any trajectory is read when the counts differ or a PMF is not 1-D.
    pub fn new(
        pmfs: Vec<F>,
        columns: ColumnMap,
        kbt: f64,
        sink: &'a dyn DiagnosticSink,
    ) -> Result<Self, EngineError> {
        validate_kbt(kbt)?;
        if pmfs.len() != columns.len() {
            return Err(EngineError::Configuration(format!(
                "The number of PMFs ({}) mismatches the number of columns ({})",
                pmfs.len(),
                columns.len()
            )));
        }
        if let Some((index, pmf)) = pmfs.iter().enumerate().find(|(_, p)| p.dimension() != 1) {
            return Err(EngineError::Configuration(format!(
                "PMF #{} should be 1D in egABF reweighting (dimension {})",
                index + 1,
                pmf.dimension()
            )));
        }

        sink.report(Diagnostic::UnnormalizedWeights);
        debug!(
            "egABF evaluator ready: {} PMF(s) on columns {:?}, kT = {}",
            pmfs.len(),
            columns.columns(),
            kbt
        );

        Ok(Self {
            pmfs,
            columns,
            kbt,
            sink,
        })
    }

    pub fn kbt(&self) -> f64 {
        self.kbt
    }

    /// Sum of the per-axis PMF values, or `None` if any component is outside its grid.
    /// `position` needs one component per PMF.
    pub fn total_free_energy(&self, position: &[f64]) -> Result<Option<f64>, EngineError> {
        if position.len() != self.pmfs.len() {
            return Err(GridError::DimensionMismatch {
                expected: self.pmfs.len(),
                found: position.len(),
            }
            .into());
        }
        let mut total = 0.0;
        for (pmf, &value) in self.pmfs.iter().zip(position) {
            match pmf.value_at(&[value])? {
                Some(free_energy) => total += free_energy,
                None => return Ok(None),
            }
        }
        Ok(Some(total))
    }

    /// Same line handling as [`super::weights::PmfWeightEvaluator::process_trajectory`],
    /// with the weight taken from the summed 1-D PMFs.
    pub fn process_trajectory<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
        stream: &str,
    ) -> Result<LineTally, EngineError> {
        let mut tally = LineTally::default();
        let mut position = Vec::with_capacity(self.columns.len());

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| EngineError::Io {
                path: stream.into(),
                source: e,
            })?;
            let line_num = index + 1;

            let Some(record) = TrajectoryLine::parse(&line).into_record() else {
                continue;
            };
            tally.total_lines += 1;
            require_fit(&record, &self.columns, stream, line_num)?;

            position.clear();
            for &column in self.columns.columns() {
                position.push(parse_value(&record, column, stream, line_num)?);
            }

            match self.total_free_energy(&position)? {
                Some(total) => {
                    let weight = (-total / self.kbt).exp();
                    write_weighted_record(writer, &record, weight).map_err(|e| {
                        EngineError::Io {
                            path: "<output>".into(),
                            source: e,
                        }
                    })?;
                    tally.valid_lines += 1;
                }
                None => self.sink.report(Diagnostic::OutOfGrid {
                    stream: stream.to_string(),
                    line: line_num,
                    position: position.clone(),
                }),
            }
        }

        self.sink.report(Diagnostic::StreamSummary {
            stream: stream.to_string(),
            tally,
        });
        Ok(tally)
    }
}

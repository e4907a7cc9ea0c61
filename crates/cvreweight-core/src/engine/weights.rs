use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::error::EngineError;
use super::state::LineTally;
use super::utils::records::{parse_position, require_fit, validate_kbt, write_weighted_record};
use crate::core::field::GridField;
use crate::core::trajectory::{ColumnMap, TrajectoryLine};
use std::io::{BufRead, Write};
use tracing::debug;

/// Annotates trajectory lines with the Boltzmann weight `exp(-PMF(x) / kT)` of a single
/// N-dimensional PMF.
pub struct PmfWeightEvaluator<'a, F: GridField> {
    pmf: F,
    columns: ColumnMap,
    kbt: f64,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, F: GridField> PmfWeightEvaluator<'a, F> {
    /// A column count that differs from the PMF dimension is only reported here; the
    /// first data line then fails with a dimension mismatch.
    pub fn new(
        pmf: F,
        columns: ColumnMap,
        kbt: f64,
        sink: &'a dyn DiagnosticSink,
    ) -> Result<Self, EngineError> {
        validate_kbt(kbt)?;
        if pmf.dimension() != columns.len() {
            sink.report(Diagnostic::DimensionMismatch {
                columns: columns.len(),
                dimension: pmf.dimension(),
            });
        }
        debug!(
            "PMF evaluator ready: dimension {}, columns {:?}, kT = {}",
            pmf.dimension(),
            columns.columns(),
            kbt
        );

        Ok(Self {
            pmf,
            columns,
            kbt,
            sink,
        })
    }

    pub fn kbt(&self) -> f64 {
        self.kbt
    }

    /// Weight of one position, or `None` when it lies outside the PMF grid.
    pub fn weight_at(&self, position: &[f64]) -> Result<Option<f64>, EngineError> {
        Ok(self
            .pmf
            .value_at(position)?
            .map(|free_energy| (-free_energy / self.kbt).exp()))
    }

    /// Copies every in-grid record of `reader` to `writer` with its weight appended.
    ///
    /// Every non-comment line counts towards the total. A record too short for the
    /// configured columns, blank lines included, aborts with
    /// [`EngineError::RecordTooShort`]; out-of-grid samples are reported and dropped.
    pub fn process_trajectory<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
        stream: &str,
    ) -> Result<LineTally, EngineError> {
        let mut tally = LineTally::default();

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

            let position = parse_position(&record, &self.columns, stream, line_num)?;
            match self.weight_at(&position)? {
                Some(weight) => {
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
                    position,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::ScalarField;
    use crate::core::grid::axis::Axis;
    use crate::core::grid::error::GridError;
    use crate::core::grid::lattice::Grid;
    use crate::engine::diagnostics::CollectingSink;
    use std::io::Cursor;

    fn pmf_1d(values: Vec<f64>) -> ScalarField {
        let grid = Grid::new(vec![Axis::new(0.0, 2.0, 1.0).unwrap()]).unwrap();
        ScalarField::from_values(grid, values).unwrap()
    }

    fn evaluator<'a>(
        values: Vec<f64>,
        column: usize,
        kbt: f64,
        sink: &'a CollectingSink,
    ) -> Result<PmfWeightEvaluator<'a, ScalarField>, EngineError> {
        PmfWeightEvaluator::new(pmf_1d(values), ColumnMap::new(vec![column]).unwrap(), kbt, sink)
    }

    fn run(
        evaluator: &PmfWeightEvaluator<'_, ScalarField>,
        text: &str,
    ) -> Result<(LineTally, String), EngineError> {
        let mut out = Vec::new();
        let tally = evaluator.process_trajectory(Cursor::new(text.as_bytes()), &mut out, "t")?;
        Ok((tally, String::from_utf8(out).unwrap()))
    }

    fn weights(output: &str) -> Vec<f64> {
        output
            .lines()
            .map(|l| l.split_whitespace().last().unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn weight_is_boltzmann_factor_of_the_bin_value() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![10.0, 20.0], 1, 2.0, &sink).unwrap();

        let (tally, output) = run(&evaluator, "0 0.5\n1 1.5\n").unwrap();

        assert_eq!(
            tally,
            LineTally {
                total_lines: 2,
                valid_lines: 2
            }
        );
        let w = weights(&output);
        assert!((w[0] - (-10.0f64 / 2.0).exp()).abs() < 1e-15);
        assert!((w[1] - (-20.0f64 / 2.0).exp()).abs() < 1e-15);
        assert!(output.starts_with("0 0.5 "));
        assert_eq!(output.lines().next().unwrap().len(), "0 0.5 ".len() + 20);
    }

    #[test]
    fn zero_pmf_with_unit_kt_gives_unit_weights() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![0.0, 0.0], 0, 1.0, &sink).unwrap();
        let (_, output) = run(&evaluator, "0.0\n0.7\n1.2\n1.99\n").unwrap();
        assert_eq!(output.lines().count(), 4);
        for line in output.lines() {
            assert!(line.ends_with("   1.000000000000000"));
        }
    }

    #[test]
    fn tokens_are_rejoined_with_single_spaces() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![0.0, 0.0], 1, 1.0, &sink).unwrap();
        let (_, output) = run(&evaluator, "   100\t 0.5    3.25  \n").unwrap();
        assert_eq!(output, "100 0.5 3.25    1.000000000000000\n");
    }

    #[test]
    fn out_of_grid_samples_are_reported_and_dropped() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![1.0, 2.0], 0, 1.0, &sink).unwrap();
        let (tally, output) = run(&evaluator, "# header\n2.0\n0.5\n-3\n").unwrap();
        assert_eq!(
            tally,
            LineTally {
                total_lines: 3,
                valid_lines: 1
            }
        );
        assert_eq!(output.lines().count(), 1);
        assert_eq!(sink.warning_count(), 2);
    }

    #[test]
    fn short_record_aborts_the_run() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![1.0, 2.0], 2, 1.0, &sink).unwrap();
        let result = run(&evaluator, "0 0 0.5\n0 0.5\n0 0 0.5\n");
        assert!(matches!(
            result,
            Err(EngineError::RecordTooShort {
                line: 2,
                max_column: 2,
                field_count: 2,
                ..
            })
        ));
    }

    #[test]
    fn blank_line_is_counted_then_aborts_as_a_short_record() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![1.0, 2.0], 1, 1.0, &sink).unwrap();
        let result = run(&evaluator, "0 0.5\n\n1 1.5\n");
        assert!(matches!(
            result,
            Err(EngineError::RecordTooShort {
                line: 2,
                max_column: 1,
                field_count: 0,
                ..
            })
        ));

        let result = run(&evaluator, "# only comments are skipped\n   \t\n");
        assert!(matches!(
            result,
            Err(EngineError::RecordTooShort {
                line: 2,
                field_count: 0,
                ..
            })
        ));
    }

    #[test]
    fn column_dimension_mismatch_warns_then_fails_on_data() {
        let sink = CollectingSink::new();
        let evaluator = PmfWeightEvaluator::new(
            pmf_1d(vec![1.0, 2.0]),
            ColumnMap::new(vec![0, 1]).unwrap(),
            1.0,
            &sink,
        )
        .unwrap();
        assert_eq!(
            sink.entries(),
            vec![Diagnostic::DimensionMismatch {
                columns: 2,
                dimension: 1
            }]
        );

        let result = run(&evaluator, "0.5 0.5\n");
        assert!(matches!(
            result,
            Err(EngineError::Grid(GridError::DimensionMismatch {
                expected: 1,
                found: 2
            }))
        ));
    }

    #[test]
    fn invalid_kt_is_a_configuration_error() {
        let sink = CollectingSink::new();
        let result = evaluator(vec![1.0, 2.0], 0, 0.0, &sink);
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn weight_at_reads_the_pmf_directly() {
        let sink = CollectingSink::new();
        let evaluator = evaluator(vec![0.5, 1.0], 0, 0.5, &sink).unwrap();
        assert_eq!(evaluator.kbt(), 0.5);
        let w = evaluator.weight_at(&[1.5]).unwrap().unwrap();
        assert!((w - (-2.0f64).exp()).abs() < 1e-15);
        assert_eq!(evaluator.weight_at(&[2.0]).unwrap(), None);
    }
}

use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::error::EngineError;
use super::state::LineTally;
use super::utils::records::parse_position;
use crate::core::field::GridField;
use crate::core::trajectory::{ColumnMap, TrajectoryLine};
use std::io::BufRead;
use tracing::{debug, trace};

/// Builds an occupancy histogram by adding 1.0 to the bin of every in-grid sample.
///
/// The field is mutated in place across successive calls to
/// [`HistogramAccumulator::read_trajectory`], so several trajectory files feed one
/// histogram. Counts do not depend on the order in which lines or files arrive.
pub struct HistogramAccumulator<'a, F: GridField> {
    field: F,
    columns: ColumnMap,
    sink: &'a dyn DiagnosticSink,
}

impl<'a, F: GridField> HistogramAccumulator<'a, F> {
    /// `columns` defaults to `0..dimension`; an explicit map must have one column per axis.
    pub fn new(
        field: F,
        columns: Option<ColumnMap>,
        sink: &'a dyn DiagnosticSink,
    ) -> Result<Self, EngineError> {
        let dimension = field.dimension();
        let columns = match columns {
            Some(columns) => columns,
            None => ColumnMap::identity(dimension)
                .map_err(|e| EngineError::Configuration(e.to_string()))?,
        };
        if columns.len() != dimension {
            return Err(EngineError::Configuration(format!(
                "{} column(s) selected for a {}-dimensional grid",
                columns.len(),
                dimension
            )));
        }
        debug!("Using columns: {:?}", columns.columns());

        Ok(Self {
            field,
            columns,
            sink,
        })
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn into_field(self) -> F {
        self.field
    }

    /// Consumes one trajectory stream.
    ///
    /// Records too short for the configured columns are skipped without being counted.
    /// A non-numeric position token aborts with [`EngineError::Format`].
    pub fn read_trajectory<R: BufRead>(
        &mut self,
        reader: R,
        stream: &str,
    ) -> Result<LineTally, EngineError> {
        let mut tally = LineTally::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| EngineError::Io {
                path: stream.into(),
                source: e,
            })?;
            let line_num = index + 1;

            let TrajectoryLine::Record(record) = TrajectoryLine::parse(&line) else {
                continue;
            };
            if !self.columns.fits(&record) {
                trace!(
                    "Skipping short record ({} field(s)) at {}:{}",
                    record.field_count(),
                    stream,
                    line_num
                );
                continue;
            }

            tally.total_lines += 1;
            let position = parse_position(&record, &self.columns, stream, line_num)?;
            if self.field.is_in_grid(&position)? {
                self.field.increment_at(&position, 1.0)?;
                tally.valid_lines += 1;
            } else {
                self.sink.report(Diagnostic::OutOfGrid {
                    stream: stream.to_string(),
                    line: line_num,
                    position,
                });
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
    use crate::core::grid::lattice::Grid;
    use crate::engine::diagnostics::CollectingSink;
    use std::io::Cursor;

    fn zero_field_2d() -> ScalarField {
        ScalarField::zeros(
            Grid::new(vec![
                Axis::new(0.0, 2.0, 1.0).unwrap(),
                Axis::new(0.0, 2.0, 1.0).unwrap(),
            ])
            .unwrap(),
        )
    }

    fn read(acc: &mut HistogramAccumulator<'_, ScalarField>, text: &str) -> LineTally {
        acc.read_trajectory(Cursor::new(text.as_bytes()), "test.traj")
            .unwrap()
    }

    #[test]
    fn single_sample_increments_exactly_one_bin() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(
            zero_field_2d(),
            Some(ColumnMap::new(vec![0, 1]).unwrap()),
            &sink,
        )
        .unwrap();

        let tally = read(&mut acc, "0.5 1.5\n");

        assert_eq!(
            tally,
            LineTally {
                total_lines: 1,
                valid_lines: 1
            }
        );
        let field = acc.into_field();
        assert_eq!(field.values(), &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(field.sum(), 1.0);
    }

    #[test]
    fn bin_sum_equals_valid_lines() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        let text = "\
# step cv1 cv2
0.1 0.1
1.9 0.3
2.0 0.5
0.5 -0.1
1.0 1.0
   # interleaved header
0.5 1.5 extra columns are fine
";
        let tally = read(&mut acc, text);

        assert_eq!(tally.total_lines, 6);
        assert_eq!(tally.valid_lines, 4);
        assert_eq!(acc.field().sum(), tally.valid_lines as f64);
        assert_eq!(sink.warning_count(), 2);
        assert!(matches!(
            &sink.entries()[0],
            Diagnostic::OutOfGrid { line: 4, position, .. } if position == &vec![2.0, 0.5]
        ));
    }

    #[test]
    fn comments_and_blank_lines_leave_counters_untouched() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        let tally = read(&mut acc, "# a\n\n   # b\n \t\n");
        assert_eq!(tally, LineTally::default());
        assert_eq!(acc.field().sum(), 0.0);
    }

    #[test]
    fn short_records_are_skipped_silently() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(
            zero_field_2d(),
            Some(ColumnMap::new(vec![1, 2]).unwrap()),
            &sink,
        )
        .unwrap();
        let tally = read(&mut acc, "0 0.5\n0 0.5 0.5\n7\n");
        assert_eq!(
            tally,
            LineTally {
                total_lines: 1,
                valid_lines: 1
            }
        );
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn non_numeric_position_is_fatal() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        let result = acc.read_trajectory(Cursor::new("0.5 0.5\n0.5 nope\n".as_bytes()), "t");
        assert!(matches!(
            result,
            Err(EngineError::Format { line: 2, column: 1, .. })
        ));
    }

    #[test]
    fn accumulation_spans_files_and_is_order_independent() {
        let file_a = "0.5 0.5\n1.5 1.5\n0.5 1.5\n";
        let file_b = "1.5 0.5\n1.5 0.5\n3.0 3.0\n";

        let sink = CollectingSink::new();
        let mut forward = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        read(&mut forward, file_a);
        read(&mut forward, file_b);

        let mut backward = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        read(&mut backward, file_b);
        let reversed: String = file_a.lines().rev().map(|l| format!("{}\n", l)).collect();
        read(&mut backward, &reversed);

        assert_eq!(forward.field().values(), backward.field().values());
        assert_eq!(forward.field().values(), &[1.0, 1.0, 2.0, 1.0]);
    }

    #[test]
    fn column_count_must_match_dimension() {
        let sink = CollectingSink::new();
        let result = HistogramAccumulator::new(
            zero_field_2d(),
            Some(ColumnMap::new(vec![0]).unwrap()),
            &sink,
        );
        assert!(matches!(result, Err(EngineError::Configuration(_))));
    }

    #[test]
    fn each_stream_reports_a_summary() {
        let sink = CollectingSink::new();
        let mut acc = HistogramAccumulator::new(zero_field_2d(), None, &sink).unwrap();
        read(&mut acc, "0.5 0.5\n");
        assert_eq!(
            sink.entries().last(),
            Some(&Diagnostic::StreamSummary {
                stream: "test.traj".to_string(),
                tally: LineTally {
                    total_lines: 1,
                    valid_lines: 1
                }
            })
        );
    }
}

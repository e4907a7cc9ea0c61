use crate::core::trajectory::{ColumnMap, TokenError, TrajectoryRecord};
use crate::engine::error::EngineError;
use std::io::Write;

/// Extracts the configured position, turning a bad token into a located format error.
pub(crate) fn parse_position(
    record: &TrajectoryRecord<'_>,
    columns: &ColumnMap,
    stream: &str,
    line: usize,
) -> Result<Vec<f64>, EngineError> {
    record
        .position(columns)
        .map_err(|e| token_error(e, record, stream, line))
}

pub(crate) fn parse_value(
    record: &TrajectoryRecord<'_>,
    column: usize,
    stream: &str,
    line: usize,
) -> Result<f64, EngineError> {
    record
        .value(column)
        .map_err(|e| token_error(e, record, stream, line))
}

fn token_error(
    error: TokenError,
    record: &TrajectoryRecord<'_>,
    stream: &str,
    line: usize,
) -> EngineError {
    match error {
        TokenError::Missing { column, .. } => EngineError::RecordTooShort {
            stream: stream.to_string(),
            line,
            max_column: column,
            field_count: record.field_count(),
        },
        TokenError::NonNumeric { column, token } => EngineError::Format {
            stream: stream.to_string(),
            line,
            column,
            token,
        },
    }
}

/// Evaluators cannot skip a short record: it aborts the run.
pub(crate) fn require_fit(
    record: &TrajectoryRecord<'_>,
    columns: &ColumnMap,
    stream: &str,
    line: usize,
) -> Result<(), EngineError> {
    if columns.fits(record) {
        Ok(())
    } else {
        Err(EngineError::RecordTooShort {
            stream: stream.to_string(),
            line,
            max_column: columns.max_column(),
            field_count: record.field_count(),
        })
    }
}

pub(crate) fn validate_kbt(kbt: f64) -> Result<(), EngineError> {
    if kbt.is_finite() && kbt > 0.0 {
        Ok(())
    } else {
        Err(EngineError::Configuration(format!(
            "Thermal energy kT must be positive and finite, got {}",
            kbt
        )))
    }
}

/// Writes the record's tokens followed by the weight in a 20-wide, 15-decimal field.
pub(crate) fn write_weighted_record(
    writer: &mut impl Write,
    record: &TrajectoryRecord<'_>,
    weight: f64,
) -> std::io::Result<()> {
    writeln!(writer, "{} {:20.15}", record.joined(), weight)
}

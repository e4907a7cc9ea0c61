use super::traits::GridFieldFile;
use crate::core::field::{GridField, ScalarField};
use crate::core::grid::axis::Axis;
use crate::core::grid::error::GridError;
use crate::core::grid::lattice::Grid;
use itertools::Itertools;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridFormatError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Grid stream is empty; expected a '# <dimension>' header")]
    MissingHeader,
    #[error("Invalid grid header on line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("Invalid grid data on line {line}: {message}")]
    InvalidData { line: usize, message: String },
    #[error("Grid declares {expected} bin(s) but the stream holds {found} value(s)")]
    ValueCountMismatch { expected: usize, found: usize },
    #[error("Invalid grid geometry: {0}")]
    InvalidGrid(#[from] GridError),
}

/// The Colvars multicolumn grid format.
///
/// ```text
/// # <dimension>
/// # <lower> <width> <bins> <periodic>     one line per axis
///
///  <center_0> ... <center_n-1> <value>    one line per bin, last axis fastest
/// ```
///
/// For grids of dimension two or more, a blank line closes every run of the last axis.
pub struct ColvarsGrid;

fn header_tokens(line: &str) -> Option<Vec<&str>> {
    line.trim_start()
        .strip_prefix('#')
        .map(|rest| rest.split_whitespace().collect())
}

fn parse_axis_line(line_num: usize, line: &str) -> Result<Axis, GridFormatError> {
    let invalid = |message: String| GridFormatError::InvalidHeader {
        line: line_num,
        message,
    };

    let tokens = header_tokens(line)
        .ok_or_else(|| invalid("axis line must start with '#'".to_string()))?;
    let [lower, width, bins, periodic] = tokens.as_slice() else {
        return Err(invalid(format!(
            "expected '# <lower> <width> <bins> <periodic>', found {} field(s)",
            tokens.len()
        )));
    };

    let lower: f64 = lower
        .parse()
        .map_err(|_| invalid(format!("invalid lower bound '{}'", lower)))?;
    let width: f64 = width
        .parse()
        .map_err(|_| invalid(format!("invalid bin width '{}'", width)))?;
    let bins: usize = bins
        .parse()
        .map_err(|_| invalid(format!("invalid bin count '{}'", bins)))?;
    let periodic: i64 = periodic
        .parse()
        .map_err(|_| invalid(format!("invalid periodic flag '{}'", periodic)))?;

    Ok(Axis::from_lower_width_bins(lower, width, bins)?.periodic(periodic != 0))
}

fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e15).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}

impl GridFieldFile for ColvarsGrid {
    type Error = GridFormatError;

    fn read_from(reader: &mut impl BufRead) -> Result<ScalarField, Self::Error> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)));

        let mut next_non_blank = || -> Result<Option<(usize, String)>, GridFormatError> {
            for item in lines.by_ref() {
                let (line_num, line) = item?;
                if !line.trim().is_empty() {
                    return Ok(Some((line_num, line)));
                }
            }
            Ok(None)
        };

        let (line_num, line) = next_non_blank()?.ok_or(GridFormatError::MissingHeader)?;
        let dimension = match header_tokens(&line).as_deref() {
            Some([dim]) => dim.parse::<usize>().ok().filter(|&d| d >= 1),
            _ => None,
        }
        .ok_or_else(|| GridFormatError::InvalidHeader {
            line: line_num,
            message: format!("expected '# <dimension>', found '{}'", line.trim()),
        })?;

        let mut axes = Vec::new();
        for _ in 0..dimension {
            let (line_num, line) = next_non_blank()?.ok_or(GridFormatError::MissingHeader)?;
            axes.push(parse_axis_line(line_num, &line)?);
        }
        let grid = Grid::new(axes)?;

        let mut values = Vec::new();
        while let Some((line_num, line)) = next_non_blank()? {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != dimension + 1 {
                return Err(GridFormatError::InvalidData {
                    line: line_num,
                    message: format!(
                        "expected {} field(s) (coordinates and value), found {}",
                        dimension + 1,
                        tokens.len()
                    ),
                });
            }
            let token = tokens[dimension];
            let value: f64 = token.parse().map_err(|_| GridFormatError::InvalidData {
                line: line_num,
                message: format!("invalid value '{}'", token),
            })?;
            values.push(value);
        }

        if values.len() != grid.len() {
            return Err(GridFormatError::ValueCountMismatch {
                expected: grid.len(),
                found: values.len(),
            });
        }

        Ok(ScalarField::from_values(grid, values)?)
    }

    fn write_to(field: &ScalarField, writer: &mut impl Write) -> Result<(), Self::Error> {
        let grid = field.grid();
        let axes = grid.axes();

        writeln!(writer, "# {}", axes.len())?;
        for axis in axes {
            writeln!(
                writer,
                "# {} {} {} {}",
                axis.lower(),
                axis.width(),
                axis.bins(),
                u8::from(axis.is_periodic())
            )?;
        }
        writeln!(writer)?;

        let run = axes.last().map_or(1, Axis::bins);
        for (i, (center, value)) in field.iter_bins().enumerate() {
            writeln!(
                writer,
                " {} {}",
                center.iter().map(|c| format!("{:.6}", c)).join(" "),
                format_value(value)
            )?;
            if axes.len() > 1 && (i + 1) % run == 0 {
                writeln!(writer)?;
            }
        }
        Ok(())
    }
}

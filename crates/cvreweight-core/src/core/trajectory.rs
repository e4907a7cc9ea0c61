use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnMapError {
    #[error("At least one trajectory column must be selected")]
    Empty,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Column {column} is missing from a record of {field_count} field(s)")]
    Missing { column: usize, field_count: usize },
    #[error("Column {column} holds non-numeric token '{token}'")]
    NonNumeric { column: usize, token: String },
}

/// Zero-based trajectory columns, in axis order: `columns[i]` feeds axis `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<usize>,
    max_column: usize,
}

impl ColumnMap {
    pub fn new(columns: Vec<usize>) -> Result<Self, ColumnMapError> {
        let max_column = *columns.iter().max().ok_or(ColumnMapError::Empty)?;
        Ok(Self {
            columns,
            max_column,
        })
    }

    /// Columns `0..dimension`, one per axis.
    pub fn identity(dimension: usize) -> Result<Self, ColumnMapError> {
        Self::new((0..dimension).collect())
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn max_column(&self) -> usize {
        self.max_column
    }

    /// A record is usable only if it has strictly more fields than the largest column index.
    pub fn fits(&self, record: &TrajectoryRecord<'_>) -> bool {
        record.field_count() > self.max_column
    }
}

/// Classification of one raw trajectory line.
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryLine<'a> {
    /// First non-space character is `#`.
    Comment,
    /// Empty or whitespace-only.
    Blank,
    Record(TrajectoryRecord<'a>),
}

impl<'a> TrajectoryLine<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            TrajectoryLine::Comment
        } else if trimmed.is_empty() {
            TrajectoryLine::Blank
        } else {
            TrajectoryLine::Record(TrajectoryRecord {
                tokens: trimmed.split_whitespace().collect(),
            })
        }
    }

    /// Keeps everything but comments. A blank line becomes a record with no fields.
    pub fn into_record(self) -> Option<TrajectoryRecord<'a>> {
        match self {
            TrajectoryLine::Comment => None,
            TrajectoryLine::Blank => Some(TrajectoryRecord::default()),
            TrajectoryLine::Record(record) => Some(record),
        }
    }
}

/// The whitespace-separated tokens of one data line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryRecord<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> TrajectoryRecord<'a> {
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn field_count(&self) -> usize {
        self.tokens.len()
    }

    /// Parses one column as a real number.
    pub fn value(&self, column: usize) -> Result<f64, TokenError> {
        let token = self.tokens.get(column).ok_or(TokenError::Missing {
            column,
            field_count: self.field_count(),
        })?;
        token.parse().map_err(|_| TokenError::NonNumeric {
            column,
            token: token.to_string(),
        })
    }

    /// Extracts the position vector named by `columns`.
    pub fn position(&self, columns: &ColumnMap) -> Result<Vec<f64>, TokenError> {
        columns.columns().iter().map(|&c| self.value(c)).collect()
    }

    /// Tokens re-joined with single spaces.
    pub fn joined(&self) -> String {
        self.tokens.iter().join(" ")
    }
}

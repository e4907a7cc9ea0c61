use thiserror::Error;

use super::config::ConfigError;
use crate::core::grid::error::GridError;
use crate::core::io::axis_def::AxisDefinitionError;
use crate::core::io::colvars::GridFormatError;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("Non-numeric token '{token}' in column {column} ({stream}, line {line})")]
    Format {
        stream: String,
        line: usize,
        column: usize,
        token: String,
    },

    #[error("Maximum column ({max_column}) is out of bound ({field_count}) ({stream}, line {line})")]
    RecordTooShort {
        stream: String,
        line: usize,
        max_column: usize,
        field_count: usize,
    },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Failed to read grid '{path}': {source}", path = path.display())]
    GridFile {
        path: PathBuf,
        #[source]
        source: GridFormatError,
    },

    #[error(transparent)]
    AxisDefinition(#[from] AxisDefinitionError),

    #[error("I/O error on '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

use crate::core::constants::default_kbt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramConfig {
    pub axis_path: PathBuf,
    pub trajectories: Vec<PathBuf>,
    pub output_path: PathBuf,
    /// `None` selects columns `0..dimension`.
    pub columns: Option<Vec<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReweightConfig {
    /// One PMF for single-grid reweighting; one 1-D PMF per column for egABF.
    pub pmf_paths: Vec<PathBuf>,
    pub trajectories: Vec<PathBuf>,
    pub output_path: PathBuf,
    pub columns: Vec<usize>,
    pub kbt: f64,
}

#[derive(Default)]
pub struct HistogramConfigBuilder {
    axis_path: Option<PathBuf>,
    trajectories: Vec<PathBuf>,
    output_path: Option<PathBuf>,
    columns: Option<Vec<usize>>,
}

impl HistogramConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis_path(mut self, path: PathBuf) -> Self {
        self.axis_path = Some(path);
        self
    }
    pub fn trajectories(mut self, paths: Vec<PathBuf>) -> Self {
        self.trajectories = paths;
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn columns(mut self, columns: Option<Vec<usize>>) -> Self {
        self.columns = columns;
        self
    }

    pub fn build(self) -> Result<HistogramConfig, ConfigError> {
        if self.trajectories.is_empty() {
            return Err(ConfigError::MissingParameter("trajectories"));
        }
        if self.columns.as_ref().is_some_and(Vec::is_empty) {
            return Err(ConfigError::InvalidParameter {
                name: "columns",
                reason: "at least one column must be selected".to_string(),
            });
        }
        Ok(HistogramConfig {
            axis_path: self
                .axis_path
                .ok_or(ConfigError::MissingParameter("axis_path"))?,
            trajectories: self.trajectories,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            columns: self.columns,
        })
    }
}

#[derive(Default)]
pub struct ReweightConfigBuilder {
    pmf_paths: Vec<PathBuf>,
    trajectories: Vec<PathBuf>,
    output_path: Option<PathBuf>,
    columns: Option<Vec<usize>>,
    kbt: Option<f64>,
}

impl ReweightConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pmf_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.pmf_paths = paths;
        self
    }
    pub fn trajectories(mut self, paths: Vec<PathBuf>) -> Self {
        self.trajectories = paths;
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn columns(mut self, columns: Vec<usize>) -> Self {
        self.columns = Some(columns);
        self
    }
    pub fn kbt(mut self, kbt: f64) -> Self {
        self.kbt = Some(kbt);
        self
    }

    pub fn build(self) -> Result<ReweightConfig, ConfigError> {
        if self.pmf_paths.is_empty() {
            return Err(ConfigError::MissingParameter("pmf_paths"));
        }
        if self.trajectories.is_empty() {
            return Err(ConfigError::MissingParameter("trajectories"));
        }
        let columns = self
            .columns
            .filter(|c| !c.is_empty())
            .ok_or(ConfigError::MissingParameter("columns"))?;
        let kbt = self.kbt.unwrap_or_else(default_kbt);
        if !(kbt.is_finite() && kbt > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "kbt",
                reason: format!("thermal energy must be positive and finite, got {}", kbt),
            });
        }

        Ok(ReweightConfig {
            pmf_paths: self.pmf_paths,
            trajectories: self.trajectories,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            columns,
            kbt,
        })
    }
}

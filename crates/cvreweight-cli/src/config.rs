use crate::cli::{EgabfArgs, HistogramArgs, ReweightArgs, ThermalArgs};
use crate::error::{CliError, Result};
use cvreweight::core::constants::{DEFAULT_TEMPERATURE_K, thermal_energy};
use cvreweight::engine::config::{
    HistogramConfig, HistogramConfigBuilder, ReweightConfig, ReweightConfigBuilder,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Fallbacks for anything neither the command line nor the config file sets.
pub struct DefaultsConfig {
    pub temperature: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_K,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct FileThermalConfig {
    kbt: Option<f64>,
    temperature: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct FileColumnsConfig {
    histogram: Option<Vec<usize>>,
    reweight: Option<Vec<usize>>,
    egabf: Option<Vec<usize>>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    thermal: Option<FileThermalConfig>,
    columns: Option<FileColumnsConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the optional config file, then applies `--set` overrides on top.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn histogram_config(&self, args: &HistogramArgs) -> Result<HistogramConfig> {
        let file_columns = self.columns.as_ref().and_then(|c| c.histogram.clone());
        HistogramConfigBuilder::new()
            .axis_path(args.axis.clone())
            .trajectories(args.traj.clone())
            .output_path(args.output.clone())
            .columns(args.columns.clone().or(file_columns))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn reweight_config(
        &self,
        args: &ReweightArgs,
        defaults: &DefaultsConfig,
    ) -> Result<ReweightConfig> {
        let file_columns = self.columns.as_ref().and_then(|c| c.reweight.clone());
        let columns = Self::require_columns(args.columns.clone().or(file_columns), "reweight")?;
        ReweightConfigBuilder::new()
            .pmf_paths(vec![args.pmf.clone()])
            .trajectories(args.traj.clone())
            .output_path(args.output.clone())
            .columns(columns)
            .kbt(self.resolve_kbt(args.thermal, defaults))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn egabf_config(
        &self,
        args: &EgabfArgs,
        defaults: &DefaultsConfig,
    ) -> Result<ReweightConfig> {
        let file_columns = self.columns.as_ref().and_then(|c| c.egabf.clone());
        let columns = Self::require_columns(args.columns.clone().or(file_columns), "egabf")?;
        ReweightConfigBuilder::new()
            .pmf_paths(args.pmfs.clone())
            .trajectories(args.traj.clone())
            .output_path(args.output.clone())
            .columns(columns)
            .kbt(self.resolve_kbt(args.thermal, defaults))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// `--kbt`, then `--temperature`, then the file's `kbt`, then its `temperature`,
    /// then the default temperature.
    fn resolve_kbt(&self, cli: ThermalArgs, defaults: &DefaultsConfig) -> f64 {
        let file = self.thermal.clone().unwrap_or_default();
        cli.kbt
            .or(cli.temperature.map(thermal_energy))
            .or(file.kbt)
            .or(file.temperature.map(thermal_energy))
            .unwrap_or_else(|| thermal_energy(defaults.temperature))
    }

    fn require_columns(columns: Option<Vec<usize>>, command: &str) -> Result<Vec<usize>> {
        columns.ok_or_else(|| {
            CliError::Config(format!(
                "Columns are required for '{}', either via --columns or `columns.{}` in the config file.",
                command, command
            ))
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "thermal.kbt" => {
                    self.thermal.get_or_insert_with(Default::default).kbt =
                        Some(parse_float(key, value_str)?);
                }
                "thermal.temperature" => {
                    self.thermal.get_or_insert_with(Default::default).temperature =
                        Some(parse_float(key, value_str)?);
                }
                "columns.histogram" => {
                    self.columns.get_or_insert_with(Default::default).histogram =
                        Some(parse_columns(key, value_str)?);
                }
                "columns.reweight" => {
                    self.columns.get_or_insert_with(Default::default).reweight =
                        Some(parse_columns(key, value_str)?);
                }
                "columns.egabf" => {
                    self.columns.get_or_insert_with(Default::default).egabf =
                        Some(parse_columns(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_float(key: &str, value_str: &str) -> Result<f64> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value_str)))
}

fn parse_columns(key: &str, value_str: &str) -> Result<Vec<usize>> {
    value_str
        .split(',')
        .map(|token| {
            token.trim().parse().map_err(|_| {
                CliError::Config(format!(
                    "Invalid column list for {}: {} (expected comma-separated integers)",
                    key, value_str
                ))
            })
        })
        .collect()
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "cvreweight - build histograms from Colvars trajectories and reweight them with PMFs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Optional TOML file with default thermal energy and column selections.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S thermal.temperature=310
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count trajectory samples into a grid defined by an axis file.
    Histogram(HistogramArgs),
    /// Append Boltzmann weights from a single N-dimensional PMF to trajectory lines.
    Reweight(ReweightArgs),
    /// Append Boltzmann weights from a sum of 1-D egABF PMFs to trajectory lines.
    Egabf(EgabfArgs),
}

/// Arguments for the `histogram` subcommand.
#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// Axis definition file (TOML, or JSON when the extension is `.json`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub axis: PathBuf,

    /// Colvars trajectory file(s), processed in the order given.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub traj: Vec<PathBuf>,

    /// Path for the histogram grid file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Zero-based trajectory columns, one per axis. Defaults to 0..dimension.
    #[arg(long, num_args(1..), value_name = "N")]
    pub columns: Option<Vec<usize>>,
}

/// Arguments for the `reweight` subcommand.
#[derive(Args, Debug)]
pub struct ReweightArgs {
    /// PMF grid file in Colvars multicolumn format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub pmf: PathBuf,

    /// Colvars trajectory file(s), processed in the order given.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub traj: Vec<PathBuf>,

    /// Zero-based trajectory columns matching the PMF axes.
    #[arg(long, alias = "column", num_args(1..), value_name = "N")]
    pub columns: Option<Vec<usize>>,

    /// Path for the weighted trajectory.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub thermal: ThermalArgs,
}

/// Arguments for the `egabf` subcommand.
#[derive(Args, Debug)]
pub struct EgabfArgs {
    /// 1-D PMF files, the i-th one applying to the i-th selected column.
    #[arg(long, required = true, num_args(1..), value_name = "PATH")]
    pub pmfs: Vec<PathBuf>,

    /// Colvars trajectory file(s), processed in the order given.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub traj: Vec<PathBuf>,

    /// Zero-based trajectory columns matching the PMFs.
    #[arg(long, num_args(1..), value_name = "N")]
    pub columns: Option<Vec<usize>>,

    /// Path for the weighted trajectory.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub thermal: ThermalArgs,
}

/// Thermal energy, given directly or through a temperature.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct ThermalArgs {
    /// Thermal energy kT in kcal/mol.
    #[arg(long, value_name = "FLOAT")]
    pub kbt: Option<f64>,
    /// Temperature in Kelvin, converted with the Boltzmann constant in kcal/mol/K.
    #[arg(long, value_name = "K")]
    pub temperature: Option<f64>,
}

use super::print_summary;
use crate::cli::ReweightArgs;
use crate::config::{DefaultsConfig, FileConfig};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cvreweight::engine::diagnostics::TracingSink;
use cvreweight::engine::progress::ProgressReporter;
use cvreweight::workflows::reweight;
use tracing::info;

pub fn run(
    args: ReweightArgs,
    file_config: &FileConfig,
    progress: &CliProgressHandler,
) -> Result<()> {
    let config = file_config.reweight_config(&args, &DefaultsConfig::default())?;
    info!("Reweighting with kT = {} kcal/mol.", config.kbt);

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let summary = reweight::run(&config, &TracingSink, &reporter)?;

    print_summary(&summary);
    println!("Weighted trajectory written to {}", config.output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use cvreweight::engine::error::EngineError;
    use std::fs;
    use tempfile::tempdir;

    fn parse(argv: Vec<String>) -> ReweightArgs {
        match Cli::parse_from(argv).command {
            Commands::Reweight(args) => args,
            _ => panic!("Expected 'reweight' subcommand"),
        }
    }

    #[test]
    fn reweight_command_weights_in_grid_lines() {
        let dir = tempdir().unwrap();
        let pmf = dir.path().join("run.pmf");
        let traj = dir.path().join("run.traj");
        let output = dir.path().join("weights.dat");
        fs::write(&pmf, "# 1\n# 0 1 2 0\n\n 0.5 0\n 1.5 0\n").unwrap();
        fs::write(&traj, "0 0.5\n1 1.5\n2 3.0\n").unwrap();

        let args = parse(
            [
                "cvreweight",
                "reweight",
                "--pmf",
                pmf.to_str().unwrap(),
                "--traj",
                traj.to_str().unwrap(),
                "--column",
                "1",
                "--kbt",
                "1.0",
                "--output",
                output.to_str().unwrap(),
            ]
            .map(String::from)
            .to_vec(),
        );
        run(args, &FileConfig::default(), &CliProgressHandler::new(false)).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(
            written,
            "0 0.5    1.000000000000000\n1 1.5    1.000000000000000\n"
        );
    }

    #[test]
    fn short_record_fails_the_command() {
        let dir = tempdir().unwrap();
        let pmf = dir.path().join("run.pmf");
        let traj = dir.path().join("run.traj");
        fs::write(&pmf, "# 1\n# 0 1 2 0\n\n 0.5 0\n 1.5 0\n").unwrap();
        fs::write(&traj, "0 0.5\n1\n").unwrap();

        let args = parse(
            [
                "cvreweight",
                "reweight",
                "--pmf",
                pmf.to_str().unwrap(),
                "--traj",
                traj.to_str().unwrap(),
                "--columns",
                "1",
                "--output",
                dir.path().join("w.dat").to_str().unwrap(),
            ]
            .map(String::from)
            .to_vec(),
        );
        let result = run(args, &FileConfig::default(), &CliProgressHandler::new(false));
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::RecordTooShort { line: 2, .. }))
        ));
    }
}

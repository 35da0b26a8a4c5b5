use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use tensile_metrics::{load_file, Config, Specimen, SpecimenDirectory, SpecimenReport};

/// Peak, modulus and offset-yield metrics for tensile test files.
#[derive(Parser)]
#[command(name = "tensile-metrics")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON config file (reader layout and analysis parameters)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the specimen files; SPECIMEN is then a name
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// File suffix appended to specimen names when --dir is given
    #[arg(short, long, default_value = ".Dat")]
    suffix: String,

    /// Specimen files, or names inside --dir
    #[arg(value_name = "SPECIMEN", required = true)]
    specimens: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let directory = cli
        .dir
        .as_ref()
        .map(SpecimenDirectory::open)
        .transpose()
        .context("opening specimen directory")?;

    let mut reports = Vec::with_capacity(cli.specimens.len());
    for name in &cli.specimens {
        let loaded = match &directory {
            Some(dir) => dir.load(name, &cli.suffix, &config.reader),
            None => load_file(&PathBuf::from(name), &config.reader),
        };
        let record = match loaded {
            Ok(record) => record,
            Err(err) => {
                error!("skipping {name}: {err}");
                continue;
            }
        };
        info!("{}: {} samples", record.name(), record.len());

        let specimen = Specimen::new(record, config.analysis.clone());
        reports.push(SpecimenReport::from_specimen(&specimen));
    }

    let json = serde_json::to_string_pretty(&reports).context("serializing reports")?;
    println!("{json}");
    Ok(())
}

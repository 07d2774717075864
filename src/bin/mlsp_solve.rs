//! Solves an MLSP instance and writes the solution report.
//!
//! The instance is read from `<data_dir>/<INSTANCE>`; the report goes to
//! `<output_dir>/Sol-<INSTANCE>`. Without an INSTANCE argument the file
//! name is asked for on stdin.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mlsp::config::RunConfig;
use mlsp::formulation::ModelBuilder;
use mlsp::io::{read_instance, report_file_name, save_report};
use mlsp::optimizer::MicroLpOptimizer;

#[derive(Parser, Debug)]
#[command(name = "mlsp-solve")]
#[command(about = "Assign HAPs to teams with minimal club capacity violations", long_about = None)]
struct Cli {
    /// Instance file name inside the data directory
    instance: Option<String>,

    /// Solve time limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Instance directory (overrides the configuration)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Report directory (overrides the configuration)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => RunConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }
    if let Some(secs) = cli.time_limit {
        config = config.with_time_limit_secs(secs);
    }
    config.validate()?;

    let file_name = match cli.instance {
        Some(name) => name,
        None => prompt_file_name()?,
    };
    let report_name = report_file_name(&file_name);
    println!("The solution is outputted to file: {report_name}");

    let instance_path = config.data_dir.join(&file_name);
    let instance = read_instance(&instance_path)
        .with_context(|| format!("reading {}", instance_path.display()))?;

    let solution = ModelBuilder::new(&instance)
        .with_limits(config.solve_limits()?)
        .solve(&MicroLpOptimizer::new())
        .with_context(|| format!("solving {file_name}"))?;

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let report_path = config.output_dir.join(&report_name);
    save_report(&solution, &report_path)?;

    info!(
        violations = solution.total_violations(),
        elapsed_ms = solution.elapsed().as_millis() as u64,
        "report written to {}",
        report_path.display()
    );
    Ok(())
}

fn prompt_file_name() -> Result<String> {
    println!("From what file should the data be read?");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        bail!("no instance file name given");
    }
    let name = line.trim();
    if name.is_empty() {
        bail!("no instance file name given");
    }
    Ok(name.to_string())
}

//! Random MLSP instance generator.
//!
//! Any of league size, league count, club count, or version label not
//! given on the command line is asked for on stdin. The instance is written
//! to `<data_dir>/<leagueSize>-<leagues>-<clubs>-<version>.txt`.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mlsp::config::RunConfig;
use mlsp::generator::{GeneratorConfig, InstanceGenerator, DEFAULT_MAX_CLUB_DRAWS};
use mlsp::io::{instance_file_name, save_instance};
use mlsp::ErrorKind;

#[derive(Parser, Debug)]
#[command(name = "mlsp-generate")]
#[command(about = "Generate a random multi-league sports scheduling instance", long_about = None)]
struct Cli {
    /// Teams per league (4, 6, 8, 10, 12, 14 or 16)
    #[arg(long)]
    league_size: Option<usize>,

    /// Number of leagues
    #[arg(long)]
    leagues: Option<usize>,

    /// Number of clubs (more than the league size)
    #[arg(long)]
    clubs: Option<usize>,

    /// Version label used in the file name (A, B, C, ...)
    #[arg(long = "version")]
    label: Option<String>,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Generation attempts when a club ends up empty
    #[arg(long, default_value_t = 1)]
    attempts: u32,

    /// Rejected club draws per team before a direct pick
    #[arg(long, default_value_t = DEFAULT_MAX_CLUB_DRAWS)]
    max_club_draws: usize,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration)
    #[arg(long)]
    data_dir: Option<PathBuf>,
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

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let league_size = match cli.league_size {
        Some(n) => n,
        None => prompt(&mut input, "How many teams should every league contain?")?,
    };
    let num_leagues = match cli.leagues {
        Some(n) => n,
        None => prompt(&mut input, "How many leagues should there be?")?,
    };
    let num_clubs = match cli.clubs {
        Some(n) => n,
        None => prompt(
            &mut input,
            "How many clubs should there be? (More than number of teams per league)",
        )?,
    };
    let label: String = match cli.label {
        Some(v) => v,
        None => prompt(&mut input, "What is the version of this file? (A,B,C,... etc)")?,
    };

    let generator = InstanceGenerator::new(
        GeneratorConfig::new(league_size, num_leagues, num_clubs)
            .with_max_club_draws(cli.max_club_draws),
    );
    generator.config().validate()?;

    let table = config.hap_table();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let attempts = cli.attempts.max(1);
    let mut attempt = 1;
    let instance = loop {
        match generator.generate(&table, &mut rng) {
            Ok(instance) => break instance,
            Err(e) if e.kind() == ErrorKind::GenerationConstraint && attempt < attempts => {
                warn!(attempt, error = %e, "generation failed, trying again");
                attempt += 1;
            }
            Err(e) => return Err(e).context("instance generation failed"),
        }
    };

    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating {}", config.data_dir.display()))?;
    let path = config
        .data_dir
        .join(instance_file_name(league_size, num_leagues, num_clubs, &label));
    save_instance(&instance, &path)?;

    info!(
        teams = instance.num_teams(),
        clubs = instance.num_clubs(),
        attempt,
        "instance written to {}",
        path.display()
    );
    Ok(())
}

/// Asks `question` on stdout and parses one line of the answer.
fn prompt<T>(input: &mut impl BufRead, question: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    println!("{question}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no answer to {question:?} before end of input");
    }
    let answer = line.trim();
    answer
        .parse()
        .with_context(|| format!("cannot understand answer {answer:?}"))
}

//! Random MLSP instance generator.
//!
//! Produces structurally valid instances: an exact league partition, a club
//! partition in which no club hosts two teams of the same league, and club
//! capacities drawn from the admissible range for each club size.
//!
//! # Algorithm
//!
//! 1. **Leagues**: each team in turn draws a league uniformly and keeps it
//!    if the league still has an open slot (rejection sampling).
//! 2. **Clubs**: league by league, each team draws a club uniformly among
//!    all clubs and keeps it if no earlier team of *this* league took it.
//!    After `max_club_draws` rejected draws the team takes a uniformly
//!    chosen club among the free ones, so the loop is bounded.
//! 3. **Capacities**: a club of size `s` draws its capacity uniformly from
//!    `[max(⌊s/2⌋-2, 1), min(⌊s/2⌋+2, s)]`. An empty club is an error.
//!
//! Randomness comes only from the generator passed in, so a seeded RNG
//! reproduces the same instance.
//!
//! # Reference
//! Li et al. (2022), "Multi-league sports scheduling with different league
//! sizes" (capacity range)

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MlspError, Result};
use crate::hap_table::HapTable;
use crate::models::{capacity_bounds, double_round_robin_rounds, Club, Instance};

/// Default bound on rejected club draws per team.
pub const DEFAULT_MAX_CLUB_DRAWS: usize = 64;

/// Generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Teams per league (even, with a HAP set available).
    pub league_size: usize,
    /// Number of leagues.
    pub num_leagues: usize,
    /// Number of clubs (must exceed `league_size`).
    pub num_clubs: usize,
    /// Rejected club draws per team before falling back to a direct pick.
    pub max_club_draws: usize,
}

impl GeneratorConfig {
    /// Creates a configuration with the default draw bound.
    pub fn new(league_size: usize, num_leagues: usize, num_clubs: usize) -> Self {
        Self {
            league_size,
            num_leagues,
            num_clubs,
            max_club_draws: DEFAULT_MAX_CLUB_DRAWS,
        }
    }

    /// Sets the bound on rejected club draws per team.
    pub fn with_max_club_draws(mut self, draws: usize) -> Self {
        self.max_club_draws = draws;
        self
    }

    /// Total number of teams.
    pub fn num_teams(&self) -> usize {
        self.league_size * self.num_leagues
    }

    /// Rounds of the double round-robin.
    pub fn num_rounds(&self) -> usize {
        double_round_robin_rounds(self.league_size)
    }

    /// Checks the parameters admit a valid club partition.
    ///
    /// An odd league size or one below 2 has no HAP set and is reported as
    /// `UnsupportedLeagueSize`; the other failures are `GenerationConstraint`.
    pub fn validate(&self) -> Result<()> {
        if self.num_leagues == 0 {
            return Err(MlspError::generation("at least one league is required"));
        }
        if self.league_size < 2 || self.league_size % 2 != 0 {
            return Err(MlspError::UnsupportedLeagueSize(self.league_size));
        }
        if self.num_clubs <= self.league_size {
            return Err(MlspError::generation(format!(
                "number of clubs ({}) must exceed the league size ({})",
                self.num_clubs, self.league_size
            )));
        }
        Ok(())
    }
}

/// Builds random instances from a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    config: GeneratorConfig,
}

impl InstanceGenerator {
    /// Creates a generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one instance.
    ///
    /// # Errors
    /// - `GenerationConstraint` if `num_clubs ≤ league_size` or a club ends
    ///   up with no team.
    /// - `UnsupportedLeagueSize` if the league size is odd or `table` has no
    ///   HAP set for it.
    /// - `InputFormat` if the table's HAP set is not complementary.
    pub fn generate<T, R>(&self, table: &T, rng: &mut R) -> Result<Instance>
    where
        T: HapTable + ?Sized,
        R: Rng,
    {
        let cfg = &self.config;
        cfg.validate()?;

        let haps = table.hap_set(cfg.league_size)?;
        if haps.league_size() != cfg.league_size {
            return Err(MlspError::UnsupportedLeagueSize(cfg.league_size));
        }
        if !haps.is_complementary() {
            return Err(MlspError::input_format(format!(
                "HAP set for league size {} is not complementary",
                cfg.league_size
            )));
        }

        let leagues = partition_leagues(cfg.num_teams(), cfg.num_leagues, cfg.league_size, rng);
        let mut clubs = partition_clubs(&leagues, cfg.num_clubs, cfg.max_club_draws, rng);
        sample_capacities(&mut clubs, rng)?;

        debug!(
            teams = cfg.num_teams(),
            leagues = cfg.num_leagues,
            clubs = cfg.num_clubs,
            "generated MLSP instance"
        );
        Instance::new(leagues, clubs, haps)
    }
}

/// Generates an instance with the default draw bound.
pub fn generate<T, R>(
    league_size: usize,
    num_leagues: usize,
    num_clubs: usize,
    table: &T,
    rng: &mut R,
) -> Result<Instance>
where
    T: HapTable + ?Sized,
    R: Rng,
{
    InstanceGenerator::new(GeneratorConfig::new(league_size, num_leagues, num_clubs))
        .generate(table, rng)
}

/// Rejection-samples an exact partition of `0..num_teams` into leagues.
fn partition_leagues<R: Rng>(
    num_teams: usize,
    num_leagues: usize,
    league_size: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut leagues: Vec<Vec<usize>> = vec![Vec::with_capacity(league_size); num_leagues];
    for team in 0..num_teams {
        loop {
            let l = rng.random_range(0..num_leagues);
            if leagues[l].len() < league_size {
                leagues[l].push(team);
                break;
            }
        }
    }
    leagues
}

/// Assigns every team to a club not yet used by its own league.
///
/// Requires `num_clubs > league size` so a free club always exists.
fn partition_clubs<R: Rng>(
    leagues: &[Vec<usize>],
    num_clubs: usize,
    max_draws: usize,
    rng: &mut R,
) -> Vec<Club> {
    let mut clubs: Vec<Club> = (0..num_clubs).map(Club::new).collect();
    let mut fallbacks = 0usize;

    for league in leagues {
        let mut used = vec![false; num_clubs];
        for &team in league {
            let mut chosen = None;
            for _ in 0..max_draws {
                let c = rng.random_range(0..num_clubs);
                if !used[c] {
                    chosen = Some(c);
                    break;
                }
            }
            let c = match chosen {
                Some(c) => c,
                None => {
                    fallbacks += 1;
                    let free: Vec<usize> = (0..num_clubs).filter(|&c| !used[c]).collect();
                    free[rng.random_range(0..free.len())]
                }
            };
            used[c] = true;
            clubs[c].add_team(team);
        }
    }

    if fallbacks > 0 {
        debug!(fallbacks, "club draws fell back to direct pick");
    }
    clubs
}

/// Draws a capacity for every club from its admissible range.
fn sample_capacities<R: Rng>(clubs: &mut [Club], rng: &mut R) -> Result<()> {
    for club in clubs.iter_mut() {
        let range = capacity_bounds(club.size()).ok_or_else(|| {
            MlspError::generation(format!(
                "club {} ended up with no team; try again or reduce the number of clubs",
                club.index
            ))
        })?;
        club.capacity = rng.random_range(range);
    }
    Ok(())
}

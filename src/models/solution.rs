//! Solution model.
//!
//! A solution is produced once per solve and never mutated afterwards. It
//! stores the HAP slot chosen for every team (the `x` matrix in compact
//! form), the violation counts `z[club][round]`, the objective value, and
//! the wall-clock time spent in the optimizer.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of one MLSP solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    hap_of_team: Vec<usize>,
    league_size: usize,
    violations: Vec<Vec<u32>>,
    objective: f64,
    elapsed: Duration,
    optimizer: String,
}

impl Solution {
    /// Creates a solution.
    ///
    /// `hap_of_team[t]` is the slot of team `t`; `violations[c][r]` is the
    /// excess home games of club `c` in round `r`.
    pub fn new(
        hap_of_team: Vec<usize>,
        league_size: usize,
        violations: Vec<Vec<u32>>,
        objective: f64,
        elapsed: Duration,
    ) -> Self {
        Self {
            hap_of_team,
            league_size,
            violations,
            objective,
            elapsed,
            optimizer: String::new(),
        }
    }

    /// Records the optimizer backend that produced this solution.
    pub fn with_optimizer(mut self, name: impl Into<String>) -> Self {
        self.optimizer = name.into();
        self
    }

    /// HAP slot assigned to a team.
    pub fn hap_of(&self, team: usize) -> usize {
        self.hap_of_team[team]
    }

    /// Slot per team, indexed by team.
    pub fn assignment(&self) -> &[usize] {
        &self.hap_of_team
    }

    /// `x[team][hap]`: 1 if the team holds the slot, else 0.
    pub fn x(&self, team: usize, hap: usize) -> u8 {
        u8::from(self.hap_of_team[team] == hap)
    }

    /// The full team × HAP matrix.
    pub fn x_matrix(&self) -> Vec<Vec<u8>> {
        self.hap_of_team
            .iter()
            .map(|&slot| (0..self.league_size).map(|h| u8::from(h == slot)).collect())
            .collect()
    }

    /// `z[club][round]`.
    pub fn violation(&self, club: usize, round: usize) -> u32 {
        self.violations[club][round]
    }

    /// The full club × round violation matrix.
    pub fn violations(&self) -> &[Vec<u32>] {
        &self.violations
    }

    /// Violations of one club summed over rounds.
    pub fn club_violations(&self, club: usize) -> u32 {
        self.violations[club].iter().sum()
    }

    /// Sum of all violations.
    pub fn total_violations(&self) -> u32 {
        self.violations.iter().flatten().sum()
    }

    /// Whether no club exceeds its capacity in any round.
    pub fn is_violation_free(&self) -> bool {
        self.total_violations() == 0
    }

    /// Objective value reported by the optimizer.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Wall-clock time of the solve call.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Wall-clock time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    /// Name of the optimizer backend.
    pub fn optimizer(&self) -> &str {
        &self.optimizer
    }
}

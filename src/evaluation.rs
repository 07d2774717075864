//! Violation evaluation for a fixed HAP assignment.
//!
//! Given which HAP slot each team holds, the home games demanded of a club
//! in a round follow directly from `U`. The excess over capacity is what the
//! model's `z` variables must equal at optimality.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | games(c, r) | `Σ_{t∈c} U[hap(t)][r]` |
//! | excess(c, r) | `max(0, games(c, r) - capacity(c))` |
//! | Total | Sum of excess over clubs and rounds |
//! | Worst round | Largest excess of any club in any round |
//! | Clubs in violation | Clubs with positive total excess |

use serde::{Deserialize, Serialize};

use crate::models::Instance;

/// Home games club `club` must host in `round` under `assignment`.
///
/// `assignment[t]` is the HAP slot of team `t`.
pub fn home_games(instance: &Instance, assignment: &[usize], club: usize, round: usize) -> u32 {
    let haps = instance.haps();
    instance.clubs()[club]
        .teams
        .iter()
        .filter(|&&t| haps.is_home(assignment[t], round))
        .count() as u32
}

/// The assignment giving the `i`-th team of every league HAP slot `i`.
///
/// Always satisfies the coverage and assignment constraints, so the model
/// is never infeasible.
pub fn league_order_assignment(instance: &Instance) -> Vec<usize> {
    let mut assignment = vec![0; instance.num_teams()];
    for league in instance.leagues() {
        for (slot, &team) in league.teams.iter().enumerate() {
            assignment[team] = slot;
        }
    }
    assignment
}

/// Whether `assignment` gives every league's teams distinct slots covering
/// `0..league_size` exactly once.
pub fn is_league_bijection(instance: &Instance, assignment: &[usize]) -> bool {
    if assignment.len() != instance.num_teams() {
        return false;
    }
    let n = instance.league_size();
    instance.leagues().iter().all(|league| {
        let mut used = vec![false; n];
        league.teams.iter().all(|&t| {
            let slot = assignment[t];
            slot < n && !std::mem::replace(&mut used[slot], true)
        })
    })
}

/// Per-club, per-round excess for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationProfile {
    /// `excess[club][round]`.
    pub excess: Vec<Vec<u32>>,
    /// Sum of all excess.
    pub total: u32,
    /// Largest single excess value.
    pub worst: u32,
    /// Number of clubs with positive total excess.
    pub clubs_in_violation: usize,
}

impl ViolationProfile {
    /// Computes the profile of `assignment`.
    pub fn calculate(instance: &Instance, assignment: &[usize]) -> Self {
        let excess: Vec<Vec<u32>> = instance
            .clubs()
            .iter()
            .map(|club| {
                (0..instance.num_rounds())
                    .map(|r| {
                        home_games(instance, assignment, club.index, r)
                            .saturating_sub(club.capacity)
                    })
                    .collect()
            })
            .collect();

        let total = excess.iter().flatten().sum();
        let worst = excess.iter().flatten().copied().max().unwrap_or(0);
        let clubs_in_violation = excess
            .iter()
            .filter(|row| row.iter().any(|&v| v > 0))
            .count();

        Self {
            excess,
            total,
            worst,
            clubs_in_violation,
        }
    }

    /// Whether no club exceeds its capacity.
    pub fn is_violation_free(&self) -> bool {
        self.total == 0
    }
}

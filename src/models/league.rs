//! League model.
//!
//! A league is an ordered group of exactly `league_size` teams that play a
//! double round-robin among themselves. The order matters only for the
//! trivial assignment (position `i` takes HAP slot `i`).

use serde::{Deserialize, Serialize};

/// An ordered set of teams playing a double round-robin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// Zero-based league index.
    pub index: usize,
    /// Zero-based team ids, in league order.
    pub teams: Vec<usize>,
}

impl League {
    /// Creates a league from its teams.
    pub fn new(index: usize, teams: Vec<usize>) -> Self {
        Self { index, teams }
    }

    /// Number of teams.
    pub fn size(&self) -> usize {
        self.teams.len()
    }

    /// Whether the team plays in this league.
    pub fn contains(&self, team: usize) -> bool {
        self.teams.contains(&team)
    }

    /// Position of a team within the league order.
    pub fn position_of(&self, team: usize) -> Option<usize> {
        self.teams.iter().position(|&t| t == team)
    }
}

/// Number of rounds of a double round-robin with `league_size` teams.
#[inline]
pub fn double_round_robin_rounds(league_size: usize) -> usize {
    2 * league_size.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_lookup() {
        let league = League::new(0, vec![7, 2, 5, 0]);
        assert_eq!(league.size(), 4);
        assert!(league.contains(5));
        assert!(!league.contains(1));
        assert_eq!(league.position_of(2), Some(1));
        assert_eq!(league.position_of(9), None);
    }

    #[test]
    fn test_round_count() {
        for n in (4..=16).step_by(2) {
            assert_eq!(double_round_robin_rounds(n), 2 * (n - 1));
        }
        assert_eq!(double_round_robin_rounds(0), 0);
    }
}

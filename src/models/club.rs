//! Club model.
//!
//! A club is a venue shared by teams of different leagues. Its capacity is
//! the number of home games it can host in a single round; anything beyond
//! that is a violation.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A venue hosting a subset of teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    /// Zero-based club index.
    pub index: usize,
    /// Maximum simultaneous home games per round.
    pub capacity: u32,
    /// Zero-based team ids hosted by this club.
    pub teams: Vec<usize>,
}

impl Club {
    /// Creates an empty club with zero capacity.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            capacity: 0,
            teams: Vec::new(),
        }
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds teams.
    pub fn with_teams(mut self, teams: impl IntoIterator<Item = usize>) -> Self {
        self.teams.extend(teams);
        self
    }

    /// Adds a single team.
    pub fn add_team(&mut self, team: usize) {
        self.teams.push(team);
    }

    /// Number of teams hosted.
    pub fn size(&self) -> usize {
        self.teams.len()
    }

    /// Whether no team is hosted here.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Whether the team is hosted here.
    pub fn contains(&self, team: usize) -> bool {
        self.teams.contains(&team)
    }

    /// Whether the capacity lies within [`capacity_bounds`] for this size.
    pub fn has_valid_capacity(&self) -> bool {
        capacity_bounds(self.size()).is_some_and(|range| range.contains(&self.capacity))
    }
}

/// Admissible capacity range for a club of `size` teams:
/// `[max(⌊size/2⌋ - 2, 1), min(⌊size/2⌋ + 2, size)]`.
///
/// Returns `None` for an empty club, which has no admissible capacity.
pub fn capacity_bounds(size: usize) -> Option<RangeInclusive<u32>> {
    if size == 0 {
        return None;
    }
    let half = (size / 2) as i64;
    let lower = (half - 2).max(1);
    let upper = (half + 2).min(size as i64);
    Some(lower as u32..=upper as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_club_builder() {
        let club = Club::new(3).with_capacity(2).with_teams([4, 9, 11]);
        assert_eq!(club.index, 3);
        assert_eq!(club.size(), 3);
        assert!(club.contains(9));
        assert!(!club.contains(5));
        assert!(club.has_valid_capacity());
    }

    #[test]
    fn test_capacity_bounds_small_clubs() {
        assert_eq!(capacity_bounds(0), None);
        assert_eq!(capacity_bounds(1), Some(1..=1));
        assert_eq!(capacity_bounds(2), Some(1..=2));
        assert_eq!(capacity_bounds(3), Some(1..=3));
        assert_eq!(capacity_bounds(4), Some(1..=4));
    }

    #[test]
    fn test_capacity_bounds_large_clubs() {
        // ⌊9/2⌋ = 4 → [2, 6]
        assert_eq!(capacity_bounds(9), Some(2..=6));
        // ⌊16/2⌋ = 8 → [6, 10]
        assert_eq!(capacity_bounds(16), Some(6..=10));
    }

    #[test]
    fn test_empty_club_has_no_valid_capacity() {
        let club = Club::new(0).with_capacity(1);
        assert!(club.is_empty());
        assert!(!club.has_valid_capacity());
    }

    #[test]
    fn test_out_of_range_capacity() {
        let club = Club::new(0).with_capacity(3).with_teams([0, 1]);
        assert!(!club.has_valid_capacity());
    }
}

//! Home-away pattern (HAP) sets.
//!
//! A HAP set for league size `n` is an `n × 2(n-1)` 0/1 matrix `U`:
//! row `h` is the pattern of HAP slot `h`, column `r` is round `r`, and
//! `U[h][r] = 1` means the team holding slot `h` plays at home in round `r`.
//!
//! A usable set is *complementary*: every column has exactly `n/2` ones,
//! so each round pairs home teams with away teams. Rows are pairwise distinct.
//!
//! # Reference
//! Davari et al. (2020), "The multi-league sports scheduling problem"

use serde::{Deserialize, Serialize};

use super::league::double_round_robin_rounds;
use crate::error::{MlspError, Result};

/// The pattern matrix `U` for one league size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapSet {
    league_size: usize,
    num_rounds: usize,
    cells: Vec<Vec<u8>>,
}

impl HapSet {
    /// Creates a HAP set from its rows.
    ///
    /// Checks shape only: an even number of rows (≥ 2), each row of length
    /// `2(rows - 1)`, every cell 0 or 1. Use [`is_complementary`](Self::is_complementary)
    /// for the per-round balance.
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Self> {
        let league_size = rows.len();
        if league_size < 2 || league_size % 2 != 0 {
            return Err(MlspError::input_format(format!(
                "HAP set must have an even number of rows (≥ 2), got {league_size}"
            )));
        }
        let num_rounds = double_round_robin_rounds(league_size);
        for (h, row) in rows.iter().enumerate() {
            if row.len() != num_rounds {
                return Err(MlspError::input_format(format!(
                    "HAP row {h} has {} rounds, expected {num_rounds}",
                    row.len()
                )));
            }
            if let Some(bad) = row.iter().find(|&&v| v > 1) {
                return Err(MlspError::input_format(format!(
                    "HAP row {h} contains value {bad}, expected 0 or 1"
                )));
            }
        }
        Ok(Self {
            league_size,
            num_rounds,
            cells: rows,
        })
    }

    /// Number of HAP slots (= league size).
    pub fn league_size(&self) -> usize {
        self.league_size
    }

    /// Number of rounds.
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// `U[hap][round]`.
    #[inline]
    pub fn value(&self, hap: usize, round: usize) -> u8 {
        self.cells[hap][round]
    }

    /// Whether slot `hap` plays at home in `round`.
    #[inline]
    pub fn is_home(&self, hap: usize, round: usize) -> bool {
        self.cells[hap][round] == 1
    }

    /// Pattern of one slot.
    pub fn row(&self, hap: usize) -> &[u8] {
        &self.cells[hap]
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Number of slots at home in `round`.
    pub fn home_count(&self, round: usize) -> usize {
        self.cells.iter().filter(|row| row[round] == 1).count()
    }

    /// Whether every round has exactly `league_size / 2` home slots.
    pub fn is_complementary(&self) -> bool {
        (0..self.num_rounds).all(|r| self.home_count(r) == self.league_size / 2)
    }

    /// Whether all patterns are pairwise distinct.
    pub fn has_distinct_rows(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, a)| self.cells[i + 1..].iter().all(|b| a != b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::hap4;

    #[test]
    fn test_shape() {
        let u = hap4();
        assert_eq!(u.league_size(), 4);
        assert_eq!(u.num_rounds(), 6);
        assert!(u.is_home(0, 0));
        assert!(!u.is_home(3, 0));
        assert_eq!(u.row(1), &[1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_complementary_and_distinct() {
        let u = hap4();
        assert!(u.is_complementary());
        assert!(u.has_distinct_rows());
        for r in 0..u.num_rounds() {
            assert_eq!(u.home_count(r), 2);
        }
    }

    #[test]
    fn test_unbalanced_column_detected() {
        let u = HapSet::new(vec![
            vec![1, 0, 1, 0, 1, 0],
            vec![1, 0, 0, 0, 1, 1],
            vec![1, 1, 1, 1, 0, 0],
            vec![0, 1, 0, 1, 0, 1],
        ])
        .unwrap();
        assert!(!u.is_complementary());
    }

    #[test]
    fn test_duplicate_rows_detected() {
        let u = HapSet::new(vec![vec![1, 0], vec![1, 0]]).unwrap();
        assert!(!u.has_distinct_rows());
    }

    #[test]
    fn test_rejects_odd_row_count() {
        let err = HapSet::new(vec![vec![1, 0, 1, 0], vec![0, 1, 0, 1], vec![1, 1, 0, 0]])
            .unwrap_err();
        assert!(err.to_string().contains("even number"));
    }

    #[test]
    fn test_rejects_wrong_row_length() {
        let err = HapSet::new(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_rejects_non_binary_cell() {
        let err = HapSet::new(vec![vec![2, 0], vec![0, 1]]).unwrap_err();
        assert!(err.to_string().contains("value 2"));
    }
}

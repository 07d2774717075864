//! HAP set lookup by league size.
//!
//! HAP sets are precomputed data, not something this crate derives. A
//! [`HapTable`] hands out the set for a league size or reports that none
//! exists. [`crate::io::FileHapTable`] reads them from `HAPset_for_<n>.txt`
//! files; [`InMemoryHapTable`] holds sets registered in code.

use std::collections::HashMap;

use crate::error::{MlspError, Result};
use crate::models::HapSet;

/// League sizes for which HAP set files are distributed.
pub const SUPPORTED_LEAGUE_SIZES: [usize; 7] = [4, 6, 8, 10, 12, 14, 16];

/// Whether `league_size` is one of [`SUPPORTED_LEAGUE_SIZES`].
pub fn is_supported_league_size(league_size: usize) -> bool {
    SUPPORTED_LEAGUE_SIZES.contains(&league_size)
}

/// Source of complementary HAP sets.
pub trait HapTable {
    /// Returns the HAP set for `league_size`.
    ///
    /// # Errors
    /// `UnsupportedLeagueSize` if the table has no entry for this size.
    fn hap_set(&self, league_size: usize) -> Result<HapSet>;
}

/// HAP sets held in memory, keyed by league size.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHapTable {
    sets: HashMap<usize, HapSet>,
}

impl InMemoryHapTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a HAP set under its own league size.
    pub fn with_set(mut self, set: HapSet) -> Self {
        self.insert(set);
        self
    }

    /// Registers a HAP set, replacing any set of the same size.
    pub fn insert(&mut self, set: HapSet) {
        self.sets.insert(set.league_size(), set);
    }

    /// League sizes present, ascending.
    pub fn league_sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.sets.keys().copied().collect();
        sizes.sort_unstable();
        sizes
    }
}

impl HapTable for InMemoryHapTable {
    fn hap_set(&self, league_size: usize) -> Result<HapSet> {
        self.sets
            .get(&league_size)
            .cloned()
            .ok_or(MlspError::UnsupportedLeagueSize(league_size))
    }
}

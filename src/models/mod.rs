//! MLSP domain models.
//!
//! Provides the data types describing a multi-league scheduling problem and
//! its solution.
//!
//! # Domain Mappings
//!
//! | mlsp | Meaning |
//! |------|---------|
//! | League | Teams playing a double round-robin together |
//! | Club | Shared venue with a per-round hosting capacity |
//! | HapSet | Home/away pattern per HAP slot and round (`U`) |
//! | Instance | Partitions + capacities + `U` |
//! | Solution | Team → HAP slot, violations per club and round |

mod club;
mod hap;
mod instance;
mod league;
mod solution;

pub use club::{capacity_bounds, Club};
pub use hap::HapSet;
pub use instance::Instance;
pub use league::{double_round_robin_rounds, League};
pub use solution::Solution;

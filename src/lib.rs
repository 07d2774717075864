//! Multi-league sports scheduling (MLSP).
//!
//! Several leagues play double round-robin tournaments at the same time.
//! Teams from different leagues may belong to the same club, and a club can
//! only host a limited number of home games per round. Given a complementary
//! HAP set (home/away patterns) shared by every league, this crate assigns
//! one pattern to each team so that the total excess of home games over club
//! capacity is minimal.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `League`, `Club`, `HapSet`, `Instance`, `Solution`
//! - **`hap_table`**: HAP set lookup by league size
//! - **`generator`**: Random instance generation (rejection sampling)
//! - **`validation`**: Instance invariant checks (club/league overlap, capacities, HAP balance)
//! - **`optimizer`**: Backend-neutral MILP contract and the `microlp` backend
//! - **`formulation`**: The MLSP integer program and solution recovery
//! - **`evaluation`**: Violation profile of a fixed assignment
//! - **`io`**: Instance, HAP set, and report file formats
//! - **`config`**: Run configuration for the command-line tools
//!
//! # Example
//!
//! ```no_run
//! use mlsp::formulation::ModelBuilder;
//! use mlsp::generator::generate;
//! use mlsp::io::FileHapTable;
//! use mlsp::optimizer::MicroLpOptimizer;
//! use rand::SeedableRng;
//!
//! # fn main() -> mlsp::Result<()> {
//! let table = FileHapTable::new("data/hapsets");
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let instance = generate(6, 4, 8, &table, &mut rng)?;
//! let solution = ModelBuilder::new(&instance).solve(&MicroLpOptimizer::new())?;
//! println!("total violations: {}", solution.total_violations());
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Li et al. (2022), "Multi-league sports scheduling with different league sizes"
//! - Rasmussen & Trick (2008), "Round robin scheduling: a survey"
//! - de Werra (1981), "Scheduling in sports"

pub mod config;
pub mod error;
pub mod evaluation;
pub mod formulation;
pub mod generator;
pub mod hap_table;
pub mod io;
pub mod models;
pub mod optimizer;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ErrorKind, MlspError, Result};

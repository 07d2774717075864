//! HAP set files.
//!
//! `HAPset_for_<n>.txt` holds the `n × 2(n-1)` pattern matrix for league
//! size `n` as `H` (home) / `A` (away) tokens, row by row. Tokens beyond
//! the matrix are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MlspError, Result};
use crate::hap_table::{is_supported_league_size, HapTable};
use crate::models::{double_round_robin_rounds, HapSet};

/// File name of the HAP set for `league_size`.
pub fn hapset_file_name(league_size: usize) -> String {
    format!("HAPset_for_{league_size}.txt")
}

/// Parses the `H`/`A` tokens of a HAP set file for `league_size` teams.
pub fn parse_hapset(text: &str, league_size: usize) -> Result<HapSet> {
    let num_rounds = double_round_robin_rounds(league_size);
    let mut tokens = text.split_whitespace();

    let mut rows = Vec::with_capacity(league_size);
    for h in 0..league_size {
        let mut row = Vec::with_capacity(num_rounds);
        for r in 0..num_rounds {
            let cell = match tokens.next() {
                Some("H") => 1,
                Some("A") => 0,
                Some(other) => {
                    return Err(MlspError::input_format(format!(
                        "HAP cell ({h}, {r}) is {other:?}, expected H or A"
                    )))
                }
                None => {
                    return Err(MlspError::input_format(format!(
                        "HAP set for {league_size} teams ends at cell ({h}, {r})"
                    )))
                }
            };
            row.push(cell);
        }
        rows.push(row);
    }
    HapSet::new(rows)
}

/// Reads HAP sets from `HAPset_for_<n>.txt` files in one directory.
#[derive(Debug, Clone)]
pub struct FileHapTable {
    dir: PathBuf,
}

impl FileHapTable {
    /// Creates a table over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory searched for HAP set files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file for `league_size`.
    pub fn path_for(&self, league_size: usize) -> PathBuf {
        self.dir.join(hapset_file_name(league_size))
    }
}

impl HapTable for FileHapTable {
    fn hap_set(&self, league_size: usize) -> Result<HapSet> {
        if !is_supported_league_size(league_size) {
            return Err(MlspError::UnsupportedLeagueSize(league_size));
        }
        let path = self.path_for(league_size);
        let text = fs::read_to_string(&path)
            .map_err(|e| MlspError::io(format!("cannot read HAP set {}", path.display()), e))?;
        let set = parse_hapset(&text, league_size)?;
        if !set.is_complementary() {
            return Err(MlspError::input_format(format!(
                "{} is not complementary: some round does not have {} home slots",
                path.display(),
                league_size / 2
            )));
        }
        debug!(league_size, path = %path.display(), "loaded HAP set");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hap_table::SUPPORTED_LEAGUE_SIZES;
    use crate::test_support::hap4;

    const HAP4: &str = "H A H A H A\nH A A A H H\nA H H H A A\nA H A H A H\n";

    fn shipped() -> FileHapTable {
        FileHapTable::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/hapsets"))
    }

    #[test]
    fn test_parse_hapset() {
        assert_eq!(parse_hapset(HAP4, 4).unwrap(), hap4());
    }

    #[test]
    fn test_bad_token() {
        let err = parse_hapset(&HAP4.replacen('A', "X", 1), 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
        assert!(err.to_string().contains("(0, 1)"));
    }

    #[test]
    fn test_too_few_tokens() {
        let err = parse_hapset("H A H A", 4).unwrap_err();
        assert!(err.to_string().contains("ends at cell (0, 4)"));
    }

    #[test]
    fn test_shipped_sets_are_complementary() {
        let table = shipped();
        for n in SUPPORTED_LEAGUE_SIZES {
            let set = table.hap_set(n).unwrap();
            assert_eq!(set.league_size(), n);
            assert!(set.is_complementary(), "size {n}");
            assert!(set.has_distinct_rows(), "size {n}");
        }
    }

    #[test]
    fn test_unsupported_size() {
        let err = shipped().hap_set(18).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedLeagueSize);
        let err = shipped().hap_set(5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedLeagueSize);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileHapTable::new(dir.path()).hap_set(4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn test_unbalanced_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let table = FileHapTable::new(dir.path());
        fs::write(table.path_for(4), HAP4.replacen("H A H A H A", "H H H A H A", 1)).unwrap();
        let err = table.hap_set(4).unwrap_err();
        assert!(err.to_string().contains("not complementary"));
    }
}

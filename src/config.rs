//! Run configuration for the command-line tools.
//!
//! Paths and the optional solve time limit, loadable from a JSON file.
//! Missing fields take their defaults:
//!
//! ```json
//! { "data_dir": "data", "hapset_dir": "data/hapsets", "output_dir": ".", "time_limit_secs": null }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MlspError, Result};
use crate::io::FileHapTable;
use crate::optimizer::SolveLimits;

/// Directories and limits shared by `mlsp-generate` and `mlsp-solve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Where instance files are written and read.
    pub data_dir: PathBuf,
    /// Where `HAPset_for_<n>.txt` files live.
    pub hapset_dir: PathBuf,
    /// Where solution reports are written.
    pub output_dir: PathBuf,
    /// Solve time limit in seconds (`None` = run to optimality).
    pub time_limit_secs: Option<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            hapset_dir: PathBuf::from("data/hapsets"),
            output_dir: PathBuf::from("."),
            time_limit_secs: None,
        }
    }
}

impl RunConfig {
    /// Loads a configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| MlspError::io(format!("cannot read config {}", path.display()), e))?;
        Self::from_json(&text)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| MlspError::input_format(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects time limits that are negative, not finite, or beyond `Duration`.
    pub fn validate(&self) -> Result<()> {
        self.time_limit().map(|_| ())
    }

    /// The time limit as a `Duration`.
    pub fn time_limit(&self) -> Result<Option<Duration>> {
        self.time_limit_secs
            .map(|secs| {
                Duration::try_from_secs_f64(secs).map_err(|e| {
                    MlspError::input_format(format!(
                        "time_limit_secs must be a non-negative number of seconds, got {secs}: {e}"
                    ))
                })
            })
            .transpose()
    }

    /// Sets the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Sets the HAP set directory.
    pub fn with_hapset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.hapset_dir = dir.into();
        self
    }

    /// Sets the report directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the time limit in seconds.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit_secs = Some(secs);
        self
    }

    /// HAP table over [`hapset_dir`](Self::hapset_dir).
    pub fn hap_table(&self) -> FileHapTable {
        FileHapTable::new(&self.hapset_dir)
    }

    /// Solve limits derived from the time limit.
    pub fn solve_limits(&self) -> Result<SolveLimits> {
        Ok(match self.time_limit()? {
            Some(limit) => SolveLimits::none().with_time_limit(limit),
            None => SolveLimits::none(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let c = RunConfig::default();
        assert_eq!(c.data_dir, PathBuf::from("data"));
        assert_eq!(c.hapset_dir, PathBuf::from("data/hapsets"));
        assert!(!c.solve_limits().unwrap().is_bounded());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = RunConfig::from_json(r#"{ "output_dir": "out", "time_limit_secs": 2.5 }"#).unwrap();
        assert_eq!(c.output_dir, PathBuf::from("out"));
        assert_eq!(c.data_dir, PathBuf::from("data"));
        assert_eq!(
            c.solve_limits().unwrap().time_limit,
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn test_negative_time_limit_rejected() {
        let err = RunConfig::from_json(r#"{ "time_limit_secs": -1 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn test_time_limit_beyond_duration_rejected() {
        let err = RunConfig::from_json(r#"{ "time_limit_secs": 1e300 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);

        let c = RunConfig::default().with_time_limit_secs(1e300);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InputFormat);
        assert_eq!(c.solve_limits().unwrap_err().kind(), ErrorKind::InputFormat);

        let c = RunConfig::default().with_time_limit_secs(f64::NAN);
        assert!(c.solve_limits().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mlsp.json");
        let config = RunConfig::default()
            .with_data_dir("instances")
            .with_time_limit_secs(10.0);
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(RunConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = RunConfig::from_json("{ data_dir: 1 }").unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}

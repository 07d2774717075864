//! Error types.
//!
//! Every failure surfaced by this crate is one of four kinds. They are kept
//! distinct so callers can react to a bad input file differently from an
//! infeasible generation request or a failed solve.

use std::io;

use thiserror::Error;

use crate::optimizer::SolveStatus;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MlspError>;

/// Errors raised while reading, generating, or solving MLSP instances.
#[derive(Debug, Error)]
pub enum MlspError {
    /// Malformed or missing instance / HAPset file.
    #[error("input format error: {message}")]
    InputFormat {
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Generation parameters cannot satisfy the league/club partition rules.
    #[error("generation constraint violated: {0}")]
    GenerationConstraint(String),

    /// The optimizer did not deliver a usable optimal solution.
    #[error("solver failed with status {status}: {message}")]
    Solver { status: SolveStatus, message: String },

    /// No HAP set exists for the requested league size.
    #[error("unsupported league size {0}: no HAP set available")]
    UnsupportedLeagueSize(usize),
}

/// Discriminant of [`MlspError`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputFormat,
    GenerationConstraint,
    Solver,
    UnsupportedLeagueSize,
}

impl MlspError {
    /// Creates an input format error without an underlying I/O cause.
    pub fn input_format(message: impl Into<String>) -> Self {
        Self::InputFormat {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an input format error caused by an I/O failure.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::InputFormat {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a generation constraint error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationConstraint(message.into())
    }

    /// Creates a solver error carrying the reported status.
    pub fn solver(status: SolveStatus, message: impl Into<String>) -> Self {
        Self::Solver {
            status,
            message: message.into(),
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputFormat { .. } => ErrorKind::InputFormat,
            Self::GenerationConstraint(_) => ErrorKind::GenerationConstraint,
            Self::Solver { .. } => ErrorKind::Solver,
            Self::UnsupportedLeagueSize(_) => ErrorKind::UnsupportedLeagueSize,
        }
    }

    /// The solver status, if this is a solver error.
    pub fn solve_status(&self) -> Option<SolveStatus> {
        match self {
            Self::Solver { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            MlspError::input_format("bad token"),
            MlspError::generation("too few clubs"),
            MlspError::solver(SolveStatus::Infeasible, "no point"),
            MlspError::UnsupportedLeagueSize(5),
        ];
        let kinds: Vec<ErrorKind> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::InputFormat,
                ErrorKind::GenerationConstraint,
                ErrorKind::Solver,
                ErrorKind::UnsupportedLeagueSize,
            ]
        );
    }

    #[test]
    fn test_io_source_is_kept() {
        let err = MlspError::io(
            "cannot open x.txt",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.kind(), ErrorKind::InputFormat);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("x.txt"));
    }

    #[test]
    fn test_solver_status_accessor() {
        let err = MlspError::solver(SolveStatus::Unbounded, "ray");
        assert_eq!(err.solve_status(), Some(SolveStatus::Unbounded));
        assert_eq!(MlspError::UnsupportedLeagueSize(3).solve_status(), None);
        assert!(err.to_string().contains("unbounded"));
    }
}

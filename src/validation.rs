//! Instance invariant checks.
//!
//! [`crate::models::Instance::new`] already guarantees the two team
//! partitions are well formed. This module checks the remaining properties a
//! generated instance always has, and a loaded one should have:
//! - No club hosts two teams of the same league
//! - Every club is non-empty and its capacity lies in
//!   `[max(⌊s/2⌋-2, 1), min(⌊s/2⌋+2, s)]`
//! - Every round of `U` has exactly `league_size / 2` home slots
//! - HAP patterns are pairwise distinct
//!
//! All findings are collected rather than stopping at the first.

use std::collections::HashSet;

use crate::models::{capacity_bounds, Instance};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A club hosts two teams of the same league.
    LeagueMatesInClub,
    /// A club hosts no team.
    EmptyClub,
    /// A club's capacity lies outside the admissible range for its size.
    CapacityOutOfRange,
    /// A round of the HAP set does not have exactly half its slots at home.
    UnbalancedRound,
    /// Two HAP slots share the same pattern.
    DuplicatePattern,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the invariants of an instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    for club in instance.clubs() {
        let mut seen_leagues = HashSet::new();
        for &team in &club.teams {
            let league = instance.league_of(team);
            if !seen_leagues.insert(league) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::LeagueMatesInClub,
                    format!(
                        "Club {} hosts more than one team of league {league} (team {team})",
                        club.index
                    ),
                ));
            }
        }

        match capacity_bounds(club.size()) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::EmptyClub,
                format!("Club {} hosts no team", club.index),
            )),
            Some(range) if !range.contains(&club.capacity) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::CapacityOutOfRange,
                    format!(
                        "Club {} of size {} has capacity {}, expected {}..={}",
                        club.index,
                        club.size(),
                        club.capacity,
                        range.start(),
                        range.end()
                    ),
                ))
            }
            Some(_) => {}
        }
    }

    let haps = instance.haps();
    let half = haps.league_size() / 2;
    for round in 0..haps.num_rounds() {
        let home = haps.home_count(round);
        if home != half {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnbalancedRound,
                format!("Round {round} has {home} home slots, expected {half}"),
            ));
        }
    }

    for (i, a) in haps.rows().iter().enumerate() {
        for (j, b) in haps.rows().iter().enumerate().skip(i + 1) {
            if a == b {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicatePattern,
                    format!("HAP slots {i} and {j} share the same pattern"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Problem instance.
//!
//! An instance fixes the two team partitions (leagues and clubs), the club
//! capacities, and the HAP matrix shared by all leagues. It is immutable once
//! built; the model builder only reads from it.
//!
//! # Structural checks
//! [`Instance::new`] rejects anything the model cannot be built from: league
//! sizes that disagree with the HAP set, team ids out of range, and teams
//! missing from (or repeated in) either partition. The softer invariants
//! (no two league mates in a club, capacity range, HAP balance) are
//! reported by [`crate::validation::validate_instance`].

use serde::{Deserialize, Serialize};

use super::{Club, HapSet, League};
use crate::error::{MlspError, Result};

/// A complete MLSP instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    league_size: usize,
    num_rounds: usize,
    leagues: Vec<League>,
    clubs: Vec<Club>,
    haps: HapSet,
    team_league: Vec<usize>,
    team_club: Vec<usize>,
}

impl Instance {
    /// Builds an instance from its partitions and HAP set.
    ///
    /// `leagues[l]` lists the teams of league `l` in league order. Teams are
    /// numbered `0..leagues.len() * league_size`.
    pub fn new(leagues: Vec<Vec<usize>>, clubs: Vec<Club>, haps: HapSet) -> Result<Self> {
        let league_size = haps.league_size();
        let num_teams = leagues.len() * league_size;

        if leagues.is_empty() {
            return Err(MlspError::input_format("instance has no leagues"));
        }

        let mut team_league = vec![usize::MAX; num_teams];
        for (l, teams) in leagues.iter().enumerate() {
            if teams.len() != league_size {
                return Err(MlspError::input_format(format!(
                    "league {l} has {} teams, HAP set expects {league_size}",
                    teams.len()
                )));
            }
            for &t in teams {
                let slot = team_league.get_mut(t).ok_or_else(|| {
                    MlspError::input_format(format!(
                        "league {l} references team {t}, only {num_teams} teams exist"
                    ))
                })?;
                if *slot != usize::MAX {
                    return Err(MlspError::input_format(format!(
                        "team {t} appears in leagues {} and {l}",
                        *slot
                    )));
                }
                *slot = l;
            }
        }

        let mut team_club = vec![usize::MAX; num_teams];
        for (c, club) in clubs.iter().enumerate() {
            for &t in &club.teams {
                let slot = team_club.get_mut(t).ok_or_else(|| {
                    MlspError::input_format(format!(
                        "club {c} references team {t}, only {num_teams} teams exist"
                    ))
                })?;
                if *slot != usize::MAX {
                    return Err(MlspError::input_format(format!(
                        "team {t} appears in clubs {} and {c}",
                        *slot
                    )));
                }
                *slot = c;
            }
        }
        if let Some(t) = team_club.iter().position(|&c| c == usize::MAX) {
            return Err(MlspError::input_format(format!(
                "team {t} does not belong to any club"
            )));
        }

        let leagues = leagues
            .into_iter()
            .enumerate()
            .map(|(index, teams)| League::new(index, teams))
            .collect();
        let clubs = clubs
            .into_iter()
            .enumerate()
            .map(|(index, club)| Club { index, ..club })
            .collect();

        Ok(Self {
            league_size,
            num_rounds: haps.num_rounds(),
            leagues,
            clubs,
            haps,
            team_league,
            team_club,
        })
    }

    /// Total number of teams.
    pub fn num_teams(&self) -> usize {
        self.team_league.len()
    }

    /// Number of leagues.
    pub fn num_leagues(&self) -> usize {
        self.leagues.len()
    }

    /// Number of clubs.
    pub fn num_clubs(&self) -> usize {
        self.clubs.len()
    }

    /// Teams per league (= HAP slots per league).
    pub fn league_size(&self) -> usize {
        self.league_size
    }

    /// Rounds of the double round-robin.
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// All leagues.
    pub fn leagues(&self) -> &[League] {
        &self.leagues
    }

    /// All clubs.
    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    /// The HAP matrix `U`.
    pub fn haps(&self) -> &HapSet {
        &self.haps
    }

    /// League index of a team.
    pub fn league_of(&self, team: usize) -> usize {
        self.team_league[team]
    }

    /// Club index of a team.
    pub fn club_of(&self, team: usize) -> usize {
        self.team_club[team]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::hap4;

    fn clubs_2x2() -> Vec<Club> {
        vec![
            Club::new(0).with_capacity(1).with_teams([0, 1]),
            Club::new(1).with_capacity(1).with_teams([2, 3]),
        ]
    }

    #[test]
    fn test_instance_accessors() {
        let inst = Instance::new(vec![vec![0, 1, 2, 3]], clubs_2x2(), hap4()).unwrap();
        assert_eq!(inst.num_teams(), 4);
        assert_eq!(inst.num_leagues(), 1);
        assert_eq!(inst.num_clubs(), 2);
        assert_eq!(inst.league_size(), 4);
        assert_eq!(inst.num_rounds(), 6);
        assert_eq!(inst.league_of(3), 0);
        assert_eq!(inst.club_of(2), 1);
        assert_eq!(inst.clubs()[1].index, 1);
    }

    #[test]
    fn test_club_indices_renumbered() {
        let clubs = vec![
            Club::new(7).with_capacity(1).with_teams([0, 1]),
            Club::new(9).with_capacity(1).with_teams([2, 3]),
        ];
        let inst = Instance::new(vec![vec![0, 1, 2, 3]], clubs, hap4()).unwrap();
        assert_eq!(inst.clubs()[0].index, 0);
        assert_eq!(inst.clubs()[1].index, 1);
    }

    #[test]
    fn test_rejects_wrong_league_size() {
        let err = Instance::new(vec![vec![0, 1, 2]], clubs_2x2(), hap4()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }

    #[test]
    fn test_rejects_team_out_of_range() {
        let err = Instance::new(vec![vec![0, 1, 2, 9]], clubs_2x2(), hap4()).unwrap_err();
        assert!(err.to_string().contains("team 9"));
    }

    #[test]
    fn test_rejects_team_in_two_leagues() {
        let err = Instance::new(
            vec![vec![0, 1, 2, 3], vec![3, 4, 5, 6]],
            clubs_2x2(),
            hap4(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("team 3 appears in leagues"));
    }

    #[test]
    fn test_rejects_team_in_two_clubs() {
        let clubs = vec![
            Club::new(0).with_capacity(1).with_teams([0, 1]),
            Club::new(1).with_capacity(1).with_teams([1, 2, 3]),
        ];
        let err = Instance::new(vec![vec![0, 1, 2, 3]], clubs, hap4()).unwrap_err();
        assert!(err.to_string().contains("team 1 appears in clubs"));
    }

    #[test]
    fn test_rejects_team_without_club() {
        let clubs = vec![Club::new(0).with_capacity(1).with_teams([0, 1, 2])];
        let err = Instance::new(vec![vec![0, 1, 2, 3]], clubs, hap4()).unwrap_err();
        assert!(err.to_string().contains("team 3 does not belong"));
    }

    #[test]
    fn test_rejects_no_leagues() {
        let err = Instance::new(vec![], vec![], hap4()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputFormat);
    }
}

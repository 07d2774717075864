//! Instance file format.
//!
//! ```text
//! numTeams  numLeagues  numClubs  leagueSize
//!
//! clubSize  capacity  team ...        (one line per club)
//!
//! leagueNumber  team ...              (one line per league)
//!
//! U[h][0] ... U[h][numRounds-1]       (one line per HAP slot)
//! ```
//!
//! The reader treats the file as a whitespace-separated token stream, so
//! blank lines and tabs versus spaces carry no meaning. Team ids are 1-based
//! on disk and 0-based in memory. The league number is informational.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::warn;

use crate::error::{MlspError, Result};
use crate::hap_table::is_supported_league_size;
use crate::models::{double_round_robin_rounds, Club, HapSet, Instance};
use crate::validation::validate_instance;

/// File name used by the generator: `<n>-<leagues>-<clubs>-<version>.txt`.
pub fn instance_file_name(
    league_size: usize,
    num_leagues: usize,
    num_clubs: usize,
    version: &str,
) -> String {
    format!("{league_size}-{num_leagues}-{num_clubs}-{version}.txt")
}

/// Token cursor with positional error messages.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    read: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
            read: 0,
        }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.inner.next().ok_or_else(|| {
            MlspError::input_format(format!(
                "unexpected end of file after {} tokens, expected {what}",
                self.read
            ))
        })?;
        self.read += 1;
        token.parse().map_err(|_| {
            MlspError::input_format(format!(
                "token {} ({token:?}) is not a valid {what}",
                self.read
            ))
        })
    }

    /// Reads a 1-based team id and returns it 0-based.
    fn team(&mut self, num_teams: usize) -> Result<usize> {
        let id: usize = self.next("team id")?;
        if id == 0 || id > num_teams {
            return Err(MlspError::input_format(format!(
                "team id {id} out of range 1..={num_teams}"
            )));
        }
        Ok(id - 1)
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Parses an instance from the text of an instance file.
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut tokens = Tokens::new(text);

    let num_teams: usize = tokens.next("team count")?;
    let num_leagues: usize = tokens.next("league count")?;
    let num_clubs: usize = tokens.next("club count")?;
    let league_size: usize = tokens.next("league size")?;
    if !is_supported_league_size(league_size) {
        return Err(MlspError::UnsupportedLeagueSize(league_size));
    }
    if num_leagues.checked_mul(league_size) != Some(num_teams) {
        return Err(MlspError::input_format(format!(
            "{num_teams} teams cannot form {num_leagues} leagues of {league_size}"
        )));
    }
    let num_rounds = double_round_robin_rounds(league_size);

    // Counts come from the file; vectors grow with the tokens actually read.
    let mut clubs = Vec::new();
    for c in 0..num_clubs {
        let size: usize = tokens.next("club size")?;
        let capacity: u32 = tokens.next("club capacity")?;
        let mut club = Club::new(c).with_capacity(capacity);
        for _ in 0..size {
            club.add_team(tokens.team(num_teams)?);
        }
        clubs.push(club);
    }

    let mut leagues = Vec::new();
    for _ in 0..num_leagues {
        let _number: usize = tokens.next("league number")?;
        let teams = (0..league_size)
            .map(|_| tokens.team(num_teams))
            .collect::<Result<Vec<_>>>()?;
        leagues.push(teams);
    }

    let mut rows = Vec::with_capacity(league_size);
    for _ in 0..league_size {
        let row = (0..num_rounds)
            .map(|_| tokens.next::<u8>("HAP cell"))
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let trailing = tokens.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the HAP matrix");
    }

    Instance::new(leagues, clubs, HapSet::new(rows)?)
}

/// Reads an instance file and reports any invariant it breaks.
///
/// Invariant findings are logged, not returned: the model is still well
/// defined for such instances.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| MlspError::io(format!("cannot read instance {}", path.display()), e))?;
    let instance = parse_instance(&text)?;

    if let Err(findings) = validate_instance(&instance) {
        for f in &findings {
            warn!(file = %path.display(), kind = ?f.kind, "{}", f.message);
        }
    }
    Ok(instance)
}

/// Writes an instance in file format, tab-separated.
pub fn write_instance<W: Write>(instance: &Instance, mut out: W) -> Result<()> {
    let io_err = |e| MlspError::io("cannot write instance", e);

    writeln!(
        out,
        "{}\t{}\t{}\t{}",
        instance.num_teams(),
        instance.num_leagues(),
        instance.num_clubs(),
        instance.league_size()
    )
    .map_err(io_err)?;
    writeln!(out).map_err(io_err)?;

    for club in instance.clubs() {
        let mut line = format!("{}\t{}", club.size(), club.capacity);
        for &t in &club.teams {
            line.push_str(&format!("\t{}", t + 1));
        }
        writeln!(out, "{line}").map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;

    for league in instance.leagues() {
        let mut line = (league.index + 1).to_string();
        for &t in &league.teams {
            line.push_str(&format!("\t{}", t + 1));
        }
        writeln!(out, "{line}").map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;

    for row in instance.haps().rows() {
        let cells: Vec<String> = row.iter().map(u8::to_string).collect();
        writeln!(out, "{}", cells.join("\t")).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Writes an instance to `path`, replacing any existing file.
pub fn save_instance<P: AsRef<Path>>(instance: &Instance, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| MlspError::io(format!("cannot create {}", path.display()), e))?;
    write_instance(instance, BufWriter::new(file))
}

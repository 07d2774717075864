//! Plain-text solution report.
//!
//! Four sections, separated by blank lines: total violations, running time,
//! the club × round violation matrix, and the team × HAP allocation matrix.
//! Matrix cells are tab-separated.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{MlspError, Result};
use crate::models::Solution;

/// Report file name for an instance file name.
pub fn report_file_name(instance_file: &str) -> String {
    format!("Sol-{instance_file}")
}

/// Writes the report for `solution`.
pub fn write_report<W: Write>(solution: &Solution, mut out: W) -> Result<()> {
    let io_err = |e| MlspError::io("cannot write solution report", e);

    writeln!(
        out,
        "The total number of violations according to the allocation below is equal to: {}",
        solution.total_violations()
    )
    .map_err(io_err)?;
    writeln!(out).map_err(io_err)?;
    writeln!(
        out,
        "The total running time is: {} milliseconds.",
        solution.elapsed().as_millis()
    )
    .map_err(io_err)?;
    writeln!(out).map_err(io_err)?;

    writeln!(
        out,
        "The amount of violations per club in each round is: (clubs in rows, rounds in columns)"
    )
    .map_err(io_err)?;
    for row in solution.violations() {
        writeln!(out, "{}", join_tabs(row)).map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;

    writeln!(
        out,
        "The allocation of teams to HAPs is as follows: (teams in rows, HAPs in columns)"
    )
    .map_err(io_err)?;
    for row in solution.x_matrix() {
        writeln!(out, "{}", join_tabs(&row)).map_err(io_err)?;
    }
    out.flush().map_err(io_err)
}

/// Writes the report to `path`, replacing any existing file.
pub fn save_report<P: AsRef<Path>>(solution: &Solution, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| MlspError::io(format!("cannot create {}", path.display()), e))?;
    write_report(solution, BufWriter::new(file))
}

fn join_tabs<T: ToString>(cells: &[T]) -> String {
    cells
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\t")
}

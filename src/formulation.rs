//! MILP formulation of the MLSP and solve orchestration.
//!
//! Builds the model of Davari et al. from an [`Instance`], hands it to an
//! [`Optimizer`] once, and decodes the result into a [`Solution`].
//!
//! # Model
//!
//! Variables:
//! - `x[t][h] ∈ {0,1}`: team `t` holds HAP slot `h` of its league
//! - `z[c][r] ∈ ℤ≥0`: excess home games of club `c` in round `r`
//!
//! Objective: `min Σ_c Σ_r z[c][r]`
//!
//! Constraints:
//! - cover: `Σ_{t∈l} x[t][h] = 1` for every league `l`, slot `h`
//! - assign: `Σ_h x[t][h] = 1` for every team `t`
//! - excess: `z[c][r] - Σ_{t∈c} Σ_h U[h][r]·x[t][h] ≥ -capacity(c)`
//!   for every club `c`, round `r`
//!
//! `z` is bounded only from below and minimised, so at optimality
//! `z[c][r] = max(0, games(c, r) - capacity(c))`.
//!
//! # Reference
//! Davari, Goossens, Beliën, Lambrechts, Spieksma (2020),
//! "The multi-league sports scheduling problem, or how to schedule
//! thousands of matches"

use std::time::Instant;

use tracing::{debug, info};

use crate::error::{MlspError, Result};
use crate::evaluation::ViolationProfile;
use crate::models::{Instance, Solution};
use crate::optimizer::{
    CancellationToken, LinearExpr, MilpModel, Optimizer, Relation, SolveLimits, SolveStatus,
    VarId,
};

/// The built model plus the variable handles needed to decode it.
#[derive(Debug, Clone)]
pub struct MlspFormulation {
    model: MilpModel,
    x: Vec<Vec<VarId>>,
    z: Vec<Vec<VarId>>,
}

impl MlspFormulation {
    /// Builds the model for `instance`.
    pub fn build(instance: &Instance) -> Self {
        let n = instance.league_size();
        let rounds = instance.num_rounds();
        let haps = instance.haps();
        let mut model = MilpModel::new("mlsp");

        let z: Vec<Vec<VarId>> = (0..instance.num_clubs())
            .map(|c| {
                (0..rounds)
                    .map(|r| model.add_non_negative_integer(format!("z[{c}][{r}]")))
                    .collect()
            })
            .collect();
        let x: Vec<Vec<VarId>> = (0..instance.num_teams())
            .map(|t| {
                (0..n)
                    .map(|h| model.add_binary(format!("x[{t}][{h}]")))
                    .collect()
            })
            .collect();

        model.minimise(LinearExpr::sum(z.iter().flatten().copied()));

        for league in instance.leagues() {
            for h in 0..n {
                model.add_constraint(
                    format!("cover[{}][{h}]", league.index),
                    LinearExpr::sum(league.teams.iter().map(|&t| x[t][h])),
                    Relation::Eq,
                    1.0,
                );
            }
        }

        for league in instance.leagues() {
            for &t in &league.teams {
                model.add_constraint(
                    format!("assign[{t}]"),
                    LinearExpr::sum(x[t].iter().copied()),
                    Relation::Eq,
                    1.0,
                );
            }
        }

        for club in instance.clubs() {
            for r in 0..rounds {
                let mut expr = LinearExpr::new().with_term(z[club.index][r], 1.0);
                for &t in &club.teams {
                    for h in (0..n).filter(|&h| haps.is_home(h, r)) {
                        expr.add_term(x[t][h], -1.0);
                    }
                }
                model.add_constraint(
                    format!("excess[{}][{r}]", club.index),
                    expr,
                    Relation::Ge,
                    -f64::from(club.capacity),
                );
            }
        }

        Self { model, x, z }
    }

    /// The underlying model.
    pub fn model(&self) -> &MilpModel {
        &self.model
    }

    /// Handle of `x[team][hap]`.
    pub fn x_var(&self, team: usize, hap: usize) -> VarId {
        self.x[team][hap]
    }

    /// Handle of `z[club][round]`.
    pub fn z_var(&self, club: usize, round: usize) -> VarId {
        self.z[club][round]
    }

    /// Variable values encoding `assignment` with tight `z`.
    pub fn encode(&self, instance: &Instance, assignment: &[usize]) -> Vec<f64> {
        let mut values = vec![0.0; self.model.var_count()];
        for (t, &slot) in assignment.iter().enumerate() {
            values[self.x[t][slot].index()] = 1.0;
        }
        let profile = ViolationProfile::calculate(instance, assignment);
        for (c, row) in profile.excess.iter().enumerate() {
            for (r, &v) in row.iter().enumerate() {
                values[self.z[c][r].index()] = f64::from(v);
            }
        }
        values
    }

    /// Reads the assignment and violation matrix back from optimizer values.
    ///
    /// # Errors
    /// `Solver` (status `Error`) if a team holds no slot or several, a league
    /// uses a slot twice, or a `z` value is negative.
    pub fn decode(&self, instance: &Instance, values: &[f64]) -> Result<(Vec<usize>, Vec<Vec<u32>>)> {
        if values.len() != self.model.var_count() {
            return Err(MlspError::solver(
                SolveStatus::Error,
                format!(
                    "optimizer returned {} values for {} variables",
                    values.len(),
                    self.model.var_count()
                ),
            ));
        }

        let mut assignment = Vec::with_capacity(self.x.len());
        for (t, row) in self.x.iter().enumerate() {
            let chosen: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|(_, v)| values[v.index()] > 0.5)
                .map(|(h, _)| h)
                .collect();
            match chosen.as_slice() {
                [slot] => assignment.push(*slot),
                _ => {
                    return Err(MlspError::solver(
                        SolveStatus::Error,
                        format!("team {t} holds {} HAP slots", chosen.len()),
                    ))
                }
            }
        }

        for league in instance.leagues() {
            let mut used = vec![false; instance.league_size()];
            for &t in &league.teams {
                if std::mem::replace(&mut used[assignment[t]], true) {
                    return Err(MlspError::solver(
                        SolveStatus::Error,
                        format!(
                            "HAP slot {} used twice in league {}",
                            assignment[t], league.index
                        ),
                    ));
                }
            }
        }

        let mut violations = Vec::with_capacity(self.z.len());
        for (c, row) in self.z.iter().enumerate() {
            let mut decoded = Vec::with_capacity(row.len());
            for (r, v) in row.iter().enumerate() {
                let value = values[v.index()].round();
                if value < 0.0 {
                    return Err(MlspError::solver(
                        SolveStatus::Error,
                        format!("z[{c}][{r}] is negative ({value})"),
                    ));
                }
                decoded.push(value as u32);
            }
            violations.push(decoded);
        }

        Ok((assignment, violations))
    }
}

/// Builds the MLSP model for an instance and solves it with an optimizer.
///
/// # Example
/// ```no_run
/// use mlsp::formulation::ModelBuilder;
/// use mlsp::optimizer::MicroLpOptimizer;
/// # fn run(instance: &mlsp::models::Instance) -> mlsp::Result<()> {
/// let solution = ModelBuilder::new(instance).solve(&MicroLpOptimizer::new())?;
/// println!("violations: {}", solution.total_violations());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder<'a> {
    instance: &'a Instance,
    limits: SolveLimits,
}

impl<'a> ModelBuilder<'a> {
    /// Creates a builder with no solve limits.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            limits: SolveLimits::none(),
        }
    }

    /// Sets all solve limits.
    pub fn with_limits(mut self, limits: SolveLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the solve time limit.
    pub fn with_time_limit(mut self, limit: std::time::Duration) -> Self {
        self.limits.time_limit = Some(limit);
        self
    }

    /// Sets the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.limits.cancel = Some(token);
        self
    }

    /// Builds the formulation without solving it.
    pub fn build(&self) -> MlspFormulation {
        let formulation = MlspFormulation::build(self.instance);
        debug!(
            teams = self.instance.num_teams(),
            clubs = self.instance.num_clubs(),
            rounds = self.instance.num_rounds(),
            vars = formulation.model.var_count(),
            constraints = formulation.model.constraint_count(),
            "built MLSP model"
        );
        formulation
    }

    /// Builds the model, solves it once, and returns a fresh [`Solution`].
    ///
    /// # Errors
    /// `Solver` if the optimizer reports anything but optimal, or its values
    /// do not decode into a valid assignment with tight violation counts.
    pub fn solve<O: Optimizer + ?Sized>(&self, optimizer: &O) -> Result<Solution> {
        let formulation = self.build();

        let start = Instant::now();
        let outcome = optimizer.solve(formulation.model(), &self.limits);
        let elapsed = start.elapsed();

        if !outcome.is_optimal() {
            info!(
                optimizer = optimizer.name(),
                status = %outcome.status,
                message = %outcome.message,
                "MLSP solve failed"
            );
            return Err(MlspError::solver(outcome.status, outcome.message));
        }
        let values = outcome.values.ok_or_else(|| {
            MlspError::solver(SolveStatus::Error, "optimal outcome carries no values")
        })?;

        let (assignment, violations) = formulation.decode(self.instance, &values)?;

        let expected = ViolationProfile::calculate(self.instance, &assignment);
        if expected.excess != violations {
            return Err(MlspError::solver(
                SolveStatus::Error,
                format!(
                    "violation counts not tight: optimizer reports {}, assignment implies {}",
                    violations.iter().flatten().sum::<u32>(),
                    expected.total
                ),
            ));
        }

        let objective = outcome.objective.unwrap_or(f64::from(expected.total));
        info!(
            optimizer = optimizer.name(),
            objective,
            elapsed_ms = elapsed.as_millis() as u64,
            "MLSP solved"
        );

        Ok(Solution::new(
            assignment,
            self.instance.league_size(),
            violations,
            objective,
            elapsed,
        )
        .with_optimizer(optimizer.name()))
    }
}

//! `good_lp` backend using the pure-Rust `microlp` solver.
//!
//! Translates a [`MilpModel`] into a `good_lp` problem, solves it, and maps
//! the resolution result back to an [`OptimizerOutcome`].
//!
//! # Limits
//! `microlp` has no native time limit or interrupt. When [`SolveLimits`]
//! carries a time limit or a cancellation token, the solve runs on a worker
//! thread and the caller waits with a deadline, polling the token. On
//! timeout or cancellation the worker is detached and its result dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use good_lp::{
    constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolverModel, Variable,
};
use tracing::debug;

use super::{
    LinearExpr, MilpModel, Optimizer, OptimizerOutcome, Relation, SolveLimits, SolveStatus,
    VarKind,
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Branch-and-bound MILP backend (`good_lp` + `microlp`).
///
/// A solve that returns `TimeLimit` or `Cancelled` leaves its worker thread
/// running until `microlp` finishes on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpOptimizer;

impl MicroLpOptimizer {
    /// Creates the backend.
    pub fn new() -> Self {
        Self
    }
}

impl Optimizer for MicroLpOptimizer {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, model: &MilpModel, limits: &SolveLimits) -> OptimizerOutcome {
        if limits.is_cancelled() {
            return OptimizerOutcome::failed(SolveStatus::Cancelled, "cancelled before start");
        }
        if !limits.is_bounded() {
            return solve_guarded(model);
        }

        let (tx, rx) = mpsc::channel();
        let owned = model.clone();
        let spawned = thread::Builder::new()
            .name("mlsp-optimizer".into())
            .spawn(move || {
                // The receiver may be gone after a timeout.
                let _ = tx.send(solve_guarded(&owned));
            });
        if let Err(e) = spawned {
            return OptimizerOutcome::failed(
                SolveStatus::Error,
                format!("cannot start optimizer worker: {e}"),
            );
        }

        let start = Instant::now();
        loop {
            if limits.is_cancelled() {
                debug!(model = %model.name, "solve cancelled");
                return OptimizerOutcome::failed(SolveStatus::Cancelled, "cancelled");
            }
            let wait = match limits.time_limit {
                Some(limit) => {
                    let elapsed = start.elapsed();
                    if elapsed >= limit {
                        debug!(model = %model.name, ?limit, "solve hit time limit");
                        return OptimizerOutcome::failed(
                            SolveStatus::TimeLimit,
                            format!("no result within {limit:?}"),
                        );
                    }
                    (limit - elapsed).min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };
            match rx.recv_timeout(wait) {
                Ok(outcome) => return outcome,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return OptimizerOutcome::failed(
                        SolveStatus::Error,
                        "optimizer worker exited without a result",
                    )
                }
            }
        }
    }
}

/// Owns the backend problem for one solve; logs acquisition and release.
struct Session<'a> {
    model: &'a str,
    opened: Instant,
}

impl<'a> Session<'a> {
    fn open(model: &'a str) -> Self {
        debug!(model, "optimizer session acquired");
        Self {
            model,
            opened: Instant::now(),
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        debug!(
            model = self.model,
            held_ms = self.opened.elapsed().as_millis() as u64,
            "optimizer session released"
        );
    }
}

/// Solves on the current thread, turning a backend panic into an error outcome.
fn solve_guarded(model: &MilpModel) -> OptimizerOutcome {
    let _session = Session::open(&model.name);
    match panic::catch_unwind(AssertUnwindSafe(|| solve_blocking(model))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "backend panicked".to_string());
            OptimizerOutcome::failed(SolveStatus::Error, message)
        }
    }
}

fn solve_blocking(model: &MilpModel) -> OptimizerOutcome {
    let mut problem_vars = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .vars
        .iter()
        .map(|def| {
            let mut v = variable().name(def.name.clone()).min(def.lower);
            if let Some(upper) = def.upper {
                v = v.max(upper);
            }
            let v = match def.kind {
                VarKind::Binary => v.binary(),
                VarKind::Integer => v.integer(),
                VarKind::Continuous => v,
            };
            problem_vars.add(v)
        })
        .collect();

    let objective = to_expression(&model.objective, &vars);
    let mut problem = problem_vars.minimise(objective).using(default_solver);
    for c in &model.constraints {
        let lhs = to_expression(&c.expr, &vars);
        let rhs = c.rhs;
        let built = match c.relation {
            Relation::Eq => constraint!(lhs == rhs),
            Relation::Le => constraint!(lhs <= rhs),
            Relation::Ge => constraint!(lhs >= rhs),
        };
        problem.add_constraint(built);
    }

    match problem.solve() {
        Ok(solution) => {
            let values: Vec<f64> = vars.iter().map(|&v| solution.value(v)).collect();
            let objective = model.objective.evaluate(&values);
            OptimizerOutcome::optimal(objective, values)
        }
        Err(ResolutionError::Infeasible) => {
            OptimizerOutcome::failed(SolveStatus::Infeasible, "problem is infeasible")
        }
        Err(ResolutionError::Unbounded) => {
            OptimizerOutcome::failed(SolveStatus::Unbounded, "problem is unbounded")
        }
        Err(e) => OptimizerOutcome::failed(SolveStatus::Error, e.to_string()),
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut e = Expression::from(expr.constant);
    for &(var, coef) in &expr.terms {
        e += coef * vars[var.index()];
    }
    e
}

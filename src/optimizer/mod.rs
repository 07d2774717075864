//! Optimizer contract.
//!
//! A small, backend-neutral description of a minimisation MILP plus the
//! [`Optimizer`] trait any backend implements. The model builder only talks
//! to this contract, so a different engine can be plugged in without
//! touching the formulation.
//!
//! # Contract
//! - Variables: binary, integer, or continuous, with a lower bound and an
//!   optional upper bound.
//! - One linear objective, always minimised.
//! - Linear constraints `expr (= | ≤ | ≥) rhs`.
//! - [`Optimizer::solve`] returns an [`OptimizerOutcome`] with a status and,
//!   when optimal, the objective and one value per variable.
//!
//! # Backends
//! - [`MicroLpOptimizer`]: pure-Rust branch-and-bound via `good_lp`.

mod limits;
mod microlp;

pub use limits::{CancellationToken, SolveLimits};
pub use microlp::MicroLpOptimizer;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a variable of a [`MilpModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub usize);

impl VarId {
    /// Position of the variable in the model (and in solution value vectors).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// 0 or 1.
    Binary,
    /// Integral within bounds.
    Integer,
    /// Real within bounds.
    Continuous,
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDef {
    /// Display name (e.g. `x[3][1]`).
    pub name: String,
    /// Domain.
    pub kind: VarKind,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound (`None` = unbounded above).
    pub upper: Option<f64>,
}

/// Linear expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// `(variable, coefficient)` terms. A variable may appear more than once.
    pub terms: Vec<(VarId, f64)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinearExpr {
    /// Empty expression (0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `coef·var`.
    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    /// Adds `coef·var` (builder form).
    pub fn with_term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    /// Sum of variables with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
            constant: 0.0,
        }
    }

    /// Evaluates the expression at `values` (indexed by [`VarId::index`]).
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.constant
            + self
                .terms
                .iter()
                .map(|(v, c)| c * values[v.index()])
                .sum::<f64>()
    }
}

/// Constraint sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// `expr = rhs`
    Eq,
    /// `expr ≤ rhs`
    Le,
    /// `expr ≥ rhs`
    Ge,
}

/// A linear constraint `expr relation rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Display name (e.g. `cover[l0][h2]`).
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Sense.
    pub relation: Relation,
    /// Right-hand side.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Whether `values` satisfies this constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Eq => (lhs - self.rhs).abs() <= tol,
            Relation::Le => lhs <= self.rhs + tol,
            Relation::Ge => lhs >= self.rhs - tol,
        }
    }
}

/// A minimisation MILP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilpModel {
    /// Model name.
    pub name: String,
    /// Variables, indexed by [`VarId`].
    pub vars: Vec<VarDef>,
    /// Objective (minimised).
    pub objective: LinearExpr,
    /// Constraints.
    pub constraints: Vec<LinearConstraint>,
}

impl MilpModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Declares a variable and returns its handle.
    pub fn add_var(
        &mut self,
        name: impl Into<String>,
        kind: VarKind,
        lower: f64,
        upper: Option<f64>,
    ) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDef {
            name: name.into(),
            kind,
            lower,
            upper,
        });
        id
    }

    /// Declares a binary variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_var(name, VarKind::Binary, 0.0, Some(1.0))
    }

    /// Declares a non-negative integer variable with no upper bound.
    pub fn add_non_negative_integer(&mut self, name: impl Into<String>) -> VarId {
        self.add_var(name, VarKind::Integer, 0.0, None)
    }

    /// Sets the objective to minimise.
    pub fn minimise(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Adds a constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            expr,
            relation,
            rhs,
        });
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of binary or integer variables.
    pub fn integer_var_count(&self) -> usize {
        self.vars
            .iter()
            .filter(|v| v.kind != VarKind::Continuous)
            .count()
    }

    /// Whether `values` satisfies all bounds and constraints within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.vars.len() {
            return false;
        }
        let bounds_ok = self.vars.iter().zip(values).all(|(def, &v)| {
            let integral = def.kind == VarKind::Continuous || (v - v.round()).abs() <= tol;
            let upper_ok = def.upper.map_or(true, |u| v <= u + tol);
            integral && v >= def.lower - tol && upper_ok
        });
        bounds_ok && self.constraints.iter().all(|c| c.is_satisfied(values, tol))
    }
}

/// Status reported by an optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// No feasible point exists.
    Infeasible,
    /// Objective unbounded below.
    Unbounded,
    /// Time limit reached before a result was available.
    TimeLimit,
    /// Cancelled through the token.
    Cancelled,
    /// Numerical or internal backend failure.
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Optimal => "optimal",
            Self::Infeasible => "infeasible",
            Self::Unbounded => "unbounded",
            Self::TimeLimit => "time limit",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// What an optimizer returns from a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerOutcome {
    /// Termination status.
    pub status: SolveStatus,
    /// Objective value (present when optimal).
    pub objective: Option<f64>,
    /// One value per variable (present when optimal).
    pub values: Option<Vec<f64>>,
    /// Backend message.
    pub message: String,
}

impl OptimizerOutcome {
    /// An optimal outcome.
    pub fn optimal(objective: f64, values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective: Some(objective),
            values: Some(values),
            message: String::new(),
        }
    }

    /// A non-optimal outcome with no values.
    pub fn failed(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            objective: None,
            values: None,
            message: message.into(),
        }
    }

    /// Whether the outcome is optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

/// A MILP solving capability.
///
/// Implementations own any backend session for the duration of one call
/// and release it before returning, on every path.
///
/// A backend that cannot be interrupted may return `TimeLimit` or
/// `Cancelled` while its computation is still running. A bounded
/// [`MicroLpOptimizer`] solve does this: the worker thread is detached and
/// keeps its CPU until the search ends, and its result is dropped.
pub trait Optimizer {
    /// Backend name (e.g. "microlp").
    fn name(&self) -> &str;

    /// Solves `model` to optimality, honouring `limits`. Blocks until done.
    fn solve(&self, model: &MilpModel, limits: &SolveLimits) -> OptimizerOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> (MilpModel, VarId, VarId) {
        let mut m = MilpModel::new("tiny");
        let x = m.add_binary("x");
        let z = m.add_non_negative_integer("z");
        m.minimise(LinearExpr::sum([z]));
        m.add_constraint(
            "link",
            LinearExpr::new().with_term(z, 1.0).with_term(x, -2.0),
            Relation::Ge,
            -1.0,
        );
        m.add_constraint("pick", LinearExpr::sum([x]), Relation::Eq, 1.0);
        (m, x, z)
    }

    #[test]
    fn test_model_counts() {
        let (m, x, z) = tiny_model();
        assert_eq!(m.var_count(), 2);
        assert_eq!(m.integer_var_count(), 2);
        assert_eq!(m.constraint_count(), 2);
        assert_eq!(x.index(), 0);
        assert_eq!(z.index(), 1);
        assert_eq!(m.vars[1].upper, None);
    }

    #[test]
    fn test_expression_evaluation() {
        let e = LinearExpr::new().with_term(VarId(0), 3.0).with_term(VarId(1), -1.0);
        assert!((e.evaluate(&[2.0, 1.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_feasibility_check() {
        let (m, _, _) = tiny_model();
        // x = 1 forces z ≥ 1.
        assert!(m.is_feasible(&[1.0, 1.0], 1e-9));
        assert!(!m.is_feasible(&[1.0, 0.0], 1e-9));
        // x must equal 1.
        assert!(!m.is_feasible(&[0.0, 0.0], 1e-9));
        // Integrality.
        assert!(!m.is_feasible(&[1.0, 1.5], 1e-9));
        // Wrong length.
        assert!(!m.is_feasible(&[1.0], 1e-9));
    }

    #[test]
    fn test_outcome_constructors() {
        let ok = OptimizerOutcome::optimal(3.0, vec![1.0]);
        assert!(ok.is_optimal());
        let bad = OptimizerOutcome::failed(SolveStatus::Infeasible, "none");
        assert!(!bad.is_optimal());
        assert!(bad.values.is_none());
        assert_eq!(SolveStatus::TimeLimit.to_string(), "time limit");
    }
}

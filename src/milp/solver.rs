//! Solver seam and the pure-Rust MILP backend.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::{AssignmentModel, Sense};
use crate::error::{Error, Result};

/// Terminal solver outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolveStatus {
    /// An optimal integral assignment was found.
    Optimal,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The objective can grow without bound.
    Unbounded,
    /// The solver returned values that are not a usable 0/1 assignment.
    Undefined,
}

impl SolveStatus {
    /// Whether an assignment is available.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::Undefined => "Undefined",
        };
        f.write_str(s)
    }
}

/// Status plus one value per model variable (empty unless optimal).
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub status: SolveStatus,
    pub values: Vec<f64>,
}

impl RawSolution {
    /// A terminal status carrying no values.
    pub fn without_values(status: SolveStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
        }
    }
}

/// Solves an [`AssignmentModel`].
///
/// Infeasibility and unboundedness are statuses, not errors. `Err` is
/// reserved for the solver failing to run at all.
pub trait AssignmentSolver {
    fn solve(&self, model: &AssignmentModel) -> Result<RawSolution>;
}

/// Branch-and-bound over simplex, via `good_lp`'s `microlp` backend.
///
/// Each call builds its own variable set; the solver holds no state
/// between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentSolver for MicroLpSolver {
    fn solve(&self, model: &AssignmentModel) -> Result<RawSolution> {
        let mut vars = variables!();
        let xs: Vec<Variable> = model
            .variables
            .iter()
            .map(|_| vars.add(variable().binary()))
            .collect();

        let objective = linear_expression(model.objective.iter().copied().enumerate(), &xs);
        let mut problem = vars.maximise(objective).using(microlp);

        for c in &model.constraints {
            let lhs = linear_expression(c.terms.iter().copied(), &xs);
            let rhs = c.rhs;
            problem = match c.sense {
                Sense::LessOrEqual => problem.with(constraint!(lhs <= rhs)),
                Sense::Equal => problem.with(constraint!(lhs == rhs)),
            };
        }

        debug!(
            variables = xs.len(),
            constraints = model.constraint_count(),
            "solving with microlp"
        );

        match problem.solve() {
            Ok(solution) => {
                let values = xs.iter().map(|&x| solution.value(x)).collect();
                info!("solver finished: optimal");
                Ok(RawSolution {
                    status: SolveStatus::Optimal,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => {
                info!("solver finished: infeasible");
                Ok(RawSolution::without_values(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                info!("solver finished: unbounded");
                Ok(RawSolution::without_values(SolveStatus::Unbounded))
            }
            Err(other) => Err(Error::Solver(other.to_string())),
        }
    }
}

fn linear_expression(terms: impl IntoIterator<Item = (usize, f64)>, xs: &[Variable]) -> Expression {
    let mut expr = Expression::from(0.0);
    for (idx, coef) in terms {
        expr.add_mul(coef, xs[idx]);
    }
    expr
}

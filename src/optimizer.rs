//! End-to-end optimization run.
//!
//! validate → build model → solve → derive timeline.
//!
//! An infeasible, unbounded, or undefined solve is a normal outcome: the
//! report carries the status and an empty schedule. Only invalid input,
//! dangling references, and solver failures are errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OptimizerConfig;
use crate::error::{Error, Result};
use crate::milp::{
    AssignmentModelBuilder, AssignmentSolver, MicroLpSolver, SolveStatus, VariableValue,
};
use crate::models::{Problem, Schedule};
use crate::scheduler::TimelineDeriver;
use crate::validation::validate_problem;

/// Everything the presentation layer needs from a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub status: SolveStatus,
    /// Sum of priorities of assigned tasks (0 without a solution).
    pub objective: f64,
    /// Per-task result table; empty unless `status` is optimal.
    pub schedule: Schedule,
    /// Non-zero decision variables, for audit display.
    pub variables: Vec<VariableValue>,
}

impl OptimizationReport {
    /// Whether a usable assignment was found.
    pub fn is_solved(&self) -> bool {
        self.status.is_optimal()
    }

    /// One-line summary for the user.
    pub fn message(&self) -> String {
        if !self.is_solved() {
            return format!("No solution: solver status {}", self.status);
        }
        if self.schedule.is_empty() {
            return "No schedulable result: no task was assigned".to_string();
        }
        format!(
            "{} task(s) scheduled on {} resource(s), objective {}",
            self.schedule.len(),
            self.schedule.resource_ids().len(),
            self.objective
        )
    }

    /// The schedule, or [`Error::Infeasible`] when no solution exists.
    pub fn into_schedule(self) -> Result<Schedule> {
        if self.is_solved() {
            Ok(self.schedule)
        } else {
            Err(Error::Infeasible {
                status: self.status,
            })
        }
    }
}

/// Runs the full pipeline with a pluggable solver.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use u_maintenance::config::OptimizerConfig;
/// use u_maintenance::models::{Problem, Resource, Task};
/// use u_maintenance::optimizer::Optimizer;
///
/// let problem = Problem::new(
///     vec![Task::new("A", 4).with_priority(5), Task::new("B", 3).with_priority(8)],
///     vec![Resource::new("R", 8)],
/// );
/// let report = Optimizer::new(OptimizerConfig::default())
///     .optimize(&problem, Utc::now())
///     .unwrap();
/// assert!(report.is_solved());
/// assert_eq!(report.objective, 13.0);
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer<S = MicroLpSolver> {
    config: OptimizerConfig,
    solver: S,
}

impl Optimizer<MicroLpSolver> {
    /// Creates an optimizer backed by [`MicroLpSolver`].
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            solver: MicroLpSolver::new(),
        }
    }
}

impl Default for Optimizer<MicroLpSolver> {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl<S: AssignmentSolver> Optimizer<S> {
    /// Creates an optimizer with a custom solver.
    pub fn with_solver(config: OptimizerConfig, solver: S) -> Self {
        Self { config, solver }
    }

    /// Active configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimizes `problem`, with every resource's timeline starting at `start`.
    ///
    /// # Errors
    /// - [`Error::Validation`] for malformed input (no model is built)
    /// - [`Error::Solver`] if the solver fails to run
    /// - [`Error::TimelineOverflow`] if a timeline runs past the
    ///   representable date range
    pub fn optimize(&self, problem: &Problem, start: DateTime<Utc>) -> Result<OptimizationReport> {
        validate_problem(problem).map_err(Error::Validation)?;

        let model = AssignmentModelBuilder::new(problem)
            .with_config(self.config.clone())
            .build();
        let raw = self.solver.solve(&model)?;
        let solution = model.decode(&raw, self.config.integrality_tolerance);
        info!(
            status = %solution.status,
            objective = solution.objective,
            assigned = solution.assignments.len(),
            "assignment solved"
        );

        let schedule = if solution.status.is_optimal() {
            TimelineDeriver::new().derive(&solution.assignments, problem, start)?
        } else {
            debug!("no timeline derived");
            Schedule::new()
        };

        Ok(OptimizationReport {
            status: solution.status,
            objective: solution.objective,
            schedule,
            variables: solution.variables,
        })
    }
}

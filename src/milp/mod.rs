//! Binary-assignment MILP formulation.
//!
//! Builds a solver-independent [`AssignmentModel`] from a [`Problem`] and
//! an [`OptimizerConfig`], then hands it to any [`AssignmentSolver`].
//!
//! # Formulation
//!
//! Variables: `assign[t, r] ∈ {0, 1}` for every task `t` and resource `r`.
//!
//! Objective: maximize `Σ assign[t, r] · priority[t]`.
//!
//! Constraints, in build order:
//! 1. `assign_task_<t>`: `Σ_r assign[t, r] = 1` (`≤ 1` under the partial
//!    policy)
//! 2. `capacity_<r>`: `Σ_t assign[t, r] · duration[t] ≤ availability[r]`
//! 3. `tool_<o>`: `Σ assign ≤ availability[o]` over all pairs (shared
//!    policy) or over tasks requiring `o` (per-task policy)
//! 4. `dependency_<t>_<p>`: `Σ_r assign[t, r] ≤ Σ_r assign[p, r]`
//! 5. `balance_<r>`: `Σ_t assign[t, r] · duration[t] ≤ H / |R| + slack`
//!    (optional)
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 1

mod solver;

pub use solver::{AssignmentSolver, MicroLpSolver, RawSolution, SolveStatus};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::config::{AssignmentPolicy, OptimizerConfig, ToolPolicy};
use crate::models::Problem;

/// One binary decision variable `assign[task, resource]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentVar {
    pub task_id: String,
    pub resource_id: String,
}

impl AssignmentVar {
    /// Display name, e.g. `assign[A,R1]`.
    pub fn name(&self) -> String {
        format!("assign[{},{}]", self.task_id, self.resource_id)
    }
}

/// Constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Assignment,
    Capacity,
    Tool,
    Dependency,
    Balance,
}

/// Relation between a constraint's left-hand side and its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessOrEqual,
    Equal,
}

/// `Σ coef · x[var] (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub kind: ConstraintKind,
    /// `(variable index, coefficient)` pairs.
    pub terms: Vec<(usize, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Left-hand side evaluated at `values`.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(idx, coef)| coef * values.get(idx).copied().unwrap_or(0.0))
            .sum()
    }

    /// Whether `values` satisfy the constraint within `tolerance`.
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.evaluate(values);
        match self.sense {
            Sense::LessOrEqual => lhs <= self.rhs + tolerance,
            Sense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// A fully built assignment program.
#[derive(Debug, Clone, Default)]
pub struct AssignmentModel {
    /// Decision variables, task-major: index = `t · |R| + r`.
    pub variables: Vec<AssignmentVar>,
    /// Objective coefficient per variable (maximized).
    pub objective: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
}

/// A non-zero variable reported back for audit display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
}

/// Decoded solver output.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSolution {
    pub status: SolveStatus,
    /// `(task, resource)` pairs with value 1, in variable order.
    pub assignments: Vec<(String, String)>,
    /// Sum of priorities of the assigned tasks.
    pub objective: f64,
    pub variables: Vec<VariableValue>,
}

impl AssignmentModel {
    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Constraints of one family.
    pub fn constraints_of(&self, kind: ConstraintKind) -> Vec<&LinearConstraint> {
        self.constraints.iter().filter(|c| c.kind == kind).collect()
    }

    /// Finds a constraint by name.
    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Index of `assign[task, resource]`.
    pub fn variable_index(&self, task_id: &str, resource_id: &str) -> Option<usize> {
        self.variables
            .iter()
            .position(|v| v.task_id == task_id && v.resource_id == resource_id)
    }

    /// Objective evaluated at `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(coef, value)| coef * value)
            .sum()
    }

    /// Whether `values` satisfy every constraint.
    pub fn is_feasible(&self, values: &[f64], tolerance: f64) -> bool {
        values.len() == self.variables.len()
            && self
                .constraints
                .iter()
                .all(|c| c.is_satisfied(values, tolerance))
    }

    /// Reads a raw solution back into task/resource pairs.
    ///
    /// A solution with a variable farther than `tolerance` from 0 or 1, or
    /// with a value count different from the variable count, is reported
    /// as [`SolveStatus::Undefined`] with no assignment.
    pub fn decode(&self, raw: &RawSolution, tolerance: f64) -> AssignmentSolution {
        let mut solution = AssignmentSolution {
            status: raw.status,
            assignments: Vec::new(),
            objective: 0.0,
            variables: Vec::new(),
        };
        if raw.status != SolveStatus::Optimal {
            return solution;
        }
        if raw.values.len() != self.variables.len() {
            warn!(
                expected = self.variables.len(),
                got = raw.values.len(),
                "solution size does not match the model"
            );
            solution.status = SolveStatus::Undefined;
            return solution;
        }

        let mut rounded = Vec::with_capacity(raw.values.len());
        for value in &raw.values {
            let bit = value.round();
            if (value - bit).abs() > tolerance || !(0.0..=1.0).contains(&bit) {
                warn!(value, "non-integral assignment value");
                solution.status = SolveStatus::Undefined;
                return solution;
            }
            rounded.push(bit);
        }

        for (var, (&bit, &value)) in self.variables.iter().zip(rounded.iter().zip(&raw.values)) {
            if bit == 1.0 {
                solution
                    .assignments
                    .push((var.task_id.clone(), var.resource_id.clone()));
                solution.variables.push(VariableValue {
                    name: var.name(),
                    value,
                });
            }
        }
        solution.objective = self.objective_value(&rounded);
        solution
    }
}

/// Builds an [`AssignmentModel`] from a problem.
///
/// # Example
/// ```
/// use u_maintenance::milp::{AssignmentModelBuilder, ConstraintKind};
/// use u_maintenance::models::{Problem, Resource, Task};
///
/// let problem = Problem::new(
///     vec![Task::new("A", 4), Task::new("B", 3)],
///     vec![Resource::new("R", 8)],
/// );
/// let model = AssignmentModelBuilder::new(&problem).build();
/// assert_eq!(model.variable_count(), 2);
/// assert_eq!(model.constraints_of(ConstraintKind::Assignment).len(), 2);
/// ```
pub struct AssignmentModelBuilder<'a> {
    problem: &'a Problem,
    config: OptimizerConfig,
}

impl<'a> AssignmentModelBuilder<'a> {
    /// Creates a builder with the default configuration.
    pub fn new(problem: &'a Problem) -> Self {
        Self {
            problem,
            config: OptimizerConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the model.
    pub fn build(&self) -> AssignmentModel {
        let problem = self.problem;
        let n_resources = problem.resources.len();
        let mut model = AssignmentModel::default();

        for task in &problem.tasks {
            for resource in &problem.resources {
                model.variables.push(AssignmentVar {
                    task_id: task.id.clone(),
                    resource_id: resource.id.clone(),
                });
                model.objective.push(f64::from(task.priority));
            }
        }

        let var = |t: usize, r: usize| t * n_resources + r;
        let task_row = |t: usize, coef: f64| (0..n_resources).map(move |r| (var(t, r), coef));

        // 1. Each task to one resource (or at most one)
        let sense = match self.config.assignment_policy {
            AssignmentPolicy::Total => Sense::Equal,
            AssignmentPolicy::Partial => Sense::LessOrEqual,
        };
        for (t, task) in problem.tasks.iter().enumerate() {
            model.constraints.push(LinearConstraint {
                name: format!("assign_task_{}", task.id),
                kind: ConstraintKind::Assignment,
                terms: task_row(t, 1.0).collect(),
                sense,
                rhs: 1.0,
            });
        }

        // 2. Resource hours
        for (r, resource) in problem.resources.iter().enumerate() {
            model.constraints.push(LinearConstraint {
                name: format!("capacity_{}", resource.id),
                kind: ConstraintKind::Capacity,
                terms: self.workload_terms(r),
                sense: Sense::LessOrEqual,
                rhs: f64::from(resource.availability_hours),
            });
        }

        // 3. Tool slots
        for tool in &problem.tools {
            let terms: Vec<(usize, f64)> = problem
                .tasks
                .iter()
                .enumerate()
                .filter(|(_, task)| match self.config.tool_policy {
                    ToolPolicy::Shared => true,
                    ToolPolicy::PerTask => task.requires_tool(&tool.id),
                })
                .flat_map(|(t, _)| task_row(t, 1.0))
                .collect();
            model.constraints.push(LinearConstraint {
                name: format!("tool_{}", tool.id),
                kind: ConstraintKind::Tool,
                terms,
                sense: Sense::LessOrEqual,
                rhs: f64::from(tool.availability),
            });
        }

        // 4. Prerequisites: done[t] ≤ done[p]
        let index: HashMap<&str, usize> = problem
            .tasks
            .iter()
            .enumerate()
            .map(|(t, task)| (task.id.as_str(), t))
            .collect();
        for (t, task) in problem.tasks.iter().enumerate() {
            for pre in &task.prerequisites {
                let Some(&p) = index.get(pre.as_str()) else {
                    warn!(task = %task.id, prerequisite = %pre, "skipping unknown prerequisite");
                    continue;
                };
                model.constraints.push(LinearConstraint {
                    name: format!("dependency_{}_{}", task.id, pre),
                    kind: ConstraintKind::Dependency,
                    terms: task_row(t, 1.0).chain(task_row(p, -1.0)).collect(),
                    sense: Sense::LessOrEqual,
                    rhs: 0.0,
                });
            }
        }

        // 5. Workload balance
        if self.config.workload_balance && n_resources > 0 {
            let bound = problem.total_task_hours() as f64 / n_resources as f64
                + self.config.balance_slack_hours;
            for (r, resource) in problem.resources.iter().enumerate() {
                model.constraints.push(LinearConstraint {
                    name: format!("balance_{}", resource.id),
                    kind: ConstraintKind::Balance,
                    terms: self.workload_terms(r),
                    sense: Sense::LessOrEqual,
                    rhs: bound,
                });
            }
        }

        debug!(
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            "built assignment model"
        );
        model
    }

    /// `Σ_t assign[t, r] · duration[t]` for resource index `r`.
    fn workload_terms(&self, r: usize) -> Vec<(usize, f64)> {
        let n_resources = self.problem.resources.len();
        self.problem
            .tasks
            .iter()
            .enumerate()
            .map(|(t, task)| (t * n_resources + r, f64::from(task.duration_hours)))
            .collect()
    }
}

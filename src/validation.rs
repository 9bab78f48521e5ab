//! Input validation for assignment problems.
//!
//! Checks structural integrity of tasks, resources, and tools before a
//! model is built. Detects:
//! - Empty task or resource sets
//! - Duplicate IDs
//! - Zero durations and budgets
//! - Priorities outside `1..=10`
//! - Required tools that are not declared
//!
//! Prerequisites naming unknown tasks are not errors; the model builder
//! skips them. Circular prerequisite chains are accepted too: each
//! dependency row only says "done implies prerequisite done", so a cycle
//! makes its members all-or-nothing. They are logged at `warn` level.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Problem, MAX_PRIORITY, MIN_PRIORITY};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No tasks or no resources were supplied.
    EmptyInput,
    /// Two entities share the same ID.
    DuplicateId,
    /// A duration or availability is zero.
    NonPositive,
    /// A priority lies outside `1..=10`.
    PriorityOutOfRange,
    /// A task requires a tool that doesn't exist.
    InvalidToolReference,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem instance.
///
/// Checks:
/// 1. At least one task and one resource
/// 2. No duplicate task, resource, or tool IDs
/// 3. Positive durations and availabilities
/// 4. Priorities within range
/// 5. Required tools exist
///
/// A prerequisite cycle among known tasks is reported through `warn!`
/// only.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.tasks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "No tasks to assign",
        ));
    }
    if problem.resources.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "No human resources available",
        ));
    }

    let mut resource_ids = HashSet::new();
    for r in &problem.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        if r.availability_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositive,
                format!("Resource '{}' has no available hours", r.id),
            ));
        }
    }

    let mut tool_ids = HashSet::new();
    for t in &problem.tools {
        if !tool_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate tool ID: {}", t.id),
            ));
        }
        if t.availability == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositive,
                format!("Tool '{}' has no available slots", t.id),
            ));
        }
    }

    let mut task_ids = HashSet::new();
    for task in &problem.tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if task.duration_hours == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositive,
                format!("Task '{}' has zero duration", task.id),
            ));
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&task.priority) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                format!(
                    "Task '{}' priority {} outside {MIN_PRIORITY}..={MAX_PRIORITY}",
                    task.id, task.priority
                ),
            ));
        }
        for tool in &task.required_tools {
            if !tool_ids.contains(tool.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidToolReference,
                    format!("Task '{}' requires unknown tool '{}'", task.id, tool),
                ));
            }
        }
    }

    if let Some(task_id) = find_cycle(problem, &task_ids) {
        warn!(
            task = task_id,
            "circular prerequisite chain; its tasks are done together or not at all"
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Finds a task on a prerequisite cycle using DFS.
///
/// Edges to unknown tasks are ignored. A task listing itself is a cycle.
pub fn find_cycle<'a>(problem: &'a Problem, known: &HashSet<&'a str>) -> Option<&'a str> {
    // prerequisite → dependents
    let mut adj: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in &problem.tasks {
        for pre in &task.prerequisites {
            if known.contains(pre.as_str()) {
                adj.entry(pre.as_str()).or_default().push(task.id.as_str());
            }
        }
    }

    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();

    // Walk in input order so the reported task is deterministic.
    for task in &problem.tasks {
        let node = task.id.as_str();
        if !visited.contains(node) && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(node);
        }
    }

    None
}

fn has_cycle_dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    in_stack: &mut HashSet<&'a str>,
) -> bool {
    visited.insert(node);
    in_stack.insert(node);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            if in_stack.contains(next) {
                return true; // Back edge → cycle
            }
            if !visited.contains(next) && has_cycle_dfs(next, adj, visited, in_stack) {
                return true;
            }
        }
    }

    in_stack.remove(node);
    false
}

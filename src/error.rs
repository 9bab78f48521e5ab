//! Crate error type.

use thiserror::Error;

use crate::milp::SolveStatus;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("task assigned more than once: {0}")]
    DuplicateAssignment(String),

    #[error("timeline for task {task_id} runs past the representable date range")]
    TimelineOverflow { task_id: String },

    #[error("no solution (solver status: {status})")]
    Infeasible { status: SolveStatus },

    #[error("solver error: {0}")]
    Solver(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_validation_display_joins_messages() {
        let err = Error::Validation(vec![
            ValidationError::new(ValidationErrorKind::EmptyInput, "no tasks"),
            ValidationError::new(ValidationErrorKind::EmptyInput, "no resources"),
        ]);
        assert_eq!(err.to_string(), "invalid input: no tasks; no resources");
    }

    #[test]
    fn test_infeasible_display() {
        let err = Error::Infeasible {
            status: SolveStatus::Infeasible,
        };
        assert_eq!(err.to_string(), "no solution (solver status: Infeasible)");
    }
}

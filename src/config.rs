//! Optimizer configuration.
//!
//! A plain value passed into each run. Nothing here is global: two runs
//! with different configurations never share state.

use serde::{Deserialize, Serialize};

/// Slack (hours) added to the average workload by the balance constraint.
pub const DEFAULT_BALANCE_SLACK_HOURS: f64 = 2.0;

/// Tolerance used when reading 0/1 values back from the solver.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// How many resources a task may receive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentPolicy {
    /// Every task goes to exactly one resource. Prerequisite constraints
    /// are always satisfied under this policy.
    #[default]
    Total,
    /// A task goes to at most one resource. Tasks may be left out when
    /// capacity is short; prerequisites then decide which ones.
    Partial,
}

/// How tool availability limits assignments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolPolicy {
    /// Each tool caps the total number of assignments, whatever the task.
    #[default]
    Shared,
    /// Each tool caps the assignments of tasks listing it in
    /// `required_tools`.
    PerTask,
}

/// Settings for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub assignment_policy: AssignmentPolicy,
    pub tool_policy: ToolPolicy,
    /// Adds the per-resource workload balance constraint.
    pub workload_balance: bool,
    pub balance_slack_hours: f64,
    pub integrality_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            assignment_policy: AssignmentPolicy::Total,
            tool_policy: ToolPolicy::Shared,
            workload_balance: false,
            balance_slack_hours: DEFAULT_BALANCE_SLACK_HOURS,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
        }
    }
}

impl OptimizerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the assignment policy.
    pub fn with_assignment_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.assignment_policy = policy;
        self
    }

    /// Sets the tool policy.
    pub fn with_tool_policy(mut self, policy: ToolPolicy) -> Self {
        self.tool_policy = policy;
        self
    }

    /// Enables workload balancing with the default slack.
    pub fn with_workload_balance(mut self) -> Self {
        self.workload_balance = true;
        self
    }

    /// Enables workload balancing with a custom slack.
    pub fn with_balance_slack(mut self, slack_hours: f64) -> Self {
        self.workload_balance = true;
        self.balance_slack_hours = slack_hours;
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_integrality_tolerance(mut self, tolerance: f64) -> Self {
        self.integrality_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = OptimizerConfig::default();
        assert_eq!(c.assignment_policy, AssignmentPolicy::Total);
        assert_eq!(c.tool_policy, ToolPolicy::Shared);
        assert!(!c.workload_balance);
        assert!((c.balance_slack_hours - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_builder() {
        let c = OptimizerConfig::new()
            .with_assignment_policy(AssignmentPolicy::Partial)
            .with_tool_policy(ToolPolicy::PerTask)
            .with_balance_slack(4.0);
        assert_eq!(c.assignment_policy, AssignmentPolicy::Partial);
        assert_eq!(c.tool_policy, ToolPolicy::PerTask);
        assert!(c.workload_balance);
        assert!((c.balance_slack_hours - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: OptimizerConfig = serde_json::from_str(r#"{"workload_balance":true}"#).unwrap();
        assert!(c.workload_balance);
        assert_eq!(c.assignment_policy, AssignmentPolicy::Total);
        assert!((c.balance_slack_hours - DEFAULT_BALANCE_SLACK_HOURS).abs() < 1e-10);
    }
}

//! Maintenance task model.
//!
//! A task is a single indivisible unit of maintenance work. It is performed
//! by exactly one human resource and occupies that resource for its whole
//! duration.

use serde::{Deserialize, Serialize};

/// Lowest accepted priority.
pub const MIN_PRIORITY: u8 = 1;
/// Highest accepted priority.
pub const MAX_PRIORITY: u8 = 10;

/// A maintenance task to be assigned.
///
/// # Time Representation
/// Durations are whole hours. The timeline deriver converts them into
/// absolute instants relative to a shared start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Work content in hours (must be positive).
    pub duration_hours: u32,
    /// Importance, `1..=10` (higher = more important).
    pub priority: u8,
    /// Identifiers of tasks that must be done if this one is done.
    ///
    /// References to tasks absent from the problem are skipped.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Tools this task consumes a slot of.
    ///
    /// Only consulted under [`ToolPolicy::PerTask`](crate::config::ToolPolicy).
    #[serde(default)]
    pub required_tools: Vec<String>,
}

impl Task {
    /// Creates a task with the given ID and duration, at medium priority.
    pub fn new(id: impl Into<String>, duration_hours: u32) -> Self {
        Self {
            id: id.into(),
            duration_hours,
            priority: 5,
            prerequisites: Vec::new(),
            required_tools: Vec::new(),
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a prerequisite task.
    pub fn with_prerequisite(mut self, task_id: impl Into<String>) -> Self {
        self.prerequisites.push(task_id.into());
        self
    }

    /// Adds a required tool.
    pub fn with_tool(mut self, tool_id: impl Into<String>) -> Self {
        self.required_tools.push(tool_id.into());
        self
    }

    /// Whether this task declares any prerequisite.
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Whether this task consumes a slot of the given tool.
    pub fn requires_tool(&self, tool_id: &str) -> bool {
        self.required_tools.iter().any(|t| t == tool_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("pump-overhaul", 4)
            .with_priority(8)
            .with_prerequisite("isolate-line")
            .with_tool("crane");

        assert_eq!(task.id, "pump-overhaul");
        assert_eq!(task.duration_hours, 4);
        assert_eq!(task.priority, 8);
        assert_eq!(task.prerequisites, vec!["isolate-line".to_string()]);
        assert!(task.has_prerequisites());
        assert!(task.requires_tool("crane"));
        assert!(!task.requires_tool("welder"));
    }

    #[test]
    fn test_task_defaults() {
        let task = Task::new("T1", 1);
        assert_eq!(task.priority, 5);
        assert!(!task.has_prerequisites());
        assert!(task.required_tools.is_empty());
    }

    #[test]
    fn test_task_deserialize_without_optional_lists() {
        let task: Task =
            serde_json::from_str(r#"{"id":"A","duration_hours":3,"priority":7}"#).unwrap();
        assert_eq!(task, Task::new("A", 3).with_priority(7));
    }
}

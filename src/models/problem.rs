//! Problem instance: everything one optimization run needs.

use serde::{Deserialize, Serialize};

use super::{Resource, Task, Tool};
use crate::error::{Error, Result};

/// Input bundle for a single run.
///
/// Order matters: the timeline deriver uses task and resource input order
/// to make its output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Tasks to assign, in input order.
    pub tasks: Vec<Task>,
    /// Human resources, in input order.
    pub resources: Vec<Resource>,
    /// Shared tools.
    #[serde(default)]
    pub tools: Vec<Tool>,
}

impl Problem {
    /// Creates a problem from tasks and resources, with no tools.
    pub fn new(tasks: Vec<Task>, resources: Vec<Resource>) -> Self {
        Self {
            tasks,
            resources,
            tools: Vec::new(),
        }
    }

    /// Sets the tool list.
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Adds a tool.
    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Looks up a task by ID.
    pub fn task(&self, task_id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::UnknownTask(task_id.to_string()))
    }

    /// Input position of a task.
    pub fn task_index(&self, task_id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| Error::UnknownTask(task_id.to_string()))
    }

    /// Looks up a resource by ID.
    pub fn resource(&self, resource_id: &str) -> Result<&Resource> {
        self.resources
            .iter()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| Error::UnknownResource(resource_id.to_string()))
    }

    /// Duration of a task in hours.
    pub fn duration_of(&self, task_id: &str) -> Result<u32> {
        self.task(task_id).map(|t| t.duration_hours)
    }

    /// Priority of a task.
    pub fn priority_of(&self, task_id: &str) -> Result<u8> {
        self.task(task_id).map(|t| t.priority)
    }

    /// Whether a task with this ID exists.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks.iter().any(|t| t.id == task_id)
    }

    /// Sum of all task durations (hours).
    pub fn total_task_hours(&self) -> u64 {
        self.tasks.iter().map(|t| u64::from(t.duration_hours)).sum()
    }

    /// Sum of all resource budgets (hours).
    pub fn total_available_hours(&self) -> u64 {
        self.resources
            .iter()
            .map(|r| u64::from(r.availability_hours))
            .sum()
    }
}

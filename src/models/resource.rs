//! Human resource and tool models.
//!
//! Both carry a plain integer budget. For a human resource it is the number
//! of hours that can be assigned; for a tool it is a count of assignable
//! slots, independent of task duration.

use serde::{Deserialize, Serialize};

/// A human resource (technician, crew) that performs tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Hours budget over the planning run.
    pub availability_hours: u32,
}

/// A shared tool (crane, welding set, test bench).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    /// Unique tool identifier.
    pub id: String,
    /// Number of assignments the tool can serve.
    pub availability: u32,
}

impl Resource {
    /// Creates a resource with the given hours budget.
    pub fn new(id: impl Into<String>, availability_hours: u32) -> Self {
        Self {
            id: id.into(),
            availability_hours,
        }
    }

    /// Fraction of the budget used by `assigned_hours`.
    ///
    /// Returns `None` for a zero budget.
    pub fn utilization(&self, assigned_hours: u32) -> Option<f64> {
        if self.availability_hours == 0 {
            return None;
        }
        Some(assigned_hours as f64 / self.availability_hours as f64)
    }
}

impl Tool {
    /// Creates a tool with the given slot count.
    pub fn new(id: impl Into<String>, availability: u32) -> Self {
        Self {
            id: id.into(),
            availability,
        }
    }
}

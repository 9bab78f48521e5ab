//! Schedule (solution) model.
//!
//! A schedule is the timeline derived from an assignment: one record per
//! assigned task, with absolute start and finish instants.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// A derived timeline.
///
/// Records are grouped by resource and ordered within each group; see
/// [`TimelineDeriver`](crate::scheduler::TimelineDeriver).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduled tasks.
    pub entries: Vec<ScheduledTask>,
}

/// A task placed on a resource during `[start, finish)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Assigned task ID.
    pub task_id: String,
    /// Resource performing the task.
    pub resource_id: String,
    /// Duration in hours.
    pub duration_hours: u32,
    /// Start instant (inclusive).
    pub start: DateTime<Utc>,
    /// Finish instant (exclusive).
    pub finish: DateTime<Utc>,
}

impl ScheduledTask {
    /// Creates a record; `finish` is derived from `start` and the duration.
    ///
    /// # Errors
    /// [`Error::TimelineOverflow`] if `finish` falls outside the
    /// representable date range.
    pub fn new(
        task_id: impl Into<String>,
        resource_id: impl Into<String>,
        duration_hours: u32,
        start: DateTime<Utc>,
    ) -> Result<Self> {
        let task_id = task_id.into();
        let finish = TimeDelta::try_hours(i64::from(duration_hours))
            .and_then(|d| start.checked_add_signed(d));
        let Some(finish) = finish else {
            return Err(Error::TimelineOverflow { task_id });
        };
        Ok(Self {
            task_id,
            resource_id: resource_id.into(),
            duration_hours,
            start,
            finish,
        })
    }

    /// Whether two records overlap in time.
    pub fn overlaps(&self, other: &ScheduledTask) -> bool {
        self.start < other.finish && other.start < self.finish
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn add_entry(&mut self, entry: ScheduledTask) {
        self.entries.push(entry);
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Finds the record for a task.
    pub fn entry_for_task(&self, task_id: &str) -> Option<&ScheduledTask> {
        self.entries.iter().find(|e| e.task_id == task_id)
    }

    /// Records for a resource, in timeline order.
    pub fn entries_for_resource(&self, resource_id: &str) -> Vec<&ScheduledTask> {
        self.entries
            .iter()
            .filter(|e| e.resource_id == resource_id)
            .collect()
    }

    /// Resources that received at least one task, in first-appearance order.
    pub fn resource_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for e in &self.entries {
            if !ids.contains(&e.resource_id.as_str()) {
                ids.push(&e.resource_id);
            }
        }
        ids
    }

    /// Assigned hours per resource.
    pub fn hours_by_resource(&self) -> HashMap<String, u32> {
        let mut hours: HashMap<String, u32> = HashMap::new();
        for e in &self.entries {
            let h = hours.entry(e.resource_id.clone()).or_insert(0);
            *h = h.saturating_add(e.duration_hours);
        }
        hours
    }

    /// Earliest start across all records.
    pub fn earliest_start(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.start).min()
    }

    /// Latest finish across all records.
    pub fn latest_finish(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().map(|e| e.finish).max()
    }

    /// Span from earliest start to latest finish, in hours (0 when empty).
    pub fn makespan_hours(&self) -> i64 {
        match (self.earliest_start(), self.latest_finish()) {
            (Some(start), Some(finish)) => (finish - start).num_hours(),
            _ => 0,
        }
    }
}

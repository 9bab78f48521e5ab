//! Timeline derivation.
//!
//! # Algorithm
//!
//! 1. Bucket assigned tasks by resource (resource input order).
//! 2. Sort each bucket by task input order.
//! 3. Walk each bucket with a cursor starting at the shared start instant:
//!    `start = cursor`, `finish = cursor + duration`, `cursor = finish`.
//!
//! Intervals on one resource are therefore contiguous and never overlap,
//! and a resource's span equals the sum of its assigned durations.
//!
//! # Complexity
//! O(a log a) where a = number of assignment pairs.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Problem, Schedule, ScheduledTask};

/// Converts an unordered assignment into per-resource timelines.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use u_maintenance::models::{Problem, Resource, Task};
/// use u_maintenance::scheduler::TimelineDeriver;
///
/// let problem = Problem::new(
///     vec![Task::new("A", 4), Task::new("B", 3)],
///     vec![Resource::new("R", 8)],
/// );
/// let pairs = vec![
///     ("B".to_string(), "R".to_string()),
///     ("A".to_string(), "R".to_string()),
/// ];
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
///
/// let schedule = TimelineDeriver::new().derive(&pairs, &problem, t0).unwrap();
/// assert_eq!(schedule.entries[0].task_id, "A");
/// assert_eq!(schedule.entries[1].start, schedule.entries[0].finish);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineDeriver;

impl TimelineDeriver {
    /// Creates a deriver.
    pub fn new() -> Self {
        Self
    }

    /// Derives the schedule for `(task, resource)` pairs.
    ///
    /// # Errors
    /// - [`Error::UnknownTask`] / [`Error::UnknownResource`] for pairs naming
    ///   entities absent from `problem`
    /// - [`Error::DuplicateAssignment`] if a task appears in two pairs
    /// - [`Error::TimelineOverflow`] if a resource's timeline runs past the
    ///   representable date range
    pub fn derive(
        &self,
        assignments: &[(String, String)],
        problem: &Problem,
        start: DateTime<Utc>,
    ) -> Result<Schedule> {
        let task_index: HashMap<&str, usize> = problem
            .tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let resource_index: HashMap<&str, usize> = problem
            .resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();

        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); problem.resources.len()];
        let mut seen = vec![false; problem.tasks.len()];

        for (task_id, resource_id) in assignments {
            let &t = task_index
                .get(task_id.as_str())
                .ok_or_else(|| Error::UnknownTask(task_id.clone()))?;
            let &r = resource_index
                .get(resource_id.as_str())
                .ok_or_else(|| Error::UnknownResource(resource_id.clone()))?;
            if seen[t] {
                return Err(Error::DuplicateAssignment(task_id.clone()));
            }
            seen[t] = true;
            buckets[r].push(t);
        }

        let mut schedule = Schedule::new();
        for (r, bucket) in buckets.iter_mut().enumerate() {
            bucket.sort_unstable();
            let resource = &problem.resources[r];
            let mut cursor = start;
            for &t in bucket.iter() {
                let task = &problem.tasks[t];
                let entry =
                    ScheduledTask::new(&task.id, &resource.id, task.duration_hours, cursor)?;
                cursor = entry.finish;
                schedule.add_entry(entry);
            }
        }

        debug!(
            entries = schedule.len(),
            resources = schedule.resource_ids().len(),
            "derived timeline"
        );
        Ok(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Task};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn pair(task: &str, resource: &str) -> (String, String) {
        (task.to_string(), resource.to_string())
    }

    fn make_problem() -> Problem {
        Problem::new(
            vec![
                Task::new("A", 4),
                Task::new("B", 3),
                Task::new("C", 2),
                Task::new("D", 1),
            ],
            vec![Resource::new("R1", 8), Resource::new("R2", 8), Resource::new("R3", 8)],
        )
    }

    #[test]
    fn test_single_resource_back_to_back() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new()
            .derive(&[pair("A", "R1"), pair("B", "R1")], &problem, t0())
            .unwrap();

        let a = schedule.entry_for_task("A").unwrap();
        let b = schedule.entry_for_task("B").unwrap();
        assert_eq!(a.start, t0());
        assert_eq!(a.finish, t0() + Duration::hours(4));
        assert_eq!(b.start, t0() + Duration::hours(4));
        assert_eq!(b.finish, t0() + Duration::hours(7));
    }

    #[test]
    fn test_order_follows_task_input_not_pair_order() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new()
            .derive(
                &[pair("D", "R1"), pair("B", "R1"), pair("A", "R1")],
                &problem,
                t0(),
            )
            .unwrap();

        let ids: Vec<&str> = schedule.entries.iter().map(|e| e.task_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_contiguous_and_span() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new()
            .derive(
                &[pair("C", "R2"), pair("A", "R2"), pair("B", "R1"), pair("D", "R2")],
                &problem,
                t0(),
            )
            .unwrap();

        let r2 = schedule.entries_for_resource("R2");
        assert_eq!(r2.len(), 3);
        for w in r2.windows(2) {
            assert_eq!(w[0].finish, w[1].start);
            assert!(!w[0].overlaps(w[1]));
        }
        // Span = 4 + 2 + 1
        assert_eq!(r2.last().unwrap().finish - r2[0].start, Duration::hours(7));
    }

    #[test]
    fn test_resources_start_together() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new()
            .derive(&[pair("A", "R1"), pair("B", "R2")], &problem, t0())
            .unwrap();

        assert_eq!(schedule.entry_for_task("A").unwrap().start, t0());
        assert_eq!(schedule.entry_for_task("B").unwrap().start, t0());
    }

    #[test]
    fn test_idle_resource_absent() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new()
            .derive(&[pair("A", "R3"), pair("B", "R1")], &problem, t0())
            .unwrap();

        assert_eq!(schedule.resource_ids(), vec!["R1", "R3"]);
        assert!(schedule.entries_for_resource("R2").is_empty());
    }

    #[test]
    fn test_empty_assignment() {
        let problem = make_problem();
        let schedule = TimelineDeriver::new().derive(&[], &problem, t0()).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_unknown_references() {
        let problem = make_problem();
        let deriver = TimelineDeriver::new();

        match deriver.derive(&[pair("Z", "R1")], &problem, t0()) {
            Err(Error::UnknownTask(id)) => assert_eq!(id, "Z"),
            other => panic!("expected UnknownTask, got {other:?}"),
        }
        assert!(matches!(
            deriver.derive(&[pair("A", "nobody")], &problem, t0()),
            Err(Error::UnknownResource(_))
        ));
    }

    #[test]
    fn test_cursor_past_date_range() {
        // Each task fits on its own; together they run past year 262143.
        let problem = Problem::new(
            vec![Task::new("A", 2_000_000_000), Task::new("B", 2_000_000_000)],
            vec![Resource::new("R", u32::MAX)],
        );
        let result =
            TimelineDeriver::new().derive(&[pair("A", "R"), pair("B", "R")], &problem, t0());
        assert!(matches!(result, Err(Error::TimelineOverflow { task_id }) if task_id == "B"));
    }

    #[test]
    fn test_duplicate_assignment() {
        let problem = make_problem();
        let result =
            TimelineDeriver::new().derive(&[pair("A", "R1"), pair("A", "R2")], &problem, t0());
        assert!(matches!(result, Err(Error::DuplicateAssignment(id)) if id == "A"));
    }
}

//! Workload indicators for a derived schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Earliest start to latest finish (hours) |
//! | Hours by resource | Sum of assigned durations |
//! | Utilization | Assigned hours / availability, per resource |
//! | Completion rate | Scheduled tasks / all tasks |
//! | Priority delivered | Sum of priorities of scheduled tasks |
//! | Load imbalance | Max − min assigned hours over all resources |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashMap;

use crate::models::{Problem, Schedule};

/// Workload performance indicators.
#[derive(Debug, Clone)]
pub struct WorkloadKpi {
    pub makespan_hours: i64,
    pub hours_by_resource: HashMap<String, u32>,
    /// Per-resource utilization of the hours budget (0.0..=1.0 when feasible).
    pub utilization_by_resource: HashMap<String, f64>,
    /// Mean utilization over all resources, idle ones included.
    pub avg_utilization: f64,
    pub completion_rate: f64,
    pub priority_delivered: u32,
    pub load_imbalance_hours: u32,
}

impl WorkloadKpi {
    /// Computes indicators from a schedule and the problem it solves.
    pub fn calculate(schedule: &Schedule, problem: &Problem) -> Self {
        let assigned = schedule.hours_by_resource();

        let mut hours_by_resource = HashMap::new();
        let mut utilization_by_resource = HashMap::new();
        for resource in &problem.resources {
            let hours = assigned.get(&resource.id).copied().unwrap_or(0);
            hours_by_resource.insert(resource.id.clone(), hours);
            if let Some(u) = resource.utilization(hours) {
                utilization_by_resource.insert(resource.id.clone(), u);
            }
        }

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_resource.values().sum();
            sum / utilization_by_resource.len() as f64
        };

        let completion_rate = if problem.tasks.is_empty() {
            1.0
        } else {
            schedule.len() as f64 / problem.tasks.len() as f64
        };

        let priority_delivered = schedule
            .entries
            .iter()
            .filter_map(|e| problem.priority_of(&e.task_id).ok())
            .map(u32::from)
            .sum();

        let max_load = hours_by_resource.values().copied().max().unwrap_or(0);
        let min_load = hours_by_resource.values().copied().min().unwrap_or(0);

        Self {
            makespan_hours: schedule.makespan_hours(),
            hours_by_resource,
            utilization_by_resource,
            avg_utilization,
            completion_rate,
            priority_delivered,
            load_imbalance_hours: max_load - min_load,
        }
    }

    /// Whether every task was scheduled and the load spread stays within
    /// `max_imbalance_hours`.
    pub fn meets_thresholds(&self, max_imbalance_hours: u32) -> bool {
        self.completion_rate >= 1.0 && self.load_imbalance_hours <= max_imbalance_hours
    }
}

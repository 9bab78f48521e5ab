//! Timeline derivation and workload evaluation.
//!
//! # Algorithm
//!
//! `TimelineDeriver` packs each resource's assigned tasks back-to-back
//! from a shared start instant, in task input order. The result is
//! deterministic for a given assignment.
//!
//! # KPI
//!
//! `WorkloadKpi` computes makespan, per-resource load and utilization,
//! completion rate, and load imbalance.

mod kpi;
mod timeline;

pub use kpi::WorkloadKpi;
pub use timeline::TimelineDeriver;

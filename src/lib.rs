//! Maintenance task assignment for the U-Engine ecosystem.
//!
//! Assigns maintenance tasks to human resources under hour budgets, shared
//! tool budgets, prerequisites, and an optional workload balance, then
//! lays each resource's tasks out on a timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Resource`, `Tool`, `Problem`,
//!   `Schedule`, `ScheduledTask`
//! - **`validation`**: Input integrity checks (duplicate IDs, budgets,
//!   priorities, tool references)
//! - **`milp`**: Binary-assignment formulation and the solver seam
//! - **`scheduler`**: Timeline derivation and workload KPIs
//! - **`optimizer`**: The validate → build → solve → derive pipeline
//! - **`import`**: Combined, resource and tool sheets → `Problem`
//! - **`config`**: Per-run optimizer settings
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use u_maintenance::models::{Problem, Resource, Task};
//! use u_maintenance::Optimizer;
//!
//! let problem = Problem::new(
//!     vec![Task::new("A", 4).with_priority(5), Task::new("B", 3).with_priority(8)],
//!     vec![Resource::new("R", 8)],
//! );
//! let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
//!
//! let report = Optimizer::default().optimize(&problem, t0).unwrap();
//! let b = report.schedule.entry_for_task("B").unwrap();
//! assert_eq!(b.start, t0 + Duration::hours(4));
//! assert_eq!(b.finish, t0 + Duration::hours(7));
//! ```
//!
//! # References
//!
//! - Wolsey (1998), "Integer Programming"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod error;
pub mod import;
pub mod milp;
pub mod models;
pub mod optimizer;
pub mod scheduler;
pub mod validation;

pub use config::OptimizerConfig;
pub use error::{Error, Result};
pub use optimizer::{OptimizationReport, Optimizer};

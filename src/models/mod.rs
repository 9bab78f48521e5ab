//! Maintenance planning domain models.
//!
//! Provides the data types for describing an assignment problem and the
//! timeline derived from its solution.
//!
//! | u-maintenance | Meaning |
//! |---------------|---------|
//! | Task | Indivisible maintenance job with duration and priority |
//! | Resource | Technician with an hours budget |
//! | Tool | Shared equipment with a slot budget |
//! | Problem | One run's input bundle |
//! | Schedule | Per-resource timeline of assigned tasks |

mod problem;
mod resource;
mod schedule;
mod task;

pub use problem::Problem;
pub use resource::{Resource, Tool};
pub use schedule::{Schedule, ScheduledTask};
pub use task::{Task, MAX_PRIORITY, MIN_PRIORITY};

//! Shopfloor Core Domain Types
//!
//! This crate contains the domain of the shop floor with no dependencies on:
//! - HTTP
//! - Storage backends
//! - Runtime specifics
//!
//! Roster, persisted record shapes, the standard-time table, the production
//! planner with its operator assignment, and dashboard aggregation all live
//! here.

pub mod dashboard;
pub mod error;
pub mod ids;
pub mod lenient;
pub mod planner;
pub mod records;
pub mod roster;
pub mod standard_times;

// Re-export commonly used types
pub use dashboard::{area_efficiency, AttendanceSummary, DASHBOARD_AREAS};
pub use error::CoreError;
pub use ids::{EmployeeId, PartId};
pub use planner::{OperatorPair, PartRequest, PlannedTask, TaskAssignment};
pub use records::{AttendanceRecord, MaterialRecord, ProductionRecord};
pub use roster::{Employee, Part, Roster};
pub use standard_times::StandardTimes;

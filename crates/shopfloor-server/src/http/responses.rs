//! HTTP request and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shopfloor_core::lenient::{deserialize_number, Flag};
use shopfloor_core::{EmployeeId, PartId, PartRequest, TaskAssignment};

// ============================================================================
// Error types
// ============================================================================

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Bare `{"status": ..., "count": ...}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub count: usize,
}

// ============================================================================
// Attendance types
// ============================================================================

/// Attendance sheet for one date/shift.
///
/// Every key other than `date` and `shift` is an employee id mapped to
/// whether the employee is present.
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub shift: String,
    #[serde(flatten)]
    pub marks: BTreeMap<EmployeeId, Flag>,
}

#[derive(Debug, Serialize)]
pub struct MarkAttendanceResponse {
    pub status: &'static str,
    /// Employees now recorded present for the date/shift.
    pub count: usize,
    pub total: usize,
    pub attendance_pct: f64,
    pub date: String,
    pub shift: String,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    pub date: Option<String>,
    pub shift: Option<String>,
}

// ============================================================================
// Production types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlanProductionRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub parts: Vec<PartRequest>,
}

#[derive(Debug, Serialize)]
pub struct PlanProductionResponse {
    pub assignments: Vec<TaskAssignment>,
    /// Employees present for the date/shift.
    pub present_count: usize,
}

/// Achieved quantity reported for a planned part.
#[derive(Debug, Deserialize)]
pub struct UpdateActualRequest {
    pub date: String,
    pub shift: String,
    pub part_id: PartId,
    pub work_area: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub actual: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub plan: f64,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum UpdateActualResponse {
    #[serde(rename = "updated")]
    Updated { efficiency: f64 },
    #[serde(rename = "not found")]
    NotFound,
}

// ============================================================================
// Material types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SaveMaterialRequest {
    pub date: String,
    #[serde(default)]
    pub materials: Vec<MaterialEntry>,
}

/// One material line; the date comes from the enclosing request.
#[derive(Debug, Deserialize)]
pub struct MaterialEntry {
    pub program: String,
    pub part_id: PartId,
    pub work_area: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub qty: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub req: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub actual: f64,
    /// Submitted as `"87.5%"` or a plain number.
    #[serde(deserialize_with = "deserialize_number")]
    pub efficiency: f64,
}

// ============================================================================
// Dashboard types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub shift: Option<String>,
}

/// Average efficiency keyed by area name, plus attendance.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub areas: BTreeMap<String, f64>,
    pub attendance_present: usize,
    pub attendance_total: usize,
    pub attendance_pct: f64,
}

// ============================================================================
// Health types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: &'static str,
}

//! Attendance handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::{debug, info};

use shopfloor_core::lenient::Flag;
use shopfloor_core::records::{attendance_for, present_ids, replace_session};
use shopfloor_core::{AttendanceRecord, AttendanceSummary, EmployeeId};

use crate::error::ApiError;
use crate::http::responses::{AttendanceQuery, MarkAttendanceRequest, MarkAttendanceResponse};
use crate::state::AppState;

/// Replace the attendance sheet of a date/shift.
pub async fn mark_attendance(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MarkAttendanceRequest>,
) -> Result<Json<MarkAttendanceResponse>, ApiError> {
    super::require_session(&req.date, &req.shift)?;

    for emp_id in req.marks.keys() {
        if state.roster.employee(emp_id.as_str()).is_none() {
            debug!(emp_id = %emp_id, "Attendance marked for employee not on roster");
        }
    }

    let present = {
        let _guard = state.write_lock.lock().await;
        let mut records: Vec<AttendanceRecord> = state.storage.load().await?;
        let marks = req.marks.into_iter().map(|(id, Flag(present))| (id, present));
        replace_session(&mut records, &req.date, &req.shift, marks);
        state.storage.save(&records).await?;
        present_ids(&records, &req.date, Some(&req.shift)).len()
    };

    let summary = AttendanceSummary::new(present, state.attendance_total());

    info!(
        date = %req.date,
        shift = %req.shift,
        present = summary.present,
        total = summary.total,
        "Attendance recorded"
    );

    Ok(Json(MarkAttendanceResponse {
        status: "success",
        count: summary.present,
        total: summary.total,
        attendance_pct: summary.pct,
        date: req.date,
        shift: req.shift,
    }))
}

/// Attendance sheet of a date/shift as `{emp_id: present}`.
pub async fn get_attendance(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<BTreeMap<EmployeeId, bool>>, ApiError> {
    let (Some(date), Some(shift)) = (query.date, query.shift) else {
        return Ok(Json(BTreeMap::new()));
    };

    let records: Vec<AttendanceRecord> = state.storage.load().await?;
    Ok(Json(attendance_for(&records, &date, &shift)))
}

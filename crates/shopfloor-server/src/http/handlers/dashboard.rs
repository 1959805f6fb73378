//! Dashboard aggregation handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use shopfloor_core::records::present_ids;
use shopfloor_core::{area_efficiency, AttendanceRecord, AttendanceSummary, MaterialRecord, ProductionRecord};

use crate::error::ApiError;
use crate::http::responses::{DashboardQuery, DashboardResponse};
use crate::state::AppState;

/// Per-area efficiency and attendance for a date, optionally one shift.
///
/// The date defaults to today in local time.
pub async fn get_dashboard_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let date = query
        .date
        .filter(|d| !d.is_empty())
        .unwrap_or_else(today);
    let shift = query.shift.filter(|s| !s.is_empty());

    let production: Vec<ProductionRecord> = state.storage.load().await?;
    let materials: Vec<MaterialRecord> = state.storage.load().await?;
    let attendance: Vec<AttendanceRecord> = state.storage.load().await?;

    let areas = area_efficiency(&production, &materials, &date, shift.as_deref());
    let present = present_ids(&attendance, &date, shift.as_deref()).len();
    let summary = AttendanceSummary::new(present, state.attendance_total());

    Ok(Json(DashboardResponse {
        areas,
        attendance_present: summary.present,
        attendance_total: summary.total,
        attendance_pct: summary.pct,
    }))
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

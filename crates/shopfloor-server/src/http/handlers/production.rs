//! Production planning handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use shopfloor_core::planner;
use shopfloor_core::records::{present_ids, update_actuals, ProductionKey};
use shopfloor_core::{AttendanceRecord, ProductionRecord};

use crate::error::ApiError;
use crate::http::responses::{
    PlanProductionRequest, PlanProductionResponse, UpdateActualRequest, UpdateActualResponse,
};
use crate::state::AppState;

/// Plan production for a date/shift and staff it with present operators.
///
/// Every planned task is appended to the production log with no actual
/// quantity yet.
pub async fn plan_production(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PlanProductionRequest>,
) -> Result<Json<PlanProductionResponse>, ApiError> {
    super::require_session(&req.date, &req.shift)?;

    let attendance: Vec<AttendanceRecord> = state.storage.load().await?;
    let present = present_ids(&attendance, &req.date, Some(&req.shift));
    let workers = planner::present_workers(&state.roster, &present);

    let tasks = planner::build_tasks(&req.parts, &state.roster, &state.standard_times)?;
    let assignments = planner::assign(tasks, &workers);
    let entries = planner::log_entries(&assignments, &req.date, &req.shift);

    if !entries.is_empty() {
        let _guard = state.write_lock.lock().await;
        state.storage.append(entries).await?;
    }

    let staffed = assignments.iter().filter(|a| !a.operators.is_empty()).count();
    info!(
        date = %req.date,
        shift = %req.shift,
        tasks = assignments.len(),
        staffed,
        present = workers.len(),
        "Production planned"
    );

    Ok(Json(PlanProductionResponse {
        assignments,
        present_count: workers.len(),
    }))
}

/// Record the achieved quantity for a planned part.
pub async fn update_production_actual(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateActualRequest>,
) -> Result<Json<UpdateActualResponse>, ApiError> {
    let key = ProductionKey {
        date: &req.date,
        shift: &req.shift,
        part_id: req.part_id.as_str(),
        work_area: &req.work_area,
    };

    let _guard = state.write_lock.lock().await;
    let mut records: Vec<ProductionRecord> = state.storage.load().await?;

    match update_actuals(&mut records, key, req.actual, req.plan) {
        Some(efficiency) => {
            state.storage.save(&records).await?;
            info!(
                date = %req.date,
                shift = %req.shift,
                part_id = %req.part_id,
                work_area = %req.work_area,
                actual = req.actual,
                efficiency,
                "Production actual recorded"
            );
            Ok(Json(UpdateActualResponse::Updated { efficiency }))
        }
        None => {
            info!(
                date = %req.date,
                shift = %req.shift,
                part_id = %req.part_id,
                work_area = %req.work_area,
                "No planned production to update"
            );
            Ok(Json(UpdateActualResponse::NotFound))
        }
    }
}

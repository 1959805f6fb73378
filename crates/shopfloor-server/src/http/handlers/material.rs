//! Material usage handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use shopfloor_core::MaterialRecord;

use crate::error::ApiError;
use crate::http::responses::{SaveMaterialRequest, StatusResponse};
use crate::state::AppState;

/// Append material usage lines for a date.
pub async fn save_material(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveMaterialRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let rows: Vec<MaterialRecord> = req
        .materials
        .into_iter()
        .map(|m| MaterialRecord {
            date: req.date.clone(),
            program: m.program,
            part_id: m.part_id,
            work_area: m.work_area,
            qty: m.qty,
            req: m.req,
            actual: m.actual,
            efficiency: m.efficiency,
        })
        .collect();
    let count = rows.len();

    if count > 0 {
        let _guard = state.write_lock.lock().await;
        state.storage.append(rows).await?;
    }

    info!(date = %req.date, count, "Material usage saved");

    Ok(Json(StatusResponse {
        status: "success",
        count,
    }))
}

//! HTTP request handlers.

mod attendance;
mod dashboard;
mod health;
mod index;
mod material;
mod production;

pub use attendance::{get_attendance, mark_attendance};
pub use dashboard::get_dashboard_data;
pub use health::health_check;
pub use index::index;
pub use material::save_material;
pub use production::{plan_production, update_production_actual};

use crate::error::ApiError;

/// Attendance and plans are keyed by date and shift; both must be set.
fn require_session(date: &str, shift: &str) -> Result<(), ApiError> {
    if date.trim().is_empty() {
        return Err(ApiError::BadRequest("date is required".to_string()));
    }
    if shift.trim().is_empty() {
        return Err(ApiError::BadRequest("shift is required".to_string()));
    }
    Ok(())
}

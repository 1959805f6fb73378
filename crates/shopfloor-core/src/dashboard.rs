//! Dashboard aggregation: per-area efficiency and attendance summary.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::{MaterialRecord, ProductionRecord};

/// Work areas shown on the dashboard.
pub const DASHBOARD_AREAS: [&str; 5] = ["Autoclave", "CCA", "PAA", "Paint_Booth", "Prefit"];

/// Canonical form of an area name: `Paint_Booth`, `paint booth` and
/// `PAINT_BOOTH` all compare equal.
pub fn normalize_area(area: &str) -> String {
    area.trim().to_lowercase().replace('_', " ")
}

/// Average efficiency per dashboard area for a date.
///
/// Production rows are filtered by date and, when given, shift. Material
/// rows carry no shift and are filtered by date only. An area without rows
/// reports zero.
pub fn area_efficiency(
    production: &[ProductionRecord],
    materials: &[MaterialRecord],
    date: &str,
    shift: Option<&str>,
) -> BTreeMap<String, f64> {
    let production: Vec<(String, f64)> = production
        .iter()
        .filter(|r| r.date == date && shift.map_or(true, |s| r.shift == s))
        .map(|r| (normalize_area(&r.work_area), r.efficiency))
        .collect();
    let materials: Vec<(String, f64)> = materials
        .iter()
        .filter(|r| r.date == date)
        .map(|r| (normalize_area(&r.work_area), r.efficiency))
        .collect();

    DASHBOARD_AREAS
        .iter()
        .map(|area| {
            let wanted = normalize_area(area);
            let effs: Vec<f64> = production
                .iter()
                .chain(materials.iter())
                .filter(|(a, _)| *a == wanted)
                .map(|(_, e)| *e)
                .collect();
            (area.to_string(), mean(&effs))
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Round to one decimal place, ties to even on the exact binary value.
///
/// `6.25` becomes `6.2` and `0.35` (stored as `0.3499...`) becomes `0.3`.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Headcount against the roster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceSummary {
    /// Unique employees present, never above `total`.
    pub present: usize,
    pub total: usize,
    /// Percentage present, one decimal.
    pub pct: f64,
}

impl AttendanceSummary {
    pub fn new(present: usize, total: usize) -> Self {
        let present = present.min(total);
        let pct = if total > 0 {
            round1(present as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        Self { present, total, pct }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prod(date: &str, shift: &str, area: &str, eff: f64) -> ProductionRecord {
        let mut r = ProductionRecord::planned(date, shift, "P1", area, 10);
        r.efficiency = eff;
        r
    }

    fn mat(date: &str, area: &str, eff: f64) -> MaterialRecord {
        MaterialRecord {
            date: date.to_string(),
            program: "X1".to_string(),
            part_id: "P1".into(),
            work_area: area.to_string(),
            qty: 1.0,
            req: 1.0,
            actual: 1.0,
            efficiency: eff,
        }
    }

    #[test]
    fn test_area_efficiency_combines_sources() {
        let production = vec![
            prod("2024-05-01", "A", "CCA", 80.0),
            prod("2024-05-01", "B", "CCA", 100.0),
            prod("2024-05-01", "A", "Paint Booth", 60.0),
            prod("2024-05-02", "A", "CCA", 10.0),
        ];
        let materials = vec![mat("2024-05-01", "cca", 90.0), mat("2024-05-01", "PAINT_BOOTH", 70.0)];

        let all_shifts = area_efficiency(&production, &materials, "2024-05-01", None);
        assert_eq!(all_shifts["CCA"], 90.0);
        assert_eq!(all_shifts["Paint_Booth"], 65.0);
        assert_eq!(all_shifts["Autoclave"], 0.0);
        assert_eq!(all_shifts.len(), DASHBOARD_AREAS.len());

        let shift_a = area_efficiency(&production, &materials, "2024-05-01", Some("A"));
        assert_eq!(shift_a["CCA"], 85.0);
    }

    #[test]
    fn test_attendance_summary() {
        let summary = AttendanceSummary::new(7, 23);
        assert_eq!(summary.present, 7);
        assert_eq!(summary.pct, 30.4);

        let capped = AttendanceSummary::new(30, 23);
        assert_eq!(capped.present, 23);
        assert_eq!(capped.pct, 100.0);

        assert_eq!(AttendanceSummary::new(0, 0).pct, 0.0);
    }

    #[test]
    fn test_round1_ties_to_even() {
        assert_eq!(round1(6.25), 6.2);
        assert_eq!(round1(6.75), 6.8);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(30.4347), 30.4);
        assert_eq!(AttendanceSummary::new(1, 16).pct, 6.2);
    }

    #[test]
    fn test_normalize_area() {
        assert_eq!(normalize_area("Paint_Booth"), "paint booth");
        assert_eq!(normalize_area(" PAINT booth"), "paint booth");
    }
}

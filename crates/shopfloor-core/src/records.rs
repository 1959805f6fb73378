//! Persisted record types: attendance, production and material logs.
//!
//! Field order is the column order of the CSV files.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::lenient::{deserialize_bool, deserialize_number};
use crate::{EmployeeId, PartId};

/// Percentage of plan achieved; zero when nothing was planned.
pub fn efficiency(actual: f64, plan: f64) -> f64 {
    if plan > 0.0 {
        actual / plan * 100.0
    } else {
        0.0
    }
}

/// One employee's presence for a date and shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: String,
    pub shift: String,
    pub emp_id: EmployeeId,
    #[serde(deserialize_with = "deserialize_bool")]
    pub present: bool,
}

impl AttendanceRecord {
    pub fn new(
        date: impl Into<String>,
        shift: impl Into<String>,
        emp_id: impl Into<EmployeeId>,
        present: bool,
    ) -> Self {
        Self {
            date: date.into(),
            shift: shift.into(),
            emp_id: emp_id.into(),
            present,
        }
    }

    /// Check if this record belongs to a date and, when given, a shift.
    pub fn matches(&self, date: &str, shift: Option<&str>) -> bool {
        self.date == date && shift.map_or(true, |s| self.shift == s)
    }
}

/// Attendance sheet for one date/shift. Later rows override earlier ones.
pub fn attendance_for(
    records: &[AttendanceRecord],
    date: &str,
    shift: &str,
) -> BTreeMap<EmployeeId, bool> {
    records
        .iter()
        .filter(|r| r.matches(date, Some(shift)))
        .map(|r| (r.emp_id.clone(), r.present))
        .collect()
}

/// Unique ids marked present on a date, optionally restricted to one shift.
pub fn present_ids(
    records: &[AttendanceRecord],
    date: &str,
    shift: Option<&str>,
) -> BTreeSet<EmployeeId> {
    records
        .iter()
        .filter(|r| r.present && r.matches(date, shift))
        .map(|r| r.emp_id.clone())
        .collect()
}

/// Replace every row of a date/shift with a fresh set of marks.
pub fn replace_session<I>(records: &mut Vec<AttendanceRecord>, date: &str, shift: &str, marks: I)
where
    I: IntoIterator<Item = (EmployeeId, bool)>,
{
    records.retain(|r| !r.matches(date, Some(shift)));
    records.extend(
        marks
            .into_iter()
            .map(|(emp_id, present)| AttendanceRecord::new(date, shift, emp_id, present)),
    );
}

/// Planned and achieved quantity for a part at a work area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: String,
    pub shift: String,
    pub part_id: PartId,
    pub work_area: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub plan_qty: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub actual_qty: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub efficiency: f64,
}

impl ProductionRecord {
    /// A freshly planned row: nothing achieved yet.
    pub fn planned(
        date: impl Into<String>,
        shift: impl Into<String>,
        part_id: impl Into<PartId>,
        work_area: impl Into<String>,
        plan_qty: u32,
    ) -> Self {
        Self {
            date: date.into(),
            shift: shift.into(),
            part_id: part_id.into(),
            work_area: work_area.into(),
            plan_qty: f64::from(plan_qty),
            actual_qty: 0.0,
            efficiency: 0.0,
        }
    }

    pub fn matches(&self, date: &str, shift: &str, part_id: &str, work_area: &str) -> bool {
        self.date == date
            && self.shift == shift
            && self.part_id.as_str() == part_id
            && self.work_area == work_area
    }
}

/// Key of the production rows an actual quantity is reported against.
#[derive(Debug, Clone, Copy)]
pub struct ProductionKey<'a> {
    pub date: &'a str,
    pub shift: &'a str,
    pub part_id: &'a str,
    pub work_area: &'a str,
}

/// Record an achieved quantity on every matching production row.
///
/// Returns the computed efficiency if at least one row matched.
pub fn update_actuals(
    records: &mut [ProductionRecord],
    key: ProductionKey<'_>,
    actual: f64,
    plan: f64,
) -> Option<f64> {
    let efficiency = efficiency(actual, plan);
    let mut updated = false;
    for record in records
        .iter_mut()
        .filter(|r| r.matches(key.date, key.shift, key.part_id, key.work_area))
    {
        record.actual_qty = actual;
        record.efficiency = efficiency;
        updated = true;
    }
    updated.then_some(efficiency)
}

/// Material consumption entry for a program/part at a work area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub date: String,
    pub program: String,
    pub part_id: PartId,
    pub work_area: String,
    #[serde(deserialize_with = "deserialize_number")]
    pub qty: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub req: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub actual: f64,
    #[serde(deserialize_with = "deserialize_number")]
    pub efficiency: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Vec<AttendanceRecord> {
        vec![
            AttendanceRecord::new("2024-05-01", "A", "E1", true),
            AttendanceRecord::new("2024-05-01", "A", "E2", false),
            AttendanceRecord::new("2024-05-01", "B", "E3", true),
            AttendanceRecord::new("2024-05-02", "A", "E1", true),
            AttendanceRecord::new("2024-05-01", "A", "E2", true),
        ]
    }

    #[test]
    fn test_efficiency() {
        assert_eq!(efficiency(45.0, 50.0), 90.0);
        assert_eq!(efficiency(10.0, 0.0), 0.0);
        assert_eq!(efficiency(10.0, -3.0), 0.0);
    }

    #[test]
    fn test_attendance_for_later_rows_win() {
        let map = attendance_for(&sheet(), "2024-05-01", "A");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("E1"), Some(&true));
        assert_eq!(map.get("E2"), Some(&true));
        assert!(attendance_for(&sheet(), "2024-06-01", "A").is_empty());
    }

    #[test]
    fn test_present_ids_with_and_without_shift() {
        let records = sheet();
        let day = present_ids(&records, "2024-05-01", None);
        assert_eq!(day.len(), 3);
        let shift_a = present_ids(&records, "2024-05-01", Some("A"));
        assert_eq!(shift_a.len(), 2);
        assert!(!shift_a.contains("E3"));
    }

    #[test]
    fn test_replace_session_only_touches_its_shift() {
        let mut records = sheet();
        replace_session(
            &mut records,
            "2024-05-01",
            "A",
            vec![(EmployeeId::new("E4"), true)],
        );
        assert_eq!(records.len(), 3);
        let shift_a = attendance_for(&records, "2024-05-01", "A");
        assert_eq!(shift_a.len(), 1);
        assert_eq!(shift_a.get("E4"), Some(&true));
        assert_eq!(present_ids(&records, "2024-05-01", Some("B")).len(), 1);
    }

    #[test]
    fn test_update_actuals_updates_every_match() {
        let mut rows = vec![
            ProductionRecord::planned("2024-05-01", "A", "P1", "CCA", 50),
            ProductionRecord::planned("2024-05-01", "A", "P1", "CCA", 50),
            ProductionRecord::planned("2024-05-01", "A", "P1", "PAA", 50),
        ];
        let key = ProductionKey {
            date: "2024-05-01",
            shift: "A",
            part_id: "P1",
            work_area: "CCA",
        };
        assert_eq!(update_actuals(&mut rows, key, 40.0, 50.0), Some(80.0));
        assert_eq!(rows[0].actual_qty, 40.0);
        assert_eq!(rows[1].efficiency, 80.0);
        assert_eq!(rows[2].actual_qty, 0.0);

        let missing = ProductionKey {
            shift: "B",
            ..key
        };
        assert_eq!(update_actuals(&mut rows, missing, 1.0, 1.0), None);
    }

    #[test]
    fn test_csv_columns_in_field_order() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .serialize(ProductionRecord::planned("2024-05-01", "A", "P1", "CCA", 5))
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert!(text.starts_with("date,shift,part_id,work_area,plan_qty,actual_qty,efficiency\n"));
    }

    #[test]
    fn test_material_accepts_percent_efficiency() {
        let row: MaterialRecord = serde_json::from_str(
            r#"{"date": "2024-05-01", "program": "X1", "part_id": "P1", "work_area": "PAA",
                "qty": 4, "req": "10", "actual": 9.5, "efficiency": "95%"}"#,
        )
        .unwrap();
        assert_eq!(row.req, 10.0);
        assert_eq!(row.efficiency, 95.0);
    }
}

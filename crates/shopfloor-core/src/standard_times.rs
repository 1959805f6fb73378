//! Standard minutes per unit, by part and work area.
//!
//! The table is a CSV whose first column holds part ids and whose remaining
//! columns are work areas:
//!
//! ```text
//! Part_ID,Prefit,CCA,PAA,Paint_Booth,Autoclave
//! P1,12,30,8,15,45
//! ```

use std::collections::HashMap;
use std::io::Read;

use crate::CoreError;

/// Minutes-per-unit lookup table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardTimes {
    header: Vec<String>,
    rows: HashMap<String, Vec<Option<f64>>>,
}

impl StandardTimes {
    /// Parse a table from CSV text.
    pub fn parse(data: &str) -> Result<Self, CoreError> {
        Self::from_reader(data.as_bytes())
    }

    /// Parse a table from any CSV source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| CoreError::InvalidStandardTimes(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = HashMap::new();
        for record in reader.records() {
            let record = record.map_err(|e| CoreError::InvalidStandardTimes(e.to_string()))?;
            let Some(part_id) = record.get(0) else {
                continue;
            };
            if part_id.is_empty() {
                continue;
            }
            let minutes = (1..header.len())
                .map(|i| record.get(i).and_then(|cell| cell.parse::<f64>().ok()))
                .collect();
            // First row for a part wins.
            rows.entry(part_id.to_string()).or_insert(minutes);
        }

        Ok(Self { header, rows })
    }

    /// Work areas in column order (the header without the part-id column).
    pub fn work_areas(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    /// Standard minutes for one unit of a part at a work area.
    ///
    /// Returns `None` for an unknown part, unknown area, or an empty cell.
    pub fn minutes_per_unit(&self, part_id: &str, work_area: &str) -> Option<f64> {
        let column = self.work_areas().iter().position(|a| a == work_area)?;
        self.rows.get(part_id)?.get(column).copied().flatten()
    }

    /// Number of parts in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Part_ID,Prefit,CCA,PAA,Paint_Booth,Autoclave
P1,12,30,8,15,45
P2, 6.5 ,,4,10
P1,99,99,99,99,99
";

    #[test]
    fn test_work_areas_skip_part_column() {
        let times = StandardTimes::parse(TABLE).unwrap();
        assert_eq!(
            times.work_areas(),
            &["Prefit", "CCA", "PAA", "Paint_Booth", "Autoclave"]
        );
        assert_eq!(times.len(), 2);
    }

    #[test]
    fn test_minutes_lookup() {
        let times = StandardTimes::parse(TABLE).unwrap();
        assert_eq!(times.minutes_per_unit("P1", "CCA"), Some(30.0));
        assert_eq!(times.minutes_per_unit("P2", "Prefit"), Some(6.5));
        // Empty cell, short row, unknown part, unknown area.
        assert_eq!(times.minutes_per_unit("P2", "CCA"), None);
        assert_eq!(times.minutes_per_unit("P2", "Autoclave"), None);
        assert_eq!(times.minutes_per_unit("P9", "CCA"), None);
        assert_eq!(times.minutes_per_unit("P1", "Welding"), None);
        assert_eq!(times.minutes_per_unit("P1", "Part_ID"), None);
    }

    #[test]
    fn test_first_row_wins() {
        let times = StandardTimes::parse(TABLE).unwrap();
        assert_eq!(times.minutes_per_unit("P1", "Autoclave"), Some(45.0));
    }

    #[test]
    fn test_empty_table() {
        let times = StandardTimes::default();
        assert!(times.work_areas().is_empty());
        assert!(times.is_empty());
        assert_eq!(times.minutes_per_unit("P1", "CCA"), None);
    }
}

//! Record storage.
//!
//! Each dataset (attendance, production, material) is stored whole: a load
//! returns every record, a save overwrites every record. Two backends:
//! - a directory of CSV files, for running on a workstation;
//! - a REST key-value store holding each dataset as one JSON array.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use shopfloor_core::{AttendanceRecord, MaterialRecord, ProductionRecord};

mod csv_store;
mod kv_store;

pub use csv_store::CsvStore;
pub use kv_store::KvStore;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The key-value service answered with a non-success status.
    #[error("key-value store returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },
}

/// A persisted dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Attendance,
    Production,
    Material,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [Dataset::Attendance, Dataset::Production, Dataset::Material];

    /// File name inside the CSV data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Attendance => "attendance_log.csv",
            Dataset::Production => "production_log.csv",
            Dataset::Material => "material_log.csv",
        }
    }

    /// Key in the key-value store.
    pub fn key(&self) -> &'static str {
        match self {
            Dataset::Attendance => "attendance_data",
            Dataset::Production => "production_data",
            Dataset::Material => "material_data",
        }
    }

    /// CSV header, in record field order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Dataset::Attendance => &["date", "shift", "emp_id", "present"],
            Dataset::Production => &[
                "date",
                "shift",
                "part_id",
                "work_area",
                "plan_qty",
                "actual_qty",
                "efficiency",
            ],
            Dataset::Material => &[
                "date",
                "program",
                "part_id",
                "work_area",
                "qty",
                "req",
                "actual",
                "efficiency",
            ],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Attendance => "attendance",
            Dataset::Production => "production",
            Dataset::Material => "material",
        };
        f.write_str(name)
    }
}

/// A record type bound to the dataset it is stored in.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + 'static {
    const DATASET: Dataset;
}

impl Record for AttendanceRecord {
    const DATASET: Dataset = Dataset::Attendance;
}

impl Record for ProductionRecord {
    const DATASET: Dataset = Dataset::Production;
}

impl Record for MaterialRecord {
    const DATASET: Dataset = Dataset::Material;
}

/// The configured storage backend.
pub enum Storage {
    Csv(CsvStore),
    Kv(KvStore),
}

impl Storage {
    /// Short backend name for logs and the health endpoint.
    pub fn backend_name(&self) -> &'static str {
        match self {
            Storage::Csv(_) => "csv",
            Storage::Kv(_) => "kv",
        }
    }

    /// Prepare the backend. Creates header-only CSV files where missing.
    pub async fn init(&self) -> Result<(), StorageError> {
        match self {
            Storage::Csv(store) => store.init().await,
            Storage::Kv(_) => Ok(()),
        }
    }

    /// Load every record of a dataset. A missing dataset is empty.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        match self {
            Storage::Csv(store) => store.load().await,
            Storage::Kv(store) => store.load().await,
        }
    }

    /// Overwrite a dataset.
    pub async fn save<R: Record>(&self, records: &[R]) -> Result<(), StorageError> {
        match self {
            Storage::Csv(store) => store.save(records).await,
            Storage::Kv(store) => store.save(records).await,
        }
    }

    /// Append records to a dataset.
    pub async fn append<R: Record>(&self, records: Vec<R>) -> Result<(), StorageError> {
        let mut existing = self.load::<R>().await?;
        existing.extend(records);
        self.save(&existing).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_match_record_fields() {
        fn header_of<R: Serialize>(record: R) -> Vec<String> {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.serialize(record).unwrap();
            let bytes = writer.into_inner().unwrap();
            let mut reader = csv::Reader::from_reader(bytes.as_slice());
            reader.headers().unwrap().iter().map(str::to_string).collect()
        }

        let attendance = header_of(AttendanceRecord::new("d", "s", "E1", true));
        assert_eq!(attendance, Dataset::Attendance.columns());

        let production = header_of(ProductionRecord::planned("d", "s", "P1", "CCA", 1));
        assert_eq!(production, Dataset::Production.columns());

        let material = header_of(MaterialRecord {
            date: "d".to_string(),
            program: "X".to_string(),
            part_id: "P1".into(),
            work_area: "CCA".to_string(),
            qty: 1.0,
            req: 1.0,
            actual: 1.0,
            efficiency: 100.0,
        });
        assert_eq!(material, Dataset::Material.columns());
    }

    #[test]
    fn test_dataset_names() {
        assert_eq!(Dataset::Production.to_string(), "production");
        assert_eq!(Dataset::Material.key(), "material_data");
        assert_eq!(Dataset::Attendance.file_name(), "attendance_log.csv");
    }
}

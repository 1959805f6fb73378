//! CSV file backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use super::{Dataset, Record, StorageError};

/// A directory holding one CSV file per dataset.
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of a dataset's file.
    pub fn path(&self, dataset: Dataset) -> PathBuf {
        self.dir.join(dataset.file_name())
    }

    /// Create the data directory and a header-only file for each missing dataset.
    pub async fn init(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        for dataset in Dataset::ALL {
            let path = self.path(dataset);
            if tokio::fs::try_exists(&path).await? {
                continue;
            }
            tokio::fs::write(&path, encode::<()>(dataset, &[])?).await?;
            info!(dataset = %dataset, path = %path.display(), "Created CSV file");
        }

        Ok(())
    }

    /// Read every record. A missing or blank file yields no records.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StorageError> {
        let path = self.path(R::DATASET);
        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());
        let records = reader.deserialize().collect::<Result<Vec<R>, _>>()?;

        debug!(dataset = %R::DATASET, count = records.len(), "Loaded CSV records");
        Ok(records)
    }

    /// Rewrite the whole file.
    pub async fn save<R: Record>(&self, records: &[R]) -> Result<(), StorageError> {
        let path = self.path(R::DATASET);
        let bytes = encode(R::DATASET, records)?;
        tokio::fs::write(&path, bytes).await?;

        debug!(dataset = %R::DATASET, count = records.len(), "Saved CSV records");
        Ok(())
    }
}

/// Header row followed by one row per record.
fn encode<R: Serialize>(dataset: Dataset, records: &[R]) -> Result<Vec<u8>, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(dataset.columns())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

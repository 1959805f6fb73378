//! Shared application state.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use shopfloor_core::{Roster, StandardTimes};

use crate::config::Config;
use crate::error::StartupError;
use crate::storage::{CsvStore, KvStore, Storage};

/// Shared application state.
pub struct AppState {
    pub config: Config,

    /// Employees and parts, fixed for the life of the process.
    pub roster: Roster,

    /// Standard minutes per unit, fixed for the life of the process.
    pub standard_times: StandardTimes,

    /// Record storage.
    pub storage: Storage,

    /// Held across load-modify-save sequences on a dataset.
    pub write_lock: Mutex<()>,
}

impl AppState {
    /// Create a new AppState wrapped in Arc.
    pub fn new(
        config: Config,
        roster: Roster,
        standard_times: StandardTimes,
        storage: Storage,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            roster,
            standard_times,
            storage,
            write_lock: Mutex::new(()),
        })
    }

    /// Load the roster and standard times, select and prepare storage.
    pub async fn load(config: Config) -> Result<Arc<Self>, StartupError> {
        let roster_json = read_to_string(&config.roster_path).await?;
        let roster = Roster::from_json(&roster_json)?;
        info!(
            path = %config.roster_path.display(),
            employees = roster.employees.len(),
            parts = roster.parts.len(),
            "Roster loaded"
        );

        let standard_times = match tokio::fs::read_to_string(&config.standard_times_path).await {
            Ok(data) => {
                let times = StandardTimes::parse(&data)?;
                info!(
                    path = %config.standard_times_path.display(),
                    parts = times.len(),
                    work_areas = ?times.work_areas(),
                    "Standard times loaded"
                );
                times
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %config.standard_times_path.display(),
                    "Standard-time table not found - all tasks will cost zero minutes"
                );
                StandardTimes::default()
            }
            Err(e) => {
                return Err(StartupError::Read {
                    path: config.standard_times_path.display().to_string(),
                    source: e,
                })
            }
        };

        let storage = match &config.kv {
            Some(kv) => {
                info!(url = %kv.url, "Using key-value storage");
                Storage::Kv(KvStore::new(&kv.url, kv.token.clone()))
            }
            None => {
                info!(dir = %config.data_dir.display(), "Using CSV storage");
                Storage::Csv(CsvStore::new(&config.data_dir))
            }
        };
        storage.init().await?;

        Ok(Self::new(config, roster, standard_times, storage))
    }

    /// Headcount attendance percentages are computed against.
    pub fn attendance_total(&self) -> usize {
        self.config.attendance_total(self.roster.len())
    }
}

async fn read_to_string(path: &Path) -> Result<String, StartupError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::Read {
            path: path.display().to_string(),
            source,
        })
}

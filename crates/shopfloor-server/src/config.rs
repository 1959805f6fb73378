//! Server configuration.

use std::fmt;
use std::path::PathBuf;

/// Credentials for the REST key-value backend.
#[derive(Clone)]
pub struct KvConfig {
    pub url: String,
    pub token: String,
}

impl fmt::Debug for KvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvConfig")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address.
    pub bind_addr: String,

    /// Directory holding the attendance, production and material CSV files.
    pub data_dir: PathBuf,

    /// Employee and part roster (JSON).
    pub roster_path: PathBuf,

    /// Standard minutes per unit table (CSV).
    pub standard_times_path: PathBuf,

    /// Key-value backend; CSV files are used when unset.
    pub kv: Option<KvConfig>,

    /// Attendance denominator. Defaults to the roster size.
    pub max_employees: Option<usize>,
}

impl Config {
    /// Headcount attendance percentages are computed against.
    pub fn attendance_total(&self, roster_len: usize) -> usize {
        self.max_employees.unwrap_or(roster_len)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            data_dir: PathBuf::from("data"),
            roster_path: PathBuf::from("data/roster.json"),
            standard_times_path: PathBuf::from("data/wp_data.csv"),
            kv: None,
            max_employees: None,
        }
    }
}

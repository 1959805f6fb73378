//! Shopfloor Server Library
//!
//! HTTP service for attendance, production planning with operator
//! assignment, material usage and the dashboard, backed by CSV files or a
//! REST key-value store.

pub mod config;
pub mod error;
pub mod http;
pub mod state;
pub mod storage;

pub use config::{Config, KvConfig};
pub use error::{ApiError, StartupError};
pub use state::AppState;
pub use storage::{Storage, StorageError};

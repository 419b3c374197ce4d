//! Climate API Core Library
//!
//! Shared utilities for the climate API service:
//! - Configuration loading (XDG-compliant)
//! - Dataset file discovery
//! - Service defaults

mod config;
pub mod fs;

pub use config::{config_candidates, find_config_file, get_xdg_data_dir, load_config, ConfigSource};
pub use fs::{find_data_file, is_file, path_exists};

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 9900;

/// Default location of the station dataset
pub const DEFAULT_DB_PATH: &str = "./Resources/hawaii.sqlite";

/// Length of the rolling window served by the precipitation and tobs routes
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Longest accepted rolling window (roughly two centuries)
pub const MAX_WINDOW_DAYS: i64 = 73_000;

/// Default per-query timeout against the store, in seconds
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 10;

/// Default size of the read-only connection pool
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

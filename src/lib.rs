mod db;
mod errors;
mod models;

pub use db::{ensure_db, WaterStore, DEFAULT_DB_FILE, DEFAULT_WEIGHT_LBS};
pub use errors::{StoreError, StoreResult};
pub use models::{DailyTotal, DrinkEvent, Last24Summary, RollingEntry, WeightEntry};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Route tracing output to a daily-rolling log file under `data_dir/logs`.
/// The presentation layer calls this once at startup; repeat calls keep the
/// first subscriber.
pub fn init_tracing(data_dir: &Path) -> Result<(), String> {
    let log_dir = data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).map_err(|error| error.to_string())?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "water-tracker.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| error.to_string())
}

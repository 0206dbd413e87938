use crate::errors::{StoreError, StoreResult};
use crate::models::{DailyTotal, DrinkEvent, Last24Summary, RollingEntry, WeightEntry};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA_V1_SQL: &str = include_str!("schema.sql");

/// Weight seeded into an empty `user_weight` table at bootstrap.
pub const DEFAULT_WEIGHT_LBS: f64 = 160.0;

/// Store file name used when the caller does not supply a path.
pub const DEFAULT_DB_FILE: &str = "sqlite-water-tracker.db";

struct Migration {
    version: i64,
    label: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    label: "initial water_log schema",
    sql: SCHEMA_V1_SQL,
}];

/// Handle on one store file. Each operation opens its own connection and
/// runs in its own transaction, released before the call returns.
#[derive(Debug, Clone)]
pub struct WaterStore {
    db_path: PathBuf,
}

/// Idempotent bootstrap, safe to call on every process start.
pub fn ensure_db(path: &Path) -> StoreResult<bool> {
    WaterStore::open(path).ensure_schema()
}

impl WaterStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> StoreResult<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StoreError::Unavailable(err.to_string()))?;
            }
        }
        Connection::open(&self.db_path).map_err(|err| StoreError::Unavailable(err.to_string()))
    }

    /// Bring the store up to the current schema version and seed the default
    /// weight, all inside one transaction. Returns whether anything changed.
    pub fn ensure_schema(&self) -> StoreResult<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        tx.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
               version INTEGER PRIMARY KEY,
               label TEXT NOT NULL,
               applied_at TEXT NOT NULL
             );",
        )?;

        let mut current: i64 = tx.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?;

        if current == 0 && table_exists(&tx, "water_log")? {
            // Store predates version tracking: stamp every known version
            // without re-running any script.
            for migration in MIGRATIONS {
                record_version(&tx, migration)?;
            }
            current = MIGRATIONS.last().map(|m| m.version).unwrap_or(0);
            tracing::info!(path = %self.db_path.display(), version = current, "stamped legacy store");
        }

        let mut changed = false;
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            tx.execute_batch(migration.sql)
                .map_err(|err| StoreError::SchemaFailed(format!("{}: {}", migration.label, err)))?;
            record_version(&tx, migration)?;
            changed = true;
            tracing::info!(version = migration.version, label = migration.label, "applied schema migration");
        }

        if table_exists(&tx, "user_weight")? {
            changed |= seed_default_weight(&tx, DEFAULT_WEIGHT_LBS)?;
        }

        tx.commit()?;
        Ok(changed)
    }

    /// Seeder entry point for callers outside the bootstrap transaction.
    pub fn seed_default_weight(&self, default_lbs: f64) -> StoreResult<bool> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let inserted = seed_default_weight(&tx, default_lbs)?;
        tx.commit()?;
        Ok(inserted)
    }

    // ─── Write paths ─────────────────────────────────────────────────────

    pub fn insert_drink(&self, ounces: f64) -> StoreResult<DrinkEvent> {
        if !ounces.is_finite() || ounces <= 0.0 {
            return Err(StoreError::InvalidVolume(ounces));
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO water_log (timestamp, ounces) VALUES (datetime('now', 'localtime'), ?1)",
            [ounces],
        )?;
        let event = tx.query_row(
            "SELECT id, timestamp, ounces FROM water_log WHERE id = last_insert_rowid()",
            [],
            parse_event_row,
        )?;
        tx.commit()?;
        Ok(event)
    }

    pub fn delete_event(&self, id: i64) -> StoreResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        // Absent ids delete zero rows; that is not an error.
        tx.execute("DELETE FROM water_log WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(())
    }

    pub fn log_weight(&self, weight_lbs: f64) -> StoreResult<WeightEntry> {
        if !weight_lbs.is_finite() || weight_lbs <= 0.0 {
            return Err(StoreError::InvalidWeight(weight_lbs));
        }
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO user_weight (timestamp, weight_lbs) VALUES (datetime('now', 'localtime'), ?1)",
            [weight_lbs],
        )?;
        let entry = tx.query_row(
            "SELECT timestamp, weight_lbs FROM user_weight WHERE rowid = last_insert_rowid()",
            [],
            |row| {
                Ok(WeightEntry {
                    timestamp: row.get(0)?,
                    weight_lbs: row.get(1)?,
                })
            },
        )?;
        tx.commit()?;
        Ok(entry)
    }

    // ─── Read paths ──────────────────────────────────────────────────────

    pub fn list_recent_events(&self, limit: u32) -> StoreResult<Vec<DrinkEvent>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, ounces FROM water_log ORDER BY timestamp DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit], parse_event_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn list_daily_totals(&self, limit: u32) -> StoreResult<Vec<DailyTotal>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT date, total, weight, target, percent_of_target
             FROM water_log_full ORDER BY date DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit], |row| {
                Ok(DailyTotal {
                    date: row.get(0)?,
                    total: row.get(1)?,
                    weight: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    target: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    percent_of_target: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn list_rolling_window(&self, limit: u32) -> StoreResult<Vec<RollingEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT timestamp, ounces, rolling_24h_ounces, weight, target, percent_of_target
             FROM rolling_log_full ORDER BY timestamp DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit], |row| {
                Ok(RollingEntry {
                    timestamp: row.get(0)?,
                    ounces: row.get(1)?,
                    rolling_24h_ounces: row.get(2)?,
                    weight: row.get::<_, Option<f64>>(3)?.unwrap_or(0.0),
                    target: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                    percent_of_target: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn last_24h_summary(&self) -> StoreResult<Option<Last24Summary>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT total_ounces_last_24_hours, weight, target_ounces, percent_of_target
             FROM last_24_hours_summary LIMIT 1",
            [],
            |row| {
                Ok(Last24Summary {
                    total_ounces_last_24_hours: row.get(0)?,
                    weight: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
                    target_ounces: row.get::<_, Option<f64>>(2)?.unwrap_or(0.0),
                    percent_of_target: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(StoreError::from)
    }

    pub fn current_weight(&self) -> StoreResult<Option<WeightEntry>> {
        let conn = self.connect()?;
        conn.query_row(
            "SELECT timestamp, weight_lbs FROM user_weight
             ORDER BY timestamp DESC, rowid DESC LIMIT 1",
            [],
            |row| {
                Ok(WeightEntry {
                    timestamp: row.get(0)?,
                    weight_lbs: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(StoreError::from)
    }
}

fn seed_default_weight(conn: &Connection, default_lbs: f64) -> StoreResult<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(1) FROM user_weight", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO user_weight (timestamp, weight_lbs) VALUES (datetime('now', 'localtime'), ?1)",
        [default_lbs],
    )?;
    tracing::info!(weight_lbs = default_lbs, "seeded default body weight");
    Ok(true)
}

fn record_version(conn: &Connection, migration: &Migration) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO schema_version (version, label, applied_at)
         VALUES (?1, ?2, datetime('now', 'localtime'))",
        params![migration.version, migration.label],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> StoreResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(1) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn parse_event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrinkEvent> {
    Ok(DrinkEvent {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        ounces: row.get(2)?,
    })
}

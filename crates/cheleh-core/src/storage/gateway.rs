//! Persistence gateway for the habit list.
//!
//! Loads the blob stored under the configured key, runs the start-date
//! migration, and writes the full list back after every mutation. A load
//! that backfilled any record writes the result back immediately so the
//! backfill happens once. A blob that fails to parse is treated as an
//! empty list.

use chrono::{DateTime, Utc};

use super::{Config, Database};
use crate::book::HabitBook;
use crate::error::CoreError;
use crate::habit::Habit;
use crate::migration::{migrate_records, HabitRecord, MigrationReport};

/// Habit list stored as JSON under one kv key.
pub struct HabitStore {
    db: Database,
    key: String,
}

impl HabitStore {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Open the default database with the key from `config`.
    pub fn open(config: &Config) -> Result<Self, CoreError> {
        Ok(Self::new(Database::open()?, config.storage.key.clone()))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load and migrate the stored habits.
    ///
    /// A missing key or a malformed blob both yield an empty list.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Vec<Habit>, CoreError> {
        let Some(blob) = self.db.kv_get(&self.key)? else {
            return Ok(Vec::new());
        };
        let (habits, report) = decode_blob(&blob, now);
        if report.migrated > 0 {
            self.save(&habits)?;
        }
        Ok(habits)
    }

    pub fn save(&self, habits: &[Habit]) -> Result<(), CoreError> {
        let blob = encode_blob(habits)?;
        self.db.kv_set(&self.key, &blob)?;
        tracing::debug!(key = %self.key, count = habits.len(), "habits saved");
        Ok(())
    }

    pub fn load_book(&self, now: DateTime<Utc>) -> Result<HabitBook, CoreError> {
        self.load(now).map(HabitBook::new)
    }

    pub fn save_book(&self, book: &HabitBook) -> Result<(), CoreError> {
        self.save(book.habits())
    }
}

/// Parse and migrate a stored blob. Any parse or shape failure yields an
/// empty list.
pub fn decode_blob(blob: &str, now: DateTime<Utc>) -> (Vec<Habit>, MigrationReport) {
    let records: Vec<HabitRecord> = match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed habit data");
            return (Vec::new(), MigrationReport::default());
        }
    };

    match migrate_records(records, now) {
        Ok((habits, report)) => {
            if report.migrated > 0 {
                tracing::info!(
                    migrated = report.migrated,
                    total = report.total,
                    "backfilled missing start dates"
                );
            }
            (habits, report)
        }
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed habit data");
            (Vec::new(), MigrationReport::default())
        }
    }
}

pub fn encode_blob(habits: &[Habit]) -> Result<String, CoreError> {
    Ok(serde_json::to_string(habits)?)
}

//! Schema migrations
//!
//! Migrations are applied in order and tracked with `PRAGMA user_version`.
//! Each one runs in its own transaction together with the version bump, so
//! a failed migration leaves the previous version in place.
//!
//! Foreign key constraints are named `fk_<table>_<column>_<referred_table>`.

use rusqlite::Connection;
use tracing::info;

use super::errors::{StorageError, StorageResult};

/// One schema step
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

/// Versions before and after a migration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from: u32,
    pub to: u32,
}

impl MigrationReport {
    /// Number of migrations applied by this run
    pub fn applied(&self) -> u32 {
        self.to - self.from
    }
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_heroes_powers_hero_powers",
    sql: "
        CREATE TABLE heroes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            super_name TEXT NOT NULL
        );

        CREATE TABLE powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT NOT NULL
        );

        CREATE TABLE hero_powers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            strength TEXT NOT NULL,
            hero_id INTEGER NOT NULL,
            power_id INTEGER NOT NULL,
            CONSTRAINT fk_hero_powers_hero_id_heroes
                FOREIGN KEY (hero_id) REFERENCES heroes (id) ON DELETE CASCADE,
            CONSTRAINT fk_hero_powers_power_id_powers
                FOREIGN KEY (power_id) REFERENCES powers (id) ON DELETE CASCADE
        );

        CREATE INDEX ix_hero_powers_hero_id ON hero_powers (hero_id);
        CREATE INDEX ix_hero_powers_power_id ON hero_powers (power_id);
    ",
}];

/// Latest schema version known to this build
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Reads the schema version recorded in the database
pub fn current_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

/// Applies every migration newer than the recorded version.
pub fn apply(conn: &mut Connection) -> StorageResult<MigrationReport> {
    let from = current_version(conn)?;
    let mut to = from;

    for migration in MIGRATIONS.iter().filter(|m| m.version > from) {
        let failed = |e: rusqlite::Error| StorageError::Migration {
            version: migration.version,
            name: migration.name,
            reason: e.to_string(),
        };

        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql).map_err(failed)?;
        tx.pragma_update(None, "user_version", migration.version)
            .map_err(failed)?;
        tx.commit()?;

        info!(version = migration.version, name = migration.name, "Applied migration");
        to = migration.version;
    }

    Ok(MigrationReport { from, to })
}

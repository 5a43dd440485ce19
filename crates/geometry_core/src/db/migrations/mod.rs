//! Schema registry, creation and verification.
//!
//! # Responsibility
//! - Register schema versions in strictly increasing order.
//! - Create the schema atomically on a fresh database.
//! - Verify the structure of an existing database before it is used.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - Verification failures leave the database untouched.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

/// Table holding one row per completed calculation.
pub const CALCULATIONS_TABLE: &str = "calculations";

/// Columns every supported `calculations` table must have.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "shape_type",
    "parameters",
    "area",
    "circumscribed_radius",
    "inscribed_radius",
    "created_at",
];

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_calculations.sql"),
}];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Ensures the calculation schema exists and matches expectations.
///
/// Safe to call on every startup: a fresh database gets the schema created in
/// one transaction, an up-to-date database is only verified.
///
/// # Errors
/// - `SchemaMismatch` when the database is newer than this binary, when the
///   version stamp claims a schema whose table is missing, or when an existing
///   `calculations` table lacks required columns.
pub fn apply_migrations(conn: &Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(schema_mismatch(format!(
            "database schema version {current_version} is newer than supported {latest}"
        )));
    }

    if current_version == 0 && table_exists(conn, CALCULATIONS_TABLE)? {
        // Unversioned table created by another tool: adopt it only when the
        // structure is already compatible.
        verify_schema(conn)?;
        conn.execute_batch(&format!("PRAGMA user_version = {latest};"))?;
        info!("event=schema_init module=db status=ok action=adopt version={latest}");
        return Ok(());
    }

    if current_version == latest {
        return verify_schema(conn);
    }

    let tx = conn.unchecked_transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=schema_init module=db status=ok action=create from_version={current_version} version={latest}"
    );
    Ok(())
}

/// Checks that the `calculations` table and all required columns exist.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    if !table_exists(conn, CALCULATIONS_TABLE)? {
        return Err(schema_mismatch(format!(
            "table `{CALCULATIONS_TABLE}` not found although schema version is {}",
            current_user_version(conn)?
        )));
    }

    let mut missing = Vec::new();
    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, CALCULATIONS_TABLE, column)? {
            missing.push(*column);
        }
    }

    if !missing.is_empty() {
        return Err(schema_mismatch(format!(
            "table `{CALCULATIONS_TABLE}` is missing required columns: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}

fn schema_mismatch(reason: String) -> DbError {
    error!("event=schema_init module=db status=error error_code=schema_mismatch reason={reason}");
    DbError::SchemaMismatch(reason)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

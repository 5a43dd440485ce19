//! Calculation store contract and SQLite implementation.
//!
//! # Responsibility
//! - Append calculation records and serve history/aggregate queries.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewCalculation::validate()` before SQL mutations.
//! - `id` and `created_at` are assigned here; `created_at` never decreases
//!   across successive saves.
//! - Every write runs in its own transaction, rolled back on early exit.
//! - `clear_all` deletes nothing unless the caller confirms explicitly.

use crate::db::migrations::{apply_migrations, verify_schema};
use crate::db::DbError;
use crate::model::{
    CalculationId, CalculationRecord, CalculationValidationError, NewCalculation, ShapeKind,
};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const CALCULATION_SELECT_SQL: &str = "SELECT
    id,
    shape_type,
    parameters,
    area,
    circumscribed_radius,
    inscribed_radius,
    created_at
FROM calculations";

// Epoch milliseconds, clamped to the newest stored value.
const NEXT_CREATED_AT_SQL: &str = "MAX(
    CAST((julianday('now') - 2440587.5) * 86400000.0 AS INTEGER),
    COALESCE((SELECT MAX(created_at) FROM calculations), 0)
)";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error; distinct from shape validation errors.
#[derive(Debug)]
pub enum StoreError {
    /// Connection or I/O failure in the backing store. Not retried.
    Unavailable(DbError),
    /// Backing store exists but lacks the expected structure.
    SchemaMismatch(String),
    /// Record rejected before persistence.
    InvalidRecord(CalculationValidationError),
    /// Persisted row cannot be decoded.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(err) => write!(f, "calculation store unavailable: {err}"),
            Self::SchemaMismatch(reason) => {
                write!(f, "calculation store schema mismatch: {reason}")
            }
            Self::InvalidRecord(err) => write!(f, "invalid calculation record: {err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted calculation data: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable(err) => Some(err),
            Self::InvalidRecord(err) => Some(err),
            Self::SchemaMismatch(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::SchemaMismatch(reason) => Self::SchemaMismatch(reason),
            other => Self::Unavailable(other),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(DbError::Sqlite(value))
    }
}

impl From<CalculationValidationError> for StoreError {
    fn from(value: CalculationValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Aggregates for one shape kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStatistics {
    pub shape_type: ShapeKind,
    pub count: u64,
    pub avg_area: f64,
    pub min_area: f64,
    pub max_area: f64,
}

/// Store-wide aggregates, computed by SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationStatistics {
    pub total: u64,
    /// Sorted by shape name; kinds without records are omitted.
    pub by_shape: Vec<ShapeStatistics>,
    pub last_created_at: Option<i64>,
}

/// Repository interface for calculation history.
pub trait CalculationRepository {
    /// Creates the schema if absent and verifies it otherwise.
    fn initialize(&self) -> StoreResult<()>;
    /// Appends one record and returns its assigned id.
    fn save(&self, calculation: &NewCalculation) -> StoreResult<CalculationId>;
    fn get(&self, id: CalculationId) -> StoreResult<Option<CalculationRecord>>;
    /// Newest first, at most `limit` records.
    fn list_recent(&self, limit: u32) -> StoreResult<Vec<CalculationRecord>>;
    /// Newest first for one shape kind, at most `limit` records.
    fn list_by_shape(&self, kind: ShapeKind, limit: u32) -> StoreResult<Vec<CalculationRecord>>;
    fn statistics(&self) -> StoreResult<CalculationStatistics>;
    /// Deletes all records when `confirmed`; returns the number deleted.
    fn clear_all(&self, confirmed: bool) -> StoreResult<u64>;
}

/// SQLite-backed calculation repository.
pub struct SqliteCalculationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCalculationRepository<'conn> {
    /// Wraps a connection without checking its schema.
    ///
    /// Call [`CalculationRepository::initialize`] before other operations
    /// unless the connection came from `open_db`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Wraps a connection whose schema must already be in place.
    ///
    /// # Errors
    /// - `SchemaMismatch` when the `calculations` table or its columns are missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl CalculationRepository for SqliteCalculationRepository<'_> {
    fn initialize(&self) -> StoreResult<()> {
        apply_migrations(self.conn)?;
        Ok(())
    }

    fn save(&self, calculation: &NewCalculation) -> StoreResult<CalculationId> {
        calculation.validate()?;
        let started_at = Instant::now();

        let result = (|| -> StoreResult<CalculationId> {
            let tx = self.conn.unchecked_transaction()?;
            tx.execute(
                &format!(
                    "INSERT INTO calculations (
                        shape_type,
                        parameters,
                        area,
                        circumscribed_radius,
                        inscribed_radius,
                        created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, {NEXT_CREATED_AT_SQL});"
                ),
                params![
                    calculation.shape_type.as_str(),
                    calculation.parameters.as_str(),
                    calculation.area,
                    calculation.circumscribed_radius,
                    calculation.inscribed_radius,
                ],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })();

        match &result {
            Ok(id) => info!(
                "event=calc_save module=repo status=ok shape_type={} id={} duration_ms={}",
                calculation.shape_type,
                id,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=calc_save module=repo status=error shape_type={} duration_ms={} error_code=calc_save_failed error={}",
                calculation.shape_type,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }

    fn get(&self, id: CalculationId) -> StoreResult<Option<CalculationRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CALCULATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_calculation_row(row)?));
        }
        Ok(None)
    }

    fn list_recent(&self, limit: u32) -> StoreResult<Vec<CalculationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CALCULATION_SELECT_SQL}
             ORDER BY created_at DESC, id DESC
             LIMIT ?1;"
        ))?;
        let mut rows = stmt.query([i64::from(limit)])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_calculation_row(row)?);
        }
        Ok(records)
    }

    fn list_by_shape(&self, kind: ShapeKind, limit: u32) -> StoreResult<Vec<CalculationRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CALCULATION_SELECT_SQL}
             WHERE shape_type = ?1
             ORDER BY created_at DESC, id DESC
             LIMIT ?2;"
        ))?;
        let mut rows = stmt.query(params![kind.as_str(), i64::from(limit)])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_calculation_row(row)?);
        }
        Ok(records)
    }

    fn statistics(&self) -> StoreResult<CalculationStatistics> {
        // One read transaction keeps totals and breakdown consistent.
        let tx = self.conn.unchecked_transaction()?;

        let (total, last_created_at) = tx.query_row(
            "SELECT COUNT(*), MAX(created_at) FROM calculations;",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<i64>>(1)?)),
        )?;

        let mut stmt = tx.prepare(
            "SELECT
                shape_type,
                COUNT(*),
                AVG(area),
                MIN(area),
                MAX(area)
             FROM calculations
             GROUP BY shape_type
             ORDER BY shape_type ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut by_shape = Vec::new();
        while let Some(row) = rows.next()? {
            let type_text: String = row.get(0)?;
            let shape_type = parse_shape_type(&type_text)?;
            by_shape.push(ShapeStatistics {
                shape_type,
                count: count_to_u64(row.get(1)?)?,
                avg_area: row.get(2)?,
                min_area: row.get(3)?,
                max_area: row.get(4)?,
            });
        }
        drop(rows);
        drop(stmt);
        tx.finish()?;

        Ok(CalculationStatistics {
            total: count_to_u64(total)?,
            by_shape,
            last_created_at,
        })
    }

    fn clear_all(&self, confirmed: bool) -> StoreResult<u64> {
        if !confirmed {
            info!("event=calc_clear module=repo status=skipped reason=confirmation_required");
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let count: i64 = tx.query_row("SELECT COUNT(*) FROM calculations;", [], |row| row.get(0))?;
        tx.execute("DELETE FROM calculations;", [])?;
        tx.commit()?;

        info!("event=calc_clear module=repo status=ok deleted={count}");
        count_to_u64(count)
    }
}

fn parse_calculation_row(row: &Row<'_>) -> StoreResult<CalculationRecord> {
    let type_text: String = row.get("shape_type")?;
    let shape_type = parse_shape_type(&type_text)?;

    let record = CalculationRecord {
        id: row.get("id")?,
        shape_type,
        parameters: row.get("parameters")?,
        area: row.get("area")?,
        circumscribed_radius: row.get("circumscribed_radius")?,
        inscribed_radius: row.get("inscribed_radius")?,
        created_at: row.get("created_at")?,
    };
    record.to_new_calculation().validate().map_err(|err| {
        StoreError::InvalidData(format!("calculation {} failed validation: {err}", record.id))
    })?;
    Ok(record)
}

fn parse_shape_type(value: &str) -> StoreResult<ShapeKind> {
    ShapeKind::parse(value).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid shape type `{value}` in calculations.shape_type"
        ))
    })
}

fn count_to_u64(value: i64) -> StoreResult<u64> {
    u64::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("negative row count `{value}`")))
}

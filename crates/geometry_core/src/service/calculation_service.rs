//! Calculation use-case service.
//!
//! # Responsibility
//! - Turn user-supplied dimensions into validated shapes.
//! - Persist each successful calculation exactly once.
//! - Expose history, statistics and confirmed clearing to callers.
//!
//! # Invariants
//! - Invalid input never reaches the repository.
//! - Service layer remains storage-agnostic.

use crate::model::{
    AnyShape, CalculationId, CalculationRecord, NewCalculation, Rectangle, ShapeError, ShapeKind,
    Trapezoid, Triangle,
};
use crate::report::CalculationSnapshot;
use crate::repo::calculation_repo::{
    CalculationRepository, CalculationStatistics, StoreError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// History size used when callers do not pick one.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case error separating bad input from broken storage.
#[derive(Debug)]
pub enum ServiceError {
    Shape(ShapeError),
    Store(StoreError),
}

impl ServiceError {
    /// Whether the caller supplied invalid shape parameters.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Whether the backing store failed.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Shape(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ShapeError> for ServiceError {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of one calculate-and-save action.
#[derive(Debug, Clone)]
pub struct CompletedCalculation {
    pub id: CalculationId,
    pub shape: AnyShape,
}

impl CompletedCalculation {
    /// Read-only view handed to report collaborators.
    pub fn snapshot(&self) -> CalculationSnapshot {
        CalculationSnapshot::from_shape(&self.shape)
    }
}

/// Use-case service wrapper for calculation history.
pub struct CalculationService<R: CalculationRepository> {
    repo: R,
}

impl<R: CalculationRepository> CalculationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn calculate_rectangle(&self, width: f64, height: f64) -> ServiceResult<CompletedCalculation> {
        self.record(Rectangle::new(width, height)?)
    }

    pub fn calculate_triangle(&self, a: f64, b: f64, c: f64) -> ServiceResult<CompletedCalculation> {
        self.record(Triangle::new(a, b, c)?)
    }

    pub fn calculate_trapezoid(
        &self,
        base1: f64,
        base2: f64,
        height: f64,
    ) -> ServiceResult<CompletedCalculation> {
        self.record(Trapezoid::new(base1, base2, height)?)
    }

    /// Persists the derived properties of an already-constructed shape.
    pub fn record(&self, shape: impl Into<AnyShape>) -> ServiceResult<CompletedCalculation> {
        let shape = shape.into();
        let id = self.repo.save(&NewCalculation::from_shape(&shape))?;
        Ok(CompletedCalculation { id, shape })
    }

    /// Lists newest records, optionally for one shape kind.
    pub fn history(
        &self,
        kind: Option<ShapeKind>,
        limit: u32,
    ) -> ServiceResult<Vec<CalculationRecord>> {
        let records = match kind {
            Some(kind) => self.repo.list_by_shape(kind, limit)?,
            None => self.repo.list_recent(limit)?,
        };
        Ok(records)
    }

    pub fn statistics(&self) -> ServiceResult<CalculationStatistics> {
        Ok(self.repo.statistics()?)
    }

    /// Clears history only when `confirmed`; returns deleted record count.
    pub fn clear_history(&self, confirmed: bool) -> ServiceResult<u64> {
        Ok(self.repo.clear_all(confirmed)?)
    }
}

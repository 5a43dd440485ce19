//! Core domain logic for the geometry calculator.
//! Shapes, their derived properties and the calculation history store.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use config::{StoreConfig, DB_PATH_ENV, DEFAULT_DB_PATH};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::{
    compare_by_area, shapes_equal, AnyShape, CalculationId, CalculationRecord, NewCalculation,
    Rectangle, Shape, ShapeError, ShapeKind, Trapezoid, Triangle,
};
pub use report::CalculationSnapshot;
pub use repo::calculation_repo::{
    CalculationRepository, CalculationStatistics, ShapeStatistics, SqliteCalculationRepository,
    StoreError, StoreResult,
};
pub use service::calculation_service::{
    CalculationService, CompletedCalculation, ServiceError, ServiceResult, DEFAULT_HISTORY_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

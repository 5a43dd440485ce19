//! Geometric shape model.
//!
//! # Responsibility
//! - Define immutable, validated shape variants and their derived properties.
//! - Define the flat calculation records exchanged with the store.
//! - Keep all computation pure; no I/O happens in this module.
//!
//! # Invariants
//! - No invalid shape instance can be constructed or deserialized.
//! - Derived properties are pure functions of construction parameters.

pub mod calculation;
pub mod rectangle;
pub mod shape;
pub mod trapezoid;
pub mod triangle;

pub use calculation::{CalculationId, CalculationRecord, CalculationValidationError, NewCalculation};
pub use rectangle::Rectangle;
pub use shape::{
    compare_by_area, shapes_equal, AnyShape, Shape, ShapeError, ShapeKind, ShapeResult, Sides,
};
pub use trapezoid::Trapezoid;
pub use triangle::Triangle;

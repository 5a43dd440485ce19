//! Calculation records handed to and returned by the store.
//!
//! # Responsibility
//! - Define the flat snapshot of one completed shape calculation.
//! - Validate caller-supplied records before persistence.
//!
//! # Invariants
//! - `id` and `created_at` are assigned by the store only.
//! - Records are never mutated after persistence.

use super::shape::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned, monotonically increasing record identity.
pub type CalculationId = i64;

/// Caller-supplied part of a calculation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCalculation {
    pub shape_type: ShapeKind,
    /// Human-readable encoding of the inputs used.
    pub parameters: String,
    pub area: f64,
    pub circumscribed_radius: Option<f64>,
    pub inscribed_radius: Option<f64>,
}

impl NewCalculation {
    /// Snapshots the derived properties of a valid shape.
    pub fn from_shape<S: Shape + ?Sized>(shape: &S) -> Self {
        Self {
            shape_type: shape.kind(),
            parameters: shape.parameters(),
            area: shape.area(),
            circumscribed_radius: shape.circumscribed_radius(),
            inscribed_radius: shape.inscribed_radius(),
        }
    }

    /// Rejects records no valid shape could have produced.
    pub fn validate(&self) -> Result<(), CalculationValidationError> {
        if self.parameters.trim().is_empty() {
            return Err(CalculationValidationError::EmptyParameters);
        }
        if !(self.area.is_finite() && self.area > 0.0) {
            return Err(CalculationValidationError::NonPositiveArea(self.area));
        }
        for (field, value) in [
            ("circumscribed_radius", self.circumscribed_radius),
            ("inscribed_radius", self.inscribed_radius),
        ] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return Err(CalculationValidationError::InvalidRadius { field, value });
                }
            }
        }
        Ok(())
    }
}

/// Persisted snapshot of one completed calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: CalculationId,
    pub shape_type: ShapeKind,
    pub parameters: String,
    pub area: f64,
    pub circumscribed_radius: Option<f64>,
    pub inscribed_radius: Option<f64>,
    /// Unix epoch milliseconds (UTC), assigned on insert.
    pub created_at: i64,
}

impl CalculationRecord {
    /// Returns the caller-supplied part, dropping store-assigned fields.
    pub fn to_new_calculation(&self) -> NewCalculation {
        NewCalculation {
            shape_type: self.shape_type,
            parameters: self.parameters.clone(),
            area: self.area,
            circumscribed_radius: self.circumscribed_radius,
            inscribed_radius: self.inscribed_radius,
        }
    }
}

/// Validation failure for records that would corrupt history.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationValidationError {
    EmptyParameters,
    NonPositiveArea(f64),
    InvalidRadius { field: &'static str, value: f64 },
}

impl Display for CalculationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyParameters => write!(f, "parameters must not be empty"),
            Self::NonPositiveArea(area) => write!(f, "area ({area}) must be a positive number"),
            Self::InvalidRadius { field, value } => {
                write!(f, "{field} ({value}) must be a positive number when present")
            }
        }
    }
}

impl Error for CalculationValidationError {}

//! Read-only calculation snapshot for report collaborators.
//!
//! # Responsibility
//! - Expose exactly the data a report renderer needs, nothing writable.
//! - Provide the result table rows shared by every renderer.
//!
//! # Invariants
//! - Snapshots never carry store-assigned fields; renderers supply their own
//!   timestamp.

use crate::model::{CalculationRecord, NewCalculation, Shape, ShapeKind};
use serde::{Deserialize, Serialize};

/// Placeholder shown for radii that do not exist.
pub const ABSENT_VALUE: &str = "none";

/// Completed calculation as seen by report renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSnapshot {
    pub shape_type: ShapeKind,
    pub parameters: String,
    pub area: f64,
    pub circumscribed_radius: Option<f64>,
    pub inscribed_radius: Option<f64>,
}

impl CalculationSnapshot {
    pub fn from_shape<S: Shape + ?Sized>(shape: &S) -> Self {
        Self::from(NewCalculation::from_shape(shape))
    }

    pub fn from_record(record: &CalculationRecord) -> Self {
        Self::from(record.to_new_calculation())
    }

    /// Label/value rows of the results table, values with 4 decimals.
    pub fn result_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Area", format!("{:.4}", self.area)),
            (
                "Circumscribed radius",
                format_optional(self.circumscribed_radius),
            ),
            ("Inscribed radius", format_optional(self.inscribed_radius)),
        ]
    }
}

impl From<NewCalculation> for CalculationSnapshot {
    fn from(value: NewCalculation) -> Self {
        Self {
            shape_type: value.shape_type,
            parameters: value.parameters,
            area: value.area,
            circumscribed_radius: value.circumscribed_radius,
            inscribed_radius: value.inscribed_radius,
        }
    }
}

/// Formats an optional measurement with 4 decimals or [`ABSENT_VALUE`].
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| ABSENT_VALUE.to_string(), |value| format!("{value:.4}"))
}

//! Isosceles trapezoid variant.
//!
//! # Invariants
//! - `base1`, `base2` and `height` are finite and strictly positive.
//! - Both legs have equal length (`side_length`), so a circumscribed circle
//!   always exists.

use super::shape::{
    is_close, require_finite_measures, require_positive, Shape, ShapeError, ShapeKind,
    ShapeResult, AREA_RELATIVE_TOLERANCE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TrapezoidParams")]
pub struct Trapezoid {
    base1: f64,
    base2: f64,
    height: f64,
}

#[derive(Deserialize)]
struct TrapezoidParams {
    base1: f64,
    base2: f64,
    height: f64,
}

impl TryFrom<TrapezoidParams> for Trapezoid {
    type Error = ShapeError;

    fn try_from(value: TrapezoidParams) -> Result<Self, Self::Error> {
        Self::new(value.base1, value.base2, value.height)
    }
}

impl Trapezoid {
    /// Creates a validated isosceles trapezoid from its parallel sides and height.
    pub fn new(base1: f64, base2: f64, height: f64) -> ShapeResult<Self> {
        let trapezoid = Self {
            base1,
            base2,
            height,
        };
        trapezoid.validate()?;
        Ok(trapezoid)
    }

    pub fn bases(&self) -> (f64, f64) {
        (self.base1, self.base2)
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Leg length.
    pub fn side_length(&self) -> f64 {
        let half_difference = (self.base1 - self.base2) / 2.0;
        (half_difference * half_difference + self.height * self.height).sqrt()
    }

    /// Tangential condition: parallel sides sum to the legs' sum.
    pub fn is_tangential(&self) -> bool {
        is_close(
            self.base1 + self.base2,
            2.0 * self.side_length(),
            AREA_RELATIVE_TOLERANCE,
        )
    }

    pub fn scale(&self, factor: f64) -> ShapeResult<Self> {
        require_positive(ShapeKind::Trapezoid, "factor", factor)?;
        Self::new(
            self.base1 * factor,
            self.base2 * factor,
            self.height * factor,
        )
    }
}

impl Shape for Trapezoid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Trapezoid
    }

    fn area(&self) -> f64 {
        (self.base1 + self.base2) * self.height / 2.0
    }

    fn circumscribed_radius(&self) -> Option<f64> {
        let (a, b) = if self.base1 <= self.base2 {
            (self.base1, self.base2)
        } else {
            (self.base2, self.base1)
        };
        let c = self.side_length();
        let diagonal = (a * b + c * c).sqrt();
        Some((c * diagonal) / (2.0 * self.height))
    }

    fn inscribed_radius(&self) -> Option<f64> {
        self.is_tangential().then(|| self.height / 2.0)
    }

    fn validate(&self) -> ShapeResult<()> {
        require_positive(ShapeKind::Trapezoid, "base1", self.base1)?;
        require_positive(ShapeKind::Trapezoid, "base2", self.base2)?;
        require_positive(ShapeKind::Trapezoid, "height", self.height)?;
        require_finite_measures(self)
    }

    fn parameters(&self) -> String {
        format!("{},{}, h={}", self.base1, self.base2, self.height)
    }

    fn side_count(&self) -> usize {
        4
    }

    /// Order: `base1`, `base2`, then both legs.
    fn side_at(&self, index: usize) -> Option<f64> {
        match index {
            0 => Some(self.base1),
            1 => Some(self.base2),
            2 | 3 => Some(self.side_length()),
            _ => None,
        }
    }
}

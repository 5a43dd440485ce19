//! Rectangle variant.
//!
//! # Invariants
//! - `width` and `height` are finite and strictly positive.
//! - An inscribed circle exists only for squares.

use super::shape::{
    is_close, require_finite_measures, require_positive, Shape, ShapeError, ShapeKind,
    ShapeResult, AREA_RELATIVE_TOLERANCE,
};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its side lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RectangleParams")]
pub struct Rectangle {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RectangleParams {
    width: f64,
    height: f64,
}

impl TryFrom<RectangleParams> for Rectangle {
    type Error = ShapeError;

    fn try_from(value: RectangleParams) -> Result<Self, Self::Error> {
        Self::new(value.width, value.height)
    }
}

impl Rectangle {
    /// Creates a validated rectangle.
    ///
    /// # Errors
    /// - `InvalidParameter` when either side is not a positive finite number.
    pub fn new(width: f64, height: f64) -> ShapeResult<Self> {
        let rectangle = Self { width, height };
        rectangle.validate()?;
        Ok(rectangle)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns a new rectangle with `width` replaced.
    pub fn with_width(&self, width: f64) -> ShapeResult<Self> {
        Self::new(width, self.height)
    }

    /// Returns a new rectangle with `height` replaced.
    pub fn with_height(&self, height: f64) -> ShapeResult<Self> {
        Self::new(self.width, height)
    }

    pub fn is_square(&self) -> bool {
        is_close(self.width, self.height, AREA_RELATIVE_TOLERANCE)
    }

    /// Side-wise sum of two rectangles.
    pub fn combine(&self, other: &Rectangle) -> ShapeResult<Self> {
        Self::new(self.width + other.width, self.height + other.height)
    }

    pub fn scale(&self, factor: f64) -> ShapeResult<Self> {
        require_positive(ShapeKind::Rectangle, "factor", factor)?;
        Self::new(self.width * factor, self.height * factor)
    }
}

impl Shape for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn circumscribed_radius(&self) -> Option<f64> {
        let diagonal = (self.width * self.width + self.height * self.height).sqrt();
        Some(diagonal / 2.0)
    }

    fn inscribed_radius(&self) -> Option<f64> {
        self.is_square().then(|| self.width.min(self.height) / 2.0)
    }

    fn validate(&self) -> ShapeResult<()> {
        require_positive(ShapeKind::Rectangle, "width", self.width)?;
        require_positive(ShapeKind::Rectangle, "height", self.height)?;
        require_finite_measures(self)
    }

    fn parameters(&self) -> String {
        format!("width={}, height={}", self.width, self.height)
    }

    fn side_count(&self) -> usize {
        4
    }

    fn side_at(&self, index: usize) -> Option<f64> {
        match index {
            0 | 2 => Some(self.width),
            1 | 3 => Some(self.height),
            _ => None,
        }
    }
}

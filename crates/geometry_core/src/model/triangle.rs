//! Triangle variant given by three side lengths.
//!
//! # Invariants
//! - Every side is finite and strictly positive.
//! - Sides satisfy the strict triangle inequality and Heron's area is positive.
//! - Side order is preserved as given by the caller.

use super::shape::{
    require_finite_measures, require_positive, Shape, ShapeError, ShapeKind, ShapeResult,
};
use serde::{Deserialize, Serialize};

/// Absolute tolerance for the Pythagorean check in [`Triangle::is_right_triangle`].
pub const RIGHT_ANGLE_ABSOLUTE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TriangleParams")]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

#[derive(Deserialize)]
struct TriangleParams {
    a: f64,
    b: f64,
    c: f64,
}

impl TryFrom<TriangleParams> for Triangle {
    type Error = ShapeError;

    fn try_from(value: TriangleParams) -> Result<Self, Self::Error> {
        Self::new(value.a, value.b, value.c)
    }
}

impl Triangle {
    /// Creates a validated triangle.
    ///
    /// # Errors
    /// - `InvalidParameter` when a side is not a positive finite number.
    /// - `DegenerateShape` when the sides cannot close a triangle.
    pub fn new(a: f64, b: f64, c: f64) -> ShapeResult<Self> {
        let triangle = Self { a, b, c };
        triangle.validate()?;
        Ok(triangle)
    }

    /// Side lengths in input order.
    pub fn side_lengths(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    pub fn is_right_triangle(&self) -> bool {
        let mut sorted = self.side_lengths();
        sorted.sort_by(f64::total_cmp);
        let [x, y, z] = sorted;
        (z * z - (x * x + y * y)).abs() < RIGHT_ANGLE_ABSOLUTE_TOLERANCE
    }

    pub fn scale(&self, factor: f64) -> ShapeResult<Self> {
        require_positive(ShapeKind::Triangle, "factor", factor)?;
        Self::new(self.a * factor, self.b * factor, self.c * factor)
    }

    fn semi_perimeter(&self) -> f64 {
        (self.a + self.b + self.c) / 2.0
    }
}

impl Shape for Triangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    /// Heron's formula.
    fn area(&self) -> f64 {
        let s = self.semi_perimeter();
        (s * (s - self.a) * (s - self.b) * (s - self.c)).sqrt()
    }

    fn circumscribed_radius(&self) -> Option<f64> {
        Some((self.a * self.b * self.c) / (4.0 * self.area()))
    }

    fn inscribed_radius(&self) -> Option<f64> {
        Some((2.0 * self.area()) / (self.a + self.b + self.c))
    }

    fn validate(&self) -> ShapeResult<()> {
        require_positive(ShapeKind::Triangle, "a", self.a)?;
        require_positive(ShapeKind::Triangle, "b", self.b)?;
        require_positive(ShapeKind::Triangle, "c", self.c)?;

        let (a, b, c) = (self.a, self.b, self.c);
        if !(a + b > c && a + c > b && b + c > a) {
            return Err(ShapeError::DegenerateShape { a, b, c });
        }
        // Nearly flat sides can pass the inequality while Heron rounds to zero.
        if self.area() == 0.0 {
            return Err(ShapeError::DegenerateShape { a, b, c });
        }
        require_finite_measures(self)
    }

    fn parameters(&self) -> String {
        format!("{},{},{}", self.a, self.b, self.c)
    }

    fn side_count(&self) -> usize {
        3
    }

    fn side_at(&self, index: usize) -> Option<f64> {
        self.side_lengths().get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::Triangle;
    use crate::model::shape::{is_close, Shape, ShapeError};

    #[test]
    fn right_triangle_properties() {
        let triangle = Triangle::new(3.0, 4.0, 5.0).unwrap();
        assert_eq!(triangle.area(), 6.0);
        assert_eq!(triangle.circumscribed_radius(), Some(2.5));
        assert_eq!(triangle.inscribed_radius(), Some(1.0));
        assert!(triangle.is_right_triangle());
    }

    #[test]
    fn right_predicate_ignores_side_order() {
        assert!(Triangle::new(5.0, 3.0, 4.0).unwrap().is_right_triangle());
        assert!(Triangle::new(1.0, 1.0, 2f64.sqrt()).unwrap().is_right_triangle());
    }

    #[test]
    fn equilateral_triangle_is_not_right() {
        let triangle = Triangle::new(5.0, 5.0, 5.0).unwrap();
        let expected = (3f64.sqrt() / 4.0) * 25.0;
        assert!(is_close(triangle.area(), expected, 1e-9));
        assert!(!triangle.is_right_triangle());
    }

    #[test]
    fn degenerate_sides_are_rejected() {
        let err = Triangle::new(1.0, 1.0, 3.0).unwrap_err();
        assert_eq!(
            err,
            ShapeError::DegenerateShape {
                a: 1.0,
                b: 1.0,
                c: 3.0
            }
        );
        assert!(err.to_string().contains("does not exist"));

        // Collinear sides are degenerate too.
        assert!(matches!(
            Triangle::new(1.0, 2.0, 3.0),
            Err(ShapeError::DegenerateShape { .. })
        ));
    }

    #[test]
    fn non_positive_side_is_invalid_parameter() {
        let err = Triangle::new(3.0, 0.0, 5.0).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidParameter { parameter: "b", .. }
        ));
    }

    #[test]
    fn side_access_keeps_input_order() {
        let triangle = Triangle::new(5.0, 3.0, 4.0).unwrap();
        assert_eq!(triangle.side_at(0), Some(5.0));
        assert_eq!(triangle.side_at(1), Some(3.0));
        assert_eq!(triangle.side_at(2), Some(4.0));
        assert_eq!(triangle.side_at(3), None);
        assert_eq!(triangle.side_count(), 3);
        assert_eq!(triangle.perimeter(), 12.0);
        assert_eq!(triangle.parameters(), "5,3,4");
    }

    #[test]
    fn scale_preserves_shape() {
        let scaled = Triangle::new(3.0, 4.0, 5.0).unwrap().scale(2.0).unwrap();
        assert_eq!(scaled.area(), 24.0);
        assert!(scaled.is_right_triangle());
    }

    #[test]
    fn nearly_flat_sides_with_zero_heron_area_are_degenerate() {
        let (a, b, c) = (1.296, 1.429, 2.7249999999999996);
        assert!(a + b > c && a + c > b && b + c > a);

        let err = Triangle::new(a, b, c).unwrap_err();
        assert!(matches!(err, ShapeError::DegenerateShape { .. }));
    }

    #[test]
    fn overflowing_sides_are_invalid() {
        let err = Triangle::new(1e200, 1e200, 1e200).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::InvalidParameter { parameter: "area", .. }
        ));
    }
}

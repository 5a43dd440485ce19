//! Shape capability contract and the closed set of shape variants.
//!
//! # Responsibility
//! - Define the `Shape` capability shared by every variant.
//! - Provide the `AnyShape` tagged union used by service and report layers.
//! - Define area-based equality/ordering shared across variants.
//!
//! # Invariants
//! - Shape instances are immutable and valid from construction onward.
//! - Two shapes are equal iff their areas match within `AREA_RELATIVE_TOLERANCE`.
//!
//! # See also
//! - crates/geometry_core/src/model/rectangle.rs

use super::rectangle::Rectangle;
use super::trapezoid::Trapezoid;
use super::triangle::Triangle;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Relative tolerance used for area equality, square and tangential checks.
pub const AREA_RELATIVE_TOLERANCE: f64 = 1e-9;

pub type ShapeResult<T> = Result<T, ShapeError>;

/// Discriminator persisted with every calculation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    Triangle,
    Trapezoid,
}

impl ShapeKind {
    /// All supported kinds in menu order.
    pub const ALL: [ShapeKind; 3] = [Self::Rectangle, Self::Triangle, Self::Trapezoid];

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "Rectangle",
            Self::Triangle => "Triangle",
            Self::Trapezoid => "Trapezoid",
        }
    }

    /// Parses a storage name. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Rectangle" => Some(Self::Rectangle),
            "Triangle" => Some(Self::Triangle),
            "Trapezoid" => Some(Self::Trapezoid),
            _ => None,
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-time validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A dimension, or a measure derived from it, is not a finite positive number.
    InvalidParameter {
        shape: ShapeKind,
        parameter: &'static str,
        value: f64,
    },
    /// Side lengths violate the strict triangle inequality.
    DegenerateShape { a: f64, b: f64, c: f64 },
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter {
                shape,
                parameter,
                value,
            } => write!(
                f,
                "invalid {shape} parameter `{parameter}` = {value}: must be a finite positive number"
            ),
            Self::DegenerateShape { a, b, c } => write!(
                f,
                "triangle with sides {a}, {b}, {c} does not exist: each side must be shorter than the sum of the other two"
            ),
        }
    }
}

impl Error for ShapeError {}

/// Shared capability of every shape variant.
pub trait Shape {
    fn kind(&self) -> ShapeKind;

    /// Area, always defined and positive for a valid shape.
    fn area(&self) -> f64;

    /// Radius of the circle through all vertices, when one exists.
    fn circumscribed_radius(&self) -> Option<f64>;

    /// Radius of the circle tangent to all sides, when one exists.
    fn inscribed_radius(&self) -> Option<f64>;

    /// Re-checks construction invariants.
    fn validate(&self) -> ShapeResult<()>;

    /// Human-readable encoding of construction parameters, stored with records.
    fn parameters(&self) -> String;

    fn side_count(&self) -> usize;

    /// Side length by ordinal index, `None` when out of range.
    fn side_at(&self, index: usize) -> Option<f64>;

    /// Lazy, restartable sequence of side lengths.
    fn sides(&self) -> Sides<'_, Self>
    where
        Self: Sized,
    {
        Sides {
            shape: self,
            next: 0,
        }
    }

    fn perimeter(&self) -> f64
    where
        Self: Sized,
    {
        self.sides().sum()
    }
}

/// Iterator over a shape's sides, produced by [`Shape::sides`].
#[derive(Debug)]
pub struct Sides<'a, S: ?Sized> {
    shape: &'a S,
    next: usize,
}

impl<S: ?Sized> Clone for Sides<'_, S> {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            next: self.next,
        }
    }
}

impl<S: Shape + ?Sized> Iterator for Sides<'_, S> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let side = self.shape.side_at(self.next)?;
        self.next += 1;
        Some(side)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.side_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<S: Shape + ?Sized> ExactSizeIterator for Sides<'_, S> {}

/// Returns whether two values are equal within a relative tolerance.
pub fn is_close(left: f64, right: f64, rel_tol: f64) -> bool {
    if left == right {
        return true;
    }
    (left - right).abs() <= rel_tol * left.abs().max(right.abs())
}

/// Area-based equality across any variants.
pub fn shapes_equal(left: &dyn Shape, right: &dyn Shape) -> bool {
    is_close(left.area(), right.area(), AREA_RELATIVE_TOLERANCE)
}

/// Orders shapes by area ascending; areas within tolerance compare equal.
pub fn compare_by_area(left: &dyn Shape, right: &dyn Shape) -> Ordering {
    if shapes_equal(left, right) {
        return Ordering::Equal;
    }
    left.area().total_cmp(&right.area())
}

pub(crate) fn require_positive(
    shape: ShapeKind,
    parameter: &'static str,
    value: f64,
) -> ShapeResult<()> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(ShapeError::InvalidParameter {
        shape,
        parameter,
        value,
    })
}

/// Rejects dimensions whose area or radii overflow or underflow `f64`.
pub(crate) fn require_finite_measures<S: Shape + ?Sized>(shape: &S) -> ShapeResult<()> {
    let kind = shape.kind();
    require_positive(kind, "area", shape.area())?;
    let radii = [
        ("circumscribed_radius", shape.circumscribed_radius()),
        ("inscribed_radius", shape.inscribed_radius()),
    ];
    for (measure, value) in radii {
        if let Some(value) = value {
            require_positive(kind, measure, value)?;
        }
    }
    Ok(())
}

/// Closed set of shape variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum AnyShape {
    Rectangle(Rectangle),
    Triangle(Triangle),
    Trapezoid(Trapezoid),
}

impl AnyShape {
    fn as_dyn(&self) -> &dyn Shape {
        match self {
            Self::Rectangle(shape) => shape,
            Self::Triangle(shape) => shape,
            Self::Trapezoid(shape) => shape,
        }
    }

    /// Returns `Some(true|false)` for triangles, `None` for other variants.
    pub fn is_right_triangle(&self) -> Option<bool> {
        match self {
            Self::Triangle(triangle) => Some(triangle.is_right_triangle()),
            _ => None,
        }
    }

    /// Returns a new shape of the same variant scaled by `factor`.
    pub fn scale(&self, factor: f64) -> ShapeResult<Self> {
        Ok(match self {
            Self::Rectangle(shape) => Self::Rectangle(shape.scale(factor)?),
            Self::Triangle(shape) => Self::Triangle(shape.scale(factor)?),
            Self::Trapezoid(shape) => Self::Trapezoid(shape.scale(factor)?),
        })
    }
}

impl Shape for AnyShape {
    fn kind(&self) -> ShapeKind {
        self.as_dyn().kind()
    }

    fn area(&self) -> f64 {
        self.as_dyn().area()
    }

    fn circumscribed_radius(&self) -> Option<f64> {
        self.as_dyn().circumscribed_radius()
    }

    fn inscribed_radius(&self) -> Option<f64> {
        self.as_dyn().inscribed_radius()
    }

    fn validate(&self) -> ShapeResult<()> {
        self.as_dyn().validate()
    }

    fn parameters(&self) -> String {
        self.as_dyn().parameters()
    }

    fn side_count(&self) -> usize {
        self.as_dyn().side_count()
    }

    fn side_at(&self, index: usize) -> Option<f64> {
        self.as_dyn().side_at(index)
    }
}

impl From<Rectangle> for AnyShape {
    fn from(value: Rectangle) -> Self {
        Self::Rectangle(value)
    }
}

impl From<Triangle> for AnyShape {
    fn from(value: Triangle) -> Self {
        Self::Triangle(value)
    }
}

impl From<Trapezoid> for AnyShape {
    fn from(value: Trapezoid) -> Self {
        Self::Trapezoid(value)
    }
}

impl PartialEq for AnyShape {
    fn eq(&self, other: &Self) -> bool {
        shapes_equal(self, other)
    }
}

impl PartialOrd for AnyShape {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(compare_by_area(self, other))
    }
}

impl Display for AnyShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: area={:.2}", self.kind(), self.area())
    }
}

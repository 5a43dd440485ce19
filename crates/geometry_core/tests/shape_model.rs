use geometry_core::model::shape::is_close;
use geometry_core::{
    compare_by_area, shapes_equal, AnyShape, Rectangle, Shape, ShapeError, ShapeKind, Trapezoid,
    Triangle,
};
use std::cmp::Ordering;

#[test]
fn rectangle_area_and_radius_hold_across_inputs() {
    for (width, height) in [(0.5, 2.0), (3.0, 4.0), (10.0, 0.1), (7.25, 7.25), (1e-3, 1e3)] {
        let rectangle = Rectangle::new(width, height).unwrap();
        assert_eq!(rectangle.area(), width * height);
        assert_eq!(
            rectangle.circumscribed_radius(),
            Some((width * width + height * height).sqrt() / 2.0)
        );
    }
}

#[test]
fn square_detection_uses_relative_tolerance() {
    let nearly_square = Rectangle::new(1.0, 1.0 + 1e-12).unwrap();
    assert!(nearly_square.is_square());
    assert!(nearly_square.inscribed_radius().is_some());

    let not_square = Rectangle::new(1.0, 1.0 + 1e-6).unwrap();
    assert_eq!(not_square.inscribed_radius(), None);
}

#[test]
fn triangle_reference_values() {
    let right = Triangle::new(3.0, 4.0, 5.0).unwrap();
    assert_eq!(right.area(), 6.0);
    assert_eq!(right.circumscribed_radius(), Some(2.5));
    assert_eq!(right.inscribed_radius(), Some(1.0));
    assert!(right.is_right_triangle());

    let equilateral = Triangle::new(5.0, 5.0, 5.0).unwrap();
    assert!(is_close(
        equilateral.area(),
        (3f64.sqrt() / 4.0) * 25.0,
        1e-9
    ));
    assert!(!equilateral.is_right_triangle());
}

#[test]
fn degenerate_triangle_fails_construction() {
    assert!(matches!(
        Triangle::new(1.0, 1.0, 3.0),
        Err(ShapeError::DegenerateShape { .. })
    ));
}

#[test]
fn trapezoid_reference_values() {
    let trapezoid = Trapezoid::new(5.0, 7.0, 4.0).unwrap();
    let leg = (1.0f64 + 16.0).sqrt();

    assert_eq!(trapezoid.area(), 24.0);
    assert_eq!(trapezoid.side_length(), leg);
    assert_eq!(trapezoid.sides().collect::<Vec<_>>(), vec![5.0, 7.0, leg, leg]);
    assert_eq!(trapezoid.sides().count(), 4);
    assert!(trapezoid.circumscribed_radius().unwrap() > 0.0);
}

#[test]
fn equality_and_ordering_ignore_variant() {
    let rectangle = AnyShape::from(Rectangle::new(4.0, 6.0).unwrap());
    let trapezoid = AnyShape::from(Trapezoid::new(5.0, 7.0, 4.0).unwrap());
    let triangle = AnyShape::from(Triangle::new(3.0, 4.0, 5.0).unwrap());

    assert!(shapes_equal(&rectangle, &trapezoid));
    assert_eq!(rectangle, trapezoid);
    assert_eq!(compare_by_area(&triangle, &rectangle), Ordering::Less);
    assert!(triangle < trapezoid);
    assert!(rectangle > triangle);
}

#[test]
fn scaling_any_shape_keeps_variant() {
    let shape = AnyShape::from(Triangle::new(3.0, 4.0, 5.0).unwrap());
    let scaled = shape.scale(3.0).unwrap();

    assert_eq!(scaled.kind(), ShapeKind::Triangle);
    assert!(is_close(scaled.area(), 54.0, 1e-12));
    assert!(shape.scale(-1.0).is_err());
}

#[test]
fn shapes_serialize_with_tagged_wire_fields() {
    let shape = AnyShape::from(Trapezoid::new(5.0, 7.0, 4.0).unwrap());
    let json = serde_json::to_value(shape).unwrap();
    assert_eq!(json["shape"], "trapezoid");
    assert_eq!(json["base1"], 5.0);
    assert_eq!(json["height"], 4.0);

    let decoded: AnyShape = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.parameters(), "5,7, h=4");
}

#[test]
fn deserialize_rejects_invalid_shapes() {
    let value = serde_json::json!({ "shape": "triangle", "a": 1.0, "b": 1.0, "c": 3.0 });
    let err = serde_json::from_value::<AnyShape>(value).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "unexpected error: {err}");

    let value = serde_json::json!({ "width": -2.0, "height": 1.0 });
    assert!(serde_json::from_value::<Rectangle>(value).is_err());
}

extern crate cifti_index;
#[macro_use]
extern crate approx;

use cifti_index::{IndexError, LinearEquationTransform, Origin, Rect, RectangleTransform};

/// Map the corners and the centre of the source rectangle to the target
/// and back again.
fn check_round_trip(transform: &RectangleTransform) {
    assert!(transform.is_valid(), "{}", transform.error_message());
    let (source, _) = transform.source();
    let points = [
        (source.left(), source.top()),
        (source.right(), source.top()),
        (source.left(), source.bottom()),
        (source.right(), source.bottom()),
        source.center(),
    ];
    for &(x, y) in &points {
        let (tx, ty) = transform.transform_source_to_target(x, y).unwrap();
        let (sx, sy) = transform.transform_target_to_source(tx, ty).unwrap();
        assert_relative_eq!(sx, x, epsilon = 1e-9);
        assert_relative_eq!(sy, y, epsilon = 1e-9);
    }
}

#[test]
fn linear_transform_hits_reference_points() {
    let cases = [
        (0.0, 10.0, 100.0, 150.0),
        (-3.5, 7.25, 12.0, -4.0),
        (1e6, 1e6 + 3.0, 0.001, 0.002),
    ];
    for &(x1, x2, y1, y2) in &cases {
        let t = LinearEquationTransform::new(x1, x2, y1, y2, x1, y1).unwrap();
        assert_relative_eq!(t.transform(x1), y1, epsilon = 1e-9);
        assert_relative_eq!(t.transform(x2), y2, epsilon = 1e-9);
    }
}

#[test]
fn linear_transform_rejects_vertical_line() {
    let result = LinearEquationTransform::new(4.0, 4.0, 1.0, 2.0, 4.0, 1.0);
    assert_eq!(result, Err(IndexError::VerticalLine(4.0)));
    assert!(result.unwrap_err().to_string().contains("vertical"));
}

#[test]
fn source_corners_map_to_target_corners() {
    let transform = RectangleTransform::new(
        Rect::new(0., 0., 10., 20.),
        Origin::BottomLeft,
        Rect::new(100., 200., 50., 5.),
        Origin::BottomLeft,
    );
    assert!(transform.is_valid());
    assert_eq!(transform.error_message(), "");

    assert_eq!(transform.transform_source_to_target(0., 0.).unwrap(), (100., 200.));
    assert_eq!(transform.transform_source_to_target(10., 20.).unwrap(), (150., 205.));
    assert_eq!(transform.transform_target_to_source(100., 200.).unwrap(), (0., 0.));
    assert_eq!(transform.transform_target_to_source(150., 205.).unwrap(), (10., 20.));

    check_round_trip(&transform);
}

#[test]
fn round_trips_for_all_origin_combinations() {
    let source = Rect::new(-20., 15., 640., 480.);
    let target = Rect::new(0., 0., 1.0, 0.75);
    for &source_origin in &[Origin::TopLeft, Origin::BottomLeft] {
        for &target_origin in &[Origin::TopLeft, Origin::BottomLeft] {
            let transform = RectangleTransform::new(source, source_origin, target, target_origin);
            check_round_trip(&transform);
        }
    }
}

#[test]
fn pixel_rows_to_model_space() {
    // Pixel rows grow downwards; model Y grows upwards.
    let transform = RectangleTransform::try_new(
        Rect::new(0., 0., 200., 100.),
        Origin::TopLeft,
        Rect::new(-1., -0.5, 2., 1.),
        Origin::BottomLeft,
    )
    .unwrap();
    let (x, y) = transform.transform_source_to_target(0., 0.).unwrap();
    assert_relative_eq!(x, -1., epsilon = 1e-12);
    assert_relative_eq!(y, 0.5, epsilon = 1e-12);
    let (x, y) = transform.transform_source_to_target(200., 100.).unwrap();
    assert_relative_eq!(x, 1., epsilon = 1e-12);
    assert_relative_eq!(y, -0.5, epsilon = 1e-12);
    let (x, y) = transform.transform_source_to_target(100., 50.).unwrap();
    assert_relative_eq!(x, 0., epsilon = 1e-12);
    assert_relative_eq!(y, 0., epsilon = 1e-12);
}

#[test]
fn invalid_transform_refuses_to_map() {
    let transform = RectangleTransform::new(
        Rect::new(0., 0., 10., 10.),
        Origin::BottomLeft,
        Rect::new(5., 5., 0., 0.),
        Origin::BottomLeft,
    );
    assert!(!transform.is_valid());
    assert!(transform.error_message().contains("Target rectangle"));
    match transform.transform_source_to_target(1., 1.) {
        Err(IndexError::InvalidRectangleTransform(message)) => {
            assert_eq!(message, transform.error_message())
        }
        other => panic!("expected an error, got {:?}", other),
    }
    assert!(transform.transform_target_to_source(1., 1.).is_err());
}

#[test]
fn try_new_reports_every_problem() {
    let err = RectangleTransform::try_new(
        Rect::new(0., 0., -1., 10.),
        Origin::TopLeft,
        Rect::new(0., 0., 10., 0.),
        Origin::TopLeft,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Source rectangle"), "{}", message);
    assert!(message.contains("Target rectangle"), "{}", message);
    assert!(message.contains("Y transform"), "{}", message);
}

use super::*;

use crate::error::PointsError;

#[test]
fn resolves_points_and_peek() {
    let resolved = SheetConfig::new(1000.0, ["40%", "70%"], 1)
        .with_peek("10%")
        .resolve()
        .expect("valid config");
    assert_eq!(resolved.points.as_slice(), &[600.0, 300.0]);
    assert_eq!(resolved.index, 1);
    assert_eq!(resolved.peek, Some(900.0));
    assert_eq!(resolved.closed_offset(), 900.0);
}

#[test]
fn closed_offset_without_peek_is_hidden() {
    let resolved = SheetConfig::new(800.0, ["50%"], 0)
        .resolve()
        .expect("valid config");
    assert_eq!(resolved.closed_offset(), 800.0);
}

#[test]
fn empty_points_are_rejected() {
    let err = SheetConfig::new(1000.0, Vec::<String>::new(), 0)
        .resolve()
        .expect_err("empty points");
    assert_eq!(err, ConfigurationError::InvalidPoints(PointsError::Empty));
}

#[test]
fn malformed_point_is_rejected() {
    let err = SheetConfig::new(1000.0, ["40%", "0.5"], 0)
        .resolve()
        .expect_err("malformed point");
    assert_eq!(
        err,
        ConfigurationError::InvalidPoints(PointsError::Malformed("0.5".into()))
    );
    assert!(err.to_string().contains("'0.5'"));
}

#[test]
fn index_must_be_in_range() {
    let err = SheetConfig::new(1000.0, ["40%", "70%"], 2)
        .resolve()
        .expect_err("index out of range");
    assert_eq!(err, ConfigurationError::InvalidIndex { index: 2, len: 2 });
}

#[test]
fn peek_must_be_a_percentage() {
    let err = SheetConfig::new(1000.0, ["40%"], 0)
        .with_peek("tiny")
        .resolve()
        .expect_err("bad peek");
    assert_eq!(err, ConfigurationError::InvalidPeek("tiny".into()));
}

#[test]
fn screen_height_must_be_positive() {
    for height in [0.0, -10.0, f32::NAN, f32::INFINITY] {
        let result = SheetConfig::new(height, ["40%"], 0).resolve();
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidScreenHeight(_))
        ));
    }
}

#[test]
fn negative_slop_is_clamped() {
    let resolved = SheetConfig::new(1000.0, ["40%"], 0)
        .with_drag_slop(-3.0)
        .resolve()
        .expect("valid config");
    assert_eq!(resolved.drag_slop, 0.0);
}

#[test]
fn defaults_match_platform_spring() {
    let config = SheetConfig::new(1000.0, ["40%"], 0);
    assert_eq!(config.spring, SpringSpec::sheet());
    assert_eq!(config.drag_slop, DEFAULT_DRAG_SLOP);
    assert_eq!(config.indicator_position, None);
    assert_eq!(config.visible, None);
}

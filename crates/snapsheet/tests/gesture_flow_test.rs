use snapsheet::{Color, IndicatorPosition, SheetConfig, SheetStyle};
use snapsheet_testing::prelude::*;

fn opened(config: SheetConfig) -> SheetHarness {
    let mut harness = SheetHarness::new(config).expect("valid config");
    harness.sheet().open();
    harness.run_until_idle();
    harness.clear_recordings();
    harness
}

#[test]
fn small_moves_inside_slop_do_not_displace() {
    let mut harness = opened(SheetConfig::new(1000.0, ["40%", "70%"], 0));

    harness.pointer(PointerEventKind::Down, 600.0);
    harness.pointer(PointerEventKind::Move, 604.0);
    assert_eq!(harness.sheet().offset(), 600.0);
    assert!(harness.drag_offsets().is_empty());

    harness.pointer(PointerEventKind::Move, 640.0);
    assert_eq!(harness.sheet().offset(), 640.0);
    assert_eq!(harness.drag_offsets(), vec![640.0]);
}

#[test]
fn cancel_releases_at_last_movement() {
    let mut harness = opened(SheetConfig::new(1000.0, ["40%", "70%"], 0));

    harness.pointer(PointerEventKind::Down, 600.0);
    harness.pointer(PointerEventKind::Move, 300.0);
    assert!(harness.pointer(PointerEventKind::Cancel, 0.0));
    assert!(!harness.sheet().is_dragging());

    harness.run_until_idle();
    assert_eq!(harness.sheet().offset(), 300.0);
    assert_eq!(harness.change_indices(), vec![1]);
}

#[test]
fn pulling_past_top_point_is_damped_and_springs_back() {
    let mut harness = opened(SheetConfig::new(1000.0, ["40%", "70%"], 1));

    harness.pointer(PointerEventKind::Down, 300.0);
    harness.pointer(PointerEventKind::Move, 0.0);
    assert_eq!(harness.sheet().offset(), 200.0);
    harness.pointer(PointerEventKind::Up, 0.0);

    harness.run_until_idle();
    assert_eq!(harness.sheet().offset(), 300.0);
    assert!(harness.changes().is_empty());
}

#[test]
fn hidden_sheet_ignores_pointer() {
    let mut harness = SheetHarness::new(SheetConfig::new(1000.0, ["50%"], 0))
        .expect("valid config");

    assert!(!harness.pointer(PointerEventKind::Down, 900.0));
    assert!(!harness.pointer(PointerEventKind::Move, 500.0));
    assert_eq!(harness.sheet().state(), SheetState::Hidden);
    assert_eq!(harness.run_until_idle(), 0);
}

#[test]
fn reconfigure_changes_future_targets() {
    let mut harness = opened(SheetConfig::new(1000.0, ["40%", "70%"], 0));

    harness
        .sheet()
        .reconfigure(SheetConfig::new(1000.0, ["50%", "90%"], 1))
        .expect("valid config");
    assert_eq!(harness.sheet().offset(), 600.0);

    harness.sheet().open();
    harness.run_until_idle();
    assert_eq!(harness.sheet().offset(), 100.0);
    assert_eq!(harness.change_indices(), vec![1]);
}

#[test]
fn reconfigure_rejects_bad_points_and_keeps_old_config() {
    let harness = opened(SheetConfig::new(1000.0, ["40%", "70%"], 0));

    let bad = SheetConfig::new(1000.0, ["40", "70%"], 0);
    assert!(harness.sheet().reconfigure(bad).is_err());
    assert_eq!(harness.sheet().snap_points().as_slice(), &[600.0, 300.0]);
}

#[test]
fn indicator_under_moves_shadow_to_sheet_layer() {
    let harness = opened(
        SheetConfig::new(1000.0, ["40%"], 0)
            .with_indicator_position(IndicatorPosition::Under)
            .with_style(SheetStyle::default().with_shadow(true)),
    );
    let frame = harness.sheet().frame();
    assert!(frame.sheet_layer.shadow.is_some());
    assert!(frame.content_layer.shadow.is_none());
    assert_eq!(frame.indicator_color, Color::BLACK);
}

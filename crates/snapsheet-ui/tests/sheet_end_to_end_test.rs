//! Full open / drag / dismiss cycles driven by `SheetTestRule`.

use snapsheet_testing::SheetTestRule;
use snapsheet_ui::{SheetConfig, SheetState, SnapTarget};

const HEIGHT: f32 = 800.0;

#[test]
fn swipe_down_from_middle_closes_once() {
    let mut rule = SheetTestRule::opened(SheetConfig::default(), HEIGHT).expect("valid config");
    assert_eq!(rule.state(), SheetState::Resting(1));

    rule.swipe(400.0, 120.0, 6);
    assert_eq!(rule.state(), SheetState::Dismissing);

    rule.wait_for_idle();
    assert_eq!(rule.state(), SheetState::Closed);
    assert_eq!(rule.close_count(), 1);
    assert_eq!(rule.sheet().backdrop_opacity(), 0.0);
}

#[test]
fn swipe_up_from_middle_rests_at_top() {
    let mut rule = SheetTestRule::opened(SheetConfig::default(), HEIGHT).expect("valid config");

    rule.swipe(400.0, -120.0, 6);
    assert_eq!(rule.state(), SheetState::Settling(SnapTarget::Rest(2)));

    rule.wait_for_idle();
    assert_eq!(rule.state(), SheetState::Resting(2));
    assert!((rule.sheet().current_offset() - 80.0).abs() < 1e-3);
    assert_eq!(rule.close_count(), 0);
}

#[test]
fn slow_drag_settles_where_released() {
    let mut rule = SheetTestRule::opened(SheetConfig::default(), HEIGHT).expect("valid config");

    // 400 -> 120: fraction 0.85, nearest to 0.9.
    rule.drag_and_hold(400.0, -280.0, 10);
    assert_eq!(rule.state(), SheetState::Settling(SnapTarget::Rest(2)));
    rule.wait_for_idle();
    assert_eq!(rule.state(), SheetState::Resting(2));
}

#[test]
fn slow_drag_into_lowest_zone_dismisses() {
    let mut rule = SheetTestRule::opened(SheetConfig::default(), HEIGHT).expect("valid config");

    // 400 -> 680: fraction 0.15, nearest to 0.2.
    rule.drag_and_hold(400.0, 280.0, 10);
    assert_eq!(rule.state(), SheetState::Dismissing);
    rule.wait_for_idle();
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn backdrop_tap_racing_swipe_closes_once() {
    let mut rule = SheetTestRule::opened(SheetConfig::default(), HEIGHT).expect("valid config");

    rule.fling(30.0, 1_500.0);
    rule.advance_frames(2);
    rule.sheet().backdrop_tapped();
    rule.advance_frames(2);
    rule.sheet().dismiss();

    rule.wait_for_idle();
    rule.advance_frames(30);
    assert_eq!(rule.state(), SheetState::Closed);
    assert_eq!(rule.close_count(), 1);
}

#[test]
fn snap_to_every_point_keeps_full_backdrop() {
    let mut rule = SheetTestRule::opened(
        SheetConfig::default().with_backdrop_opacity(0.7),
        HEIGHT,
    )
    .expect("valid config");

    for index in 0..3 {
        rule.sheet().snap_to(index).expect("valid index");
        rule.wait_for_idle();
        assert_eq!(rule.state(), SheetState::Resting(index));
        assert_eq!(rule.sheet().backdrop_opacity(), 0.7);
    }
}

#[test]
fn disabled_pan_ignores_swipes() {
    let mut rule = SheetTestRule::opened(SheetConfig::default().with_pan_gesture(false), HEIGHT)
        .expect("valid config");

    rule.swipe(400.0, 300.0, 5);
    assert_eq!(rule.state(), SheetState::Resting(1));
    assert!(!rule.has_pending_frames());
    assert_eq!(rule.close_count(), 0);
}

#[test]
fn repeated_cycles_report_each_close() {
    let mut rule = SheetTestRule::new(SheetConfig::default(), HEIGHT).expect("valid config");

    for cycle in 1..=3 {
        rule.sheet().set_visible(true);
        rule.wait_for_idle();
        assert_eq!(rule.state(), SheetState::Resting(1));

        rule.sheet().set_visible(false);
        rule.wait_for_idle();
        assert_eq!(rule.state(), SheetState::Closed);
        assert_eq!(rule.close_count(), cycle);
    }
}

#[test]
fn opening_takes_a_bounded_number_of_frames() {
    let mut rule = SheetTestRule::new(SheetConfig::default(), HEIGHT).expect("valid config");
    rule.sheet().set_visible(true);

    let frames = rule.wait_for_idle();
    assert!(frames > 10, "spring should take visible time, took {frames}");
    assert!(frames < 240, "spring should settle within four seconds, took {frames}");
}

//! Four-click construction scenarios driven through real pointer gestures.

use approx::assert_abs_diff_eq;
use box_measure::{BoxTool, CreationState, FlatScene, ToolConfig, ToolError, VerticalPlacement};
use measure_kernel::{LocalFrame, OrientedBox, Point3d, Vec3};
use test_harness::assertions::{assert_dimensions, assert_points_close, assert_same_corners};
use test_harness::helpers::{look_down_at, look_north_at};
use test_harness::{BoxSession, Notification, init_tracing};

// ── Scenario 1: 10 x 10 x 5 box at the origin ───────────────────────────

#[test]
fn test_ten_by_ten_by_five() {
    init_tracing();
    let mut s = BoxSession::flat().unwrap();
    s.build_box((0.0, 0.0), (10.0, 0.0), (10.0, 10.0), 5.0).unwrap();

    let m = s.tool.measurement();
    assert_dimensions(&m, 10.0, 10.0, 5.0, 1e-9, "origin box").unwrap();
    assert_abs_diff_eq!(m.area, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.volume, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(m.refined_volume, 500.0, epsilon = 1e-9);
    assert!(m.can_refine);
    assert_eq!(s.observer.ready_count(), 1);
}

// ── Scenario 2: depth dragged backwards, then standardized ──────────────

#[test]
fn test_negative_depth_is_standardized() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(10.0, 0.0).unwrap();
    s.depth_to(5.0, -4.0).unwrap();

    let drafted = s.params().unwrap();
    assert_abs_diff_eq!(drafted.depth, -4.0, epsilon = 1e-9);
    let far_along_depth = drafted.anchor + drafted.complement * drafted.depth;

    let pointer = look_north_at(10.0, -4.0, 3.0);
    s.tool.on_hover(&pointer).unwrap();
    let before = s.params().unwrap().corners();
    assert_eq!(s.tool.on_click(&pointer).unwrap(), CreationState::VolumeDefined);

    let p = s.params().unwrap();
    assert_abs_diff_eq!(p.depth, 4.0, epsilon = 1e-9);
    assert_points_close(&p.anchor, &far_along_depth, 1e-9, "anchor").unwrap();
    assert_points_close(&p.anchor, &Point3d::new(0.0, -4.0, 0.0), 1e-9, "anchor").unwrap();
    assert_same_corners(&p.corners(), &before, 1e-9, "standardized solid").unwrap();
    assert_dimensions(&s.tool.measurement(), 10.0, 4.0, 3.0, 1e-9, "standardized").unwrap();
}

// ── Scenario 3: projections outside the surface are ignored ─────────────

#[test]
fn test_out_of_domain_hover_is_ignored() {
    let mut s = BoxSession::with_config(FlatScene::bounded(0.0, 50.0), ToolConfig::default()).unwrap();
    assert!(!s.tool.on_hover(&look_down_at(80.0, 0.0)).unwrap());
    assert!(s.tool.parameters().is_none());
    assert_eq!(s.tool.on_click(&look_down_at(80.0, 0.0)).unwrap(), CreationState::Idle);

    assert!(s.tool.on_hover(&look_down_at(20.0, 0.0)).unwrap());
    assert!(!s.tool.on_hover(&look_down_at(80.0, 0.0)).unwrap());
    assert_points_close(&s.params().unwrap().anchor, &Point3d::new(20.0, 0.0, 0.0), 1e-12, "candidate").unwrap();
}

// ── Scenario 4: vertical placements ─────────────────────────────────────

#[test]
fn test_height_below_base() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(4.0, 0.0).unwrap();
    s.depth_to(4.0, 2.0).unwrap();
    s.height_to(-2.0).unwrap();

    let p = s.params().unwrap();
    assert_eq!(p.placement, VerticalPlacement::Below);
    assert_abs_diff_eq!(p.height, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.bottom_face()[0].z, -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.tool.measurement().volume, 16.0, epsilon = 1e-9);
}

#[test]
fn test_centered_height() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(4.0, 0.0).unwrap();
    s.depth_to(4.0, 2.0).unwrap();
    s.centered_height_to(1.5).unwrap();

    let p = s.params().unwrap();
    assert_eq!(p.placement, VerticalPlacement::Centered);
    assert_abs_diff_eq!(p.height, 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(p.top_face()[2].z, 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(p.bottom_face()[2].z, -1.5, epsilon = 1e-9);
}

// ── Scenario 5: MAX_SIZE clamp ──────────────────────────────────────────

#[test]
fn test_width_clamped_to_max_size() {
    let config = ToolConfig {
        max_size: 50.0,
        ..ToolConfig::default()
    };
    let mut s = BoxSession::with_config(FlatScene::default(), config).unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(80.0, 0.0).unwrap();
    assert_abs_diff_eq!(s.params().unwrap().width, 50.0);
}

// ── Scenario 6: degenerate steps do not advance ─────────────────────────

#[test]
fn test_zero_depth_click_stays() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(10.0, 0.0).unwrap();
    // Depth measured along north; a point on the width edge has none.
    let on_edge = look_down_at(6.0, 0.0);
    s.tool.on_hover(&on_edge).unwrap();
    assert_eq!(s.tool.on_click(&on_edge).unwrap(), CreationState::WidthDefined);
}

// ── Scenario 7: notifications ───────────────────────────────────────────

#[test]
fn test_ready_carries_constructed_shape() {
    let mut s = BoxSession::flat().unwrap();
    s.build_box((1.0, 1.0), (7.0, 1.0), (7.0, 4.0), 2.0).unwrap();

    let ready: Vec<OrientedBox> = s
        .observer
        .notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::Ready { shape, report } => {
                assert_abs_diff_eq!(report.values.volume, 36.0, epsilon = 1e-9);
                Some(shape)
            }
            _ => None,
        })
        .collect();
    assert_eq!(ready.len(), 1);
    assert_same_corners(&ready[0].corners(), &s.params().unwrap().corners(), 1e-9, "ready shape").unwrap();
}

#[test]
fn test_click_off_box_ends_and_resets() {
    let mut s = BoxSession::flat().unwrap();
    s.build_box((0.0, 0.0), (10.0, 0.0), (10.0, 10.0), 5.0).unwrap();
    s.observer.clear();

    assert_eq!(s.tool.on_click(&look_down_at(40.0, 40.0)).unwrap(), CreationState::Idle);
    let log = s.observer.notifications();
    assert_eq!(log.len(), 1);
    let Notification::End { report, shape } = &log[0] else {
        panic!("expected End, got {:?}", log[0]);
    };
    assert_abs_diff_eq!(report.values.volume, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.volume(), 500.0, epsilon = 1e-9);
    assert!(s.tool.parameters().is_none());

    // A fresh box can be started right away.
    s.corner(20.0, 20.0).unwrap();
}

#[test]
fn test_every_step_emits_update() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    let after_corner = s.observer.notifications().len();
    s.tool.on_hover(&look_down_at(3.0, 0.0)).unwrap();
    s.tool.on_hover(&look_down_at(4.0, 0.0)).unwrap();
    assert_eq!(s.observer.notifications().len(), after_corner + 2);
    assert_abs_diff_eq!(s.observer.last_update().unwrap().values.width, 4.0, epsilon = 1e-9);
}

// ── Scenario 8: restart and seeding ─────────────────────────────────────

#[test]
fn test_restart_mid_construction() {
    let mut s = BoxSession::flat().unwrap();
    s.corner(0.0, 0.0).unwrap();
    s.width_to(5.0, 0.0).unwrap();
    s.tool.restart();
    s.expect_state(CreationState::Idle).unwrap();
    assert!(s.tool.parameters().is_none());
    assert_eq!(s.tool.measurement().volume, 0.0);
}

#[test]
fn test_seed_from_external_box() {
    let mut s = BoxSession::flat().unwrap();
    let shape = OrientedBox {
        origin: Point3d::new(3.0, -2.0, 1.0),
        frame: LocalFrame::z_up(),
        heading: 1.1,
        vertical_offset: 0.0,
        extents: [6.0, 2.0, 4.0],
    };
    s.tool.seed(&shape).unwrap();
    s.expect_state(CreationState::VolumeDefined).unwrap();
    assert_eq!(s.observer.ready_count(), 0);
    assert_dimensions(&s.tool.measurement(), 6.0, 2.0, 4.0, 1e-9, "seeded").unwrap();
    assert_same_corners(&s.tool.shape().unwrap().corners(), &shape.corners(), 1e-9, "seeded shape").unwrap();
    assert_abs_diff_eq!(s.params().unwrap().up(), Vec3::Z, epsilon = 1e-12);
}

#[test]
fn test_activation_requires_3d_scene() {
    let scene = FlatScene {
        three_dimensional: false,
        ..FlatScene::default()
    };
    assert!(matches!(
        BoxTool::activate(scene, ToolConfig::default()),
        Err(ToolError::SceneNotThreeDimensional)
    ));
    assert!(matches!(
        BoxTool::activate(FlatScene::default(), ToolConfig::with_resolution(0)),
        Err(ToolError::InvalidConfig { .. })
    ));
}

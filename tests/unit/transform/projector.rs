use super::*;
use crate::params::perspective::PerspectiveParams;

const EPS: f64 = 1e-9;

fn near(p: Point, x: f64, y: f64) -> bool {
    (p.x - x).abs() < EPS && (p.y - y).abs() < EPS
}

fn with(rx: f64, ry: f64) -> ResolvedPerspective {
    PerspectiveParams {
        rotation_x: Some(rx),
        rotation_y: Some(ry),
        perspective: Some(1000.0),
        ..PerspectiveParams::default()
    }
    .resolve()
}

#[test]
fn untilted_corners_are_half_extents() {
    let c = project_corners(100.0, 100.0, &with(0.0, 0.0));
    assert!(near(c.top_left, -50.0, -50.0));
    assert!(near(c.top_right, 50.0, -50.0));
    assert!(near(c.bottom_left, -50.0, 50.0));
    assert!(near(c.bottom_right, 50.0, 50.0));
}

#[test]
fn zero_size_collapses_to_origin() {
    let c = project_corners(0.0, 0.0, &with(25.0, -40.0));
    for p in [c.top_left, c.top_right, c.bottom_left, c.bottom_right] {
        assert!(near(p, 0.0, 0.0), "{p:?}");
    }
}

#[test]
fn tilt_about_x_makes_vertical_projection_asymmetric() {
    let c = project_corners(100.0, 100.0, &with(15.0, 0.0));
    assert!((c.top_left.y - c.bottom_left.y).abs() > EPS);
    assert!((c.top_left.y.abs() - c.bottom_left.y.abs()).abs() > EPS);
}

#[test]
fn tilt_about_x_matches_hand_computation() {
    let c = project_corners(100.0, 100.0, &with(15.0, 0.0));
    let (s, co) = 15f64.to_radians().sin_cos();
    let y1 = -50.0 * co;
    let z1 = -50.0 * s;
    let k = 1000.0 / (1000.0 + z1);
    assert!(near(c.top_left, -50.0 * k, y1 * k));
}

#[test]
fn tilt_about_y_narrows_the_far_side() {
    let c = project_corners(100.0, 100.0, &with(0.0, 30.0));
    let left_height = c.bottom_left.y - c.top_left.y;
    let right_height = c.bottom_right.y - c.top_right.y;
    assert!((left_height - right_height).abs() > 1e-6);
}

#[test]
fn path_visits_corners_in_outline_order() {
    let c = project_corners(10.0, 20.0, &with(0.0, 0.0));
    let els = c.to_path().elements().to_vec();
    assert_eq!(els.len(), 5);
    assert_eq!(els[0], kurbo::PathEl::MoveTo(c.top_left));
    assert_eq!(els[1], kurbo::PathEl::LineTo(c.top_right));
    assert_eq!(els[2], kurbo::PathEl::LineTo(c.bottom_right));
    assert_eq!(els[3], kurbo::PathEl::LineTo(c.bottom_left));
    assert_eq!(els[4], kurbo::PathEl::ClosePath);
}

#[test]
fn bounding_box_holds_every_corner() {
    let c = project_corners(100.0, 60.0, &with(30.0, -20.0));
    let bb = c.bounding_box();
    for p in [c.top_left, c.top_right, c.bottom_left, c.bottom_right] {
        assert!(bb.contains(p) || p.x == bb.x1 || p.y == bb.y1);
    }
    let flat = project_corners(100.0, 60.0, &with(0.0, 0.0)).bounding_box();
    assert_eq!(flat, Rect::new(-50.0, -30.0, 50.0, 30.0));
}

use crate::common::{canvas, canvas_with_arcs, instructions};
use gcanvas_core::{Point, TAU};
use gcanvas_designer::{Action, DEFAULT_DIVISIONS};
use gcanvas_motion::{ArcSupport, Instruction};
use std::f64::consts::{FRAC_PI_2, PI};

#[test]
fn test_zero_sweep_arc_is_line_to_current_point() {
    let mut c = canvas();
    c.move_to(4.0, 4.0);
    c.arc(10.0, 10.0, 3.0, 0.0, 0.0, false);

    let actions = c.path().subpaths()[0].actions();
    assert_eq!(
        actions,
        &[
            Action::MoveTo(Point::new(4.0, 4.0)),
            Action::LineTo(Point::new(4.0, 4.0))
        ]
    );
}

#[test]
fn test_negative_full_turn_matches_positive_full_turn() {
    let mut a = canvas();
    a.arc(5.0, 5.0, 2.0, 0.0, -TAU, false);
    let mut b = canvas();
    b.arc(5.0, 5.0, 2.0, 0.0, TAU, false);

    assert_eq!(
        a.path().polygons(DEFAULT_DIVISIONS),
        b.path().polygons(DEFAULT_DIVISIONS)
    );
    let points = &a.path().polygons(DEFAULT_DIVISIONS)[0];
    assert_eq!(points.len(), DEFAULT_DIVISIONS + 1);
    assert!(points[0].same_xy(&points[DEFAULT_DIVISIONS], 1e-9));
}

#[test]
fn test_clockwise_full_turn_is_kept() {
    let mut c = canvas();
    c.arc(0.0, 0.0, 1.0, 0.0, -TAU, true);
    match c.path().subpaths()[0].actions()[1] {
        Action::Ellipse(arc) => assert!((arc.sweep() + TAU).abs() < 1e-12),
        other => panic!("expected arc, got {:?}", other),
    }
}

#[test]
fn test_native_arc_endpoint_equals_flattened_endpoint() {
    let draw = |c: &mut crate::common::RecordingCanvas| {
        c.translate(20.0, 10.0);
        c.rotate(0.4);
        c.scale(1.5, 1.5);
        c.move_to(0.0, 0.0);
        c.arc(3.0, 0.0, 2.0, PI, 0.2, true);
        c.stroke();
    };

    let mut native = canvas_with_arcs(ArcSupport::BOTH);
    draw(&mut native);
    let mut flat = canvas();
    draw(&mut flat);

    assert!(instructions(&native).iter().any(Instruction::is_arc));
    assert!(!instructions(&flat).iter().any(Instruction::is_arc));
    assert!(native.position().same_xy(&flat.position(), 1e-9));
}

#[test]
fn test_native_arc_starts_at_live_position() {
    let mut c = canvas_with_arcs(ArcSupport::BOTH);
    c.move_to(0.0, 0.0);
    c.arc(5.0, 0.0, 1.0, 0.0, FRAC_PI_2, false);
    c.stroke();

    let log = instructions(&c);
    let arc_index = log.iter().position(Instruction::is_arc).unwrap();
    // The connecting cut ends at the arc start, which is center - (i, j).
    let before = log[arc_index - 1].target();
    assert!(before.same_xy(&Point::new(6.0, 0.0), 1e-9));
    match log[arc_index] {
        Instruction::ArcCcw { to, i, j } => {
            assert!(to.same_xy(&Point::new(5.0, 1.0), 1e-9));
            assert!((before.x + i - 5.0).abs() < 1e-9);
            assert!((before.y + j).abs() < 1e-9);
        }
        other => panic!("expected counter-clockwise arc, got {:?}", other),
    }
}

#[test]
fn test_non_uniform_scale_turns_circle_into_flattened_ellipse() {
    let mut c = canvas_with_arcs(ArcSupport::BOTH);
    c.scale(2.0, 1.0);
    c.arc(0.0, 0.0, 1.0, 0.0, PI, false);
    c.stroke();

    assert!(!instructions(&c).iter().any(Instruction::is_arc));
    assert!(c.position().same_xy(&Point::new(-2.0, 0.0), 1e-9));
}

#[test]
fn test_ellipse_call_records_rotated_ellipse() {
    let mut c = canvas();
    c.ellipse(0.0, 0.0, 4.0, 2.0, FRAC_PI_2, 0.0, PI, false);
    let bbox = c.path().bounding_box(DEFAULT_DIVISIONS);
    assert!((bbox.max_y - 4.0).abs() < 1e-9);
    assert!((bbox.max_x - 0.0).abs() < 1e-9);
    assert!((bbox.min_x + 2.0).abs() < 1e-9);
}

#[test]
fn test_full_span_against_winding_is_line_to_current_point() {
    let mut c = canvas_with_arcs(ArcSupport::BOTH);
    c.move_to(1.0, 0.0);
    c.arc(0.0, 0.0, 1.0, 0.0, TAU, true);

    assert_eq!(
        c.path().subpaths()[0].actions(),
        &[
            Action::MoveTo(Point::new(1.0, 0.0)),
            Action::LineTo(Point::new(1.0, 0.0))
        ]
    );

    c.stroke();
    assert!(!instructions(&c).iter().any(Instruction::is_arc));
    assert!(c.position().same_xy(&Point::new(1.0, 0.0), 1e-9));
}

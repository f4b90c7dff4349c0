use crate::common::canvas;
use gcanvas_core::{Point, Transform};
use gcanvas_designer::Action;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Translate(f64, f64),
    Rotate(f64),
    Scale(f64, f64),
    Save,
    Restore,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50.0f64..50.0, -50.0f64..50.0).prop_map(|(x, y)| Op::Translate(x, y)),
        (-6.3f64..6.3).prop_map(Op::Rotate),
        (0.1f64..4.0, 0.1f64..4.0).prop_map(|(x, y)| Op::Scale(x, y)),
        Just(Op::Save),
        Just(Op::Restore),
    ]
}

#[derive(Debug, Clone)]
enum Draw {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Quadratic(f64, f64, f64, f64),
    Bezier(f64, f64, f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64, bool),
}

fn coord() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

fn draw() -> impl Strategy<Value = Draw> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| Draw::MoveTo(x, y)),
        (coord(), coord()).prop_map(|(x, y)| Draw::LineTo(x, y)),
        (coord(), coord(), coord(), coord()).prop_map(|(a, b, c, d)| Draw::Quadratic(a, b, c, d)),
        (coord(), coord(), coord(), coord(), coord(), coord())
            .prop_map(|(a, b, c, d, e, f)| Draw::Bezier(a, b, c, d, e, f)),
        (coord(), coord(), 0.5f64..20.0, -6.3f64..6.3, -6.3f64..6.3, any::<bool>())
            .prop_map(|(x, y, r, s, e, cw)| Draw::Arc(x, y, r, s, e, cw)),
    ]
}

proptest! {
    #[test]
    fn save_transform_restore_returns_saved_transform(
        before in prop::collection::vec(op(), 0..6),
        inside in prop::collection::vec(op(), 0..12),
    ) {
        let mut c = canvas();
        let apply = |c: &mut crate::common::RecordingCanvas, op: &Op| match *op {
            Op::Translate(x, y) => c.translate(x, y),
            Op::Rotate(a) => c.rotate(a),
            Op::Scale(x, y) => c.scale(x, y),
            Op::Save => c.save(),
            Op::Restore => c.restore(),
        };
        for op in &before {
            apply(&mut c, op);
        }

        let saved = c.transform();
        let saved_rotation = c.rotation();
        let depth = c.stack_depth();
        c.save();
        // Balanced: inner restores never pop below our own save.
        let mut opened = 0usize;
        for op in &inside {
            match op {
                Op::Save => opened += 1,
                Op::Restore if opened == 0 => continue,
                Op::Restore => opened -= 1,
                _ => {}
            }
            apply(&mut c, op);
        }
        for _ in 0..opened {
            c.restore();
        }
        c.restore();

        prop_assert_eq!(c.transform(), saved);
        prop_assert_eq!(c.rotation(), saved_rotation);
        prop_assert_eq!(c.stack_depth(), depth);
    }

    #[test]
    fn every_subpath_starts_with_move(draws in prop::collection::vec(draw(), 1..20)) {
        let mut c = canvas();
        c.rotate(0.3);
        for d in &draws {
            match *d {
                Draw::MoveTo(x, y) => c.move_to(x, y),
                Draw::LineTo(x, y) => c.line_to(x, y),
                Draw::Quadratic(a, b, x, y) => c.quadratic_curve_to(a, b, x, y),
                Draw::Bezier(a, b, cx, cy, x, y) => c.bezier_curve_to(a, b, cx, cy, x, y),
                Draw::Arc(x, y, r, s, e, cw) => c.arc(x, y, r, s, e, cw),
            }
        }
        for subpath in c.path().subpaths().iter().filter(|s| !s.is_empty()) {
            prop_assert!(subpath.actions()[0].is_move());
        }
    }
}

#[test]
fn test_restore_without_save_keeps_transform() {
    let mut c = canvas();
    c.scale(2.0, 2.0);
    c.restore();
    c.restore();
    assert_eq!(c.transform(), Transform::identity().scale(2.0, 2.0));
}

#[test]
fn test_nested_save_restore() {
    let mut c = canvas();
    c.translate(5.0, 0.0);
    c.save();
    c.scale(2.0, 2.0);
    c.save();
    c.rotate(1.0);
    c.restore();
    c.line_to(1.0, 1.0);
    c.restore();
    c.line_to(1.0, 1.0);

    let actions = c.path().subpaths()[0].actions();
    assert_eq!(actions[1], Action::LineTo(Point::new(7.0, 2.0)));
    assert_eq!(actions[2], Action::LineTo(Point::new(6.0, 1.0)));
}

#[test]
fn test_begin_path_discards_subpaths() {
    let mut c = canvas();
    c.rect(0.0, 0.0, 1.0, 1.0);
    c.begin_path();
    assert!(c.path().is_empty());
}

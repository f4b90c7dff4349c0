use crate::common::{canvas, cutting_moves, instructions};
use gcanvas_camtools::StopReason;
use gcanvas_core::Point;
use gcanvas_designer::Action;
use std::f64::consts::TAU;

#[test]
fn test_fill_rect_passes_shrink_until_exhausted() {
    let mut c = canvas();
    c.set_tool_diameter(2.0).unwrap();
    let report = c.fill_rect(0.0, 0.0, 10.0, 10.0);

    assert_eq!(report.stop, StopReason::Exhausted);
    assert!(report.passes >= 2);
    assert!(report.passes < 10);

    // The first pass traces the 8×8 square inset by the tool radius.
    let first_cut = instructions(&c)
        .iter()
        .find(|i| !i.is_rapid())
        .map(|i| i.target())
        .unwrap();
    let on_first_inset = |p: Point| {
        (1.0..=9.0).contains(&p.x)
            && (1.0..=9.0).contains(&p.y)
            && ((p.x - 1.0).abs() < 1e-6
                || (p.x - 9.0).abs() < 1e-6
                || (p.y - 1.0).abs() < 1e-6
                || (p.y - 9.0).abs() < 1e-6)
    };
    assert!(on_first_inset(first_cut), "{:?}", first_cut);

    // Every cut stays inside the square by at least the tool radius.
    for i in instructions(&c) {
        let p = i.target();
        assert!(p.x >= 1.0 - 1e-6 && p.x <= 9.0 + 1e-6);
        assert!(p.y >= 1.0 - 1e-6 && p.y <= 9.0 + 1e-6);
    }
}

#[test]
fn test_fill_leaves_drawn_path_untouched() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.rect(0.0, 0.0, 5.0, 5.0);
    let before = c.path().clone();
    c.fill();
    assert_eq!(c.path(), &before);
}

#[test]
fn test_convex_shape_larger_than_tool_is_cut() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.arc(0.0, 0.0, 5.0, 0.0, TAU, false);
    let report = c.fill();

    assert!(report.contours >= 1);
    assert!(cutting_moves(&c) > 0);
}

#[test]
fn test_shape_smaller_than_tool_produces_no_motion() {
    let mut c = canvas();
    c.set_tool_diameter(6.0).unwrap();
    let report = c.fill_rect(0.0, 0.0, 4.0, 4.0);

    assert_eq!(report.contours, 0);
    assert!(instructions(&c).is_empty());
}

#[test]
fn test_fill_outside_clip_produces_nothing() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.rect(0.0, 0.0, 10.0, 10.0);
    c.clip();

    let report = c.fill_rect(50.0, 50.0, 10.0, 10.0);
    assert_eq!(report.contours, 0);
    assert!(instructions(&c).is_empty());
}

#[test]
fn test_clip_restricts_fill() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.rect(0.0, 0.0, 4.0, 4.0);
    c.clip();

    let report = c.fill_rect(2.0, 2.0, 10.0, 10.0);
    assert!(report.passes >= 1);
    for i in instructions(&c) {
        let p = i.target();
        assert!(p.x <= 4.0 + 1e-6 && p.y <= 4.0 + 1e-6, "{:?}", p);
    }
}

#[test]
fn test_clip_is_a_snapshot() {
    let mut c = canvas();
    c.rect(0.0, 0.0, 4.0, 4.0);
    c.clip();
    c.line_to(100.0, 100.0);

    let clip = c.clip_region().unwrap();
    assert_eq!(clip.subpaths()[0].len(), 5);
    assert_eq!(
        clip.subpaths()[0].actions()[4],
        Action::LineTo(Point::new(0.0, 0.0))
    );
}

#[test]
fn test_empty_path_fill_is_noop() {
    let mut c = canvas();
    let report = c.fill();
    assert_eq!(report.passes, 0);
    assert_eq!(report.stop, StopReason::Exhausted);
    assert!(instructions(&c).is_empty());
}

#[test]
fn test_each_fill_contour_starts_with_retract_and_rapid() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.fill_rect(0.0, 0.0, 6.0, 6.0);

    let log = instructions(&c);
    assert!(log[0].is_rapid());
    let plunges = log
        .windows(2)
        .filter(|w| w[0].is_rapid() && !w[1].is_rapid() && w[1].target().z < 0.0)
        .count();
    assert_eq!(plunges, 3);
}

#[test]
fn test_overlapping_subpaths_fill_their_union() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.rect(0.0, 0.0, 10.0, 10.0);
    c.rect(5.0, 5.0, 10.0, 10.0);
    let report = c.fill();
    assert_eq!(report.stop, StopReason::Exhausted);

    let cuts: Vec<Point> = instructions(&c)
        .iter()
        .filter(|i| !i.is_rapid() && i.target().z < 0.0)
        .map(|i| i.target())
        .collect();
    let any_in = |x0: f64, x1: f64, y0: f64, y1: f64| {
        cuts.iter()
            .any(|p| (x0..=x1).contains(&p.x) && (y0..=y1).contains(&p.y))
    };
    assert!(any_in(0.0, 4.5, 0.0, 4.5), "first rect is not cut");
    assert!(any_in(10.5, 15.0, 10.5, 15.0), "second rect is not cut");
    assert!(any_in(6.0, 9.0, 6.0, 9.0), "overlap is not cut");
}

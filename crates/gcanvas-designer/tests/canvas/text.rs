use crate::common::{canvas, cutting_moves, instructions};
use gcanvas_core::{Error, Point};

#[test]
fn test_measure_text_uses_glyph_extents() {
    let mut c = canvas();
    c.set_font("bold 10pt Block").unwrap();

    let metrics = c.measure_text("abc").unwrap();
    assert!((metrics.width - 28.0).abs() < 1e-9);
    assert!((metrics.height - 10.0).abs() < 1e-9);

    let empty = c.measure_text("").unwrap();
    assert_eq!(empty.width, 0.0);
    assert_eq!(empty.height, 0.0);
}

#[test]
fn test_stroke_text_traces_glyphs_at_anchor() {
    let mut c = canvas();
    c.set_font("5mm Block").unwrap();
    c.translate(100.0, 0.0);
    c.stroke_text("ab", 10.0, 20.0).unwrap();

    let log = instructions(&c);
    assert_eq!(log[0].target(), Point::new_3d(110.0, 20.0, 5.0));
    // Two closed glyph outlines of four edges each.
    assert_eq!(cutting_moves(&c), 2 * (1 + 4));
    // The text transform does not leak.
    assert_eq!(c.stack_depth(), 0);
    assert!(c.transform().approx_eq(
        &gcanvas_core::Transform::identity().translate(100.0, 0.0),
        1e-12
    ));
}

#[test]
fn test_fill_text_clears_glyph_interiors() {
    let mut c = canvas();
    c.set_tool_diameter(1.0).unwrap();
    c.set_font("10pt Block").unwrap();
    c.rect(500.0, 500.0, 1.0, 1.0);

    let report = c.fill_text("ab", 0.0, 0.0).unwrap();
    // An 8×10 block with a 1 unit tool takes four passes.
    assert_eq!(report.passes, 4);
    assert_eq!(report.contours, 8);
    for i in instructions(&c) {
        assert!(i.target().x < 500.0, "previous path was not discarded");
    }
}

#[test]
fn test_font_engine_failure_is_reported() {
    let mut c = canvas();
    c.set_font("12pt Missing").unwrap();
    let err = c.fill_text("x", 0.0, 0.0).unwrap_err();
    assert!(matches!(err, Error::Font(_)));
    assert!(c.measure_text("x").is_err());
    assert!(instructions(&c).is_empty());
}

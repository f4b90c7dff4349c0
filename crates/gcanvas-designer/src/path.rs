//! Path accumulation and flattening.
//!
//! A [`Path`] is an ordered list of [`Subpath`]s, each an append-only log of drawing
//! [`Action`]s in device coordinates. Subpaths keep the invariant that their first
//! action is a `MoveTo`: any other first action records an implicit move to its own
//! starting point.

use gcanvas_camtools::Polygon;
use gcanvas_core::{EllipseArc, Point};
use lyon::geom::{point, vector, Angle, Arc, CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};

/// Points sampled per curved action when flattening.
pub const DEFAULT_DIVISIONS: usize = 40;

const CONNECT_EPSILON: f64 = 1e-9;

/// A single recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo { ctrl1: Point, ctrl2: Point, to: Point },
    QuadraticCurveTo { ctrl: Point, to: Point },
    Ellipse(EllipseArc),
}

impl Action {
    /// Where the pen rests after this action.
    pub fn end_point(&self) -> Point {
        match self {
            Action::MoveTo(p) | Action::LineTo(p) => *p,
            Action::BezierCurveTo { to, .. } | Action::QuadraticCurveTo { to, .. } => *to,
            Action::Ellipse(arc) => arc.end_point(),
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Action::MoveTo(_))
    }
}

/// Axis-aligned bounds of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// The empty box; including any point makes it that point.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }
}

/// One contour of a path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subpath {
    actions: Vec<Action>,
}

impl Subpath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(p: Point) -> Self {
        Self {
            actions: vec![Action::MoveTo(p)],
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// End point of the last action.
    pub fn current_point(&self) -> Option<Point> {
        self.actions.last().map(Action::end_point)
    }

    pub fn start_point(&self) -> Option<Point> {
        self.actions.first().map(Action::end_point)
    }

    fn ensure_start(&mut self, p: Point) {
        if self.actions.is_empty() {
            self.actions.push(Action::MoveTo(p));
        }
    }

    /// Restarts the contour at `p`. Only meaningful on an empty subpath; the canvas
    /// opens a fresh subpath for every move.
    pub fn move_to(&mut self, p: Point) {
        self.actions.push(Action::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.ensure_start(p);
        self.actions.push(Action::LineTo(p));
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.ensure_start(ctrl1);
        self.actions.push(Action::BezierCurveTo { ctrl1, ctrl2, to });
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.ensure_start(ctrl);
        self.actions.push(Action::QuadraticCurveTo { ctrl, to });
    }

    /// Appends an arc, joining it to the current point with a straight segment when
    /// the two do not meet.
    pub fn ellipse(&mut self, arc: EllipseArc) {
        let start = arc.start_point();
        match self.current_point() {
            None => self.actions.push(Action::MoveTo(start)),
            Some(current) if !current.same_xy(&start, CONNECT_EPSILON) => {
                self.actions.push(Action::LineTo(start));
            }
            Some(_) => {}
        }
        self.actions.push(Action::Ellipse(arc));
    }

    pub(crate) fn push(&mut self, action: Action) {
        match action {
            Action::MoveTo(p) => self.move_to(p),
            Action::LineTo(p) => self.line_to(p),
            Action::BezierCurveTo { ctrl1, ctrl2, to } => self.bezier_curve_to(ctrl1, ctrl2, to),
            Action::QuadraticCurveTo { ctrl, to } => self.quadratic_curve_to(ctrl, to),
            Action::Ellipse(arc) => self.ellipse(arc),
        }
    }

    /// Ordered points along the contour, sampling every curve at `divisions` steps.
    pub fn points(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        let mut out: Vec<Point> = Vec::new();
        for action in &self.actions {
            let from = out.last().copied();
            match *action {
                Action::MoveTo(p) | Action::LineTo(p) => out.push(p),
                Action::BezierCurveTo { ctrl1, ctrl2, to } => {
                    let from = from.unwrap_or(ctrl1);
                    let curve = CubicBezierSegment {
                        from: point(from.x, from.y),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(to.x, to.y),
                    };
                    out.extend(sample(divisions, |t| curve.sample(t)));
                }
                Action::QuadraticCurveTo { ctrl, to } => {
                    let from = from.unwrap_or(ctrl);
                    let curve = QuadraticBezierSegment {
                        from: point(from.x, from.y),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(to.x, to.y),
                    };
                    out.extend(sample(divisions, |t| curve.sample(t)));
                }
                Action::Ellipse(arc) => {
                    let start = arc.start_point();
                    if !from.is_some_and(|p| p.same_xy(&start, CONNECT_EPSILON)) {
                        out.push(start);
                    }
                    let geom = Arc {
                        center: point(arc.center.x, arc.center.y),
                        radii: vector(arc.rx, arc.ry),
                        start_angle: Angle::radians(arc.start_angle),
                        sweep_angle: Angle::radians(arc.sweep()),
                        x_rotation: Angle::radians(arc.rotation),
                    };
                    out.extend(sample(divisions, |t| geom.sample(t)));
                }
            }
        }
        out
    }

    pub fn bounding_box(&self, divisions: usize) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for p in self.points(divisions) {
            bbox.include(p);
        }
        bbox
    }
}

fn sample<F>(divisions: usize, at: F) -> impl Iterator<Item = Point>
where
    F: Fn(f64) -> lyon::geom::Point<f64>,
{
    (1..=divisions).map(move |i| {
        let p = at(i as f64 / divisions as f64);
        Point::new(p.x, p.y)
    })
}

/// An ordered list of subpaths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    subpaths: Vec<Subpath>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    /// True when no subpath holds an action.
    pub fn is_empty(&self) -> bool {
        self.subpaths.iter().all(Subpath::is_empty)
    }

    /// Opens a new subpath starting at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.subpaths.push(Subpath::starting_at(p));
    }

    /// The subpath receiving drawing actions, created on demand.
    pub fn current_mut(&mut self) -> &mut Subpath {
        if self.subpaths.is_empty() {
            self.subpaths.push(Subpath::new());
        }
        let last = self.subpaths.len() - 1;
        &mut self.subpaths[last]
    }

    pub fn current_point(&self) -> Option<Point> {
        self.subpaths.last().and_then(Subpath::current_point)
    }

    pub fn line_to(&mut self, p: Point) {
        self.current_mut().line_to(p);
    }

    pub fn bezier_curve_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.current_mut().bezier_curve_to(ctrl1, ctrl2, to);
    }

    pub fn quadratic_curve_to(&mut self, ctrl: Point, to: Point) {
        self.current_mut().quadratic_curve_to(ctrl, to);
    }

    pub fn ellipse(&mut self, arc: EllipseArc) {
        self.current_mut().ellipse(arc);
    }

    /// Flattens every non-empty subpath into a closed polygon candidate.
    pub fn polygons(&self, divisions: usize) -> Vec<Polygon> {
        self.subpaths
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.points(divisions))
            .collect()
    }

    /// Builds a path tracing each polygon and closing it back to its first point.
    pub fn from_polygons(polygons: &[Polygon]) -> Path {
        let mut path = Path::new();
        for poly in polygons {
            let Some(first) = poly.first() else {
                continue;
            };
            path.move_to(*first);
            for p in poly.iter().skip(1) {
                path.line_to(*p);
            }
            path.line_to(*first);
        }
        path
    }

    pub fn bounding_box(&self, divisions: usize) -> BoundingBox {
        self.subpaths
            .iter()
            .map(|s| s.bounding_box(divisions))
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b))
    }
}

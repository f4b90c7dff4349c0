//! Path to motion translation.
//!
//! Every subpath becomes its own contour: the leading move retracts and rapids to
//! the contour start, cutting actions plunge and then move at feed. Circular arcs use
//! native interpolation when the emitter supports their winding; everything else is
//! flattened and cut as straight segments.

use crate::path::{Action, Path, Subpath, DEFAULT_DIVISIONS};
use gcanvas_core::{EllipseArc, Point};
use gcanvas_motion::{ArcMove, MotionEmitter};
use tracing::trace;

pub struct MotionTranslator<'a, E: MotionEmitter + ?Sized> {
    emitter: &'a mut E,
    divisions: usize,
}

impl<'a, E: MotionEmitter + ?Sized> MotionTranslator<'a, E> {
    pub fn new(emitter: &'a mut E) -> Self {
        Self {
            emitter,
            divisions: DEFAULT_DIVISIONS,
        }
    }

    pub fn with_divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions.max(1);
        self
    }

    pub fn stroke_path(&mut self, path: &Path) {
        for subpath in path.subpaths() {
            self.stroke_subpath(subpath);
        }
    }

    pub fn stroke_subpath(&mut self, subpath: &Subpath) {
        for (index, action) in subpath.actions().iter().enumerate() {
            let contour_start = index == 0;
            match *action {
                Action::MoveTo(p) => {
                    self.emitter.retract();
                    self.emitter.rapid(p);
                }
                Action::LineTo(p) => {
                    if contour_start {
                        self.emitter.retract();
                        self.emitter.rapid(p);
                    }
                    self.emitter.plunge();
                    self.emitter.linear(p);
                }
                Action::Ellipse(arc) => {
                    if !contour_start {
                        self.emitter.plunge();
                    }
                    if !contour_start && self.native_arc(&arc) {
                        continue;
                    }
                    self.interpolate(*action, contour_start);
                }
                Action::BezierCurveTo { .. } | Action::QuadraticCurveTo { .. } => {
                    if !contour_start {
                        self.emitter.plunge();
                    }
                    self.interpolate(*action, contour_start);
                }
            }
        }
    }

    /// Emits `arc` as one native move if the emitter can execute it.
    fn native_arc(&mut self, arc: &EllipseArc) -> bool {
        let supported = if arc.clockwise {
            self.emitter.supports_arc_cw()
        } else {
            self.emitter.supports_arc_ccw()
        };
        // A zero sweep has coincident ends, which a controller runs as a full circle.
        if !arc.is_circular() || !supported || arc.sweep().abs() < 1e-12 {
            return false;
        }

        let start = arc.start_point();
        let request = ArcMove {
            to: arc.end_point(),
            i: arc.center.x - start.x,
            j: arc.center.y - start.y,
        };
        trace!("Native arc to ({:.3}, {:.3})", request.to.x, request.to.y);
        if arc.clockwise {
            self.emitter.arc_cw(request);
        } else {
            self.emitter.arc_ccw(request);
        }
        true
    }

    /// Cuts a single action as straight segments from the live position. At a contour
    /// start the first sampled point is reached with a rapid and the tool plunges there.
    fn interpolate(&mut self, action: Action, contour_start: bool) {
        let position = self.emitter.position();
        let mut seeded = Subpath::starting_at(Point::new(position.x, position.y));
        seeded.push(action);

        for (i, p) in seeded.points(self.divisions).into_iter().enumerate() {
            if i == 0 && contour_start {
                self.emitter.retract();
                self.emitter.rapid(p);
                self.emitter.plunge();
            } else {
                self.emitter.linear(p);
            }
        }
    }
}

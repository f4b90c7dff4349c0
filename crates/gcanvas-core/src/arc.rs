//! Elliptic arcs and angle helpers.
//!
//! Angles are in radians, measured counter-clockwise from the +X axis of the arc's
//! own (possibly rotated) frame. An arc is described by its start and end angles plus
//! a winding flag; [`normalize_sweep`] turns that triple into a signed sweep using the
//! Canvas2D rules.

use crate::point::Point;
use crate::transform::Transform;
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const TAU: f64 = std::f64::consts::TAU;

/// Relative float comparison used to detect circular arcs.
pub fn same_float(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
}

/// Signed sweep from `start` to `end`.
///
/// Counter-clockwise arcs get a sweep in `[0, 2π]`, clockwise arcs in `[-2π, 0]`.
/// A raw span of 2π or more in the winding direction is a full turn; anything else
/// wraps modulo 2π. A zero span stays zero.
pub fn normalize_sweep(start: f64, end: f64, clockwise: bool) -> f64 {
    let raw = if clockwise { start - end } else { end - start };
    let magnitude = if raw >= TAU { TAU } else { raw.rem_euclid(TAU) };
    if clockwise {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseArc {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's X axis, radians.
    pub rotation: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub clockwise: bool,
}

impl EllipseArc {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) -> Self {
        Self {
            center,
            rx,
            ry,
            rotation,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    pub fn circle(center: Point, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) -> Self {
        Self::new(center, radius, radius, 0.0, start_angle, end_angle, clockwise)
    }

    pub fn sweep(&self) -> f64 {
        normalize_sweep(self.start_angle, self.end_angle, self.clockwise)
    }

    pub fn is_circular(&self) -> bool {
        same_float(self.rx, self.ry)
    }

    pub fn point_at_angle(&self, angle: f64) -> Point {
        let (sin_r, cos_r) = self.rotation.sin_cos();
        let (sin_a, cos_a) = angle.sin_cos();
        let lx = self.rx * cos_a;
        let ly = self.ry * sin_a;
        Point::new(
            self.center.x + lx * cos_r - ly * sin_r,
            self.center.y + lx * sin_r + ly * cos_r,
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.start_angle + self.sweep())
    }

    /// Re-derives the arc in the image of `transform`.
    ///
    /// The image of an ellipse under an affine map is again an ellipse. Its radii and
    /// orientation come from the singular value decomposition of the transformed
    /// radius frame; a mirroring map reverses the winding. The returned arc keeps its
    /// sweep magnitude, so a full turn stays a full turn. Circular results are folded
    /// back to `rotation = 0`.
    pub fn transformed(&self, transform: &Transform) -> EllipseArc {
        let center = transform.transform_point(self.center);
        let sweep = self.sweep();

        let (sin_r, cos_r) = self.rotation.sin_cos();
        let (ux, uy) = transform.transform_vector(self.rx * cos_r, self.rx * sin_r);
        let (vx, vy) = transform.transform_vector(-self.ry * sin_r, self.ry * cos_r);
        let frame = Matrix2::new(ux, vx, uy, vy);

        let svd = frame.svd(true, true);
        let (Some(mut u), Some(mut v_t)) = (svd.u, svd.v_t) else {
            warn!("SVD failed while transforming arc; keeping original radii");
            return EllipseArc {
                center,
                ..*self
            };
        };

        // Make V a proper rotation; D·Σ·D = Σ keeps the product intact.
        if v_t.determinant() < 0.0 {
            v_t[(1, 0)] = -v_t[(1, 0)];
            v_t[(1, 1)] = -v_t[(1, 1)];
            u[(0, 1)] = -u[(0, 1)];
            u[(1, 1)] = -u[(1, 1)];
        }

        let psi = v_t[(0, 1)].atan2(v_t[(0, 0)]);
        let phi = u[(1, 0)].atan2(u[(0, 0)]);
        let mirrored = u.determinant() < 0.0;

        let (start, sweep, clockwise) = if mirrored {
            (psi - self.start_angle, -sweep, !self.clockwise)
        } else {
            (self.start_angle - psi, sweep, self.clockwise)
        };

        let rx = svd.singular_values[0];
        let ry = svd.singular_values[1];

        if same_float(rx, ry) {
            let radius = (rx + ry) / 2.0;
            return EllipseArc::new(
                center,
                radius,
                radius,
                0.0,
                start + phi,
                start + phi + sweep,
                clockwise,
            );
        }

        EllipseArc::new(center, rx, ry, phi, start, start + sweep, clockwise)
    }
}

//! Affine transforms for the drawing surface.
//!
//! A [`Transform`] is the 2×3 matrix
//!
//! ```text
//! | a c e |
//! | b d f |
//! ```
//!
//! mapping `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`. Composition follows the
//! Canvas2D convention: `translate`, `rotate` and `scale` return a new matrix whose
//! own operation is applied to incoming points *before* the existing ones.

use crate::point::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Composes `other` so that it applies to points before `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(&self, x: f64, y: f64) -> Transform {
        self.then(&Transform::new(1.0, 0.0, 0.0, 1.0, x, y))
    }

    /// Rotation by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Transform {
        let (sin, cos) = angle.sin_cos();
        self.then(&Transform::new(cos, sin, -sin, cos, 0.0, 0.0))
    }

    pub fn scale(&self, x: f64, y: f64) -> Transform {
        self.then(&Transform::new(x, 0.0, 0.0, y, 0.0, 0.0))
    }

    /// Maps a point. Z passes through untouched.
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
            z: p.z,
        }
    }

    /// Maps a direction vector (linear part only).
    pub fn transform_vector(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y, self.b * x + self.d * y)
    }

    /// Negative for mirroring transforms, which flip arc winding.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Transform, tolerance: f64) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .all(|delta| delta.abs() <= tolerance)
    }
}

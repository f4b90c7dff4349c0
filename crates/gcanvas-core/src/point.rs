//! The canonical point type.

use serde::{Deserialize, Serialize};

/// A point in canvas space.
///
/// Drawing happens in the XY plane; `z` is carried along so the motion layer can
/// report the live tool height through the same type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    /// Creates a point in the XY plane (z = 0).
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Creates a point with an explicit Z height.
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns a copy of this point at the given Z height.
    pub const fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    /// Planar distance to another point (Z ignored).
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// True when both points share the same XY position within `tolerance`.
    pub fn same_xy(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

//! # GCanvas CAM Tools
//!
//! Area fill for closed shapes drawn on the canvas.
//!
//! - **Polygon engine**: the [`PolygonEngine`] contract (clean, intersect, offset) and
//!   its [`CavalierEngine`] implementation on top of `cavalier_contours`.
//! - **Fill engine**: [`FillEngine`] turns a polygon set into concentric, tool-width
//!   spaced inset contours, honoring an optional clip region.

pub mod fill;
pub mod polygon;

pub use fill::{FillEngine, FillPass, FillReport, FillSettings, FillStrategy, StopReason};
pub use polygon::{
    is_hole, scale_polygons, signed_area, CavalierEngine, JoinStyle, Polygon, PolygonEngine,
};

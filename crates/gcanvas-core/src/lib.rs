//! # GCanvas Core
//!
//! Core geometry types shared by every GCanvas crate:
//!
//! - [`Point`]: the single canonical point type (x, y, z) used from the drawing API
//!   down to the motion layer.
//! - [`Transform`]: an immutable 2×3 affine matrix composed by the canvas on every
//!   `translate`/`rotate`/`scale` call.
//! - [`EllipseArc`]: an elliptic (or circular) arc with explicit winding, able to
//!   re-derive its radii and angles under an arbitrary affine transform.
//! - [`Error`]: contract violations the caller controls.

pub mod arc;
pub mod error;
pub mod point;
pub mod transform;

pub use arc::{normalize_sweep, same_float, EllipseArc, TAU};
pub use error::{validate_depth, validate_tool_diameter, Error, Result};
pub use point::Point;
pub use transform::Transform;

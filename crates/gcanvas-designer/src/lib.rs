//! # GCanvas Designer
//!
//! A Canvas2D-style drawing surface whose output is tool motion instead of pixels.
//!
//! - **Paths**: [`Path`]/[`Subpath`] record [`Action`]s in device coordinates and
//!   flatten them into points.
//! - **Canvas**: [`Canvas`] owns the transform stack, the current path and the tool
//!   parameters, and drives fills and strokes.
//! - **Translator**: [`MotionTranslator`] turns recorded actions into emitter calls,
//!   using native arcs where the machine supports them.
//! - **Text**: font shorthand parsing ([`parse_font`]) and the [`FontEngine`]
//!   contract, with [`RusttypeFontEngine`] reading installed system fonts.

pub mod canvas;
pub mod font;
pub mod font_manager;
pub mod path;
pub mod translator;

pub use canvas::{Canvas, TextMetrics, DEFAULT_DEPTH, DEFAULT_DEPTH_OF_CUT, DEFAULT_TOOL_DIAMETER};
pub use font::{
    parse_font, FontDescriptor, FontEngine, FontError, FontStyle, FontVariant, FontWeight,
    DEFAULT_FONT,
};
pub use font_manager::RusttypeFontEngine;
pub use path::{Action, BoundingBox, Path, Subpath, DEFAULT_DIVISIONS};
pub use translator::MotionTranslator;

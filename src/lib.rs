//! # GCanvas
//!
//! A Canvas2D-style drawing API whose output is CNC tool motion: paths, fills,
//! strokes and text are compiled into rapid, plunge, retract, linear and circular
//! moves.
//!
//! ## Architecture
//!
//! GCanvas is organized as a workspace with multiple crates:
//!
//! 1. **gcanvas-core** - Points, affine transforms, elliptic arcs, errors
//! 2. **gcanvas-motion** - Motion emitter contract, tool height state machine, drivers
//! 3. **gcanvas-camtools** - Polygon engine and concentric area fill
//! 4. **gcanvas-designer** - Paths, the canvas, motion translation, fonts
//! 5. **gcanvas-settings** - Canvas configuration files
//! 6. **gcanvas** - This crate: re-exports, logging setup and the demo binary
//!
//! ## Example
//!
//! ```no_run
//! use gcanvas::{recording_canvas, CanvasConfig};
//!
//! let mut canvas = recording_canvas(&CanvasConfig::default()).unwrap();
//! canvas.set_tool_diameter(2.0).unwrap();
//! canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
//! println!("{}", canvas.emitter().driver().to_json().unwrap());
//! ```

pub use gcanvas_camtools::{
    CavalierEngine, FillEngine, FillPass, FillReport, FillSettings, FillStrategy, JoinStyle,
    Polygon, PolygonEngine, StopReason,
};
pub use gcanvas_core::{EllipseArc, Error, Point, Result, Transform};
pub use gcanvas_designer::{
    parse_font, Action, Canvas, FontDescriptor, FontEngine, FontError, MotionTranslator, Path,
    RusttypeFontEngine, Subpath, TextMetrics,
};
pub use gcanvas_motion::{
    ArcMove, ArcSupport, Driver, Instruction, Motion, MotionEmitter, MotionSettings,
    RecordingDriver,
};
pub use gcanvas_settings::{default_config_path, CanvasConfig, SettingsError, SettingsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// A canvas that records its motion in memory.
pub type RecordingCanvas = Canvas<Motion<RecordingDriver>>;

/// Builds a recording canvas with the heights, arc capabilities and canvas settings
/// of `config`.
pub fn recording_canvas(config: &CanvasConfig) -> SettingsResult<RecordingCanvas> {
    let motion = Motion::new(
        RecordingDriver::new(config.arc_support()),
        config.motion_settings(),
    );
    Canvas::from_config(motion, config)
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout free for emitted instructions
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

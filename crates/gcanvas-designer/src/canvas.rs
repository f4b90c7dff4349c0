//! The drawing surface.
//!
//! [`Canvas`] mirrors the Canvas2D API. Every coordinate passes through the current
//! transform before it is recorded, so the accumulated [`Path`] is always in device
//! space. `stroke` and `fill` hand the recorded geometry to the motion translator;
//! the canvas never moves the tool on its own.

use crate::font::{parse_font, FontEngine, DEFAULT_FONT};
use crate::font_manager::RusttypeFontEngine;
use crate::path::{Action, Path, DEFAULT_DIVISIONS};
use crate::translator::MotionTranslator;
use gcanvas_camtools::{CavalierEngine, FillEngine, FillReport, FillSettings, FillStrategy, PolygonEngine};
use gcanvas_core::{validate_depth, validate_tool_diameter, EllipseArc, Point, Result, Transform, TAU};
use gcanvas_motion::MotionEmitter;
use gcanvas_settings::{CanvasConfig, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const DEFAULT_TOOL_DIAMETER: f64 = 5.0;
pub const DEFAULT_DEPTH: f64 = 1.0;
pub const DEFAULT_DEPTH_OF_CUT: f64 = 0.25;

/// Size of rendered text in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SavedState {
    transform: Transform,
    rotation: f64,
}

pub struct Canvas<E: MotionEmitter, G: PolygonEngine = CavalierEngine> {
    emitter: E,
    polygon_engine: G,
    font_engine: Box<dyn FontEngine>,
    transform: Transform,
    rotation: f64,
    stack: Vec<SavedState>,
    path: Path,
    clip_region: Option<Path>,
    fill: FillSettings,
    depth: f64,
    depth_of_cut: f64,
    font: String,
    curve_divisions: usize,
}

impl<E: MotionEmitter> Canvas<E> {
    /// Canvas with the stock polygon engine and system fonts.
    pub fn new(emitter: E) -> Self {
        Self::with_engines(emitter, CavalierEngine, Box::new(RusttypeFontEngine::new()))
    }

    /// Canvas configured from a validated [`CanvasConfig`].
    ///
    /// Travel height and arc capabilities belong to the emitter; build it with
    /// [`CanvasConfig::motion_settings`] and [`CanvasConfig::arc_support`].
    pub fn from_config(emitter: E, config: &CanvasConfig) -> SettingsResult<Self> {
        config.validate()?;
        parse_font(&config.text.font)
            .map_err(|e| SettingsError::invalid("text.font", e.to_string()))?;

        let mut canvas = Self::new(emitter);
        canvas.fill = config.fill_settings();
        canvas.depth = config.cutting.depth;
        canvas.depth_of_cut = config.cutting.depth_of_cut;
        canvas.curve_divisions = config.fill.curve_divisions;
        canvas.font = config.text.font.clone();
        canvas.emitter.set_cut_z(-canvas.depth_of_cut);
        Ok(canvas)
    }
}

impl<E: MotionEmitter, G: PolygonEngine> Canvas<E, G> {
    pub fn with_engines(emitter: E, polygon_engine: G, font_engine: Box<dyn FontEngine>) -> Self {
        let mut canvas = Self {
            emitter,
            polygon_engine,
            font_engine,
            transform: Transform::identity(),
            rotation: 0.0,
            stack: Vec::new(),
            path: Path::new(),
            clip_region: None,
            fill: FillSettings::with_tool_diameter(DEFAULT_TOOL_DIAMETER),
            depth: DEFAULT_DEPTH,
            depth_of_cut: DEFAULT_DEPTH_OF_CUT,
            font: DEFAULT_FONT.to_string(),
            curve_divisions: DEFAULT_DIVISIONS,
        };
        canvas.emitter.set_cut_z(-DEFAULT_DEPTH_OF_CUT);
        canvas
    }

    pub fn set_font_engine(&mut self, font_engine: Box<dyn FontEngine>) {
        self.font_engine = font_engine;
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn emitter_mut(&mut self) -> &mut E {
        &mut self.emitter
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Live tool position as reported by the emitter.
    pub fn position(&self) -> Point {
        self.emitter.position()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn clip_region(&self) -> Option<&Path> {
        self.clip_region.as_ref()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Accumulated rotation in radians.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    // Configuration

    pub fn tool_diameter(&self) -> f64 {
        self.fill.tool_diameter
    }

    pub fn set_tool_diameter(&mut self, diameter: f64) -> Result<()> {
        self.fill.tool_diameter = validate_tool_diameter(diameter)?;
        Ok(())
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn set_depth(&mut self, depth: f64) -> Result<()> {
        self.depth = validate_depth("depth", depth)?;
        Ok(())
    }

    pub fn depth_of_cut(&self) -> f64 {
        self.depth_of_cut
    }

    /// Also moves the emitter's cutting height to `-depth_of_cut`.
    pub fn set_depth_of_cut(&mut self, depth_of_cut: f64) -> Result<()> {
        self.depth_of_cut = validate_depth("depth_of_cut", depth_of_cut)?;
        self.emitter.set_cut_z(-self.depth_of_cut);
        Ok(())
    }

    pub fn fill_strategy(&self) -> FillStrategy {
        self.fill.strategy
    }

    pub fn set_fill_strategy(&mut self, strategy: FillStrategy) {
        self.fill.strategy = strategy;
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    /// Sets the font shorthand used by the text calls.
    pub fn set_font(&mut self, font: &str) -> Result<()> {
        parse_font(font)?;
        self.font = font.to_string();
        Ok(())
    }

    pub fn curve_divisions(&self) -> usize {
        self.curve_divisions
    }

    pub fn set_curve_divisions(&mut self, divisions: usize) {
        self.curve_divisions = divisions.max(1);
    }

    // State

    pub fn save(&mut self) {
        self.stack.push(SavedState {
            transform: self.transform,
            rotation: self.rotation,
        });
    }

    /// Pops the last saved transform. An empty stack is left as is.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.transform = state.transform;
            self.rotation = state.rotation;
        }
    }

    pub fn begin_path(&mut self) {
        self.path = Path::new();
    }

    pub fn rotate(&mut self, angle: f64) {
        self.transform = self.transform.rotate(angle);
        self.rotation += angle;
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform.translate(x, y);
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.transform = self.transform.scale(x, y);
    }

    fn device(&self, x: f64, y: f64) -> Point {
        self.transform.transform_point(Point::new(x, y))
    }

    // Path building

    pub fn move_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.path.move_to(p);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.path.line_to(p);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        let ctrl1 = self.device(cp1x, cp1y);
        let ctrl2 = self.device(cp2x, cp2y);
        let to = self.device(x, y);
        self.path.bezier_curve_to(ctrl1, ctrl2, to);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        let ctrl = self.device(cpx, cpy);
        let to = self.device(x, y);
        self.path.quadratic_curve_to(ctrl, to);
    }

    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, clockwise: bool) {
        self.ellipse(x, y, radius, radius, 0.0, start_angle, end_angle, clockwise);
    }

    /// Records an elliptic arc.
    ///
    /// An arc whose normalized sweep is zero (equal angles, or a span of 2π against
    /// the winding) records a line to the current point rather than a full turn; a
    /// counter-clockwise span of exactly -2π is a full turn.
    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    ) {
        let end_angle = if !clockwise && end_angle - start_angle == -TAU {
            start_angle + TAU
        } else {
            end_angle
        };

        let arc = EllipseArc::new(
            Point::new(x, y),
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            clockwise,
        );
        if arc.sweep() == 0.0 {
            let current = self.path.current_point().unwrap_or_else(|| {
                let p = self.emitter.position();
                Point::new(p.x, p.y)
            });
            self.path.line_to(current);
            return;
        }
        self.path.ellipse(arc.transformed(&self.transform));
    }

    /// Closed rectangle contour starting and ending at `(x, y)`.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.line_to(x, y);
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> FillReport {
        self.begin_path();
        self.rect(x, y, w, h);
        self.fill()
    }

    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.begin_path();
        self.rect(x, y, w, h);
        self.stroke();
    }

    /// Uses a snapshot of the current path as the clip region for later fills.
    pub fn clip(&mut self) {
        self.clip_region = Some(self.path.clone());
    }

    // Output

    /// Runs `body` once per depth layer.
    ///
    /// Every cut currently happens in a single layer at `-depth_of_cut`; `depth` is
    /// recorded for the multi-layer stepping this hook is reserved for.
    pub fn layers<R>(&mut self, body: impl FnOnce(&mut Self) -> R) -> R {
        body(self)
    }

    pub fn stroke(&mut self) {
        self.layers(|canvas| {
            info!("Stroking {} subpaths", canvas.path.subpaths().len());
            MotionTranslator::new(&mut canvas.emitter)
                .with_divisions(canvas.curve_divisions)
                .stroke_path(&canvas.path);
        });
    }

    /// Clears the interior of the current path, restricted to the clip region.
    ///
    /// Each inset pass is cut as soon as it is computed. The drawn path is left
    /// untouched.
    pub fn fill(&mut self) -> FillReport {
        let divisions = self.curve_divisions;
        let subject = self.path.polygons(divisions);
        let clip = self.clip_region.as_ref().map(|c| c.polygons(divisions));
        let settings = self.fill;

        let report = match settings.strategy {
            FillStrategy::Concentric => {
                let engine = FillEngine::new(&self.polygon_engine, settings);
                let emitter = &mut self.emitter;
                engine.run(&subject, clip.as_deref(), |pass| {
                    debug!("Cutting fill pass {} at inset {:.3}", pass.index, pass.inset);
                    let contours = Path::from_polygons(&pass.polygons);
                    MotionTranslator::new(&mut *emitter)
                        .with_divisions(divisions)
                        .stroke_path(&contours);
                })
            }
        };

        info!(
            "Fill cut {} passes ({} contours), stop: {:?}",
            report.passes, report.contours, report.stop
        );
        report
    }

    // Text

    fn glyph_paths(&self, text: &str) -> Result<Vec<Path>> {
        let descriptor = parse_font(&self.font)?;
        Ok(self.font_engine.render_text(text, &descriptor)?)
    }

    /// Replays glyph-local actions through the drawing calls.
    fn replay(&mut self, paths: &[Path]) {
        for path in paths {
            for subpath in path.subpaths() {
                for action in subpath.actions() {
                    match *action {
                        Action::MoveTo(p) => self.move_to(p.x, p.y),
                        Action::LineTo(p) => self.line_to(p.x, p.y),
                        Action::BezierCurveTo { ctrl1, ctrl2, to } => {
                            self.bezier_curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y)
                        }
                        Action::QuadraticCurveTo { ctrl, to } => {
                            self.quadratic_curve_to(ctrl.x, ctrl.y, to.x, to.y)
                        }
                        Action::Ellipse(arc) => self.ellipse(
                            arc.center.x,
                            arc.center.y,
                            arc.rx,
                            arc.ry,
                            arc.rotation,
                            arc.start_angle,
                            arc.end_angle,
                            arc.clockwise,
                        ),
                    }
                }
            }
        }
    }

    /// Fills `text` with its baseline starting at `(x, y)`. Starts a new path.
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<FillReport> {
        self.layers(|canvas| {
            let paths = canvas.glyph_paths(text)?;
            canvas.begin_path();
            canvas.save();
            canvas.translate(x, y);
            canvas.replay(&paths);
            let report = canvas.fill();
            canvas.restore();
            Ok(report)
        })
    }

    /// Strokes the outline of `text` with its baseline starting at `(x, y)`. Starts a
    /// new path.
    pub fn stroke_text(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        self.layers(|canvas| {
            let paths = canvas.glyph_paths(text)?;
            canvas.begin_path();
            canvas.save();
            canvas.translate(x, y);
            canvas.replay(&paths);
            canvas.stroke();
            canvas.restore();
            Ok(())
        })
    }

    /// Width is the rightmost glyph extent, height the tallest glyph above the
    /// baseline.
    pub fn measure_text(&self, text: &str) -> Result<TextMetrics> {
        let paths = self.glyph_paths(text)?;
        let metrics = paths
            .iter()
            .map(|p| p.bounding_box(self.curve_divisions))
            .filter(|b| !b.is_empty())
            .fold(TextMetrics::default(), |m, b| TextMetrics {
                width: m.width.max(b.max_x),
                height: m.height.max(b.max_y),
            });
        Ok(metrics)
    }
}

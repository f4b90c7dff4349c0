use gcanvas_core::Point;
use gcanvas_designer::{Canvas, FontDescriptor, FontEngine, FontError, Path};
use gcanvas_motion::{ArcSupport, Instruction, Motion, MotionSettings, RecordingDriver};

pub type RecordingCanvas = Canvas<Motion<RecordingDriver>>;

pub fn canvas() -> RecordingCanvas {
    canvas_with_arcs(ArcSupport::NONE)
}

pub fn canvas_with_arcs(arcs: ArcSupport) -> RecordingCanvas {
    let mut canvas = Canvas::new(Motion::new(
        RecordingDriver::new(arcs),
        MotionSettings::default(),
    ));
    canvas.set_font_engine(Box::new(BlockFont));
    canvas
}

pub fn instructions(canvas: &RecordingCanvas) -> &[Instruction] {
    canvas.emitter().driver().instructions()
}

/// Number of cutting moves (linear moves below the stock top).
pub fn cutting_moves(canvas: &RecordingCanvas) -> usize {
    instructions(canvas)
        .iter()
        .filter(|i| !i.is_rapid() && i.target().z < 0.0)
        .count()
}

/// Font engine drawing every character as a block 0.8 em wide and 1 em tall,
/// advancing 1 em per character. Spaces draw nothing.
pub struct BlockFont;

impl FontEngine for BlockFont {
    fn render_text(&self, text: &str, font: &FontDescriptor) -> Result<Vec<Path>, FontError> {
        if font.family == "Missing" {
            return Err(FontError::NotFound(font.family.clone()));
        }
        let em = font.size;
        Ok(text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| {
                let x = i as f64 * em;
                let mut path = Path::new();
                path.move_to(Point::new(x, 0.0));
                path.line_to(Point::new(x + 0.8 * em, 0.0));
                path.line_to(Point::new(x + 0.8 * em, em));
                path.line_to(Point::new(x, em));
                path.line_to(Point::new(x, 0.0));
                path
            })
            .collect())
    }
}

//! System font lookup and glyph outlines via `fontdb` and `rusttype`.

use crate::font::{FontDescriptor, FontEngine, FontError, FontStyle};
use crate::path::Path;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use gcanvas_core::Point;
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use std::{
    collections::HashMap,
    fs,
    sync::{Mutex, OnceLock},
};
use tracing::{debug, warn};

#[derive(Clone, Eq, PartialEq, Hash)]
struct FaceKey {
    family: String,
    weight: u16,
    italic: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());
        db
    })
}

fn families_for(name: &str) -> Vec<Family<'_>> {
    match name.trim() {
        "" | "Sans" | "sans-serif" => vec![Family::SansSerif],
        "Serif" | "serif" => vec![Family::Serif],
        "Monospace" | "monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    }
}

fn load_face(family: &str, weight: u16, italic: bool) -> Result<Font<'static>, FontError> {
    let families = families_for(family);
    let query = Query {
        families: &families,
        weight: Weight(weight),
        stretch: Stretch::Normal,
        style: if italic { Style::Italic } else { Style::Normal },
    };

    let not_found = || FontError::NotFound(family.to_string());
    let id = db().query(&query).ok_or_else(not_found)?;
    let face = db().face(id).ok_or_else(not_found)?;

    let bytes = match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            fs::read(path).map_err(|_| FontError::InvalidFontData(family.to_string()))?
        }
        fontdb::Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    let font = Font::try_from_vec_and_index(bytes, face.index)
        .ok_or_else(|| FontError::InvalidFontData(family.to_string()))?;

    if !face
        .families
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case(family))
    {
        warn!(
            "Font family '{}' not installed; using '{}'",
            family,
            face.families
                .first()
                .map(|(name, _)| name.as_str())
                .unwrap_or("unknown")
        );
    }
    Ok(font)
}

/// Font engine backed by the fonts installed on the system.
///
/// Faces are cached per family, weight and slant for the lifetime of the process.
/// Families that are not installed fall back to the system sans-serif face.
#[derive(Debug, Default, Clone, Copy)]
pub struct RusttypeFontEngine;

impl RusttypeFontEngine {
    pub fn new() -> Self {
        Self
    }

    fn font_for(&self, descriptor: &FontDescriptor) -> Result<&'static Font<'static>, FontError> {
        static CACHE: OnceLock<Mutex<HashMap<FaceKey, &'static Font<'static>>>> = OnceLock::new();
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

        let key = FaceKey {
            family: descriptor.family.clone(),
            weight: descriptor.weight.0,
            italic: descriptor.style != FontStyle::Normal,
        };

        if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
            return Ok(font);
        }

        let font: &'static Font<'static> =
            Box::leak(Box::new(load_face(&key.family, key.weight, key.italic)?));
        cache
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(key, font);
        Ok(font)
    }
}

impl FontEngine for RusttypeFontEngine {
    fn render_text(&self, text: &str, descriptor: &FontDescriptor) -> Result<Vec<Path>, FontError> {
        let font = self.font_for(descriptor)?;
        let scale = Scale::uniform(descriptor.size as f32);

        let paths = font
            .layout(text, scale, rt_point(0.0, 0.0))
            .filter_map(|glyph| {
                let mut builder = GlyphPathBuilder::default();
                glyph.build_outline(&mut builder).then_some(builder.path)
            })
            .collect::<Vec<_>>();
        debug!("Rendered {} glyph outlines for {:?}", paths.len(), text);
        Ok(paths)
    }
}

/// Collects a glyph outline into a [`Path`], flipping rusttype's downward Y axis.
#[derive(Default)]
struct GlyphPathBuilder {
    path: Path,
    start: Option<Point>,
}

fn glyph_point(x: f32, y: f32) -> Point {
    Point::new(x as f64, -(y as f64))
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = glyph_point(x, y);
        self.path.move_to(p);
        self.start = Some(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(glyph_point(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path
            .quadratic_curve_to(glyph_point(x1, y1), glyph_point(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path
            .bezier_curve_to(glyph_point(x1, y1), glyph_point(x2, y2), glyph_point(x, y));
    }

    fn close(&mut self) {
        if let (Some(start), Some(current)) = (self.start, self.path.current_point()) {
            if current != start {
                self.path.line_to(start);
            }
        }
    }
}

//! Font shorthand parsing and the font engine contract.
//!
//! Fonts are selected with a CSS-like shorthand:
//!
//! ```text
//! [style] [variant] [weight] <size><unit>[/<line-height>] <family>
//! ```
//!
//! e.g. `"7pt Helvetiker"` or `"italic bold 12px 'DejaVu Sans', sans-serif"`. Only the
//! first family of a comma separated list is used.

use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_FONT: &str = "7pt Helvetiker";

/// Errors raised while selecting or rendering a font.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    /// The font shorthand could not be parsed
    #[error("Invalid font shorthand '{0}'")]
    InvalidShorthand(String),

    /// No usable face was found for the requested family
    #[error("No font face available for '{0}'")]
    NotFound(String),

    /// A face was found but its data could not be read
    #[error("Invalid font data for '{0}'")]
    InvalidFontData(String),
}

impl From<FontError> for gcanvas_core::Error {
    fn from(err: FontError) -> Self {
        gcanvas_core::Error::Font(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

/// Numeric font weight, 100 to 900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);

    pub fn is_bold(&self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub style: FontStyle,
    pub variant: FontVariant,
    pub weight: FontWeight,
    /// Size in `unit`s, used as drawing units when rendering.
    pub size: f64,
    pub unit: String,
    pub line_height: Option<String>,
    pub family: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
            weight: FontWeight::NORMAL,
            size: 7.0,
            unit: "pt".to_string(),
            line_height: None,
            family: "Helvetiker".to_string(),
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Italic => write!(f, "italic ")?,
            FontStyle::Oblique => write!(f, "oblique ")?,
        }
        if self.variant == FontVariant::SmallCaps {
            write!(f, "small-caps ")?;
        }
        if self.weight != FontWeight::NORMAL {
            write!(f, "{} ", self.weight.0)?;
        }
        write!(f, "{}{}", self.size, self.unit)?;
        if let Some(lh) = &self.line_height {
            write!(f, "/{}", lh)?;
        }
        write!(f, " {}", self.family)
    }
}

impl FromStr for FontDescriptor {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_font(s)
    }
}

fn parse_weight(token: &str) -> Option<FontWeight> {
    match token {
        "bold" | "bolder" => Some(FontWeight::BOLD),
        "lighter" => Some(FontWeight(300)),
        _ => token
            .parse::<u16>()
            .ok()
            .filter(|w| (100..=900).contains(w) && w % 100 == 0)
            .map(FontWeight),
    }
}

/// Splits `"12pt"` into `(12.0, "pt")`.
fn parse_size(token: &str) -> Option<(f64, String)> {
    let split = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(token.len());
    let (number, unit) = token.split_at(split);
    let size: f64 = number.parse().ok()?;
    if !(size.is_finite() && size > 0.0) {
        return None;
    }
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return None;
    }
    Some((size, unit.to_string()))
}

/// Parses a font shorthand string.
pub fn parse_font(shorthand: &str) -> Result<FontDescriptor, FontError> {
    let invalid = || FontError::InvalidShorthand(shorthand.to_string());
    let mut descriptor = FontDescriptor::default();
    let mut tokens = shorthand.split_whitespace().peekable();

    let mut size_token = None;
    while let Some(token) = tokens.next() {
        match token {
            "normal" => {}
            "italic" => descriptor.style = FontStyle::Italic,
            "oblique" => descriptor.style = FontStyle::Oblique,
            "small-caps" => descriptor.variant = FontVariant::SmallCaps,
            other => {
                if let Some(weight) = parse_weight(other) {
                    descriptor.weight = weight;
                } else {
                    size_token = Some(other);
                    break;
                }
            }
        }
    }

    let size_token = size_token.ok_or_else(invalid)?;
    let (size_part, line_height) = match size_token.split_once('/') {
        Some((size, lh)) if !lh.is_empty() => (size, Some(lh.to_string())),
        Some(_) => return Err(invalid()),
        None => (size_token, None),
    };
    let (size, unit) = parse_size(size_part).ok_or_else(invalid)?;

    let rest: Vec<&str> = tokens.collect();
    let family = rest
        .join(" ")
        .split(',')
        .next()
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
        .unwrap_or_default();
    if family.is_empty() {
        return Err(invalid());
    }

    descriptor.size = size;
    descriptor.unit = unit;
    descriptor.line_height = line_height;
    descriptor.family = family;
    Ok(descriptor)
}

/// Text-to-outline collaborator.
///
/// Returns one [`Path`] per glyph in glyph-local coordinates: the baseline runs along
/// the X axis from the origin and Y grows upward, so a glyph's bounding box `max_y`
/// is its height above the baseline.
pub trait FontEngine {
    fn render_text(&self, text: &str, font: &FontDescriptor) -> Result<Vec<Path>, FontError>;
}

impl<T: FontEngine + ?Sized> FontEngine for Box<T> {
    fn render_text(&self, text: &str, font: &FontDescriptor) -> Result<Vec<Path>, FontError> {
        (**self).render_text(text, font)
    }
}

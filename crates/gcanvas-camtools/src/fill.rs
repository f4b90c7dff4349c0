//! Concentric area fill.
//!
//! A fill clears the interior of a polygon set by cutting successively smaller
//! insets of it. Pass `k` is the original region inset by `d/2 + k·d`, where `d`
//! is the tool diameter, so the first pass traces the boundary with the tool edge
//! and every later pass overlaps the previous one by exactly nothing. Offsetting
//! runs in a coordinate system scaled up by [`FillSettings::scale`] and is scaled
//! back afterwards, which keeps the engine's internal epsilons well below the
//! drawing resolution.

use crate::polygon::{scale_polygons, JoinStyle, Polygon, PolygonEngine};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How the interior is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStrategy {
    /// Concentric insets working inward from the boundary.
    #[default]
    Concentric,
}

/// Why a fill stopped producing passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An inset came back empty; the region is fully cleared.
    Exhausted,
    /// The inset distance reached the safety bound before the region was exhausted.
    SafetyBoundReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillSettings {
    pub tool_diameter: f64,
    /// Vertices closer than this are merged before filling.
    pub clean_tolerance: f64,
    /// Largest inset magnitude attempted, in drawing units.
    pub safety_bound: f64,
    /// Coordinate scale used while offsetting.
    pub scale: f64,
    pub join: JoinStyle,
    pub miter_limit: f64,
    pub strategy: FillStrategy,
}

impl Default for FillSettings {
    fn default() -> Self {
        Self {
            tool_diameter: 5.0,
            clean_tolerance: 0.1,
            safety_bound: 1000.0,
            scale: 1000.0,
            join: JoinStyle::Square,
            miter_limit: 1.0,
            strategy: FillStrategy::Concentric,
        }
    }
}

impl FillSettings {
    pub fn with_tool_diameter(tool_diameter: f64) -> Self {
        Self {
            tool_diameter,
            ..Default::default()
        }
    }
}

/// One inset of the fill region.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPass {
    pub index: usize,
    /// Signed inset distance applied to the prepared region (negative).
    pub inset: f64,
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillReport {
    pub passes: usize,
    pub contours: usize,
    pub stop: StopReason,
}

impl FillReport {
    pub fn is_empty(&self) -> bool {
        self.passes == 0
    }
}

/// Concentric fill driven by a [`PolygonEngine`].
#[derive(Debug, Clone)]
pub struct FillEngine<G: PolygonEngine> {
    engine: G,
    settings: FillSettings,
}

impl<G: PolygonEngine> FillEngine<G> {
    pub fn new(engine: G, settings: FillSettings) -> Self {
        Self { engine, settings }
    }

    pub fn settings(&self) -> &FillSettings {
        &self.settings
    }

    pub fn engine(&self) -> &G {
        &self.engine
    }

    /// Cleans the subject and, when a clip region is present, restricts it to that
    /// region.
    pub fn prepare(&self, subject: &[Polygon], clip: Option<&[Polygon]>) -> Vec<Polygon> {
        let tolerance = self.settings.clean_tolerance;
        let cleaned = self.engine.clean(subject, tolerance);
        match clip {
            Some(clip) if !cleaned.is_empty() => {
                let clip = self.engine.clean(clip, tolerance);
                self.engine.intersect(&cleaned, &clip)
            }
            _ => cleaned,
        }
    }

    /// Produces every pass in order, handing each one to `on_pass`.
    pub fn run<F>(&self, subject: &[Polygon], clip: Option<&[Polygon]>, mut on_pass: F) -> FillReport
    where
        F: FnMut(&FillPass),
    {
        let prepared = self.prepare(subject, clip);
        let mut report = FillReport {
            passes: 0,
            contours: 0,
            stop: StopReason::Exhausted,
        };
        if prepared.is_empty() {
            debug!("Fill region is empty after preparation");
            return report;
        }

        let FillSettings {
            tool_diameter: d,
            scale,
            safety_bound,
            join,
            miter_limit,
            ..
        } = self.settings;
        let scaled = scale_polygons(&prepared, scale);

        let mut index = 0;
        loop {
            let inset = -(d / 2.0 + index as f64 * d);
            if inset <= -safety_bound {
                warn!(
                    "Fill stopped at inset {:.3} after {} passes: safety bound {} reached",
                    inset, index, safety_bound
                );
                report.stop = StopReason::SafetyBoundReached;
                break;
            }

            let offset = self.engine.offset(&scaled, inset * scale, join, miter_limit);
            if offset.is_empty() {
                break;
            }
            let pass = FillPass {
                index,
                inset,
                polygons: scale_polygons(&offset, 1.0 / scale),
            };
            report.passes += 1;
            report.contours += pass.polygons.len();
            on_pass(&pass);
            index += 1;
        }

        debug!(
            "Fill finished with {} passes and {} contours",
            report.passes, report.contours
        );
        report
    }

    /// Collects every pass instead of streaming them.
    pub fn passes(&self, subject: &[Polygon], clip: Option<&[Polygon]>) -> (Vec<FillPass>, FillReport) {
        let mut passes = Vec::new();
        let report = self.run(subject, clip, |pass| passes.push(pass.clone()));
        (passes, report)
    }
}

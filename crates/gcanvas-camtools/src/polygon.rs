//! Polygon geometry engine.
//!
//! Polygons are closed point loops (the closing edge is implicit). Orientation
//! carries meaning: counter-clockwise loops (positive signed area) bound material,
//! clockwise loops are holes. [`PolygonEngine::clean`] establishes that convention
//! by resolving the raw loops under the nonzero winding rule; `intersect` and
//! `offset` rely on it.

use cavalier_contours::polyline::{
    BooleanOp, PlineOffsetOptions, PlineSource, PlineSourceMut, PlineVertex, Polyline,
};
use gcanvas_core::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::panic;
use tracing::{debug, warn};

pub type Polygon = Vec<Point>;

/// Corner treatment where an offset edge leaves a convex vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStyle {
    /// Corner cut square at the offset distance.
    #[default]
    Square,
    /// Circular arc around the vertex.
    Round,
    /// Sharp corner, squared off beyond the miter limit.
    Miter,
}

/// Polygon collaborator consumed by the fill engine.
pub trait PolygonEngine {
    /// Removes near-duplicate vertices and degenerate loops, then resolves overlaps
    /// under the nonzero winding rule. The result is non-overlapping material loops
    /// (CCW) and the holes cut into them (CW).
    fn clean(&self, polygons: &[Polygon], tolerance: f64) -> Vec<Polygon>;

    /// Area shared by both sets.
    fn intersect(&self, subject: &[Polygon], clip: &[Polygon]) -> Vec<Polygon>;

    /// Offsets the set by `distance`; negative values shrink material.
    fn offset(
        &self,
        polygons: &[Polygon],
        distance: f64,
        join: JoinStyle,
        miter_limit: f64,
    ) -> Vec<Polygon>;
}

impl<T: PolygonEngine + ?Sized> PolygonEngine for &T {
    fn clean(&self, polygons: &[Polygon], tolerance: f64) -> Vec<Polygon> {
        (**self).clean(polygons, tolerance)
    }

    fn intersect(&self, subject: &[Polygon], clip: &[Polygon]) -> Vec<Polygon> {
        (**self).intersect(subject, clip)
    }

    fn offset(
        &self,
        polygons: &[Polygon],
        distance: f64,
        join: JoinStyle,
        miter_limit: f64,
    ) -> Vec<Polygon> {
        (**self).offset(polygons, distance, join, miter_limit)
    }
}

/// Signed area, positive for counter-clockwise loops.
pub fn signed_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        sum += p1.x * p2.y - p2.x * p1.y;
    }
    sum / 2.0
}

pub fn is_hole(polygon: &[Point]) -> bool {
    signed_area(polygon) < 0.0
}

pub fn scale_polygons(polygons: &[Polygon], factor: f64) -> Vec<Polygon> {
    polygons
        .iter()
        .map(|poly| {
            poly.iter()
                .map(|p| Point::new_3d(p.x * factor, p.y * factor, p.z))
                .collect()
        })
        .collect()
}

/// Polygon engine backed by `cavalier_contours`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavalierEngine;

impl CavalierEngine {
    pub fn new() -> Self {
        Self
    }

    fn to_polyline(polygon: &[Point]) -> Polyline<f64> {
        let mut pline = Polyline::new();
        for p in polygon {
            pline.add_vertex(PlineVertex::new(p.x, p.y, 0.0));
        }
        pline.set_is_closed(true);
        pline
    }

    fn split_by_role(polygons: &[Polygon]) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
        let mut material = Vec::new();
        let mut holes = Vec::new();
        for poly in polygons.iter().filter(|p| p.len() >= 3) {
            if is_hole(poly) {
                holes.push(Self::to_polyline(poly));
            } else {
                material.push(Self::to_polyline(poly));
            }
        }
        (material, holes)
    }

    fn offset_pline(pline: &Polyline<f64>, offset: f64) -> Vec<Polyline<f64>> {
        let opts = PlineOffsetOptions {
            handle_self_intersects: true,
            ..Default::default()
        };
        match panic::catch_unwind(panic::AssertUnwindSafe(|| {
            pline.parallel_offset_opt(offset, &opts)
        })) {
            Ok(result) => result,
            Err(_) => {
                warn!("Panic during parallel offset of {} vertex polygon", pline.vertex_count());
                Vec::new()
            }
        }
    }

    /// Subtracts every hole from the material loops. Holes lying strictly inside a
    /// loop come back as holes of the result.
    fn subtract_holes(
        material: Vec<Polyline<f64>>,
        holes: &[Polyline<f64>],
    ) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
        let mut pos = material;
        let mut neg = Vec::new();
        for hole in holes {
            let mut next = Vec::with_capacity(pos.len());
            for pline in &pos {
                let result = pline.boolean(hole, BooleanOp::Not);
                next.extend(result.pos_plines.into_iter().map(|r| r.pline));
                neg.extend(result.neg_plines.into_iter().map(|r| r.pline));
            }
            pos = next;
        }
        (pos, neg)
    }

    /// Merges overlapping loops of one orientation. Returns the merged outlines and
    /// the gaps they enclose without covering.
    ///
    /// A loop lying entirely inside an existing gap is absorbed into the enclosing
    /// outline, so the gap stays open.
    fn union(plines: Vec<Polyline<f64>>) -> (Vec<Polyline<f64>>, Vec<Polyline<f64>>) {
        let mut regions: Vec<Polyline<f64>> = Vec::new();
        let mut gaps: Vec<Polyline<f64>> = Vec::new();
        for pline in plines {
            gaps = gaps
                .iter()
                .flat_map(|gap| {
                    gap.boolean(&pline, BooleanOp::Not)
                        .pos_plines
                        .into_iter()
                        .map(|r| r.pline)
                })
                .collect();

            let mut merged = pline;
            let mut i = 0;
            while i < regions.len() {
                let result = regions[i].boolean(&merged, BooleanOp::Or);
                let mut outlines = result.pos_plines;
                if outlines.len() == 1 {
                    if let Some(outline) = outlines.pop() {
                        merged = outline.pline;
                        gaps.extend(result.neg_plines.into_iter().map(|r| r.pline));
                        regions.swap_remove(i);
                        // The grown outline may now reach regions already passed.
                        i = 0;
                        continue;
                    }
                }
                i += 1;
            }
            regions.push(merged);
        }
        (regions, gaps)
    }

    fn intersect_all(a: &[Polyline<f64>], b: &[Polyline<f64>]) -> Vec<Polyline<f64>> {
        let mut out = Vec::new();
        for pa in a {
            for pb in b {
                out.extend(
                    pa.boolean(pb, BooleanOp::And)
                        .pos_plines
                        .into_iter()
                        .map(|r| r.pline),
                );
            }
        }
        out
    }

    fn collect(
        pos: &[Polyline<f64>],
        neg: &[Polyline<f64>],
        join: JoinStyle,
        miter_limit: f64,
    ) -> Vec<Polygon> {
        let mut out = Vec::with_capacity(pos.len() + neg.len());
        for (plines, hole) in [(pos, false), (neg, true)] {
            for pline in plines {
                let mut poly = polyline_to_polygon(pline, join, miter_limit);
                if poly.len() < 3 || signed_area(&poly).abs() < 1e-9 {
                    continue;
                }
                if is_hole(&poly) != hole {
                    poly.reverse();
                }
                out.push(poly);
            }
        }
        out
    }
}

impl PolygonEngine for CavalierEngine {
    fn clean(&self, polygons: &[Polygon], tolerance: f64) -> Vec<Polygon> {
        let cleaned: Vec<Polygon> = polygons
            .iter()
            .filter_map(|poly| dedupe_vertices(poly, tolerance))
            .filter(|poly| signed_area(poly).abs() > tolerance * tolerance)
            .collect();

        let (ccw, cw) = Self::split_by_role(&cleaned);
        let (ccw_regions, ccw_gaps) = Self::union(ccw);
        let (cw_regions, cw_gaps) = Self::union(cw);

        // Once each orientation is merged its winding is 0 or 1, so a point is
        // filled when exactly one orientation covers it.
        let mut pos = Vec::new();
        let mut neg = Vec::new();
        for (regions, gaps, other_regions, other_gaps) in [
            (&ccw_regions, &ccw_gaps, &cw_regions, &cw_gaps),
            (&cw_regions, &cw_gaps, &ccw_regions, &ccw_gaps),
        ] {
            let cuts: Vec<Polyline<f64>> = gaps.iter().chain(other_regions).cloned().collect();
            let (p, n) = Self::subtract_holes(regions.clone(), &cuts);
            pos.extend(p);
            neg.extend(n);

            // Inside a gap of the other orientation only this one counts.
            let exposed = Self::intersect_all(regions, other_gaps);
            let (p, n) = Self::subtract_holes(exposed, gaps);
            pos.extend(p);
            neg.extend(n);
        }
        debug!(
            "Cleaned {} loops into {} outlines and {} holes",
            cleaned.len(),
            pos.len(),
            neg.len()
        );
        Self::collect(&pos, &neg, JoinStyle::Miter, f64::INFINITY)
    }

    fn intersect(&self, subject: &[Polygon], clip: &[Polygon]) -> Vec<Polygon> {
        let (subject_pos, subject_neg) = Self::split_by_role(subject);
        let (clip_pos, clip_neg) = Self::split_by_role(clip);

        let mut out_pos = Vec::new();
        let mut out_neg = Vec::new();
        for ps in &subject_pos {
            for pc in &clip_pos {
                let result = ps.boolean(pc, BooleanOp::And);
                out_pos.extend(result.pos_plines.into_iter().map(|r| r.pline));
                out_neg.extend(result.neg_plines.into_iter().map(|r| r.pline));
            }
        }

        let holes: Vec<Polyline<f64>> = subject_neg.into_iter().chain(clip_neg).collect();
        let (pos, mut neg) = Self::subtract_holes(out_pos, &holes);
        neg.extend(out_neg);
        debug!(
            "Intersection produced {} loops and {} holes",
            pos.len(),
            neg.len()
        );
        Self::collect(&pos, &neg, JoinStyle::Miter, f64::INFINITY)
    }

    fn offset(
        &self,
        polygons: &[Polygon],
        distance: f64,
        join: JoinStyle,
        miter_limit: f64,
    ) -> Vec<Polygon> {
        let (material, holes) = Self::split_by_role(polygons);

        // Left of a CCW loop is inside, left of a CW hole is the surrounding material,
        // so the same left offset shrinks both.
        let left = -distance;
        let material: Vec<Polyline<f64>> = material
            .iter()
            .flat_map(|p| Self::offset_pline(p, left))
            .collect();
        if material.is_empty() {
            return Vec::new();
        }
        let holes: Vec<Polyline<f64>> = holes
            .iter()
            .flat_map(|p| Self::offset_pline(p, left))
            .collect();

        let (pos, neg) = Self::subtract_holes(material, &holes);
        Self::collect(&pos, &neg, join, miter_limit)
    }
}

fn dedupe_vertices(polygon: &[Point], tolerance: f64) -> Option<Polygon> {
    let first = *polygon.first()?;
    let mut out: Polygon = vec![first];
    for p in polygon.iter().skip(1) {
        if let Some(last) = out.last() {
            if last.distance_to(p) > tolerance {
                out.push(*p);
            }
        }
    }
    while out.len() > 1 && out[out.len() - 1].distance_to(&out[0]) <= tolerance {
        out.pop();
    }
    (out.len() >= 3).then_some(out)
}

/// Converts a polyline to a point loop, rendering every bulge (arc) segment with the
/// requested join style.
fn polyline_to_polygon(pline: &Polyline<f64>, join: JoinStyle, miter_limit: f64) -> Polygon {
    let count = pline.vertex_count();
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let v1 = pline.at(i);
        let v2 = pline.at((i + 1) % count);
        let start = Point::new(v1.x, v1.y);
        out.push(start);
        if v1.bulge.abs() > 1e-9 && (i + 1 < count || pline.is_closed()) {
            let end = Point::new(v2.x, v2.y);
            out.extend(join_points(start, end, v1.bulge, join, miter_limit));
        }
    }
    out
}

/// Interior points replacing the arc from `start` to `end` with the given bulge.
fn join_points(start: Point, end: Point, bulge: f64, join: JoinStyle, miter_limit: f64) -> Vec<Point> {
    let theta = 4.0 * bulge.atan();
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let chord = (dx * dx + dy * dy).sqrt();
    if chord < 1e-12 {
        return Vec::new();
    }
    let radius = chord / (2.0 * (theta.abs() / 2.0).sin());
    let (ux, uy) = (dx / chord, dy / chord);
    let rotate = |x: f64, y: f64, a: f64| {
        let (s, c) = a.sin_cos();
        (x * c - y * s, x * s + y * c)
    };
    let tangent_start = rotate(ux, uy, -theta / 2.0);
    let tangent_end = rotate(ux, uy, theta / 2.0);

    let square = || {
        let reach = radius * (theta.abs() / 4.0).tan();
        vec![
            Point::new(
                start.x + tangent_start.0 * reach,
                start.y + tangent_start.1 * reach,
            ),
            Point::new(end.x - tangent_end.0 * reach, end.y - tangent_end.1 * reach),
        ]
    };

    match join {
        JoinStyle::Square => square(),
        JoinStyle::Miter => {
            let half = theta.abs() / 2.0;
            if half < PI / 2.0 && 1.0 / half.cos() <= miter_limit {
                let reach = radius * half.tan();
                vec![Point::new(
                    start.x + tangent_start.0 * reach,
                    start.y + tangent_start.1 * reach,
                )]
            } else {
                square()
            }
        }
        JoinStyle::Round => {
            let normal = if theta > 0.0 {
                (-tangent_start.1, tangent_start.0)
            } else {
                (tangent_start.1, -tangent_start.0)
            };
            let cx = start.x + normal.0 * radius;
            let cy = start.y + normal.1 * radius;
            let a0 = (start.y - cy).atan2(start.x - cx);
            let steps = ((theta.abs() / (PI / 18.0)).ceil() as usize).max(1);
            (1..steps)
                .map(|k| {
                    let a = a0 + theta * k as f64 / steps as f64;
                    Point::new(cx + radius * a.cos(), cy + radius * a.sin())
                })
                .collect()
        }
    }
}

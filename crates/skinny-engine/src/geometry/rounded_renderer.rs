//! Tessellation of boxes with rounded (circular or elliptic) corners.
//!
//! Corners are walked with an [`ArcIterator`]; all four corners of one
//! outline share the step count of the largest radius so the line counts
//! only depend on that radius.

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::arc_iterator::ArcIterator;
use super::border_colors::{BoxBorderColors, EdgeColors};
use super::metrics::{BoxGeometry, CornerRadii};
use super::sweep::Row;
use super::vertex::LineVertex;

#[derive(Debug, Copy, Clone)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    const CLOCKWISE: [Corner; 4] =
        [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft];

    fn radius(self, radii: &CornerRadii) -> Vec2 {
        match self {
            Corner::TopLeft => radii.top_left,
            Corner::TopRight => radii.top_right,
            Corner::BottomRight => radii.bottom_right,
            Corner::BottomLeft => radii.bottom_left,
        }
    }

    fn center(self, rect: Rect, radii: &CornerRadii) -> Vec2 {
        let r = self.radius(radii);
        match self {
            Corner::TopLeft => Vec2::new(rect.left() + r.x, rect.top() + r.y),
            Corner::TopRight => Vec2::new(rect.right() - r.x, rect.top() + r.y),
            Corner::BottomRight => Vec2::new(rect.right() - r.x, rect.bottom() - r.y),
            Corner::BottomLeft => Vec2::new(rect.left() + r.x, rect.bottom() - r.y),
        }
    }

    /// Point of the clockwise corner walk, `(cos, sin)` running from
    /// `(1, 0)` to `(0, 1)`.
    fn point(self, rect: Rect, radii: &CornerRadii, cos: f64, sin: f64) -> Vec2 {
        let c = self.center(rect, radii);
        let r = self.radius(radii);
        let (cos, sin) = (cos as f32, sin as f32);
        match self {
            Corner::TopLeft => Vec2::new(c.x - r.x * cos, c.y - r.y * sin),
            Corner::TopRight => Vec2::new(c.x + r.x * sin, c.y - r.y * cos),
            Corner::BottomRight => Vec2::new(c.x + r.x * cos, c.y + r.y * sin),
            Corner::BottomLeft => Vec2::new(c.x - r.x * sin, c.y + r.y * cos),
        }
    }
}

#[inline]
fn step_count(radii: &CornerRadii) -> usize {
    ArcIterator::segment_hint(radii.max_radius() as f64)
}

// ── fill ──────────────────────────────────────────────────────────────────

/// `2 * (N + 1)` rows from top to bottom, `N` being the segment hint of the
/// largest inner radius.
///
/// The upper half walks the top corners from their top point down to their
/// centers, the lower half continues from the centers of the bottom corners
/// to their bottom point. Every row runs from left to right.
pub(crate) fn fill_rows(g: &BoxGeometry) -> Vec<Row> {
    let rect = g.inner;
    let radii = &g.inner_radii;
    let n = step_count(radii);

    let tl = Corner::TopLeft.center(rect, radii);
    let tr = Corner::TopRight.center(rect, radii);
    let br = Corner::BottomRight.center(rect, radii);
    let bl = Corner::BottomLeft.center(rect, radii);

    let mut rows = Vec::with_capacity(2 * (n + 1));

    for (cos, sin) in ArcIterator::quarter(n, true) {
        let (cos, sin) = (cos as f32, sin as f32);
        let left = Vec2::new(tl.x - radii.top_left.x * cos, tl.y - radii.top_left.y * sin);
        let right = Vec2::new(tr.x + radii.top_right.x * cos, tr.y - radii.top_right.y * sin);
        rows.push(Row::new(left, right, 0.5 * (left.y + right.y)));
    }

    for (cos, sin) in ArcIterator::quarter(n, false) {
        let (cos, sin) = (cos as f32, sin as f32);
        let left = Vec2::new(bl.x - radii.bottom_left.x * cos, bl.y + radii.bottom_left.y * sin);
        let right = Vec2::new(br.x + radii.bottom_right.x * cos, br.y + radii.bottom_right.y * sin);
        rows.push(Row::new(left, right, 0.5 * (left.y + right.y)));
    }

    rows
}

// ── border ────────────────────────────────────────────────────────────────

/// `4 * (N + 1) + 1` lines plus one per interior edge stop, `N` being the
/// segment hint of the largest outer radius.
pub(crate) fn border_count(g: &BoxGeometry, colors: Option<&BoxBorderColors>) -> usize {
    let n = step_count(&g.outer_radii);
    let stops: usize = EdgeColors::clockwise(colors).iter().map(|e| e.interior.len()).sum();
    4 * (n + 1) + 1 + stops
}

/// Border lines from the outer to the inner outline.
///
/// Corners fade from the end color of the edge before them to the start
/// color of the edge after them; the outline starts at the left end of the
/// top-left corner and closes there.
pub(crate) fn render_border<L: LineVertex>(
    g: &BoxGeometry,
    colors: Option<&BoxBorderColors>,
    out: &mut Vec<L>,
) {
    let n = step_count(&g.outer_radii);
    let edges = EdgeColors::clockwise(colors);

    let corner_lines: [Vec<(Vec2, Vec2)>; 4] = Corner::CLOCKWISE.map(|corner| {
        ArcIterator::quarter(n, false)
            .map(|(cos, sin)| {
                (
                    corner.point(g.outer, &g.outer_radii, cos, sin),
                    corner.point(g.inner, &g.inner_radii, cos, sin),
                )
            })
            .collect()
    });

    for k in 0..4 {
        let incoming = &edges[(k + 3) % 4];
        let outgoing = &edges[k];

        for (step, &(p1, p2)) in corner_lines[k].iter().enumerate() {
            let t = step as f32 / n as f32;
            push(out, p1, p2, Color::interpolated(incoming.end, outgoing.start, t));
        }

        let from = corner_lines[k].last();
        let to = corner_lines[(k + 1) % 4].first();
        if let (Some(&(o1, i1)), Some(&(o2, i2))) = (from, to) {
            for stop in &outgoing.interior {
                let p = stop.position;
                push(out, o1.lerp(o2, p), i1.lerp(i2, p), stop.color);
            }
        }
    }

    if let Some(&(p1, p2)) = corner_lines[0].first() {
        push(out, p1, p2, edges[3].end);
    }
}

#[inline]
fn push<L: LineVertex>(out: &mut Vec<L>, p1: Vec2, p2: Vec2, color: Color) {
    let rgba = color.premultiplied();
    out.push(L::from_points(p1, rgba, p2, rgba));
}

//! Tessellation of boxes without rounded corners.

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::border_colors::{BoxBorderColors, EdgeColors};
use super::metrics::BoxGeometry;
use super::sweep::Row;
use super::vertex::LineVertex;

/// Top and bottom edge of the fill rectangle.
pub(crate) fn fill_rows(g: &BoxGeometry) -> Vec<Row> {
    let r = g.inner;
    vec![
        Row::new(Vec2::new(r.left(), r.top()), Vec2::new(r.right(), r.top()), r.top()),
        Row::new(Vec2::new(r.left(), r.bottom()), Vec2::new(r.right(), r.bottom()), r.bottom()),
    ]
}

/// `5` lines plus one per corner where the edge color changes, plus one per
/// interior edge stop.
pub(crate) fn border_count(colors: Option<&BoxBorderColors>) -> usize {
    let edges = EdgeColors::clockwise(colors);

    let stops: usize = edges.iter().map(|e| e.interior.len()).sum();
    let breaks = (0..3).filter(|&k| edges[k].end != edges[k + 1].start).count();
    5 + breaks + stops
}

/// Border lines from the outer to the inner outline, clockwise from the
/// top-left corner and closing there again.
pub(crate) fn render_border<L: LineVertex>(
    g: &BoxGeometry,
    colors: Option<&BoxBorderColors>,
    out: &mut Vec<L>,
) {
    let outer = corners(g.outer);
    let inner = corners(g.inner);
    let edges = EdgeColors::clockwise(colors);

    push(out, outer[0], inner[0], edges[0].start);

    for (k, edge) in edges.iter().enumerate() {
        let (a, b) = (k, (k + 1) % 4);

        for stop in &edge.interior {
            let p = stop.position;
            push(out, outer[a].lerp(outer[b], p), inner[a].lerp(inner[b], p), stop.color);
        }

        push(out, outer[b], inner[b], edge.end);

        if let Some(next) = edges.get(k + 1) {
            if next.start != edge.end {
                push(out, outer[b], inner[b], next.start);
            }
        }
    }
}

/// Top-left, top-right, bottom-right, bottom-left.
fn corners(r: Rect) -> [Vec2; 4] {
    [
        Vec2::new(r.left(), r.top()),
        Vec2::new(r.right(), r.top()),
        Vec2::new(r.right(), r.bottom()),
        Vec2::new(r.left(), r.bottom()),
    ]
}

#[inline]
fn push<L: LineVertex>(out: &mut Vec<L>, p1: Vec2, p2: Vec2, color: Color) {
    let rgba = color.premultiplied();
    out.push(L::from_points(p1, rgba, p2, rgba));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BoxBorderMetrics, BoxShapeMetrics, ColoredLine};

    fn geometry() -> BoxGeometry {
        BoxGeometry::new(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            &BoxShapeMetrics::default(),
            &BoxBorderMetrics::uniform(2.0),
        )
    }

    #[test]
    fn monochrome_border_has_five_lines() {
        let colors = BoxBorderColors::from(Color::RED);
        let mut out: Vec<ColoredLine> = Vec::new();
        render_border(&geometry(), Some(&colors), &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(border_count(Some(&colors)), 5);
        assert_eq!(out[0], out[4]);
    }

    #[test]
    fn light_dark_border_has_seven_lines() {
        let colors = BoxBorderColors::light_dark(Color::WHITE, Color::BLACK);
        let mut out: Vec<ColoredLine> = Vec::new();
        render_border(&geometry(), Some(&colors), &mut out);
        assert_eq!(out.len(), 7);
        assert_eq!(border_count(Some(&colors)), 7);

        // Hard edge at the top-right corner: same points, both colors.
        assert_eq!(out[1].p1.pos(), out[2].p1.pos());
        assert!(out[1].has_color(Color::WHITE.premultiplied()));
        assert!(out[2].has_color(Color::BLACK.premultiplied()));
    }

    #[test]
    fn border_lines_run_outer_to_inner() {
        let mut out: Vec<ColoredLine> = Vec::new();
        render_border(&geometry(), None, &mut out);
        assert_eq!(out[0].p1.pos(), Vec2::new(0.0, 0.0));
        assert_eq!(out[0].p2.pos(), Vec2::new(2.0, 2.0));
        assert_eq!(out[2].p1.pos(), Vec2::new(100.0, 50.0));
        assert_eq!(out[2].p2.pos(), Vec2::new(98.0, 48.0));
    }

    #[test]
    fn fill_is_two_rows() {
        let rows = fill_rows(&geometry());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].p1, Vec2::new(2.0, 2.0));
        assert_eq!(rows[1].p2, Vec2::new(98.0, 48.0));
    }
}

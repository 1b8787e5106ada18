//! Row sweeps shared by the fill tessellators.
//!
//! A fill is a sequence of rows (lines) ordered along one axis. Colors are a
//! function of the sweep coordinate; every gradient stop the sweep crosses
//! gets a row of its own, interpolated between its neighbours, so that
//! color transitions sit exactly on a vertex.

use crate::coords::Vec2;
use crate::paint::{self, Color, GradientStop};

use super::gradient_cursor::GradientCursor;
use super::vertex::LineVertex;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Row {
    pub p1: Vec2,
    pub p2: Vec2,
    /// Sweep coordinate of the row.
    pub pos: f32,
}

impl Row {
    #[inline]
    pub fn new(p1: Vec2, p2: Vec2, pos: f32) -> Self {
        Self { p1, p2, pos }
    }

    fn lerp(self, to: Row, t: f32) -> Row {
        Row::new(self.p1.lerp(to.p1, t), self.p2.lerp(to.p2, t), self.pos + (to.pos - self.pos) * t)
    }
}

/// Gradient stops laid out along a sweep coordinate.
///
/// The position along the gradient grows with the coordinate; a gradient
/// running against the sweep is stored reverted.
#[derive(Debug, Clone)]
pub(crate) struct SweepColors {
    stops: Vec<GradientStop>,
    origin: f32,
    span: f32,
    monochrome: bool,
}

impl SweepColors {
    pub fn monochrome(color: Color) -> Self {
        Self {
            stops: vec![GradientStop::new(0.0, color), GradientStop::new(1.0, color)],
            origin: 0.0,
            span: 1.0,
            monochrome: true,
        }
    }

    /// Gradient position `0` at coordinate `start`, `1` at `end`.
    pub fn linear(stops: &[GradientStop], start: f32, end: f32) -> Self {
        if paint::is_monochrome(stops) || start == end || !(start - end).is_finite() {
            let c = stops.first().map_or(Color::Invalid, |s| s.color);
            return Self::monochrome(c);
        }

        let (stops, start, end) = if end < start {
            (paint::reverted_stops(stops), end, start)
        } else {
            (stops.to_vec(), start, end)
        };

        Self { stops, origin: start, span: end - start, monochrome: false }
    }

    #[inline]
    pub fn is_monochrome(&self) -> bool {
        self.monochrome
    }

    #[inline]
    pub fn position(&self, coord: f32) -> f32 {
        (coord - self.origin) / self.span
    }

    pub fn color(&self, coord: f32) -> Color {
        if self.monochrome {
            return self.stops[0].color;
        }
        paint::color_at(&self.stops, self.position(coord))
    }

    pub fn cursor(&self, first: f32, last: f32) -> GradientCursor {
        if self.monochrome {
            return GradientCursor::empty();
        }
        GradientCursor::new(&self.stops, self.position(first), self.position(last))
    }

    /// Extra rows a sweep from `first` to `last` inserts.
    pub fn insert_count(&self, first: f32, last: f32) -> usize {
        self.cursor(first, last).insert_count()
    }

    /// Coordinate of a gradient position.
    fn coord(&self, pos: f32) -> f32 {
        self.origin + pos * self.span
    }
}

/// Lines for `rows`, with one extra line per crossed stop when `colors` is
/// a gradient. Without colors the lines carry transparent black.
pub(crate) fn emit_rows<L: LineVertex>(rows: &[Row], colors: Option<&SweepColors>, out: &mut Vec<L>) {
    let rgba = match colors {
        None => [0.0; 4],
        Some(c) if c.is_monochrome() => c.color(0.0).premultiplied(),
        Some(colors) => return emit_colored_rows(rows, colors, out),
    };
    out.extend(rows.iter().map(|r| L::from_points(r.p1, rgba, r.p2, rgba)));
}

fn emit_colored_rows<L: LineVertex>(rows: &[Row], colors: &SweepColors, out: &mut Vec<L>) {
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return;
    };
    let mut cursor = colors.cursor(first.pos, last.pos);

    let mut prev: Option<Row> = None;
    for &row in rows {
        if let Some(prev) = prev {
            for stop in cursor.advance(colors.position(row.pos)) {
                let at = colors.coord(stop.position);
                let range = row.pos - prev.pos;
                let t = if range != 0.0 { (at - prev.pos) / range } else { 0.0 };
                let mid = prev.lerp(row, t.clamp(0.0, 1.0));
                let rgba = stop.color.premultiplied();
                out.push(L::from_points(mid.p1, rgba, mid.p2, rgba));
            }
        }

        let rgba = colors.color(row.pos).premultiplied();
        out.push(L::from_points(row.p1, rgba, row.p2, rgba));
        prev = Some(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ColoredLine;

    fn rows() -> Vec<Row> {
        vec![
            Row::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 0.0),
            Row::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0), 10.0),
        ]
    }

    #[test]
    fn stop_row_lands_on_position() {
        let stops = paint::build_stops(&[Color::RED, Color::GREEN, Color::BLUE], false);
        let colors = SweepColors::linear(&stops, 0.0, 10.0);
        let mut out: Vec<ColoredLine> = Vec::new();
        emit_rows(&rows(), Some(&colors), &mut out);

        assert_eq!(out.len(), 3);
        assert_eq!(out[1].p1.y, 5.0);
        assert!(out[1].has_color(Color::GREEN.premultiplied()));
        assert!(out[2].has_color(Color::BLUE.premultiplied()));
    }

    #[test]
    fn reversed_direction_reverts_stops() {
        let stops = paint::build_stops(&[Color::RED, Color::BLUE], false);
        let colors = SweepColors::linear(&stops, 10.0, 0.0);
        assert_eq!(colors.color(0.0), Color::BLUE);
        assert_eq!(colors.color(10.0), Color::RED);
    }

    #[test]
    fn monochrome_inserts_nothing() {
        let colors = SweepColors::monochrome(Color::RED);
        assert!(colors.is_monochrome());
        assert_eq!(colors.insert_count(0.0, 10.0), 0);

        let mut out: Vec<ColoredLine> = Vec::new();
        emit_rows(&rows(), Some(&colors), &mut out);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|l| l.has_color(Color::RED.premultiplied())));
    }

    #[test]
    fn single_color_stops_collapse_to_monochrome() {
        let stops = paint::build_stops(&[Color::GREEN, Color::GREEN], false);
        assert!(SweepColors::linear(&stops, 0.0, 10.0).is_monochrome());
        assert!(!SweepColors::linear(&paint::build_stops(&[Color::RED, Color::BLUE], false), 0.0, 10.0).is_monochrome());
    }
}

use crate::coords::{fuzzy_eq, Rect, Vec2};
use crate::paint::{Gradient, GradientType, SpreadMode};

use super::arc_iterator::ArcIterator;
use super::metrics::ArcMetrics;
use super::sweep::{self, Row, SweepColors};
use super::vertex::LineVertex;

const MIN_STEPS: usize = 3;
const MAX_STEPS: usize = 160;

/// Slack for gradient positions that should stay inside `[0, 1]`.
const RANGE_EPSILON: f32 = 1e-4;

/// How the inner outline of the arc is derived from the outer ellipse.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArcMode {
    /// Width equals height: a plain annulus.
    Circular,
    /// Offsets along the spokes from the center, the thickness scales with
    /// the radius on non-circular ellipses.
    Radial,
    /// Offsets along the ellipse normal: constant thickness on ellipses.
    Orthogonal,
}

/// One step of the sweep.
#[derive(Debug, Copy, Clone)]
struct ArcStep {
    outer: Vec2,
    /// Unit vector pointing away from the ring, perpendicular for
    /// `Orthogonal`, along the spoke otherwise.
    normal: Vec2,
    /// Unit vector along the sweep direction.
    tangent: Vec2,
    /// Fraction of the sweep, `0..=1`.
    progress: f32,
}

/// Tessellates an arc segment (pie, gauge, ring) inscribed into a rectangle.
///
/// Fill and border come out of one pass over the sweep. The fill lines run
/// across the ring from the outer to the inner outline; the border walks
/// the outer outline forward and the inner outline backward, closing an open
/// arc with flat caps perpendicular to the stroke.
#[derive(Debug, Clone)]
pub struct ArcRenderer<'a> {
    rect: Rect,
    metrics: ArcMetrics,
    mode: ArcMode,
    fill_gradient: Option<&'a Gradient>,
    border_gradient: Option<&'a Gradient>,
}

impl<'a> ArcRenderer<'a> {
    /// `radial` asks for spoke offsets on non-circular ellipses; circles
    /// always use the circular mode.
    pub fn new(rect: Rect, metrics: &ArcMetrics, radial: bool) -> Self {
        let rect = rect.normalized();
        let mode = if rect.is_square() {
            ArcMode::Circular
        } else if radial {
            ArcMode::Radial
        } else {
            ArcMode::Orthogonal
        };

        Self {
            rect,
            metrics: metrics.to_absolute(rect.size),
            mode,
            fill_gradient: None,
            border_gradient: None,
        }
    }

    /// Colors for the fill; `None` renders flat geometry.
    pub fn with_fill_gradient(mut self, gradient: Option<&'a Gradient>) -> Self {
        self.fill_gradient = gradient;
        self
    }

    /// Colors for the border; `None` renders flat geometry.
    pub fn with_border_gradient(mut self, gradient: Option<&'a Gradient>) -> Self {
        self.border_gradient = gradient;
        self
    }

    #[inline]
    pub fn mode(&self) -> ArcMode {
        self.mode
    }

    /// Absolute metrics the renderer works with.
    #[inline]
    pub fn metrics(&self) -> &ArcMetrics {
        &self.metrics
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.rect.is_empty() || self.metrics.is_null()
    }

    fn step_count(&self) -> usize {
        let radius = 0.5 * self.rect.width().max(self.rect.height());
        let span = self.metrics.span_angle.abs().to_radians();
        ((span * radius / 3.0).ceil() as usize).clamp(MIN_STEPS, MAX_STEPS)
    }

    /// Lines of one outline: one per step boundary.
    pub fn arc_line_count(&self) -> usize {
        if self.is_null() { 0 } else { self.step_count() + 1 }
    }

    /// Thickness the ring can hold: at most half the shorter side.
    #[inline]
    fn clamped_thickness(&self, thickness: f32) -> f32 {
        thickness.clamp(0.0, 0.5 * self.rect.width().min(self.rect.height()))
    }

    /// Fill lines: one per step boundary plus one per gradient stop crossed.
    /// Zero once the border covers the (clamped) ring.
    pub fn fill_count(&self, thickness: f32, border: f32) -> usize {
        if self.is_null() || !has_fill(self.clamped_thickness(thickness), border) {
            return 0;
        }
        let inserted = self
            .fill_colors()
            .map_or(0, |colors| colors.insert_count(0.0, 1.0));
        self.arc_line_count() + inserted
    }

    /// `2 * arc_line_count`, plus `6` cap lines for open arcs.
    pub fn border_count(&self, border: f32) -> usize {
        if self.is_null() || !(border > 0.0) {
            return 0;
        }
        let caps = if self.metrics.is_closed() { 0 } else { 6 };
        2 * self.arc_line_count() + caps
    }

    /// Renders fill and border in one sweep. Either buffer may be `None`.
    ///
    /// Fill lines run from `outer - border` to `inner + border`. Border lines
    /// of a closed arc: the outer ring forward, the inner ring backward. An
    /// open arc adds a start cap (3 lines) before the outer ring and an end
    /// cap (3 lines) between the rings; each cap starts with a degenerate
    /// line and widens to the full border width along the stroke.
    pub fn render_arc<F: LineVertex, B: LineVertex>(
        &self,
        thickness: f32,
        border: f32,
        fill: Option<&mut Vec<F>>,
        border_lines: Option<&mut Vec<B>>,
    ) {
        if self.is_null() {
            return;
        }

        let thickness = self.clamped_thickness(thickness);
        let steps = self.sweep();

        if let Some(out) = fill {
            if has_fill(thickness, border) {
                self.render_fill_lines(&steps, thickness, border.max(0.0), out);
            }
        }

        if let Some(out) = border_lines {
            if border > 0.0 {
                self.render_border_lines(&steps, thickness, border.min(0.5 * thickness), out);
            }
        }
    }

    pub fn render_fill<L: LineVertex>(&self, thickness: f32, border: f32, out: &mut Vec<L>) {
        self.render_arc::<L, L>(thickness, border, Some(out), None);
    }

    pub fn render_border<L: LineVertex>(&self, thickness: f32, border: f32, out: &mut Vec<L>) {
        self.render_arc::<L, L>(thickness, border, None, Some(out));
    }

    /// Whether `gradient` can be rendered as vertex colors along this arc.
    ///
    /// Monochrome and `Stops` gradients always can. A conic gradient only
    /// when it turns around the center of a circular arc, does not repeat
    /// and its positions along the sweep stay inside `[0, 1]`; anything the
    /// check cannot confirm goes to the shader. Linear and radial gradients
    /// never can.
    pub fn is_gradient_supported(&self, gradient: &Gradient) -> bool {
        if !gradient.is_valid() {
            return false;
        }
        if gradient.is_monochrome() {
            return true;
        }
        match gradient.kind() {
            GradientType::Stops => true,
            GradientType::Conic => self.conic_range(gradient).is_some(),
            GradientType::Linear | GradientType::Radial => false,
        }
    }

    // ── sweep ─────────────────────────────────────────────────────────────

    fn sweep(&self) -> Vec<ArcStep> {
        let n = self.step_count();
        let center = self.rect.center();
        let (rx, ry) = (0.5 * self.rect.width(), 0.5 * self.rect.height());

        let start = (self.metrics.start_angle as f64).to_radians();
        let span = (self.metrics.span_angle as f64).to_radians();
        let (cos0, sin0) = (start.cos(), start.sin());
        let direction: f32 = if span < 0.0 { -1.0 } else { 1.0 };

        ArcIterator::new(span, n, false)
            .enumerate()
            .map(|(k, (cos, sin))| {
                // Rotate by the start angle; +Y points down on screen.
                let c = (cos0 * cos - sin0 * sin) as f32;
                let s = (sin0 * cos + cos0 * sin) as f32;

                let outer = Vec2::new(center.x + rx * c, center.y - ry * s);
                let normal = match self.mode {
                    ArcMode::Circular | ArcMode::Radial => Vec2::new(c, -s),
                    ArcMode::Orthogonal => Vec2::new(ry * c, -rx * s).normalized(),
                };
                let tangent = (Vec2::new(-rx * s, -ry * c) * direction).normalized();

                ArcStep { outer, normal, tangent, progress: k as f32 / n as f32 }
            })
            .collect()
    }

    fn render_fill_lines<L: LineVertex>(
        &self,
        steps: &[ArcStep],
        thickness: f32,
        border: f32,
        out: &mut Vec<L>,
    ) {
        let rows: Vec<Row> = steps
            .iter()
            .map(|s| {
                let inner = s.outer - s.normal * thickness;
                Row::new(s.outer - s.normal * border, inner + s.normal * border, s.progress)
            })
            .collect();

        sweep::emit_rows(&rows, self.fill_colors().as_ref(), out);
    }

    fn render_border_lines<L: LineVertex>(
        &self,
        steps: &[ArcStep],
        thickness: f32,
        border: f32,
        out: &mut Vec<L>,
    ) {
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return;
        };

        let colors = self.border_colors();
        let rgba = |progress: f32| match &colors {
            Some(c) => c.color(progress).premultiplied(),
            None => [0.0; 4],
        };
        let mut push = |p1: Vec2, p2: Vec2, progress: f32| {
            let c = rgba(progress);
            out.push(L::from_points(p1, c, p2, c));
        };

        let inner = |s: &ArcStep| s.outer - s.normal * thickness;
        let closed = self.metrics.is_closed();

        if !closed {
            let (i, o, t) = (inner(first), first.outer, first.tangent * border);
            push(i, i, 0.0);
            push(i, i + t, 0.0);
            push(o, o + t, 0.0);
        }

        for s in steps {
            push(s.outer, s.outer - s.normal * border, s.progress);
        }

        if !closed {
            let (i, o, t) = (inner(last), last.outer, last.tangent * border);
            push(o, o, 1.0);
            push(o, o - t, 1.0);
            push(i, i - t, 1.0);
        }

        for s in steps.iter().rev() {
            let i = inner(s);
            push(i, i + s.normal * border, s.progress);
        }
    }

    // ── colors ────────────────────────────────────────────────────────────

    fn fill_colors(&self) -> Option<SweepColors> {
        self.fill_gradient.map(|g| self.sweep_colors(g))
    }

    fn border_colors(&self) -> Option<SweepColors> {
        self.border_gradient.map(|g| self.sweep_colors(g))
    }

    /// Gradient laid out along the sweep progress.
    fn sweep_colors(&self, gradient: &Gradient) -> SweepColors {
        if gradient.is_monochrome() || !gradient.is_valid() {
            return SweepColors::monochrome(gradient.start_color());
        }

        match gradient.kind() {
            GradientType::Stops => SweepColors::linear(gradient.stops(), 0.0, 1.0),
            GradientType::Conic => match self.conic_range(gradient) {
                Some((p_start, p_end)) => {
                    // Progress values where the gradient reaches 0 and 1.
                    let d = p_end - p_start;
                    SweepColors::linear(gradient.stops(), -p_start / d, (1.0 - p_start) / d)
                }
                None => self.unsupported(gradient),
            },
            GradientType::Linear | GradientType::Radial => self.unsupported(gradient),
        }
    }

    fn unsupported(&self, gradient: &Gradient) -> SweepColors {
        log::debug!(
            "{:?} gradient has no vertex color layout on an arc; using its start color",
            gradient.kind()
        );
        SweepColors::monochrome(gradient.start_color())
    }

    /// Conic positions at the start and the end of the sweep, when the
    /// gradient maps linearly onto the sweep.
    fn conic_range(&self, gradient: &Gradient) -> Option<(f32, f32)> {
        if gradient.spread() != SpreadMode::Pad || self.mode != ArcMode::Circular {
            return None;
        }

        let dir = gradient.stretched_to(self.rect).conic_direction()?;
        let center = self.rect.center();
        let tolerance = 1e-3 * self.rect.width().max(1.0);
        if (dir.center - center).length() > tolerance {
            return None;
        }

        let span = dir.span_angle;
        if span == 0.0 || !(span.abs() <= 360.0) {
            return None;
        }

        let offset = self.metrics.start_angle - dir.start_angle;
        let offset = if span > 0.0 {
            offset.rem_euclid(360.0)
        } else {
            -(-offset).rem_euclid(360.0)
        };

        let p_start = offset / span;
        let p_end = p_start + self.metrics.span_angle / span;

        let inside = |p: f32| (-RANGE_EPSILON..=1.0 + RANGE_EPSILON).contains(&p);
        if inside(p_start) && inside(p_end) && !fuzzy_eq(p_start, p_end) {
            Some((p_start, p_end))
        } else {
            None
        }
    }
}

#[inline]
fn has_fill(thickness: f32, border: f32) -> bool {
    thickness > 0.0 && 2.0 * border.max(0.0) < thickness
}

use crate::coords::Rect;
use crate::paint::{Gradient, SpreadMode};

use super::border_colors::BoxBorderColors;
use super::metrics::{BoxBorderMetrics, BoxGeometry, BoxShapeMetrics};
use super::sweep::{self, Row, SweepColors};
use super::vertex::LineVertex;
use super::{rect_renderer, rounded_renderer};

/// Slack allowed when checking that a gradient covers the fill.
const COVER_EPSILON: f32 = 1e-4;

/// Tessellates one box (rectangle with optional rounded corners and border)
/// into line buffers.
///
/// The fill covers the area inside the border. Boxes whose corners are not
/// rounded go through the plain rectangle path, everything else through the
/// rounded path.
///
/// Gradients are resolved against the fill rectangle. Vertical gradients
/// sweep rows from top to bottom, horizontal ones are tessellated on the
/// transposed box, which turns the rows into columns running from left to
/// right.
#[derive(Debug, Clone)]
pub struct BoxRenderer {
    geometry: BoxGeometry,
}

struct FillPlan {
    geometry: BoxGeometry,
    colors: Option<SweepColors>,
    transposed: bool,
}

impl BoxRenderer {
    pub fn new(rect: Rect, shape: &BoxShapeMetrics, border: &BoxBorderMetrics) -> Self {
        Self { geometry: BoxGeometry::new(rect, shape, border) }
    }

    #[inline]
    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    // ── fill ──────────────────────────────────────────────────────────────

    /// Lines [`render_fill`](Self::render_fill) produces for `gradient`.
    pub fn fill_count(&self, gradient: Option<&Gradient>) -> usize {
        let Some(plan) = self.fill_plan(gradient) else {
            return 0;
        };
        let rows = fill_rows(&plan.geometry);
        let inserted = match (&plan.colors, rows.first(), rows.last()) {
            (Some(colors), Some(first), Some(last)) => colors.insert_count(first.pos, last.pos),
            _ => 0,
        };
        rows.len() + inserted
    }

    /// Appends the fill lines. `None` renders flat (uncolored) geometry.
    pub fn render_fill<L: LineVertex>(&self, gradient: Option<&Gradient>, out: &mut Vec<L>) {
        let Some(plan) = self.fill_plan(gradient) else {
            return;
        };
        let rows = fill_rows(&plan.geometry);

        if plan.transposed {
            let start = out.len();
            sweep::emit_rows(&rows, plan.colors.as_ref(), out);
            for line in &mut out[start..] {
                *line = line.transposed();
            }
        } else {
            sweep::emit_rows(&rows, plan.colors.as_ref(), out);
        }
    }

    // ── border ────────────────────────────────────────────────────────────

    pub fn border_count(&self, colors: Option<&BoxBorderColors>) -> usize {
        let g = &self.geometry;
        if !g.has_border() || g.outer.is_empty() {
            0
        } else if g.outer_radii.is_zero() {
            rect_renderer::border_count(colors)
        } else {
            rounded_renderer::border_count(g, colors)
        }
    }

    /// Appends the border lines. `None` renders flat (uncolored) geometry.
    pub fn render_border<L: LineVertex>(&self, colors: Option<&BoxBorderColors>, out: &mut Vec<L>) {
        let g = &self.geometry;
        if !g.has_border() || g.outer.is_empty() {
            return;
        }
        if g.outer_radii.is_zero() {
            rect_renderer::render_border(g, colors, out);
        } else {
            rounded_renderer::render_border(g, colors, out);
        }
    }

    // ── gradient support ──────────────────────────────────────────────────

    /// Whether `gradient` can be rendered as vertex colors on this box.
    ///
    /// True for monochrome gradients and for vertical or horizontal linear
    /// gradients (including `Stops`) as long as the rows of the sweep stay
    /// level and, for `Repeat`/`Reflect`, the gradient covers the fill
    /// without repeating. Diagonal, radial and conic gradients need a
    /// shader.
    pub fn is_gradient_supported(&self, gradient: &Gradient) -> bool {
        if !gradient.is_valid() {
            return false;
        }
        if gradient.is_monochrome() {
            return true;
        }

        let inner = self.geometry.inner;
        let Some(dir) = gradient.stretched_to(inner).linear_direction() else {
            return false;
        };

        let (geometry, start, end) = if dir.is_vertical() {
            (self.geometry, dir.start.y, dir.end.y)
        } else if dir.is_horizontal() {
            (self.geometry.transposed(), dir.start.x, dir.end.x)
        } else {
            return false;
        };

        if !geometry.inner_radii.is_zero() && !geometry.has_level_rows() {
            return false;
        }

        gradient.spread() == SpreadMode::Pad || covers(geometry.inner, start, end)
    }

    fn fill_plan(&self, gradient: Option<&Gradient>) -> Option<FillPlan> {
        if !self.geometry.has_fill() {
            return None;
        }

        let Some(gradient) = gradient else {
            return Some(FillPlan { geometry: self.geometry, colors: None, transposed: false });
        };

        if gradient.is_monochrome() || !gradient.is_valid() {
            return Some(FillPlan {
                geometry: self.geometry,
                colors: Some(SweepColors::monochrome(gradient.start_color())),
                transposed: false,
            });
        }

        let stops = gradient.stops();
        let dir = gradient.stretched_to(self.geometry.inner).linear_direction();

        let plan = match dir {
            Some(d) if d.is_vertical() => FillPlan {
                geometry: self.geometry,
                colors: Some(SweepColors::linear(stops, d.start.y, d.end.y)),
                transposed: false,
            },
            Some(d) if d.is_horizontal() => FillPlan {
                geometry: self.geometry.transposed(),
                colors: Some(SweepColors::linear(stops, d.start.x, d.end.x)),
                transposed: true,
            },
            _ => {
                log::debug!(
                    "{:?} gradient has no vertex color layout on a box; using its start color",
                    gradient.kind()
                );
                FillPlan {
                    geometry: self.geometry,
                    colors: Some(SweepColors::monochrome(gradient.start_color())),
                    transposed: false,
                }
            }
        };

        Some(plan)
    }
}

fn fill_rows(g: &BoxGeometry) -> Vec<Row> {
    if g.inner_radii.is_zero() {
        rect_renderer::fill_rows(g)
    } else {
        rounded_renderer::fill_rows(g)
    }
}

/// The gradient range `[start, end]` contains the top and bottom of `rect`.
fn covers(rect: Rect, start: f32, end: f32) -> bool {
    let span = end - start;
    if span == 0.0 {
        return false;
    }
    let p1 = (rect.top() - start) / span;
    let p2 = (rect.bottom() - start) / span;
    let inside = |p: f32| (-COVER_EPSILON..=1.0 + COVER_EPSILON).contains(&p);
    inside(p1) && inside(p2)
}

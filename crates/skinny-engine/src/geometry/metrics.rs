use crate::coords::{fuzzy_eq, Rect, Vec2};
use crate::hash::HashFold;

/// Whether a metric is given in logical pixels or relative to the size of
/// the rectangle it gets applied to.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SizeMode {
    #[default]
    Absolute,
    /// Percentage (`0..=100`).
    Relative,
}

/// Per-corner radii (`x`, `y`) in logical pixels.
///
/// Corners follow CSS convention: top-left, top-right, bottom-right, bottom-left.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CornerRadii {
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub bottom_right: Vec2,
    pub bottom_left: Vec2,
}

impl CornerRadii {
    #[inline]
    pub const fn new(top_left: Vec2, top_right: Vec2, bottom_right: Vec2, bottom_left: Vec2) -> Self {
        Self { top_left, top_right, bottom_right, bottom_left }
    }

    /// Uniform circular radius on all four corners.
    #[inline]
    pub const fn all(r: f32) -> Self {
        let v = Vec2::new(r, r);
        Self { top_left: v, top_right: v, bottom_right: v, bottom_left: v }
    }

    #[inline]
    pub fn as_array(self) -> [Vec2; 4] {
        [self.top_left, self.top_right, self.bottom_right, self.bottom_left]
    }

    /// True when no corner is rounded.
    pub fn is_zero(self) -> bool {
        self.as_array().iter().all(|r| r.x <= 0.0 || r.y <= 0.0)
    }

    /// Largest radius component of any corner.
    pub fn max_radius(self) -> f32 {
        self.as_array().iter().fold(0.0f32, |m, r| m.max(r.x).max(r.y))
    }

    /// Mirrored at the main diagonal: top-right and bottom-left swap places
    /// and every radius swaps its components.
    pub fn transposed(self) -> Self {
        Self {
            top_left: self.top_left.transposed(),
            top_right: self.bottom_left.transposed(),
            bottom_right: self.bottom_right.transposed(),
            bottom_left: self.top_right.transposed(),
        }
    }

    /// Radii of the corners left once `widths` (`left, top, right, bottom`)
    /// are cut off the outline: `max(r - width, 0)` per axis.
    pub fn inset(self, widths: [f32; 4]) -> Self {
        let [l, t, r, b] = widths;
        let shrink = |radius: Vec2, wx: f32, wy: f32| {
            Vec2::new((radius.x - wx).max(0.0), (radius.y - wy).max(0.0))
        };
        Self {
            top_left: shrink(self.top_left, l, t),
            top_right: shrink(self.top_right, r, t),
            bottom_right: shrink(self.bottom_right, r, b),
            bottom_left: shrink(self.bottom_left, l, b),
        }
    }
}

// ── box shape ─────────────────────────────────────────────────────────────

/// Corner rounding of a box.
///
/// A corner with a negative radius falls back to `uniform`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxShapeMetrics {
    pub uniform: f32,
    pub corners: [Vec2; 4],
    pub size_mode: SizeMode,
}

impl Default for BoxShapeMetrics {
    fn default() -> Self {
        Self::uniform(0.0)
    }
}

impl BoxShapeMetrics {
    /// Same circular radius on every corner.
    pub const fn uniform(radius: f32) -> Self {
        let unset = Vec2::new(-1.0, -1.0);
        Self { uniform: radius, corners: [unset; 4], size_mode: SizeMode::Absolute }
    }

    /// Circular radii for top-left, top-right, bottom-right, bottom-left.
    pub fn with_corners(tl: f32, tr: f32, br: f32, bl: f32) -> Self {
        Self {
            uniform: 0.0,
            corners: [tl, tr, br, bl].map(|r| Vec2::new(r, r)),
            size_mode: SizeMode::Absolute,
        }
    }

    #[inline]
    pub fn with_size_mode(mut self, size_mode: SizeMode) -> Self {
        self.size_mode = size_mode;
        self
    }

    /// Replaces one corner (`0` = top-left, clockwise) by an elliptic radius.
    #[inline]
    pub fn with_corner(mut self, index: usize, radius: Vec2) -> Self {
        if let Some(c) = self.corners.get_mut(index) {
            *c = radius;
        }
        self
    }

    /// Absolute radii for a box of `size`.
    ///
    /// Relative radii are percentages of half the width (x) and half the
    /// height (y). Circular radii are clamped so that `2 * r <= min(w, h)`,
    /// elliptic ones per axis.
    pub fn to_absolute(&self, size: Vec2) -> CornerRadii {
        let (w, h) = (size.x.max(0.0), size.y.max(0.0));

        let resolve = |c: Vec2| {
            let pick = |v: f32| if v < 0.0 { self.uniform.max(0.0) } else { v };
            let mut r = Vec2::new(pick(c.x), pick(c.y));
            if self.size_mode == SizeMode::Relative {
                r = Vec2::new(0.005 * r.x.min(100.0) * w, 0.005 * r.y.min(100.0) * h);
            }

            if self.size_mode == SizeMode::Absolute && r.x == r.y {
                let max = 0.5 * w.min(h);
                Vec2::new(r.x.min(max), r.y.min(max))
            } else {
                Vec2::new(r.x.min(0.5 * w), r.y.min(0.5 * h))
            }
        };

        let [tl, tr, br, bl] = self.corners;
        CornerRadii::new(resolve(tl), resolve(tr), resolve(br), resolve(bl))
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        h.f32(self.uniform).u8(self.size_mode as u8);
        for c in self.corners {
            h.f32(c.x).f32(c.y);
        }
    }
}

// ── box border ────────────────────────────────────────────────────────────

/// Border widths per edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BoxBorderMetrics {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub size_mode: SizeMode,
}

impl BoxBorderMetrics {
    pub const fn uniform(width: f32) -> Self {
        Self { left: width, top: width, right: width, bottom: width, size_mode: SizeMode::Absolute }
    }

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom, size_mode: SizeMode::Absolute }
    }

    #[inline]
    pub fn with_size_mode(mut self, size_mode: SizeMode) -> Self {
        self.size_mode = size_mode;
        self
    }

    #[inline]
    pub fn widths(&self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn is_null(&self) -> bool {
        self.widths().iter().all(|w| !(*w > 0.0))
    }

    /// Absolute widths (`left, top, right, bottom`) for a box of `size`.
    ///
    /// Relative widths are percentages of half the shorter side. Each width
    /// is clamped to half the extent it cuts into.
    pub fn to_absolute(&self, size: Vec2) -> [f32; 4] {
        let (w, h) = (size.x.max(0.0), size.y.max(0.0));
        let scale = match self.size_mode {
            SizeMode::Absolute => 1.0,
            SizeMode::Relative => 0.005 * w.min(h),
        };
        let clamp = |v: f32, extent: f32| {
            if v > 0.0 { (v * scale).min(0.5 * extent) } else { 0.0 }
        };

        [clamp(self.left, w), clamp(self.top, h), clamp(self.right, w), clamp(self.bottom, h)]
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        h.u8(self.size_mode as u8);
        for v in self.widths() {
            h.f32(v);
        }
    }
}

// ── arc ───────────────────────────────────────────────────────────────────

/// Angles in degrees, counter-clockwise from 3 o'clock. A negative span
/// runs clockwise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcMetrics {
    pub start_angle: f32,
    pub span_angle: f32,
    pub thickness: f32,
    pub size_mode: SizeMode,
}

impl Default for ArcMetrics {
    fn default() -> Self {
        Self::new(0.0, 360.0, 0.0)
    }
}

impl ArcMetrics {
    pub const fn new(start_angle: f32, span_angle: f32, thickness: f32) -> Self {
        Self { start_angle, span_angle, thickness, size_mode: SizeMode::Absolute }
    }

    #[inline]
    pub fn with_size_mode(mut self, size_mode: SizeMode) -> Self {
        self.size_mode = size_mode;
        self
    }

    #[inline]
    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.span_angle
    }

    /// A full turn (or more) is drawn as a closed ring.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.span_angle.abs() >= 360.0
    }

    /// Nothing to draw.
    pub fn is_null(&self) -> bool {
        !(self.thickness > 0.0) || self.span_angle == 0.0 || !self.span_angle.is_finite()
    }

    /// Absolute metrics for an arc inscribed into a rectangle of `size`.
    ///
    /// Relative thickness is a percentage of half the shorter side; the
    /// result never exceeds that half. Spans are limited to one turn.
    pub fn to_absolute(&self, size: Vec2) -> ArcMetrics {
        let half = 0.5 * size.x.min(size.y).max(0.0);
        let thickness = match self.size_mode {
            SizeMode::Absolute => self.thickness,
            SizeMode::Relative => 0.01 * self.thickness * half,
        };

        ArcMetrics {
            start_angle: self.start_angle,
            span_angle: self.span_angle.clamp(-360.0, 360.0),
            thickness: thickness.clamp(0.0, half),
            size_mode: SizeMode::Absolute,
        }
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        h.f32(self.start_angle)
            .f32(self.span_angle)
            .f32(self.thickness)
            .u8(self.size_mode as u8);
    }
}

/// Resolved geometry of a box: outer outline, inner (fill) outline and the
/// radii of both.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoxGeometry {
    pub outer: Rect,
    pub inner: Rect,
    pub outer_radii: CornerRadii,
    pub inner_radii: CornerRadii,
    /// `left, top, right, bottom`
    pub border: [f32; 4],
}

impl BoxGeometry {
    pub fn new(rect: Rect, shape: &BoxShapeMetrics, border: &BoxBorderMetrics) -> Self {
        let outer = rect.normalized();
        let outer_radii = shape.to_absolute(outer.size);
        let widths = border.to_absolute(outer.size);
        let [l, t, r, b] = widths;

        Self {
            outer,
            inner: outer.inset(l, t, r, b),
            outer_radii,
            inner_radii: outer_radii.inset(widths),
            border: widths,
        }
    }

    pub fn transposed(&self) -> Self {
        let [l, t, r, b] = self.border;
        Self {
            outer: self.outer.transposed(),
            inner: self.inner.transposed(),
            outer_radii: self.outer_radii.transposed(),
            inner_radii: self.inner_radii.transposed(),
            border: [t, l, b, r],
        }
    }

    pub fn has_border(&self) -> bool {
        self.border.iter().any(|w| *w > 0.0)
    }

    /// The fill is gone once the border eats up the inner rectangle.
    pub fn has_fill(&self) -> bool {
        !self.inner.is_empty()
    }

    /// Rows of the fill are horizontal when facing corners share their
    /// vertical radius.
    pub(crate) fn has_level_rows(&self) -> bool {
        let r = self.inner_radii;
        fuzzy_eq(r.top_left.y, r.top_right.y) && fuzzy_eq(r.bottom_left.y, r.bottom_right.y)
    }
}

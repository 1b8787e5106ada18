use crate::coords::{Rect, Vec2};
use crate::hash::HashFold;

use super::color::lerp;
use super::stop::{self, GradientStop};
use super::Color;

/// How the direction values of a [`Gradient`] are interpreted.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum GradientType {
    /// Plain stop list, rendered top to bottom.
    #[default]
    Stops,
    /// `[x1, y1, x2, y2]`
    Linear,
    /// `[cx, cy, rx, ry]`
    Radial,
    /// `[cx, cy, start, span]`, angles in degrees counter-clockwise from 3 o'clock.
    Conic,
}

/// Gradient spread behavior outside the [0, 1] range.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    #[default]
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// Coordinate space of the direction values.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum StretchMode {
    /// Absolute logical pixels.
    NoStretch,
    /// Fractions of the rectangle the gradient gets applied to.
    #[default]
    StretchToSize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearDirection {
    pub start: Vec2,
    pub end: Vec2,
}

impl LinearDirection {
    #[inline]
    pub fn is_vertical(self) -> bool {
        self.start.x == self.end.x && self.start.y != self.end.y
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.start.y == self.end.y && self.start.x != self.end.x
    }

    /// Gradient position of `p`: its projection onto start→end, with
    /// `start` at 0.0 and `end` at 1.0.
    pub fn position_at(self, p: Vec2) -> f32 {
        let d = self.end - self.start;
        let len2 = d.dot(d);
        if len2 <= 0.0 {
            return 0.0;
        }
        (p - self.start).dot(d) / len2
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RadialDirection {
    pub center: Vec2,
    pub radius_x: f32,
    pub radius_y: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConicDirection {
    pub center: Vec2,
    /// Degrees, counter-clockwise from 3 o'clock.
    pub start_angle: f32,
    /// Degrees; negative spans run clockwise.
    pub span_angle: f32,
}

/// Multi-stop gradient.
///
/// Immutable value type: every mutation returns a new gradient. Stops are
/// kept as given; [`Gradient::is_valid`] decides whether the gradient can be
/// rendered and [`Gradient::normalized`] repairs incompletely specified stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<GradientStop>,
    kind: GradientType,
    values: [f32; 4],
    spread: SpreadMode,
    stretch: StretchMode,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            stops: Vec::new(),
            kind: GradientType::Stops,
            values: [0.0, 0.0, 0.0, 1.0],
            spread: SpreadMode::Pad,
            stretch: StretchMode::StretchToSize,
        }
    }
}

impl From<Color> for Gradient {
    fn from(color: Color) -> Self {
        Gradient::monochrome(color)
    }
}

impl Gradient {
    /// `Stops` gradient (top to bottom) over the given stops.
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops, ..Self::default() }
    }

    pub fn monochrome(color: Color) -> Self {
        Gradient::new(vec![GradientStop::new(0.0, color), GradientStop::new(1.0, color)])
    }

    /// Evenly distributed colors, see [`stop::build_stops`].
    pub fn from_colors(colors: &[Color], discrete: bool) -> Self {
        Gradient::new(stop::build_stops(colors, discrete))
    }

    pub fn linear(x1: f32, y1: f32, x2: f32, y2: f32, stops: Vec<GradientStop>) -> Self {
        Self { stops, kind: GradientType::Linear, values: [x1, y1, x2, y2], ..Self::default() }
    }

    /// Linear gradient running from top to bottom of the rectangle.
    pub fn vertical(stops: Vec<GradientStop>) -> Self {
        Gradient::linear(0.0, 0.0, 0.0, 1.0, stops)
    }

    /// Linear gradient running from left to right of the rectangle.
    pub fn horizontal(stops: Vec<GradientStop>) -> Self {
        Gradient::linear(0.0, 0.0, 1.0, 0.0, stops)
    }

    pub fn radial(cx: f32, cy: f32, radius: f32, stops: Vec<GradientStop>) -> Self {
        Gradient::radial_elliptic(cx, cy, radius, radius, stops)
    }

    pub fn radial_elliptic(cx: f32, cy: f32, rx: f32, ry: f32, stops: Vec<GradientStop>) -> Self {
        Self { stops, kind: GradientType::Radial, values: [cx, cy, rx, ry], ..Self::default() }
    }

    pub fn conic(cx: f32, cy: f32, start: f32, span: f32, stops: Vec<GradientStop>) -> Self {
        Self { stops, kind: GradientType::Conic, values: [cx, cy, start, span], ..Self::default() }
    }

    #[inline]
    pub fn with_spread(mut self, spread: SpreadMode) -> Self {
        self.spread = spread;
        self
    }

    #[inline]
    pub fn with_stretch(mut self, stretch: StretchMode) -> Self {
        self.stretch = stretch;
        self
    }

    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    #[inline]
    pub fn kind(&self) -> GradientType {
        self.kind
    }

    #[inline]
    pub fn spread(&self) -> SpreadMode {
        self.spread
    }

    #[inline]
    pub fn stretch_mode(&self) -> StretchMode {
        self.stretch
    }

    #[inline]
    pub fn values(&self) -> [f32; 4] {
        self.values
    }

    /// Direction of a `Linear` gradient, or the implied top-to-bottom
    /// direction of a `Stops` gradient.
    pub fn linear_direction(&self) -> Option<LinearDirection> {
        let [x1, y1, x2, y2] = match self.kind {
            GradientType::Linear => self.values,
            GradientType::Stops => [0.0, 0.0, 0.0, 1.0],
            _ => return None,
        };
        Some(LinearDirection { start: Vec2::new(x1, y1), end: Vec2::new(x2, y2) })
    }

    pub fn radial_direction(&self) -> Option<RadialDirection> {
        let [cx, cy, rx, ry] = match self.kind {
            GradientType::Radial => self.values,
            _ => return None,
        };
        Some(RadialDirection { center: Vec2::new(cx, cy), radius_x: rx, radius_y: ry })
    }

    pub fn conic_direction(&self) -> Option<ConicDirection> {
        let [cx, cy, start, span] = match self.kind {
            GradientType::Conic => self.values,
            _ => return None,
        };
        Some(ConicDirection { center: Vec2::new(cx, cy), start_angle: start, span_angle: span })
    }

    // ── derived properties ────────────────────────────────────────────────

    pub fn is_valid(&self) -> bool {
        stop::is_gradient_valid(&self.stops) && self.values.iter().all(|v| v.is_finite())
    }

    #[inline]
    pub fn is_monochrome(&self) -> bool {
        stop::is_monochrome(&self.stops)
    }

    /// Valid and at least one stop can be seen, so a fade in from
    /// transparent still draws.
    pub fn is_visible(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        if self.is_monochrome() {
            return self.start_color().is_visible();
        }
        stop::is_visible(&self.stops)
    }

    /// Valid and every stop fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.is_valid() && self.stops.iter().all(|s| s.color.alpha() >= 1.0)
    }

    /// Number of color segments (`stops - 1`).
    #[inline]
    pub fn step_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    #[inline]
    pub fn start_color(&self) -> Color {
        self.stops.first().map_or(Color::Invalid, |s| s.color)
    }

    #[inline]
    pub fn end_color(&self) -> Color {
        self.stops.last().map_or(Color::Invalid, |s| s.color)
    }

    #[inline]
    pub fn color_at(&self, pos: f32) -> Color {
        stop::color_at(&self.stops, pos)
    }

    // ── derived gradients ─────────────────────────────────────────────────

    /// Same gradient with every stop's alpha replaced.
    pub fn with_alpha(&self, alpha: f32) -> Gradient {
        let stops = self
            .stops
            .iter()
            .map(|s| GradientStop::new(s.position, s.color.with_alpha(alpha)))
            .collect();
        self.with_stops(stops)
    }

    pub fn with_stops(&self, stops: Vec<GradientStop>) -> Gradient {
        Gradient { stops, ..self.clone() }
    }

    pub fn normalized(&self) -> Gradient {
        self.with_stops(stop::normalized_stops(&self.stops))
    }

    pub fn reverted(&self) -> Gradient {
        self.with_stops(stop::reverted_stops(&self.stops))
    }

    pub fn extracted(&self, from: f32, to: f32) -> Gradient {
        self.with_stops(stop::extracted_stops(&self.stops, from, to))
    }

    /// Cross-fade towards `to`.
    ///
    /// Stops merge as in [`stop::interpolated_stops`]. Direction values are
    /// interpolated when both gradients share type and stretch mode, otherwise
    /// type, direction and spread switch over at `ratio = 0.5`.
    pub fn interpolated(&self, to: &Gradient, ratio: f32) -> Gradient {
        if ratio <= 0.0 {
            return self.clone();
        }
        if ratio >= 1.0 {
            return to.clone();
        }

        let stops = stop::interpolated_stops(&self.stops, &to.stops, ratio);

        if self.kind == to.kind && self.stretch == to.stretch {
            let mut values = [0.0; 4];
            for (i, v) in values.iter_mut().enumerate() {
                *v = lerp(self.values[i], to.values[i], ratio);
            }
            let spread = if ratio < 0.5 { self.spread } else { to.spread };
            return Gradient { stops, values, spread, ..self.clone() };
        }

        let base = if ratio < 0.5 { self } else { to };
        Gradient { stops, ..base.clone() }
    }

    /// Resolves relative directions against `rect`.
    ///
    /// The result is always `NoStretch`. `Stops` gradients become a linear
    /// gradient from the top to the bottom edge of `rect`.
    pub fn stretched_to(&self, rect: Rect) -> Gradient {
        let kind = match self.kind {
            GradientType::Stops => GradientType::Linear,
            k => k,
        };
        let raw = match self.kind {
            GradientType::Stops => [0.0, 0.0, 0.0, 1.0],
            _ => self.values,
        };

        let relative = self.stretch == StretchMode::StretchToSize || self.kind == GradientType::Stops;
        let values = if !relative {
            raw
        } else {
            let (x, y, w, h) = (rect.left(), rect.top(), rect.width(), rect.height());
            match kind {
                GradientType::Linear => [x + raw[0] * w, y + raw[1] * h, x + raw[2] * w, y + raw[3] * h],
                GradientType::Radial => [x + raw[0] * w, y + raw[1] * h, raw[2] * w, raw[3] * h],
                GradientType::Conic => [x + raw[0] * w, y + raw[1] * h, raw[2], raw[3]],
                GradientType::Stops => raw,
            }
        };

        Gradient {
            stops: self.stops.clone(),
            kind,
            values,
            spread: self.spread,
            stretch: StretchMode::NoStretch,
        }
    }

    /// Seeded hash over everything that affects the rendered colors.
    pub fn hash_value(&self, seed: u64) -> u64 {
        let mut h = HashFold::new(seed);
        self.fold_hash(&mut h);
        h.finish()
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        h.u8(self.kind as u8).u8(self.spread as u8).u8(self.stretch as u8);
        for v in self.values {
            h.f32(v);
        }
        stop::fold_stops(&self.stops, h);
    }
}

use crate::hash::HashFold;

/// Internal representation of a [`Color`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ColorSpec {
    Invalid,
    Rgb,
    Hsv,
    Hsl,
    Cmyk,
}

/// Straight-alpha color that remembers the space it was specified in.
///
/// Invariant:
/// - all components are in `[0, 1]`, except hue which is in degrees
///   `[0, 360)` or `-1.0` for achromatic colors
///
/// Interpolation happens in the color's own space, so a HSV fade between
/// two hues walks the hue circle instead of cutting through grey.
/// Premultiplication is explicit: see [`Color::premultiplied`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub enum Color {
    #[default]
    Invalid,
    Rgb { r: f32, g: f32, b: f32, a: f32 },
    Hsv { h: f32, s: f32, v: f32, a: f32 },
    Hsl { h: f32, s: f32, l: f32, a: f32 },
    Cmyk { c: f32, m: f32, y: f32, k: f32, a: f32 },
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);

    /// RGB color from straight-alpha components in `[0, 1]` (not clamped).
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color::Rgb { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::rgba(r, g, b, 1.0)
    }

    /// Creates a color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a color from `0xAARRGGBB`.
    #[inline]
    pub fn from_argb32(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Color::from_rgba8(r, g, b, a)
    }

    /// HSV color; `h` in degrees, wrapped into `[0, 360)`. Negative hue
    /// marks an achromatic color.
    #[inline]
    pub fn hsva(h: f32, s: f32, v: f32, a: f32) -> Self {
        Color::Hsv { h: wrap_hue(h), s: unit(s), v: unit(v), a: unit(a) }
    }

    #[inline]
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        Color::Hsl { h: wrap_hue(h), s: unit(s), l: unit(l), a: unit(a) }
    }

    #[inline]
    pub fn cmyka(c: f32, m: f32, y: f32, k: f32, a: f32) -> Self {
        Color::Cmyk { c: unit(c), m: unit(m), y: unit(y), k: unit(k), a: unit(a) }
    }

    #[inline]
    pub fn spec(self) -> ColorSpec {
        match self {
            Color::Invalid => ColorSpec::Invalid,
            Color::Rgb { .. } => ColorSpec::Rgb,
            Color::Hsv { .. } => ColorSpec::Hsv,
            Color::Hsl { .. } => ColorSpec::Hsl,
            Color::Cmyk { .. } => ColorSpec::Cmyk,
        }
    }

    /// A color is valid when it has a spec and all components are finite.
    pub fn is_valid(self) -> bool {
        match self {
            Color::Invalid => false,
            Color::Rgb { r, g, b, a } => all_finite(&[r, g, b, a]),
            Color::Hsv { h, s, v, a } => all_finite(&[h, s, v, a]),
            Color::Hsl { h, s, l, a } => all_finite(&[h, s, l, a]),
            Color::Cmyk { c, m, y, k, a } => all_finite(&[c, m, y, k, a]),
        }
    }

    #[inline]
    pub fn alpha(self) -> f32 {
        match self {
            Color::Invalid => 0.0,
            Color::Rgb { a, .. }
            | Color::Hsv { a, .. }
            | Color::Hsl { a, .. }
            | Color::Cmyk { a, .. } => a,
        }
    }

    /// Same color with a replaced alpha. Invalid colors stay invalid.
    #[inline]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        match &mut self {
            Color::Invalid => {}
            Color::Rgb { a, .. }
            | Color::Hsv { a, .. }
            | Color::Hsl { a, .. }
            | Color::Cmyk { a, .. } => *a = alpha,
        }
        self
    }

    /// True for valid colors with a non-zero alpha.
    #[inline]
    pub fn is_visible(self) -> bool {
        self.is_valid() && self.alpha() > 0.0
    }

    /// Straight-alpha `[r, g, b, a]`. Invalid colors map to transparent black.
    pub fn to_rgba(self) -> [f32; 4] {
        match self {
            Color::Invalid => [0.0; 4],
            Color::Rgb { r, g, b, a } => [r, g, b, a],
            Color::Hsv { h, s, v, a } => {
                let (r, g, b) = super::convert::hsv_to_rgb(h, s, v);
                [r, g, b, a]
            }
            Color::Hsl { h, s, l, a } => {
                let (r, g, b) = super::convert::hsl_to_rgb(h, s, l);
                [r, g, b, a]
            }
            Color::Cmyk { c, m, y, k, a } => {
                let (r, g, b) = super::convert::cmyk_to_rgb(c, m, y, k);
                [r, g, b, a]
            }
        }
    }

    /// Premultiplied `[r, g, b, a]`, clamped to `[0, 1]`, as consumed by
    /// vertex buffers and color ramps.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_rgba();
        let a = unit(a);
        [unit(r) * a, unit(g) * a, unit(b) * a, a]
    }

    /// Premultiplied RGBA bytes.
    #[inline]
    pub fn premultiplied_rgba8(self) -> [u8; 4] {
        self.premultiplied().map(|c| (c * 255.0 + 0.5) as u8)
    }

    /// Straight RGBA bytes.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_rgba().map(|c| (unit(c) * 255.0 + 0.5) as u8)
    }

    pub fn to_rgb_spec(self) -> Color {
        match self {
            Color::Invalid | Color::Rgb { .. } => self,
            _ => {
                let [r, g, b, a] = self.to_rgba();
                Color::rgba(r, g, b, a)
            }
        }
    }

    pub fn to_hsv(self) -> Color {
        match self {
            Color::Invalid | Color::Hsv { .. } => self,
            _ => {
                let [r, g, b, a] = self.to_rgba();
                let (h, s, v) = super::convert::rgb_to_hsv(r, g, b);
                Color::Hsv { h, s, v, a }
            }
        }
    }

    pub fn to_hsl(self) -> Color {
        match self {
            Color::Invalid | Color::Hsl { .. } => self,
            _ => {
                let [r, g, b, a] = self.to_rgba();
                let (h, s, l) = super::convert::rgb_to_hsl(r, g, b);
                Color::Hsl { h, s, l, a }
            }
        }
    }

    pub fn to_cmyk(self) -> Color {
        match self {
            Color::Invalid | Color::Cmyk { .. } => self,
            _ => {
                let [r, g, b, a] = self.to_rgba();
                let (c, m, y, k) = super::convert::rgb_to_cmyk(r, g, b);
                Color::Cmyk { c, m, y, k, a }
            }
        }
    }

    pub fn convert_to(self, spec: ColorSpec) -> Color {
        match spec {
            ColorSpec::Invalid => Color::Invalid,
            ColorSpec::Rgb => self.to_rgb_spec(),
            ColorSpec::Hsv => self.to_hsv(),
            ColorSpec::Hsl => self.to_hsl(),
            ColorSpec::Cmyk => self.to_cmyk(),
        }
    }

    /// Interpolates between two colors.
    ///
    /// - equal colors short-circuit to `to`
    /// - an invalid side is treated as a transparent version of the other
    ///   side: alpha fades in with `ratio` (or out with `1 - ratio`)
    /// - different specs are unified by converting `from` into `to`'s spec
    pub fn interpolated(from: Color, to: Color, ratio: f32) -> Color {
        if from == to {
            return to;
        }
        if !from.is_valid() {
            return to.with_alpha(ratio * to.alpha());
        }
        if !to.is_valid() {
            return from.with_alpha((1.0 - ratio) * from.alpha());
        }

        let from = from.convert_to(to.spec());
        match (from, to) {
            (Color::Rgb { r: r1, g: g1, b: b1, a: a1 }, Color::Rgb { r: r2, g: g2, b: b2, a: a2 }) => {
                Color::rgba(
                    lerp(r1, r2, ratio),
                    lerp(g1, g2, ratio),
                    lerp(b1, b2, ratio),
                    lerp(a1, a2, ratio),
                )
            }
            (Color::Hsv { h: h1, s: s1, v: v1, a: a1 }, Color::Hsv { h: h2, s: s2, v: v2, a: a2 }) => {
                Color::Hsv {
                    h: lerp_hue(h1, h2, ratio),
                    s: lerp(s1, s2, ratio),
                    v: lerp(v1, v2, ratio),
                    a: lerp(a1, a2, ratio),
                }
            }
            (Color::Hsl { h: h1, s: s1, l: l1, a: a1 }, Color::Hsl { h: h2, s: s2, l: l2, a: a2 }) => {
                Color::Hsl {
                    h: lerp_hue(h1, h2, ratio),
                    s: lerp(s1, s2, ratio),
                    l: lerp(l1, l2, ratio),
                    a: lerp(a1, a2, ratio),
                }
            }
            (
                Color::Cmyk { c: c1, m: m1, y: y1, k: k1, a: a1 },
                Color::Cmyk { c: c2, m: m2, y: y2, k: k2, a: a2 },
            ) => Color::Cmyk {
                c: lerp(c1, c2, ratio),
                m: lerp(m1, m2, ratio),
                y: lerp(y1, y2, ratio),
                k: lerp(k1, k2, ratio),
                a: lerp(a1, a2, ratio),
            },
            _ => to,
        }
    }

    pub(crate) fn fold_hash(self, h: &mut HashFold) {
        // Spec-independent: two specs describing the same pixel hash equal.
        for c in self.premultiplied() {
            h.f32(c);
        }
    }
}

/// `from * (1 - t) + to * t`: exact at both ends.
#[inline]
pub(crate) fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from * (1.0 - t) + to * t
}

fn lerp_hue(h1: f32, h2: f32, t: f32) -> f32 {
    // Achromatic hues borrow the other side's hue.
    match (h1 < 0.0, h2 < 0.0) {
        (true, true) => -1.0,
        (true, false) => h2,
        (false, true) => h1,
        (false, false) => lerp(h1, h2, t),
    }
}

#[inline]
fn unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

fn wrap_hue(h: f32) -> f32 {
    if h < 0.0 { -1.0 } else { h.rem_euclid(360.0) }
}

fn all_finite(values: &[f32]) -> bool {
    values.iter().all(|v| v.is_finite())
}

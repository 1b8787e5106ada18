use crate::hash::HashFold;
use crate::paint::{Color, Gradient, GradientStop};

/// One gradient per border edge.
///
/// Edge gradients run clockwise along the outline: the top edge left to
/// right, the right edge top to bottom, the bottom edge right to left and
/// the left edge bottom to top. Only the stops matter; the gradient type
/// and direction are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxBorderColors {
    pub left: Gradient,
    pub top: Gradient,
    pub right: Gradient,
    pub bottom: Gradient,
}

impl From<Color> for BoxBorderColors {
    fn from(color: Color) -> Self {
        BoxBorderColors::uniform(Gradient::monochrome(color))
    }
}

impl BoxBorderColors {
    pub fn uniform(gradient: Gradient) -> Self {
        Self {
            left: gradient.clone(),
            top: gradient.clone(),
            right: gradient.clone(),
            bottom: gradient,
        }
    }

    pub fn new(left: Gradient, top: Gradient, right: Gradient, bottom: Gradient) -> Self {
        Self { left, top, right, bottom }
    }

    /// Bevel look: `light` on the left and top edges, `dark` on the right
    /// and bottom edges.
    pub fn light_dark(light: Color, dark: Color) -> Self {
        Self {
            left: Gradient::monochrome(light),
            top: Gradient::monochrome(light),
            right: Gradient::monochrome(dark),
            bottom: Gradient::monochrome(dark),
        }
    }

    /// Edges in drawing order: top, right, bottom, left.
    #[inline]
    pub(crate) fn clockwise(&self) -> [&Gradient; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }

    pub fn is_valid(&self) -> bool {
        self.clockwise().iter().all(|g| g.is_valid())
    }

    pub fn is_visible(&self) -> bool {
        self.clockwise().iter().any(|g| g.is_visible())
    }

    /// One color for the whole border.
    pub fn is_monochrome(&self) -> bool {
        let c = self.top.start_color();
        self.clockwise().iter().all(|g| g.is_monochrome() && g.start_color() == c)
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self {
            left: self.left.with_alpha(alpha),
            top: self.top.with_alpha(alpha),
            right: self.right.with_alpha(alpha),
            bottom: self.bottom.with_alpha(alpha),
        }
    }

    pub fn interpolated(&self, to: &BoxBorderColors, ratio: f32) -> Self {
        Self {
            left: self.left.interpolated(&to.left, ratio),
            top: self.top.interpolated(&to.top, ratio),
            right: self.right.interpolated(&to.right, ratio),
            bottom: self.bottom.interpolated(&to.bottom, ratio),
        }
    }

    pub fn hash_value(&self, seed: u64) -> u64 {
        let mut h = HashFold::new(seed);
        self.fold_hash(&mut h);
        h.finish()
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        for g in self.clockwise() {
            g.fold_hash(h);
        }
    }
}

/// Colors of one edge as the border renderers consume them.
#[derive(Debug, Clone)]
pub(crate) struct EdgeColors {
    pub start: Color,
    pub end: Color,
    /// Stops strictly inside the edge; empty for monochrome edges.
    pub interior: Vec<GradientStop>,
}

impl EdgeColors {
    pub fn from_gradient(g: &Gradient) -> Self {
        let interior = if g.is_monochrome() {
            Vec::new()
        } else {
            g.stops()
                .iter()
                .filter(|s| s.position > 0.0 && s.position < 1.0)
                .copied()
                .collect()
        };
        Self { start: g.start_color(), end: g.end_color(), interior }
    }

    /// Top, right, bottom, left. `None` yields transparent edges.
    pub fn clockwise(colors: Option<&BoxBorderColors>) -> [EdgeColors; 4] {
        match colors {
            Some(c) => c.clockwise().map(EdgeColors::from_gradient),
            None => std::array::from_fn(|_| EdgeColors {
                start: Color::TRANSPARENT,
                end: Color::TRANSPARENT,
                interior: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_dark_is_not_monochrome() {
        let c = BoxBorderColors::light_dark(Color::WHITE, Color::BLACK);
        assert!(c.is_valid());
        assert!(!c.is_monochrome());
        assert!(BoxBorderColors::from(Color::RED).is_monochrome());
    }

    #[test]
    fn edge_interior_stops() {
        let g = Gradient::from_colors(&[Color::RED, Color::GREEN, Color::BLUE], false);
        let e = EdgeColors::from_gradient(&g);
        assert_eq!(e.start, Color::RED);
        assert_eq!(e.end, Color::BLUE);
        assert_eq!(e.interior.len(), 1);
    }

    #[test]
    fn hash_tracks_edges() {
        let a = BoxBorderColors::light_dark(Color::WHITE, Color::BLACK);
        let b = BoxBorderColors::light_dark(Color::BLACK, Color::WHITE);
        assert_ne!(a.hash_value(0), b.hash_value(0));
    }
}

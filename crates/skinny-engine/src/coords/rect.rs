use super::{fuzzy_eq, Vec2};

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + 0.5 * self.size.x, self.origin.y + 0.5 * self.size.y)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.size.x > 0.0 && self.size.y > 0.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// True when width and height compare fuzzily equal.
    #[inline]
    pub fn is_square(self) -> bool {
        fuzzy_eq(self.size.x, self.size.y)
    }

    /// Same rectangle with non-negative width and height.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut w) = (self.origin.x, self.size.x);
        let (mut y, mut h) = (self.origin.y, self.size.y);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Rect::new(x, y, w, h)
    }

    /// Shrinks the rectangle by per-edge insets. The result may be empty
    /// (negative size) when the insets overlap.
    #[inline]
    pub fn inset(self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect::new(
            self.origin.x + left,
            self.origin.y + top,
            self.size.x - left - right,
            self.size.y - top - bottom,
        )
    }

    /// Mirrors the rectangle at the main diagonal (x <-> y).
    #[inline]
    pub const fn transposed(self) -> Self {
        Rect::from_origin_size(self.origin.transposed(), self.size.transposed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── edges ─────────────────────────────────────────────────────────────

    #[test]
    fn edges_and_center() {
        let rect = r(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 60.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn normalized_flips_negative_extents() {
        assert_eq!(r(10.0, 10.0, -4.0, -6.0).normalized(), r(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn inset_can_collapse() {
        let rect = r(0.0, 0.0, 10.0, 10.0).inset(6.0, 1.0, 6.0, 1.0);
        assert!(rect.is_empty());
        assert_eq!(rect.height(), 8.0);
    }

    #[test]
    fn transposed_swaps_axes() {
        assert_eq!(r(1.0, 2.0, 3.0, 4.0).transposed(), r(2.0, 1.0, 4.0, 3.0));
    }

    // ── emptiness ─────────────────────────────────────────────────────────

    #[test]
    fn nan_size_is_empty() {
        assert!(r(0.0, 0.0, f32::NAN, 5.0).is_empty());
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}

use super::Vec2;

/// Logical size of the render target that fill geometry is drawn into.
///
/// The vertex stage maps `(0, 0)` to the top left and `size` to the bottom
/// right corner of clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub size: Vec2,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { size: Vec2::new(width, height) }
    }

    /// Nothing can be drawn into a zero sized or non-finite target.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.size.x > 0.0 && self.size.y > 0.0 && self.size.x.is_finite() && self.size.y.is_finite()
    }

    /// Divisor for the shader's NDC mapping, at least one pixel per axis.
    #[inline]
    pub(crate) fn uniform_size(self) -> [f32; 2] {
        [self.size.x.max(1.0), self.size.y.max(1.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(Viewport::new(640.0, 480.0).is_valid());
        assert!(!Viewport::new(0.0, 480.0).is_valid());
        assert!(!Viewport::new(640.0, f32::INFINITY).is_valid());
        assert!(!Viewport::default().is_valid());
    }

    #[test]
    fn uniform_size_never_divides_by_zero() {
        assert_eq!(Viewport::new(0.25, 300.0).uniform_size(), [1.0, 300.0]);
    }
}

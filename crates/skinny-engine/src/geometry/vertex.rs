//! Vertex layouts handed to the GPU.
//!
//! A buffer is a sequence of lines (point pairs). Drawn as one triangle
//! strip, consecutive lines span the quads that make up a fill or a border.

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn pos(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Position plus premultiplied RGBA.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredPoint2D {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColoredPoint2D {
    #[inline]
    pub fn new(p: Vec2, rgba: [f32; 4]) -> Self {
        let [r, g, b, a] = rgba;
        Self { x: p.x, y: p.y, r, g, b, a }
    }

    #[inline]
    pub fn pos(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Premultiplied `[r, g, b, a]`.
    #[inline]
    pub fn rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Line {
    pub p1: Point2D,
    pub p2: Point2D,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct ColoredLine {
    pub p1: ColoredPoint2D,
    pub p2: ColoredPoint2D,
}

impl ColoredLine {
    #[inline]
    pub fn new(p1: Vec2, p2: Vec2, color: Color) -> Self {
        let rgba = color.premultiplied();
        Self { p1: ColoredPoint2D::new(p1, rgba), p2: ColoredPoint2D::new(p2, rgba) }
    }

    /// True when both ends carry `rgba`.
    pub fn has_color(&self, rgba: [f32; 4]) -> bool {
        self.p1.rgba() == rgba && self.p2.rgba() == rgba
    }
}

/// Line types the renderers can fill.
///
/// Renderers are generic over this, so one tessellation routine serves the
/// flat and the colored layout. Flat lines drop the colors.
pub trait LineVertex: Pod + std::fmt::Debug {
    fn from_points(p1: Vec2, c1: [f32; 4], p2: Vec2, c2: [f32; 4]) -> Self;

    fn points(&self) -> (Vec2, Vec2);

    /// Mirrored at the main diagonal.
    fn transposed(self) -> Self;
}

impl LineVertex for Line {
    #[inline]
    fn from_points(p1: Vec2, _c1: [f32; 4], p2: Vec2, _c2: [f32; 4]) -> Self {
        Line { p1: Point2D::new(p1.x, p1.y), p2: Point2D::new(p2.x, p2.y) }
    }

    #[inline]
    fn points(&self) -> (Vec2, Vec2) {
        (self.p1.pos(), self.p2.pos())
    }

    #[inline]
    fn transposed(self) -> Self {
        Line { p1: Point2D::new(self.p1.y, self.p1.x), p2: Point2D::new(self.p2.y, self.p2.x) }
    }
}

impl LineVertex for ColoredLine {
    #[inline]
    fn from_points(p1: Vec2, c1: [f32; 4], p2: Vec2, c2: [f32; 4]) -> Self {
        ColoredLine { p1: ColoredPoint2D::new(p1, c1), p2: ColoredPoint2D::new(p2, c2) }
    }

    #[inline]
    fn points(&self) -> (Vec2, Vec2) {
        (self.p1.pos(), self.p2.pos())
    }

    #[inline]
    fn transposed(mut self) -> Self {
        std::mem::swap(&mut self.p1.x, &mut self.p1.y);
        std::mem::swap(&mut self.p2.x, &mut self.p2.y);
        self
    }
}

/// Which attribute layout a [`Geometry`] uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    /// `{x, y}`
    Flat,
    /// `{x, y, r, g, b, a}`
    Colored,
}

impl VertexLayout {
    pub const fn stride(self) -> usize {
        match self {
            VertexLayout::Flat => std::mem::size_of::<Point2D>(),
            VertexLayout::Colored => std::mem::size_of::<ColoredPoint2D>(),
        }
    }
}

/// Line buffer in one of the two layouts.
///
/// Switching layouts converts explicitly and reallocates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Flat(Vec<Line>),
    Colored(Vec<ColoredLine>),
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::Flat(Vec::new())
    }
}

impl Geometry {
    #[inline]
    pub fn layout(&self) -> VertexLayout {
        match self {
            Geometry::Flat(_) => VertexLayout::Flat,
            Geometry::Colored(_) => VertexLayout::Colored,
        }
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        match self {
            Geometry::Flat(lines) => lines.len(),
            Geometry::Colored(lines) => lines.len(),
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        2 * self.line_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }

    /// Raw vertex data for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Geometry::Flat(lines) => bytemuck::cast_slice(lines),
            Geometry::Colored(lines) => bytemuck::cast_slice(lines),
        }
    }

    /// Drops the vertex colors.
    pub fn to_flat(&self) -> Geometry {
        match self {
            Geometry::Flat(_) => self.clone(),
            Geometry::Colored(lines) => Geometry::Flat(
                lines
                    .iter()
                    .map(|l| {
                        let (p1, p2) = l.points();
                        Line::from_points(p1, [0.0; 4], p2, [0.0; 4])
                    })
                    .collect(),
            ),
        }
    }

    /// Colors every vertex of a flat buffer with `color`.
    pub fn to_colored(&self, color: Color) -> Geometry {
        match self {
            Geometry::Colored(_) => self.clone(),
            Geometry::Flat(lines) => Geometry::Colored(
                lines
                    .iter()
                    .map(|l| {
                        let (p1, p2) = l.points();
                        ColoredLine::new(p1, p2, color)
                    })
                    .collect(),
            ),
        }
    }

    pub fn clear(&mut self) {
        match self {
            Geometry::Flat(lines) => lines.clear(),
            Geometry::Colored(lines) => lines.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sizes() {
        assert_eq!(std::mem::size_of::<Line>(), 16);
        assert_eq!(std::mem::size_of::<ColoredLine>(), 48);
        assert_eq!(VertexLayout::Colored.stride(), 24);
    }

    #[test]
    fn colored_line_premultiplies() {
        let l = ColoredLine::new(Vec2::zero(), Vec2::new(1.0, 0.0), Color::rgba(1.0, 0.0, 0.0, 0.5));
        assert!(l.has_color([0.5, 0.0, 0.0, 0.5]));
    }

    #[test]
    fn conversion_keeps_points() {
        let flat = Geometry::Flat(vec![Line::from_points(
            Vec2::new(1.0, 2.0),
            [0.0; 4],
            Vec2::new(3.0, 4.0),
            [0.0; 4],
        )]);
        let colored = flat.to_colored(Color::BLUE);
        assert_eq!(colored.layout(), VertexLayout::Colored);
        assert_eq!(colored.vertex_count(), 2);
        assert_eq!(colored.as_bytes().len(), 48);
        assert_eq!(colored.to_flat(), flat);
    }

    #[test]
    fn transposed_swaps_axes() {
        let l = Line::from_points(Vec2::new(1.0, 2.0), [0.0; 4], Vec2::new(3.0, 4.0), [0.0; 4]);
        assert_eq!(l.transposed().points(), (Vec2::new(2.0, 1.0), Vec2::new(4.0, 3.0)));
    }
}

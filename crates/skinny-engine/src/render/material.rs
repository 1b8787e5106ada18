//! Coloring state of a fill node.
//!
//! The variant set is closed: a uniform color, colors baked into the
//! vertices, or one of three gradient shaders sampling a color ramp.

use std::cmp::Ordering;

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};
use crate::hash::HashFold;
use crate::paint::{self, Color, Gradient, GradientStop, GradientType, SpreadMode};

const STOPS_SEED: u64 = 0x6d_61_74;

/// Shader variant tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialType {
    Flat,
    VertexColor,
    Linear,
    Radial,
    Conic,
}

/// Geometry of a gradient in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GradientParams {
    /// Position 0 at `start`, 1 at `start + delta`.
    Linear { start: Vec2, delta: Vec2 },
    /// Position 1 on the ellipse with radii `radius` around `center`.
    Radial { center: Vec2, radius: Vec2 },
    /// Angles in turns, counter-clockwise from 3 o'clock. `span` lies in
    /// `[-1, 1]`.
    Conic { center: Vec2, start: f32, span: f32 },
}

impl GradientParams {
    fn material_type(&self) -> MaterialType {
        match self {
            GradientParams::Linear { .. } => MaterialType::Linear,
            GradientParams::Radial { .. } => MaterialType::Radial,
            GradientParams::Conic { .. } => MaterialType::Conic,
        }
    }

    /// Packed into one `vec4` for the shader.
    pub fn packed(&self) -> [f32; 4] {
        match *self {
            GradientParams::Linear { start, delta } => [start.x, start.y, delta.x, delta.y],
            GradientParams::Radial { center, radius } => [center.x, center.y, radius.x, radius.y],
            GradientParams::Conic { center, start, span } => [center.x, center.y, start, span],
        }
    }
}

/// A gradient resolved against a rectangle, ready for the shader path.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientMaterial {
    params: GradientParams,
    stops: Vec<GradientStop>,
    spread: SpreadMode,
    stops_hash: u64,
}

impl GradientMaterial {
    /// `None` for invalid gradients.
    pub fn new(gradient: &Gradient, rect: Rect) -> Option<Self> {
        if !gradient.is_valid() {
            return None;
        }

        let g = gradient.stretched_to(rect);
        let v = g.values();

        let params = match g.kind() {
            GradientType::Linear | GradientType::Stops => GradientParams::Linear {
                start: Vec2::new(v[0], v[1]),
                delta: Vec2::new(v[2] - v[0], v[3] - v[1]),
            },
            GradientType::Radial => GradientParams::Radial {
                center: Vec2::new(v[0], v[1]),
                radius: Vec2::new(v[2], v[3]),
            },
            GradientType::Conic => GradientParams::Conic {
                center: Vec2::new(v[0], v[1]),
                start: (v[2] / 360.0).rem_euclid(1.0),
                span: (v[3] / 360.0).clamp(-1.0, 1.0),
            },
        };

        let stops = g.stops().to_vec();
        let stops_hash = paint::stops_hash(&stops, STOPS_SEED);
        Some(Self { params, stops, spread: g.spread(), stops_hash })
    }

    #[inline]
    pub fn material_type(&self) -> MaterialType {
        self.params.material_type()
    }

    #[inline]
    pub fn params(&self) -> &GradientParams {
        &self.params
    }

    #[inline]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    #[inline]
    pub fn spread(&self) -> SpreadMode {
        self.spread
    }

    /// Orders by stops and spread first, then by type and geometry.
    /// Equal means batchable.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.stops_hash
            .cmp(&other.stops_hash)
            .then((self.spread as u8).cmp(&(other.spread as u8)))
            .then(self.material_type().cmp(&other.material_type()))
            .then_with(|| compare_floats(&self.params.packed(), &other.params.packed()))
    }

    pub(crate) fn fold_hash(&self, h: &mut HashFold) {
        h.u8(self.material_type() as u8).u8(self.spread as u8).u64(self.stops_hash);
        for v in self.params.packed() {
            h.f32(v);
        }
    }
}

/// Coloring of one fill node.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// One color for the whole geometry.
    Flat(Color),
    /// Colors come with the vertices.
    VertexColor,
    Gradient(GradientMaterial),
}

impl Default for Material {
    fn default() -> Self {
        Material::Flat(Color::TRANSPARENT)
    }
}

impl Material {
    pub fn material_type(&self) -> MaterialType {
        match self {
            Material::Flat(_) => MaterialType::Flat,
            Material::VertexColor => MaterialType::VertexColor,
            Material::Gradient(g) => g.material_type(),
        }
    }

    /// Total order; equal materials can share a draw call.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Material::Flat(a), Material::Flat(b)) => {
                compare_floats(&a.premultiplied(), &b.premultiplied())
            }
            (Material::Gradient(a), Material::Gradient(b)) => a.compare(b),
            _ => self.material_type().cmp(&other.material_type()),
        }
    }

    /// Shader uniforms for this material.
    pub fn uniform(&self) -> MaterialUniform {
        match self {
            Material::Flat(c) => MaterialUniform { color: c.premultiplied(), params: [0.0; 4] },
            Material::VertexColor => MaterialUniform::zeroed(),
            Material::Gradient(g) => MaterialUniform { color: [0.0; 4], params: g.params.packed() },
        }
    }
}

/// Per-node uniform block shared by all material shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
pub struct MaterialUniform {
    /// Premultiplied color of flat materials.
    pub color: [f32; 4],
    pub params: [f32; 4],
}

fn compare_floats(a: &[f32], b: &[f32]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.total_cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_blue() -> Vec<GradientStop> {
        vec![GradientStop::new(0.0, Color::RED), GradientStop::new(1.0, Color::BLUE)]
    }

    fn rect() -> Rect {
        Rect::new(10.0, 20.0, 100.0, 50.0)
    }

    // ── params ────────────────────────────────────────────────────────────

    #[test]
    fn linear_is_resolved_against_rect() {
        let m = GradientMaterial::new(&Gradient::horizontal(red_blue()), rect()).unwrap();
        assert_eq!(m.material_type(), MaterialType::Linear);
        assert_eq!(
            *m.params(),
            GradientParams::Linear { start: Vec2::new(10.0, 20.0), delta: Vec2::new(100.0, 0.0) }
        );
    }

    #[test]
    fn stops_type_runs_top_to_bottom() {
        let m = GradientMaterial::new(&Gradient::new(red_blue()), rect()).unwrap();
        assert_eq!(
            *m.params(),
            GradientParams::Linear { start: Vec2::new(10.0, 20.0), delta: Vec2::new(0.0, 50.0) }
        );
    }

    #[test]
    fn conic_angles_are_turns() {
        let g = Gradient::conic(0.5, 0.5, 90.0, 720.0, red_blue());
        let m = GradientMaterial::new(&g, rect()).unwrap();
        assert_eq!(
            *m.params(),
            GradientParams::Conic { center: Vec2::new(60.0, 45.0), start: 0.25, span: 1.0 }
        );

        let g = Gradient::conic(0.5, 0.5, -90.0, -180.0, red_blue());
        let GradientParams::Conic { start, span, .. } = *GradientMaterial::new(&g, rect()).unwrap().params()
        else {
            panic!("conic expected");
        };
        assert_eq!((start, span), (0.75, -0.5));
    }

    #[test]
    fn invalid_gradient_has_no_material() {
        assert!(GradientMaterial::new(&Gradient::default(), rect()).is_none());
    }

    // ── compare ───────────────────────────────────────────────────────────

    #[test]
    fn compare_sees_stops_and_geometry() {
        let a = GradientMaterial::new(&Gradient::vertical(red_blue()), rect()).unwrap();
        let b = GradientMaterial::new(&Gradient::horizontal(red_blue()), rect()).unwrap();
        assert_eq!(a.compare(&a.clone()), Ordering::Equal);
        assert_ne!(a.compare(&b), Ordering::Equal);

        let reverted = Gradient::vertical(red_blue()).reverted();
        let c = GradientMaterial::new(&reverted, rect()).unwrap();
        assert_ne!(a.compare(&c), Ordering::Equal);

        let repeat = Gradient::vertical(red_blue()).with_spread(SpreadMode::Repeat);
        let d = GradientMaterial::new(&repeat, rect()).unwrap();
        assert_ne!(a.compare(&d), Ordering::Equal);
    }

    #[test]
    fn compare_across_variants() {
        let flat = Material::Flat(Color::RED);
        assert_eq!(flat.compare(&Material::Flat(Color::RED)), Ordering::Equal);
        assert_ne!(flat.compare(&Material::Flat(Color::BLUE)), Ordering::Equal);
        assert_eq!(flat.compare(&Material::VertexColor), Ordering::Less);
    }

    #[test]
    fn flat_uniform_is_premultiplied() {
        let m = Material::Flat(Color::RED.with_alpha(0.5));
        assert_eq!(m.uniform().color, [0.5, 0.0, 0.0, 0.5]);
    }
}

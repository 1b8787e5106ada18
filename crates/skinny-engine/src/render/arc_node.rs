use crate::config::{self, RenderHints};
use crate::coords::Rect;
use crate::geometry::{ArcMetrics, ArcRenderer, Geometry, Line};
use crate::hash::HashFold;
use crate::paint::{Gradient, GradientType};

use super::box_node::{color_hash, is_malformed, NodeUpdate};
use super::fill_node::FillNode;
use super::material::{GradientMaterial, Material};

const METRICS_SEED: u64 = 0x61_72_63;
const FILL_SEED: u64 = 0x61_66_69_6c;
const BORDER_SEED: u64 = 0x61_62_6f_72;

/// Fill and border of an arc shaped control (pie, gauge, ring).
#[derive(Debug)]
pub struct ArcNode {
    fill: FillNode,
    border: FillNode,
    hints: RenderHints,
    warned_invalid: bool,
}

impl Default for ArcNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcNode {
    /// Uses the process-wide [`config::render_hints`].
    pub fn new() -> Self {
        Self::with_hints(config::render_hints())
    }

    pub fn with_hints(hints: RenderHints) -> Self {
        Self { fill: FillNode::new(), border: FillNode::new(), hints, warned_invalid: false }
    }

    #[inline]
    pub fn fill(&self) -> &FillNode {
        &self.fill
    }

    #[inline]
    pub fn border(&self) -> &FillNode {
        &self.border
    }

    /// Parts in paint order.
    pub fn parts(&self) -> [&FillNode; 2] {
        [&self.fill, &self.border]
    }

    /// Updates both parts for a new frame.
    ///
    /// `radial` selects spoke offsets instead of normal offsets for
    /// non-circular ellipses. Gradients the arc renderer cannot lay out
    /// along the sweep are resolved against `rect` for the shader path.
    pub fn update_node(
        &mut self,
        rect: Rect,
        metrics: &ArcMetrics,
        radial: bool,
        border_width: f32,
        border: &Gradient,
        fill: &Gradient,
    ) -> NodeUpdate {
        for g in [fill, border] {
            if is_malformed(g) && !self.warned_invalid {
                log::warn!("arc node: ignoring invalid gradient ({} stops)", g.stops().len());
                self.warned_invalid = true;
            }
        }

        if rect.is_empty() || !rect.is_finite() || !border_width.is_finite() {
            return NodeUpdate { fill: self.fill.reset(), border: self.border.reset() };
        }

        let renderer = ArcRenderer::new(rect, metrics, radial);
        let thickness = renderer.metrics().thickness;
        let border_width = border_width.max(0.0);

        let mut h = HashFold::new(METRICS_SEED);
        h.rect(rect).u8(radial as u8).f32(border_width);
        renderer.metrics().fold_hash(&mut h);
        let metrics_hash = h.finish();

        let fill = if renderer.fill_count(thickness, border_width) == 0 || !fill.is_visible() {
            self.fill.reset()
        } else {
            let material = self.material_for(&renderer, rect, fill);
            let color_hash = color_hash(FILL_SEED, &material, |h| fill.fold_hash(h));
            let colored = renderer.clone().with_fill_gradient(Some(fill));

            self.fill.apply(metrics_hash, color_hash, material, |geometry| match geometry {
                Geometry::Flat(lines) => renderer.render_fill::<Line>(thickness, border_width, lines),
                Geometry::Colored(lines) => colored.render_fill(thickness, border_width, lines),
            })
        };

        let border = if renderer.border_count(border_width) == 0 || !border.is_visible() {
            self.border.reset()
        } else {
            let material = self.material_for(&renderer, rect, border);
            let color_hash = color_hash(BORDER_SEED, &material, |h| border.fold_hash(h));
            let colored = renderer.clone().with_border_gradient(Some(border));

            self.border.apply(metrics_hash, color_hash, material, |geometry| match geometry {
                Geometry::Flat(lines) => renderer.render_border::<Line>(thickness, border_width, lines),
                Geometry::Colored(lines) => colored.render_border(thickness, border_width, lines),
            })
        };

        NodeUpdate { fill, border }
    }

    fn material_for(&self, renderer: &ArcRenderer<'_>, rect: Rect, gradient: &Gradient) -> Material {
        if gradient.is_monochrome() {
            return Material::Flat(gradient.start_color());
        }
        if self.hints.prefer_colored_geometry && renderer.is_gradient_supported(gradient) {
            return Material::VertexColor;
        }

        // Stops run along the sweep on both paths.
        let along_sweep;
        let gradient = if gradient.kind() == GradientType::Stops {
            let m = renderer.metrics();
            along_sweep = Gradient::conic(0.5, 0.5, m.start_angle, m.span_angle, gradient.stops().to_vec());
            &along_sweep
        } else {
            gradient
        };

        match GradientMaterial::new(gradient, rect) {
            Some(m) => Material::Gradient(m),
            // Visible gradients are valid; keep the start color regardless.
            None => Material::Flat(gradient.start_color()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::geometry::VertexLayout;
    use crate::paint::{Color, GradientStop};
    use crate::render::{FillMode, GradientParams};

    fn hints() -> RenderHints {
        RenderHints::default()
    }

    fn red_blue() -> Vec<GradientStop> {
        vec![GradientStop::new(0.0, Color::RED), GradientStop::new(1.0, Color::BLUE)]
    }

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn gauge_with_border() {
        let mut node = ArcNode::with_hints(hints());
        let metrics = ArcMetrics::new(90.0, -270.0, 12.0);
        node.update_node(
            square(),
            &metrics,
            false,
            2.0,
            &Gradient::monochrome(Color::BLACK),
            &Gradient::monochrome(Color::GREEN),
        );

        let r = ArcRenderer::new(square(), &metrics, false);
        assert_eq!(node.fill().geometry().line_count(), r.fill_count(12.0, 2.0));
        assert_eq!(node.border().geometry().line_count(), 2 * r.arc_line_count() + 6);
        assert_eq!(node.fill().mode(), FillMode::Flat);
    }

    #[test]
    fn conic_fill_modes() {
        let metrics = ArcMetrics::new(0.0, 180.0, 10.0);
        let centered = Gradient::conic(0.5, 0.5, 0.0, 180.0, red_blue());
        let skewed = Gradient::conic(0.2, 0.5, 0.0, 180.0, red_blue());
        let none = Gradient::default();

        let mut node = ArcNode::with_hints(hints());
        node.update_node(square(), &metrics, false, 0.0, &none, &centered);
        assert_eq!(node.fill().mode(), FillMode::VertexColored);
        assert_eq!(node.fill().geometry().layout(), VertexLayout::Colored);
        assert!(node.border().is_empty());

        node.update_node(square(), &metrics, false, 0.0, &none, &skewed);
        assert_eq!(node.fill().mode(), FillMode::Shaded(GradientType::Conic));
        assert_eq!(node.fill().geometry().layout(), VertexLayout::Flat);
    }

    #[test]
    fn stops_follow_the_sweep_without_vertex_colors() {
        let metrics = ArcMetrics::new(0.0, 270.0, 10.0);
        let fill = Gradient::new(red_blue());
        let none = Gradient::default();

        let mut colored = ArcNode::with_hints(RenderHints { prefer_colored_geometry: true, ..hints() });
        colored.update_node(square(), &metrics, false, 0.0, &none, &fill);
        assert_eq!(colored.fill().mode(), FillMode::VertexColored);

        let mut shaded = ArcNode::with_hints(RenderHints { prefer_colored_geometry: false, ..hints() });
        shaded.update_node(square(), &metrics, false, 0.0, &none, &fill);
        assert_eq!(shaded.fill().mode(), FillMode::Shaded(GradientType::Conic));

        let Material::Gradient(m) = shaded.fill().material() else {
            panic!("expected a gradient material, got {:?}", shaded.fill().material());
        };
        assert_eq!(m.params(), &GradientParams::Conic { center: Vec2::new(50.0, 50.0), start: 0.0, span: 0.75 });
        assert_eq!(m.stops(), red_blue().as_slice());
    }

    #[test]
    fn border_wider_than_half_thickness_drops_fill() {
        let mut node = ArcNode::with_hints(hints());
        node.update_node(
            square(),
            &ArcMetrics::new(0.0, 360.0, 10.0),
            false,
            5.0,
            &Gradient::monochrome(Color::BLACK),
            &Gradient::monochrome(Color::GREEN),
        );
        assert!(node.fill().is_empty());
        assert!(!node.border().is_empty());
    }

    #[test]
    fn repeated_update_is_noop() {
        let mut node = ArcNode::with_hints(hints());
        let metrics = ArcMetrics::new(0.0, 120.0, 8.0);
        let fill = Gradient::new(red_blue());
        let border = Gradient::monochrome(Color::BLACK);

        node.update_node(square(), &metrics, true, 1.0, &border, &fill);
        assert!(node.update_node(square(), &metrics, true, 1.0, &border, &fill).is_noop());

        let moved = node.update_node(Rect::new(5.0, 0.0, 100.0, 100.0), &metrics, true, 1.0, &border, &fill);
        assert!(moved.fill.geometry_rebuilt && !moved.fill.material_swapped);
    }
}

use crate::config::{self, RenderHints};
use crate::coords::Rect;
use crate::geometry::{BoxBorderColors, BoxBorderMetrics, BoxRenderer, BoxShapeMetrics, Geometry, Line};
use crate::hash::HashFold;
use crate::paint::Gradient;

use super::fill_node::{FillNode, UpdateReport};
use super::material::{GradientMaterial, Material};

const METRICS_SEED: u64 = 0x62_6f_78;
const FILL_SEED: u64 = 0x66_69_6c_6c;
const BORDER_SEED: u64 = 0x62_6f_72_64;

/// Reports of the two parts of a node.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdate {
    pub fill: UpdateReport,
    pub border: UpdateReport,
}

impl NodeUpdate {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.fill.is_noop() && self.border.is_noop()
    }
}

/// Fill and border of a box shaped control.
#[derive(Debug)]
pub struct BoxNode {
    fill: FillNode,
    border: FillNode,
    hints: RenderHints,
    warned_invalid: bool,
}

impl Default for BoxNode {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxNode {
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
    /// An empty or non-finite rectangle, a fill consumed by the border and
    /// invisible colors all end up as parts without geometry.
    pub fn update_node(
        &mut self,
        rect: Rect,
        shape: &BoxShapeMetrics,
        border_metrics: &BoxBorderMetrics,
        border_colors: &BoxBorderColors,
        fill: &Gradient,
    ) -> NodeUpdate {
        if rect.is_empty() || !rect.is_finite() {
            return NodeUpdate { fill: self.fill.reset(), border: self.border.reset() };
        }

        let renderer = BoxRenderer::new(rect, shape, border_metrics);

        let mut h = HashFold::new(METRICS_SEED);
        h.rect(rect);
        shape.fold_hash(&mut h);
        border_metrics.fold_hash(&mut h);
        let metrics_hash = h.finish();

        NodeUpdate {
            fill: self.update_fill(&renderer, metrics_hash, fill),
            border: self.update_border(&renderer, metrics_hash, border_colors),
        }
    }

    fn update_fill(&mut self, renderer: &BoxRenderer, metrics_hash: u64, gradient: &Gradient) -> UpdateReport {
        if is_malformed(gradient) {
            self.warn_invalid("fill gradient", gradient);
        }
        if !renderer.geometry().has_fill() || !gradient.is_visible() {
            return self.fill.reset();
        }

        let material = if gradient.is_monochrome() {
            Material::Flat(gradient.start_color())
        } else if self.hints.prefer_colored_geometry && renderer.is_gradient_supported(gradient) {
            Material::VertexColor
        } else {
            match GradientMaterial::new(gradient, renderer.geometry().inner) {
                Some(m) => Material::Gradient(m),
                None => return self.fill.reset(),
            }
        };

        let color_hash = color_hash(FILL_SEED, &material, |h| gradient.fold_hash(h));

        self.fill.apply(metrics_hash, color_hash, material, |geometry| match geometry {
            Geometry::Flat(lines) => renderer.render_fill::<Line>(None, lines),
            Geometry::Colored(lines) => renderer.render_fill(Some(gradient), lines),
        })
    }

    fn update_border(
        &mut self,
        renderer: &BoxRenderer,
        metrics_hash: u64,
        colors: &BoxBorderColors,
    ) -> UpdateReport {
        for g in [&colors.left, &colors.top, &colors.right, &colors.bottom] {
            if is_malformed(g) {
                self.warn_invalid("border gradient", g);
            }
        }
        if !renderer.geometry().has_border() || !colors.is_valid() || !colors.is_visible() {
            return self.border.reset();
        }

        // Edge gradients always have a vertex color layout.
        let material = if colors.is_monochrome() {
            Material::Flat(colors.top.start_color())
        } else {
            Material::VertexColor
        };

        let color_hash = color_hash(BORDER_SEED, &material, |h| colors.fold_hash(h));

        self.border.apply(metrics_hash, color_hash, material, |geometry| match geometry {
            Geometry::Flat(lines) => renderer.render_border::<Line>(None, lines),
            Geometry::Colored(lines) => renderer.render_border(Some(colors), lines),
        })
    }

    fn warn_invalid(&mut self, what: &str, gradient: &Gradient) {
        if !self.warned_invalid {
            log::warn!("box node: ignoring invalid {what} ({} stops)", gradient.stops().len());
            self.warned_invalid = true;
        }
    }
}

/// A gradient with stops that still fails validation. Gradients without
/// any stops mean "nothing to draw" and are not reported.
pub(crate) fn is_malformed(gradient: &Gradient) -> bool {
    !gradient.stops().is_empty() && !gradient.is_valid()
}

/// Hash of the colors plus, for shader materials, their resolved geometry.
pub(crate) fn color_hash(seed: u64, material: &Material, fold_colors: impl FnOnce(&mut HashFold)) -> u64 {
    let mut h = HashFold::new(seed);
    h.u8(material.material_type() as u8);
    match material {
        Material::Gradient(m) => m.fold_hash(&mut h),
        Material::Flat(_) | Material::VertexColor => fold_colors(&mut h),
    }
    h.finish()
}

use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::{Geometry, VertexLayout};
use crate::paint::GradientType;

use super::material::{Material, MaterialType};

/// How a node colors its geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FillMode {
    /// Flat geometry, one uniform color.
    Flat,
    /// Colored geometry.
    VertexColored,
    /// Flat geometry, gradient shader.
    Shaded(GradientType),
}

impl FillMode {
    pub fn of(material: &Material) -> Self {
        match material.material_type() {
            MaterialType::Flat => FillMode::Flat,
            MaterialType::VertexColor => FillMode::VertexColored,
            MaterialType::Linear => FillMode::Shaded(GradientType::Linear),
            MaterialType::Radial => FillMode::Shaded(GradientType::Radial),
            MaterialType::Conic => FillMode::Shaded(GradientType::Conic),
        }
    }

    #[inline]
    pub fn vertex_layout(self) -> VertexLayout {
        match self {
            FillMode::VertexColored => VertexLayout::Colored,
            FillMode::Flat | FillMode::Shaded(_) => VertexLayout::Flat,
        }
    }
}

/// What one [`FillNode`] update did.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub geometry_rebuilt: bool,
    pub material_rebuilt: bool,
    /// The material changed its variant rather than its values.
    pub material_swapped: bool,
    /// The node dropped its geometry.
    pub cleared: bool,
}

impl UpdateReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        *self == UpdateReport::default()
    }
}

/// Identity of a node for GPU resource bookkeeping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Geometry plus material of one drawable part (a fill or a border).
///
/// Changes are detected by comparing a metrics hash and a color hash with
/// the ones of the previous update; only the stale half is rebuilt. For
/// vertex-colored nodes the colors live in the geometry, so a color change
/// rebuilds the geometry as well.
#[derive(Debug)]
pub struct FillNode {
    id: NodeId,
    geometry: Geometry,
    material: Material,
    metrics_hash: Option<u64>,
    color_hash: Option<u64>,
    geometry_generation: u64,
    material_generation: u64,
}

impl Default for FillNode {
    fn default() -> Self {
        Self::new()
    }
}

impl FillNode {
    pub fn new() -> Self {
        Self {
            id: NodeId(NEXT_NODE.fetch_add(1, Ordering::Relaxed)),
            geometry: Geometry::default(),
            material: Material::default(),
            metrics_hash: None,
            color_hash: None,
            geometry_generation: 0,
            material_generation: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    #[inline]
    pub fn mode(&self) -> FillMode {
        FillMode::of(&self.material)
    }

    /// Nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    /// Bumped whenever the geometry is rebuilt.
    #[inline]
    pub fn geometry_generation(&self) -> u64 {
        self.geometry_generation
    }

    /// Bumped whenever the material is rebuilt or swapped.
    #[inline]
    pub fn material_generation(&self) -> u64 {
        self.material_generation
    }

    /// Brings the node up to date.
    ///
    /// `tessellate` gets a cleared geometry in the layout of the material's
    /// mode and is only called when the geometry is stale.
    pub fn apply<F>(&mut self, metrics_hash: u64, color_hash: u64, material: Material, tessellate: F) -> UpdateReport
    where
        F: FnOnce(&mut Geometry),
    {
        let mut report = UpdateReport::default();
        let mode = FillMode::of(&material);
        let swapped = mode != self.mode();

        let colors_changed = self.color_hash != Some(color_hash);
        let layout_changed = mode.vertex_layout() != self.geometry.layout();

        let geometry_stale = self.metrics_hash != Some(metrics_hash)
            || layout_changed
            || (mode == FillMode::VertexColored && colors_changed);

        if swapped || colors_changed || material != self.material {
            report.material_rebuilt = true;
            report.material_swapped = swapped;
            self.material = material;
            self.material_generation += 1;
        }

        if geometry_stale {
            self.geometry = match mode.vertex_layout() {
                VertexLayout::Flat => Geometry::Flat(Vec::new()),
                VertexLayout::Colored => Geometry::Colored(Vec::new()),
            };
            tessellate(&mut self.geometry);
            self.geometry_generation += 1;
            report.geometry_rebuilt = true;
        }

        self.metrics_hash = Some(metrics_hash);
        self.color_hash = Some(color_hash);

        if !report.is_noop() {
            log::trace!(
                "fill node {:?}: {:?}, {} lines, {report:?}",
                self.id,
                mode,
                self.geometry.line_count()
            );
        }
        report
    }

    /// Drops the geometry so the node draws nothing. The next
    /// [`FillNode::apply`] rebuilds everything.
    pub fn reset(&mut self) -> UpdateReport {
        let was_empty = self.geometry.is_empty() && self.metrics_hash.is_none();

        self.geometry.clear();
        self.metrics_hash = None;
        self.color_hash = None;

        if was_empty {
            return UpdateReport::default();
        }
        self.geometry_generation += 1;
        UpdateReport { cleared: true, ..UpdateReport::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::geometry::{ColoredLine, Line, LineVertex};
    use crate::paint::Color;

    fn flat_lines(g: &mut Geometry) {
        if let Geometry::Flat(lines) = g {
            lines.push(Line::from_points(Vec2::new(0.0, 0.0), [0.0; 4], Vec2::new(1.0, 0.0), [0.0; 4]));
            lines.push(Line::from_points(Vec2::new(0.0, 1.0), [0.0; 4], Vec2::new(1.0, 1.0), [0.0; 4]));
        }
    }

    fn colored_lines(g: &mut Geometry) {
        if let Geometry::Colored(lines) = g {
            lines.push(ColoredLine::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Color::RED));
            lines.push(ColoredLine::new(Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Color::BLUE));
        }
    }

    // ── apply ─────────────────────────────────────────────────────────────

    #[test]
    fn first_update_builds_everything() {
        let mut node = FillNode::new();
        let r = node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        assert!(r.geometry_rebuilt && r.material_rebuilt);
        assert_eq!(node.geometry().line_count(), 2);
        assert_eq!(node.mode(), FillMode::Flat);
    }

    #[test]
    fn unchanged_inputs_do_nothing() {
        let mut node = FillNode::new();
        node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        let (g, m) = (node.geometry_generation(), node.material_generation());

        let r = node.apply(1, 2, Material::Flat(Color::RED), |_| panic!("tessellated twice"));
        assert!(r.is_noop());
        assert_eq!((node.geometry_generation(), node.material_generation()), (g, m));
    }

    #[test]
    fn color_change_keeps_flat_geometry() {
        let mut node = FillNode::new();
        node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        let r = node.apply(1, 3, Material::Flat(Color::BLUE), |_| panic!("geometry is still valid"));
        assert!(r.material_rebuilt && !r.material_swapped && !r.geometry_rebuilt);
    }

    #[test]
    fn color_change_rebuilds_colored_geometry() {
        let mut node = FillNode::new();
        node.apply(1, 2, Material::VertexColor, colored_lines);
        let r = node.apply(1, 3, Material::VertexColor, colored_lines);
        assert!(r.geometry_rebuilt);
    }

    #[test]
    fn mode_change_swaps_material_and_layout() {
        let mut node = FillNode::new();
        node.apply(1, 2, Material::VertexColor, colored_lines);
        assert_eq!(node.geometry().layout(), VertexLayout::Colored);

        // Same hashes, different variant: swapped regardless.
        let r = node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        assert!(r.material_swapped && r.geometry_rebuilt);
        assert_eq!(node.geometry().layout(), VertexLayout::Flat);
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_clears_geometry_once() {
        let mut node = FillNode::new();
        node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        assert!(node.reset().cleared);
        assert!(node.is_empty());
        assert!(node.reset().is_noop());

        let r = node.apply(1, 2, Material::Flat(Color::RED), flat_lines);
        assert!(r.geometry_rebuilt);
    }

    #[test]
    fn node_ids_differ() {
        assert_ne!(FillNode::new().id(), FillNode::new().id());
    }
}

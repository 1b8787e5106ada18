//! Demo controls: a capsule button, a bevelled panel, a gauge and two rings.

use skinny_engine::coords::Rect;
use skinny_engine::geometry::{ArcMetrics, BoxBorderColors, BoxBorderMetrics, BoxShapeMetrics, SizeMode};
use skinny_engine::paint::{Color, Gradient, GradientStop};
use skinny_engine::render::{ArcNode, BoxNode, FillNode, NodeUpdate};

pub struct Scene {
    boxes: Vec<(&'static str, BoxNode)>,
    arcs: Vec<(&'static str, ArcNode)>,
}

impl Scene {
    pub fn new() -> Self {
        Self { boxes: Vec::new(), arcs: Vec::new() }
    }

    /// Lays out all controls; returns the reports of every node.
    pub fn build(&mut self) -> Vec<(&'static str, NodeUpdate)> {
        let mut reports = Vec::new();

        let mut button = BoxNode::new();
        reports.push((
            "capsule button",
            button.update_node(
                Rect::new(20.0, 20.0, 200.0, 48.0),
                &BoxShapeMetrics::uniform(24.0),
                &BoxBorderMetrics::uniform(1.0),
                &BoxBorderColors::from(Color::from_rgba8(20, 40, 90, 255)),
                &Gradient::vertical(vec![
                    GradientStop::new(0.0, Color::from_rgba8(90, 150, 255, 255)),
                    GradientStop::new(1.0, Color::from_rgba8(30, 80, 200, 255)),
                ]),
            ),
        ));
        self.boxes.push(("capsule button", button));

        let mut panel = BoxNode::new();
        reports.push((
            "bevel panel",
            panel.update_node(
                Rect::new(20.0, 90.0, 200.0, 120.0),
                &BoxShapeMetrics::uniform(6.0),
                &BoxBorderMetrics::uniform(2.0),
                &BoxBorderColors::light_dark(Color::WHITE, Color::from_rgba8(60, 60, 60, 255)),
                &Gradient::monochrome(Color::from_rgba8(200, 200, 200, 255)),
            ),
        ));
        self.boxes.push(("bevel panel", panel));

        let mut gauge = ArcNode::new();
        reports.push((
            "gauge",
            gauge.update_node(
                Rect::new(260.0, 20.0, 180.0, 180.0),
                &ArcMetrics::new(210.0, -240.0, 10.0).with_size_mode(SizeMode::Relative),
                false,
                1.0,
                &Gradient::monochrome(Color::BLACK),
                &Gradient::from_colors(&[Color::GREEN, Color::YELLOW, Color::RED], false),
            ),
        ));
        self.arcs.push(("gauge", gauge));

        let mut ring = ArcNode::new();
        reports.push((
            "conic ring",
            ring.update_node(
                Rect::new(260.0, 220.0, 90.0, 90.0),
                &ArcMetrics::new(0.0, 360.0, 14.0),
                false,
                0.0,
                &Gradient::default(),
                &Gradient::conic(0.5, 0.5, 0.0, 360.0, vec![
                    GradientStop::new(0.0, Color::RED),
                    GradientStop::new(0.5, Color::BLUE),
                    GradientStop::new(1.0, Color::RED),
                ]),
            ),
        ));
        self.arcs.push(("conic ring", ring));

        let mut ellipse = ArcNode::new();
        reports.push((
            "radial ellipse",
            ellipse.update_node(
                Rect::new(360.0, 230.0, 100.0, 60.0),
                &ArcMetrics::new(0.0, 360.0, 12.0),
                true,
                0.0,
                &Gradient::default(),
                &Gradient::radial(0.5, 0.5, 0.5, vec![
                    GradientStop::new(0.0, Color::WHITE),
                    GradientStop::new(1.0, Color::from_rgba8(120, 0, 160, 255)),
                ]),
            ),
        ));
        self.arcs.push(("radial ellipse", ellipse));

        reports
    }

    /// Parts of every control in paint order.
    pub fn parts(&self) -> Vec<(&'static str, &FillNode)> {
        let boxes = self.boxes.iter().flat_map(|(name, n)| n.parts().map(|p| (*name, p)));
        let arcs = self.arcs.iter().flat_map(|(name, n)| n.parts().map(|p| (*name, p)));
        boxes.chain(arcs).collect()
    }
}

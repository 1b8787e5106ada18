use pretty_assertions::assert_eq;

use skinny_engine::config::RenderHints;
use skinny_engine::coords::{Rect, Vec2};
use skinny_engine::geometry::{
    ArcIterator, ArcMetrics, ArcRenderer, BoxBorderColors, BoxBorderMetrics, BoxRenderer, BoxShapeMetrics,
    ColoredLine, Line, LineVertex,
};
use skinny_engine::paint::{self, Color, Gradient, GradientStop};
use skinny_engine::render::{ArcNode, BoxNode, FillMode, Material};

fn close(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
}

// ── scenario A: capsule ───────────────────────────────────────────────────

#[test]
fn capsule_fill_is_red_rows() {
    let renderer = BoxRenderer::new(
        Rect::new(0.0, 0.0, 100.0, 40.0),
        &BoxShapeMetrics::uniform(20.0),
        &BoxBorderMetrics::default(),
    );
    let red = Gradient::monochrome(Color::RED);

    let mut lines: Vec<ColoredLine> = Vec::new();
    renderer.render_fill(Some(&red), &mut lines);

    let expected = 2 * (ArcIterator::segment_hint(20.0) + 1);
    assert_eq!(lines.len(), expected);
    assert_eq!(renderer.fill_count(Some(&red)), expected);
    assert!(lines.iter().all(|l| l.has_color(Color::RED.premultiplied())));
}

#[test]
fn capsule_node_is_flat_red() {
    let mut node = BoxNode::with_hints(RenderHints::default());
    node.update_node(
        Rect::new(0.0, 0.0, 100.0, 40.0),
        &BoxShapeMetrics::uniform(20.0),
        &BoxBorderMetrics::default(),
        &BoxBorderColors::default(),
        &Gradient::monochrome(Color::RED),
    );

    assert_eq!(node.fill().mode(), FillMode::Flat);
    assert_eq!(node.fill().material(), &Material::Flat(Color::RED));
    assert_eq!(node.fill().geometry().line_count(), 2 * (ArcIterator::segment_hint(20.0) + 1));
}

#[test]
fn square_corners_match_plain_rect() {
    let rect = Rect::new(5.0, 5.0, 60.0, 30.0);
    let zero = BoxRenderer::new(rect, &BoxShapeMetrics::uniform(0.0), &BoxBorderMetrics::default());
    let negative = BoxRenderer::new(rect, &BoxShapeMetrics::uniform(-4.0), &BoxBorderMetrics::default());

    let mut a: Vec<Line> = Vec::new();
    let mut b: Vec<Line> = Vec::new();
    zero.render_fill(None, &mut a);
    negative.render_fill(None, &mut b);

    assert_eq!(a.len(), 2);
    assert_eq!(a, b);
}

#[test]
fn wide_border_leaves_no_fill() {
    let renderer = BoxRenderer::new(
        Rect::new(0.0, 0.0, 80.0, 40.0),
        &BoxShapeMetrics::uniform(6.0),
        &BoxBorderMetrics::uniform(20.0),
    );
    let mut lines: Vec<Line> = Vec::new();
    renderer.render_fill(Some(&Gradient::monochrome(Color::RED)), &mut lines);
    assert!(lines.is_empty());
}

// ── scenario B: stop interpolation ────────────────────────────────────────

#[test]
fn interpolating_two_stop_gradients() {
    let a = vec![GradientStop::new(0.0, Color::RED), GradientStop::new(1.0, Color::BLUE)];
    let b = vec![GradientStop::new(0.0, Color::GREEN), GradientStop::new(1.0, Color::YELLOW)];

    let mid = paint::interpolated_stops(&a, &b, 0.5);
    assert_eq!(
        mid,
        vec![
            GradientStop::new(0.0, Color::interpolated(Color::RED, Color::GREEN, 0.5)),
            GradientStop::new(1.0, Color::interpolated(Color::BLUE, Color::YELLOW, 0.5)),
        ]
    );

    assert_eq!(paint::interpolated_stops(&a, &b, 0.0), a);
    assert_eq!(paint::interpolated_stops(&a, &b, 1.0), b);
    assert_eq!(paint::interpolated_stops(&a, &a, 0.3), a);
}

#[test]
fn stop_list_identities() {
    let stops = vec![
        GradientStop::new(0.0, Color::RED),
        GradientStop::new(0.25, Color::GREEN),
        GradientStop::new(1.0, Color::BLUE),
    ];

    assert_eq!(paint::extracted_stops(&stops, 0.0, 1.0), stops);
    assert_eq!(paint::color_at(&stops, 0.0), Color::RED);
    assert_eq!(paint::color_at(&stops, 1.0), Color::BLUE);

    let twice = paint::reverted_stops(&paint::reverted_stops(&stops));
    assert_eq!(twice.len(), stops.len());
    for (x, y) in twice.iter().zip(&stops) {
        assert!((x.position - y.position).abs() < 1e-6);
        assert_eq!(x.color, y.color);
    }
}

// ── scenario C: open arc caps ─────────────────────────────────────────────

#[test]
fn open_arc_border_has_caps() {
    let rect = Rect::new(0.0, 0.0, 120.0, 120.0);
    let metrics = ArcMetrics::new(45.0, 200.0, 16.0);
    let renderer = ArcRenderer::new(rect, &metrics, false);
    assert!(!metrics.is_closed());

    let border = 3.0;
    let n = renderer.arc_line_count();
    assert_eq!(renderer.border_count(border), 2 * n + 6);

    let mut lines: Vec<Line> = Vec::new();
    renderer.render_border(16.0, border, &mut lines);
    assert_eq!(lines.len(), 2 * n + 6);

    // Start cap: degenerate, then widening to the border width.
    let (p, q) = lines[0].points();
    assert_eq!(p, q);
    let (p, q) = lines[2].points();
    assert!(((q - p).length() - border).abs() < 1e-3);
    // The cap ends on the first outer ring vertex.
    assert!(close(lines[2].points().0, lines[3].points().0));

    // End cap sits between the rings, anchored on the last outer vertex.
    let (p, q) = lines[n + 3].points();
    assert_eq!(p, q);
    assert!(close(p, lines[n + 2].points().0));
    let (p, q) = lines[n + 5].points();
    assert!(((q - p).length() - border).abs() < 1e-3);
}

#[test]
fn closed_arc_border_has_no_caps() {
    let renderer = ArcRenderer::new(Rect::new(0.0, 0.0, 120.0, 120.0), &ArcMetrics::new(0.0, 360.0, 16.0), false);
    assert_eq!(renderer.border_count(2.0), 2 * renderer.arc_line_count());
}

#[test]
fn arc_iterator_closes_full_turn() {
    for n in 3..=160 {
        let mut it = ArcIterator::new(std::f64::consts::TAU, n, false);
        for _ in 0..n {
            it.increment();
        }
        assert!((it.cos() - 1.0).abs() < 1e-6, "cos off for {n} steps");
        assert!(it.sin().abs() < 1e-6, "sin off for {n} steps");
    }
}

// ── node dirty tracking ───────────────────────────────────────────────────

#[test]
fn box_node_rebuilds_only_stale_halves() {
    let mut node = BoxNode::with_hints(RenderHints { prefer_colored_geometry: false, ..RenderHints::default() });
    let rect = Rect::new(0.0, 0.0, 120.0, 60.0);
    let shape = BoxShapeMetrics::uniform(10.0);
    let border = BoxBorderMetrics::default();
    let colors = BoxBorderColors::default();
    let stops = vec![GradientStop::new(0.0, Color::RED), GradientStop::new(1.0, Color::BLUE)];

    let first = node.update_node(rect, &shape, &border, &colors, &Gradient::vertical(stops.clone()));
    assert!(first.fill.geometry_rebuilt && first.fill.material_rebuilt);

    // New colors on a shader material: geometry untouched.
    let recolored = vec![GradientStop::new(0.0, Color::GREEN), GradientStop::new(1.0, Color::BLUE)];
    let second = node.update_node(rect, &shape, &border, &colors, &Gradient::vertical(recolored.clone()));
    assert!(!second.fill.geometry_rebuilt && second.fill.material_rebuilt);

    // Gradient collapses to one color: different material variant.
    let third = node.update_node(rect, &shape, &border, &colors, &Gradient::monochrome(Color::GREEN));
    assert!(third.fill.material_swapped);
    assert_eq!(node.fill().mode(), FillMode::Flat);

    // Invisible fill: geometry dropped.
    let fourth = node.update_node(rect, &shape, &border, &colors, &Gradient::monochrome(Color::TRANSPARENT));
    assert!(fourth.fill.cleared);
    assert!(node.fill().is_empty());
}

#[test]
fn arc_node_tracks_generations() {
    let mut node = ArcNode::with_hints(RenderHints::default());
    let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    let fill = Gradient::monochrome(Color::BLUE);
    let none = Gradient::default();

    node.update_node(rect, &ArcMetrics::new(0.0, 90.0, 10.0), false, 0.0, &none, &fill);
    let generation = node.fill().geometry_generation();

    node.update_node(rect, &ArcMetrics::new(0.0, 90.0, 10.0), false, 0.0, &none, &fill);
    assert_eq!(node.fill().geometry_generation(), generation);

    node.update_node(rect, &ArcMetrics::new(0.0, 180.0, 10.0), false, 0.0, &none, &fill);
    assert_eq!(node.fill().geometry_generation(), generation + 1);
}

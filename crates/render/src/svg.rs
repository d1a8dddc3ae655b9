// SVG drawing of the laid-out graph

use std::fmt::Write as _;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

use crate::color::spectrum;
use crate::layout::Point;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 800.0;
const MARGIN: f64 = 90.0;
const NODE_RADIUS: f64 = 30.0;
const NODE_FILL: &str = "#add8e6";
const ARROW_LEN: f64 = 12.0;

/// Draw the graph at the given positions. Edges are painted first (one
/// spectrum color each, slightly curved, arrowhead at the target), then
/// the translucent node circles, then the labels.
pub fn render(graph: &DiGraph<String, ()>, positions: &[Point], title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = writeln!(out, r#"  <rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        out,
        r#"  <text x="{}" y="40" text-anchor="middle" font-family="sans-serif" font-size="20">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    );

    let colors = spectrum(graph.edge_count());
    for (idx, edge) in graph.edge_references().enumerate() {
        let from = to_canvas(positions[edge.source().index()]);
        let to = to_canvas(positions[edge.target().index()]);
        draw_edge(&mut out, from, to, &colors[idx].to_hex());
    }

    for node in graph.node_indices() {
        let center = to_canvas(positions[node.index()]);
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}" fill-opacity="0.5"/>"#,
            center.x, center.y, NODE_RADIUS, NODE_FILL
        );
    }
    for node in graph.node_indices() {
        let center = to_canvas(positions[node.index()]);
        let _ = writeln!(
            out,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="13" font-weight="bold">{}</text>"#,
            center.x,
            center.y,
            escape(&graph[node])
        );
    }

    out.push_str("</svg>\n");
    out
}

/// Map unit-box coordinates to canvas pixels, leaving the margin free.
fn to_canvas(p: Point) -> Point {
    let half_w = WIDTH / 2.0 - MARGIN;
    let half_h = HEIGHT / 2.0 - MARGIN;
    Point {
        x: WIDTH / 2.0 + p.x * half_w,
        // SVG y grows downward
        y: HEIGHT / 2.0 - p.y * half_h,
    }
}

fn draw_edge(out: &mut String, from: Point, to: Point, color: &str) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dist = (dx * dx + dy * dy).sqrt();

    if dist < 1.0 {
        // Self-loop: a small circle resting on top of the node
        let _ = writeln!(
            out,
            r#"  <circle cx="{:.1}" cy="{:.1}" r="14" fill="none" stroke="{}" stroke-width="1.5"/>"#,
            from.x,
            from.y - NODE_RADIUS,
            color
        );
        return;
    }

    let ux = dx / dist;
    let uy = dy / dist;
    // Trim the segment at the circle borders, leaving room for the arrowhead
    let start = Point {
        x: from.x + ux * NODE_RADIUS,
        y: from.y + uy * NODE_RADIUS,
    };
    let tip = Point {
        x: to.x - ux * NODE_RADIUS,
        y: to.y - uy * NODE_RADIUS,
    };
    // Curve control point offset perpendicular to the chord
    let mid = Point {
        x: (start.x + tip.x) / 2.0 - uy * dist * 0.1,
        y: (start.y + tip.y) / 2.0 + ux * dist * 0.1,
    };
    let base = Point {
        x: tip.x - ux * ARROW_LEN,
        y: tip.y - uy * ARROW_LEN,
    };
    let _ = writeln!(
        out,
        r#"  <path d="M {:.1} {:.1} Q {:.1} {:.1} {:.1} {:.1}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
        start.x, start.y, mid.x, mid.y, base.x, base.y, color
    );

    // Arrowhead aligned with the chord
    let left = Point {
        x: base.x - uy * ARROW_LEN * 0.45,
        y: base.y + ux * ARROW_LEN * 0.45,
    };
    let right = Point {
        x: base.x + uy * ARROW_LEN * 0.45,
        y: base.y - ux * ARROW_LEN * 0.45,
    };
    let _ = writeln!(
        out,
        r#"  <polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{}"/>"#,
        tip.x, tip.y, left.x, left.y, right.x, right.y, color
    );
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::DiGraph;

    fn triangle() -> (DiGraph<String, ()>, Vec<Point>) {
        let mut graph = DiGraph::new();
        let a = graph.add_node("A".to_string());
        let b = graph.add_node("B".to_string());
        let c = graph.add_node("C&D".to_string());
        graph.add_edge(a, b, ());
        graph.add_edge(b, c, ());
        graph.add_edge(c, a, ());
        let positions = vec![
            Point { x: -1.0, y: 0.0 },
            Point { x: 1.0, y: 0.0 },
            Point { x: 0.0, y: 1.0 },
        ];
        (graph, positions)
    }

    #[test]
    fn test_render_draws_all_elements() {
        let (graph, positions) = triangle();
        let svg = render(&graph, &positions, "Overview");
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<path").count(), 3);
        assert_eq!(svg.matches("<polygon").count(), 3);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let (graph, positions) = triangle();
        let svg = render(&graph, &positions, "A & B");
        assert!(svg.contains("A &amp; B"));
        assert!(svg.contains(">C&amp;D</text>"));
    }

    #[test]
    fn test_edge_colors_are_distinct() {
        let (graph, positions) = triangle();
        let svg = render(&graph, &positions, "t");
        let colors = spectrum(3);
        for color in colors {
            assert!(svg.contains(&color.to_hex()));
        }
    }

    #[test]
    fn test_empty_graph_still_renders_frame() {
        let graph: DiGraph<String, ()> = DiGraph::new();
        let svg = render(&graph, &[], "empty");
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<circle"));
    }
}

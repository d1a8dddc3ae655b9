// Directed-graph rendering of sheet dependencies

pub mod color;
pub mod dot;
pub mod graph;
pub mod layout;
pub mod svg;
pub mod viewer;

pub use graph::build_graph;
pub use layout::{Layout, Point};

use sheetgraph_core::DependencyMap;

/// Render the mapping as an SVG drawing under the named layout.
///
/// The layout name is parsed here, at render time; an unknown name is a
/// hard error and nothing is drawn.
pub fn render_svg(map: &DependencyMap, layout_name: &str, title: &str) -> Result<String, String> {
    let layout: Layout = layout_name.parse()?;
    let graph = build_graph(map);
    let positions = layout.positions(&graph);
    Ok(svg::render(&graph, &positions, title))
}

/// Render the mapping in Graphviz DOT form.
pub fn render_dot(map: &DependencyMap, title: &str) -> String {
    dot::render(&build_graph(map), title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> DependencyMap {
        let mut map = DependencyMap::new();
        map.push_dependency("A", "B");
        map.push_dependency("C", "A");
        map
    }

    #[test]
    fn test_render_svg_labels_nodes() {
        let svg = render_svg(&sample_map(), "circular", "Sheet Dependencies Overview").unwrap();
        assert!(svg.contains(">A</text>"));
        assert!(svg.contains(">B</text>"));
        assert!(svg.contains("Sheet Dependencies Overview"));
    }

    #[test]
    fn test_unknown_layout_fails_fast() {
        let err = render_svg(&sample_map(), "hexagonal", "t").unwrap_err();
        assert!(err.contains("hexagonal"));
        assert!(err.contains("kamada_kawai"));
    }

    #[test]
    fn test_render_dot_shape() {
        let dot = render_dot(&sample_map(), "deps");
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("\"A\" -> \"B\""));
        assert!(dot.contains("\"C\" -> \"A\""));
    }
}

// Graphviz DOT emission

use std::fmt::Write as _;

use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;

/// Emit the graph in DOT form for piping into graphviz tooling.
pub fn render(graph: &DiGraph<String, ()>, title: &str) -> String {
    let mut out = String::from("digraph sheet_dependencies {\n");
    let _ = writeln!(out, "    label=\"{}\";", escape(title));
    let _ = writeln!(out, "    node [shape=ellipse, style=filled, fillcolor=lightblue];");
    for node in graph.node_indices() {
        let _ = writeln!(out, "    \"{}\";", escape(&graph[node]));
    }
    for edge in graph.edge_references() {
        let _ = writeln!(
            out,
            "    \"{}\" -> \"{}\";",
            escape(&graph[edge.source()]),
            escape(&graph[edge.target()])
        );
    }
    out.push_str("}\n");
    out
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

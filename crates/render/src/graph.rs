// Directed graph construction from a dependency mapping

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use sheetgraph_core::DependencyMap;

/// Build the dependency graph: one edge per distinct (sheet, dependency)
/// pair.
///
/// Nodes come into existence through edges, so a sheet with an empty
/// dependency list that nothing references does not appear. Duplicate
/// pairs in the mapping collapse to a single edge: the edge set is a set
/// even though the mapping's lists are not.
pub fn build_graph(map: &DependencyMap) -> DiGraph<String, ()> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

    for (sheet, deps) in map.iter() {
        for dep in deps {
            let s = intern(&mut graph, &mut nodes, sheet);
            let d = intern(&mut graph, &mut nodes, dep);
            graph.update_edge(s, d, ());
        }
    }
    graph
}

fn intern(
    graph: &mut DiGraph<String, ()>,
    nodes: &mut HashMap<String, NodeIndex>,
    name: &str,
) -> NodeIndex {
    if let Some(&idx) = nodes.get(name) {
        return idx;
    }
    let idx = graph.add_node(name.to_string());
    nodes.insert(name.to_string(), idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_pairs_collapse_to_one_edge() {
        let mut map = DependencyMap::new();
        map.push_dependency("A", "B");
        map.push_dependency("A", "B");
        map.push_dependency("A", "C");

        let graph = build_graph(&map);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_dependency_only_names_become_nodes() {
        // "External" never has its own entry but is referenced.
        let mut map = DependencyMap::new();
        map.push_dependency("A", "External");

        let graph = build_graph(&map);
        let names: Vec<&str> = graph.node_weights().map(|w| w.as_str()).collect();
        assert!(names.contains(&"External"));
    }

    #[test]
    fn test_sheet_without_edges_is_absent() {
        let mut map = DependencyMap::new();
        map.entry("Isolated");
        map.push_dependency("A", "B");

        let graph = build_graph(&map);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.node_weights().any(|w| w == "Isolated"));
    }
}

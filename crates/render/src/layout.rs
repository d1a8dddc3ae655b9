// Node placement algorithms
//
// The graph ecosystem supplies structure and traversal, not 2D placement,
// so positions are computed here. Every algorithm is deterministic: the
// iterative ones start from the circular placement instead of random
// scatter, so the same mapping always draws the same picture.

use std::collections::{BTreeSet, VecDeque};
use std::f64::consts::TAU;
use std::str::FromStr;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// 2D node position in the unit box [-1, 1] x [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// The selectable layout algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Spring,
    Circular,
    Shell,
    Planar,
    KamadaKawai,
}

impl Layout {
    pub const NAMES: [&'static str; 5] = ["spring", "circular", "shell", "planar", "kamada_kawai"];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Spring => "spring",
            Layout::Circular => "circular",
            Layout::Shell => "shell",
            Layout::Planar => "planar",
            Layout::KamadaKawai => "kamada_kawai",
        }
    }

    /// Compute one position per node, indexed by `NodeIndex::index`.
    pub fn positions(self, graph: &DiGraph<String, ()>) -> Vec<Point> {
        match self {
            Layout::Circular => circular(graph.node_count()),
            Layout::Shell => shell(graph),
            Layout::Spring => spring(graph),
            Layout::KamadaKawai => kamada_kawai(graph),
            Layout::Planar => planar(graph),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Layout::Spring),
            "circular" => Ok(Layout::Circular),
            "shell" => Ok(Layout::Shell),
            "planar" => Ok(Layout::Planar),
            "kamada_kawai" => Ok(Layout::KamadaKawai),
            other => Err(format!(
                "Invalid layout choice '{}'. Please choose from 'spring', 'circular', \
                 'shell', 'planar', or 'kamada_kawai'.",
                other
            )),
        }
    }
}

/// Nodes evenly spaced on the unit circle, insertion order.
fn circular(n: usize) -> Vec<Point> {
    if n == 1 {
        return vec![Point::default()];
    }
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            Point {
                x: angle.cos(),
                y: angle.sin(),
            }
        })
        .collect()
}

/// Concentric circles: nodes grouped by BFS depth from the in-degree-0
/// roots. Falls back to a single shell when the graph has no roots.
fn shell(graph: &DiGraph<String, ()>) -> Vec<Point> {
    let shells = bfs_shells(graph);
    let shell_count = shells.len();
    let mut pos = vec![Point::default(); graph.node_count()];

    for (level, members) in shells.iter().enumerate() {
        let radius = (level + 1) as f64 / shell_count as f64;
        for (i, &node) in members.iter().enumerate() {
            let angle = TAU * i as f64 / members.len() as f64;
            pos[node.index()] = Point {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            };
        }
    }
    pos
}

fn bfs_shells(graph: &DiGraph<String, ()>) -> Vec<Vec<NodeIndex>> {
    let n = graph.node_count();
    let roots: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&node| {
            graph
                .neighbors_directed(node, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();
    if roots.is_empty() {
        return vec![graph.node_indices().collect()];
    }

    let mut depth = vec![usize::MAX; n];
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();
    for &root in &roots {
        depth[root.index()] = 0;
        queue.push_back(root);
    }
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors(node) {
            if depth[next.index()] == usize::MAX {
                depth[next.index()] = depth[node.index()] + 1;
                queue.push_back(next);
            }
        }
    }

    let max_depth = depth
        .iter()
        .filter(|&&d| d != usize::MAX)
        .max()
        .copied()
        .unwrap_or(0);
    let mut shells = vec![Vec::new(); max_depth + 1];
    let mut unreached = Vec::new();
    for node in graph.node_indices() {
        match depth[node.index()] {
            usize::MAX => unreached.push(node),
            d => shells[d].push(node),
        }
    }
    // Cycle members unreachable from any root form an extra outer shell
    if !unreached.is_empty() {
        shells.push(unreached);
    }
    shells.retain(|s| !s.is_empty());
    shells
}

/// Fruchterman-Reingold force-directed placement, seeded from the
/// circular layout.
fn spring(graph: &DiGraph<String, ()>) -> Vec<Point> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    let mut pos = circular(n);
    // Optimal pairwise distance for the [-1,1]^2 box
    let k = (4.0 / n as f64).sqrt();
    let iterations = 60;

    for iter in 0..iterations {
        let temperature = 0.2 * (1.0 - iter as f64 / iterations as f64);
        let mut disp = vec![Point::default(); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
                let repulse = k * k / dist;
                disp[i].x += dx / dist * repulse;
                disp[i].y += dy / dist * repulse;
                disp[j].x -= dx / dist * repulse;
                disp[j].y -= dy / dist * repulse;
            }
        }

        // Edge direction is irrelevant to the forces
        for edge in graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            if a == b {
                continue;
            }
            let dx = pos[a].x - pos[b].x;
            let dy = pos[a].y - pos[b].y;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
            let attract = dist * dist / k;
            disp[a].x -= dx / dist * attract;
            disp[a].y -= dy / dist * attract;
            disp[b].x += dx / dist * attract;
            disp[b].y += dy / dist * attract;
        }

        for i in 0..n {
            let len = (disp[i].x * disp[i].x + disp[i].y * disp[i].y)
                .sqrt()
                .max(1e-6);
            let step = len.min(temperature);
            pos[i].x += disp[i].x / len * step;
            pos[i].y += disp[i].y / len * step;
        }
    }
    normalize(pos)
}

/// Stress majorization over BFS path distances (the Kamada-Kawai
/// objective), seeded from the circular layout.
fn kamada_kawai(graph: &DiGraph<String, ()>) -> Vec<Point> {
    let n = graph.node_count();
    if n <= 1 {
        return circular(n);
    }
    let dist = bfs_distances(graph);
    let dmax = dist
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut pos = circular(n);
    for _ in 0..120 {
        let mut next = vec![Point::default(); n];
        for i in 0..n {
            let mut wsum = 0.0;
            let mut x = 0.0;
            let mut y = 0.0;
            for j in 0..n {
                if i == j {
                    continue;
                }
                // Ideal distance scaled so the graph diameter spans the box
                let ideal = dist[i][j] as f64 / dmax * 2.0;
                let weight = 1.0 / (ideal * ideal);
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let norm = (dx * dx + dy * dy).sqrt().max(1e-9);
                x += weight * (pos[j].x + ideal * dx / norm);
                y += weight * (pos[j].y + ideal * dy / norm);
                wsum += weight;
            }
            next[i] = if wsum > 0.0 {
                Point {
                    x: x / wsum,
                    y: y / wsum,
                }
            } else {
                pos[i]
            };
        }
        pos = next;
    }
    normalize(pos)
}

/// All-pairs BFS over the undirected adjacency. Disconnected pairs get
/// one more than the largest finite distance so they still repel.
fn bfs_distances(graph: &DiGraph<String, ()>) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let adjacency = undirected_adjacency(graph);
    let mut dist = vec![vec![usize::MAX; n]; n];

    for start in 0..n {
        dist[start][start] = 0;
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &next in &adjacency[node] {
                if dist[start][next] == usize::MAX {
                    dist[start][next] = dist[start][node] + 1;
                    queue.push_back(next);
                }
            }
        }
    }

    let finite_max = dist
        .iter()
        .flatten()
        .filter(|&&d| d != usize::MAX)
        .max()
        .copied()
        .unwrap_or(0);
    for row in &mut dist {
        for d in row.iter_mut() {
            if *d == usize::MAX {
                *d = finite_max + 1;
            }
        }
    }
    dist
}

fn undirected_adjacency(graph: &DiGraph<String, ()>) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
    }
    adjacency
        .into_iter()
        .map(|set| set.into_iter().collect())
        .collect()
}

/// Straight-line embedding in the Tutte style: the first undirected cycle
/// is pinned as a convex outer face and the remaining nodes relax to the
/// barycenter of their neighbors. Acyclic graphs use layered placement
/// instead.
fn planar(graph: &DiGraph<String, ()>) -> Vec<Point> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    let adjacency = undirected_adjacency(graph);
    match find_cycle(&adjacency) {
        Some(cycle) => tutte(&adjacency, &cycle, n),
        None => layered(graph),
    }
}

/// First cycle in the undirected adjacency, found by DFS. Opposed edge
/// pairs collapse to one undirected edge, so any cycle found has length
/// at least three.
fn find_cycle(adjacency: &[Vec<usize>]) -> Option<Vec<usize>> {
    let n = adjacency.len();
    let mut parent = vec![usize::MAX; n];
    let mut visited = vec![false; n];

    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut stack = vec![(start, usize::MAX)];
        while let Some((node, from)) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            parent[node] = from;
            for &next in &adjacency[node] {
                if next == from {
                    continue;
                }
                if !visited[next] {
                    stack.push((next, node));
                } else {
                    // Back edge: walk the parent chain from `node` to `next`
                    let mut cycle = vec![node];
                    let mut cursor = node;
                    while cursor != next && parent[cursor] != usize::MAX {
                        cursor = parent[cursor];
                        cycle.push(cursor);
                    }
                    if cursor == next && cycle.len() >= 3 {
                        return Some(cycle);
                    }
                }
            }
        }
    }
    None
}

fn tutte(adjacency: &[Vec<usize>], cycle: &[usize], n: usize) -> Vec<Point> {
    let mut pos = circular(n);
    // Shrink non-pinned seeds toward the center so relaxation pulls them
    // into the face instead of across it
    for p in pos.iter_mut() {
        p.x *= 0.3;
        p.y *= 0.3;
    }

    let mut pinned = vec![false; n];
    for (i, &node) in cycle.iter().enumerate() {
        let angle = TAU * i as f64 / cycle.len() as f64;
        pos[node] = Point {
            x: angle.cos(),
            y: angle.sin(),
        };
        pinned[node] = true;
    }

    for _ in 0..100 {
        for node in 0..n {
            if pinned[node] || adjacency[node].is_empty() {
                continue;
            }
            let (mut x, mut y) = (0.0, 0.0);
            for &next in &adjacency[node] {
                x += pos[next].x;
                y += pos[next].y;
            }
            let count = adjacency[node].len() as f64;
            pos[node] = Point {
                x: x / count,
                y: y / count,
            };
        }
    }
    normalize(spread_coincident(pos))
}

/// Layered placement for acyclic graphs: x by BFS depth from the roots,
/// y by position within the layer.
fn layered(graph: &DiGraph<String, ()>) -> Vec<Point> {
    let shells = bfs_shells(graph);
    let levels = shells.len();
    let mut pos = vec![Point::default(); graph.node_count()];

    for (level, members) in shells.iter().enumerate() {
        let x = if levels == 1 {
            0.0
        } else {
            -1.0 + 2.0 * level as f64 / (levels - 1) as f64
        };
        for (i, &node) in members.iter().enumerate() {
            let y = -1.0 + 2.0 * (i + 1) as f64 / (members.len() + 1) as f64;
            pos[node.index()] = Point { x, y };
        }
    }
    pos
}

/// Barycentric relaxation parks degree-one nodes exactly on their
/// neighbor; nudge any coincident pair apart so labels stay readable.
fn spread_coincident(mut pos: Vec<Point>) -> Vec<Point> {
    let n = pos.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = pos[i].x - pos[j].x;
            let dy = pos[i].y - pos[j].y;
            if (dx * dx + dy * dy).sqrt() < 0.05 {
                let angle = TAU * j as f64 / n.max(1) as f64;
                pos[j].x += 0.12 * angle.cos();
                pos[j].y += 0.12 * angle.sin();
            }
        }
    }
    pos
}

/// Rescale positions to fit the unit box, preserving aspect ratio.
fn normalize(mut pos: Vec<Point>) -> Vec<Point> {
    if pos.is_empty() {
        return pos;
    }
    let cx = pos.iter().map(|p| p.x).sum::<f64>() / pos.len() as f64;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / pos.len() as f64;
    let extent = pos
        .iter()
        .map(|p| (p.x - cx).abs().max((p.y - cy).abs()))
        .fold(0.0_f64, f64::max);
    if extent < 1e-9 {
        return pos;
    }
    for p in pos.iter_mut() {
        p.x = (p.x - cx) / extent;
        p.y = (p.y - cy) / extent;
    }
    pos
}

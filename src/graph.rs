pub type Node = u32;

/// undirected edge, stored with the smaller node first
pub type Edge = [Node; 2];

use std::collections::VecDeque;

/// An undirected graph on the nodes `0..nnodes()` without self loops.
pub trait Graph {
    fn has_edge(&self, a: Node, b: Node) -> bool;
    fn add_edge(&mut self, a: Node, b: Node);
    fn nnodes(&self) -> usize;
    fn iter_nodes(&self) -> std::ops::Range<Node> {
        0 .. (self.nnodes() as Node)
    }

    /// every edge once, as `[a, b]` with `a < b`, in row-major order
    fn edges(&self) -> Vec<Edge> {
        let mut edges = vec![];
        for a in self.iter_nodes() {
            for b in (a + 1) .. (self.nnodes() as Node) {
                if self.has_edge(a, b) {
                    edges.push([a, b]);
                }
            }
        }
        return edges;
    }

    fn edges_from(&self, a: Node) -> Vec<Node> {
        self.iter_nodes().filter(|&b| self.has_edge(a, b)).collect()
    }
}

pub trait GraphNew: Graph + Sized {
    fn new_disconnected(nnodes: usize) -> Self;
}

/// Traversals. Neighbours are always taken in ascending node order, and the
/// whole-graph walks restart from the lowest unvisited node when `start`'s
/// component is exhausted.
pub trait GraphExt: Graph {
    /// depth first visiting order
    /// ```
    /// use label_adjacency::graph::*;
    /// let mut g = BoolMatrixGraph::new_disconnected(4);
    /// g.add_edge(0, 2);
    /// g.add_edge(0, 1);
    /// g.add_edge(2, 3);
    /// assert_eq!(g.dfs(0), vec![0, 1, 2, 3]);
    /// assert_eq!(g.dfs(3), vec![3, 2, 0, 1]);
    /// ```
    fn dfs(&self, start: Node) -> Vec<Node> {
        let mut visited = vec![false; self.nnodes()];
        let mut order = vec![];
        let mut next = Some(start);
        while let Some(root) = next {
            visited[root as usize] = true;
            order.push(root);
            let mut stack = vec![root];
            while let Some(&v) = stack.last() {
                let unvisited = self.iter_nodes().find(|&u| !visited[u as usize] && self.has_edge(v, u));
                match unvisited {
                    Some(u) => {
                        visited[u as usize] = true;
                        order.push(u);
                        stack.push(u);
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
            next = self.iter_nodes().find(|&u| !visited[u as usize]);
        }
        return order;
    }

    /// breadth first visiting order
    fn bfs(&self, start: Node) -> Vec<Node> {
        let mut visited = vec![false; self.nnodes()];
        let mut order = vec![];
        let mut queue = VecDeque::new();
        let mut next = Some(start);
        while let Some(root) = next {
            visited[root as usize] = true;
            order.push(root);
            queue.push_back(root);
            while let Some(v) = queue.pop_front() {
                for u in self.iter_nodes() {
                    if !visited[u as usize] && self.has_edge(v, u) {
                        visited[u as usize] = true;
                        order.push(u);
                        queue.push_back(u);
                    }
                }
            }
            next = self.iter_nodes().find(|&u| !visited[u as usize]);
        }
        return order;
    }

    /// hop distance from `start` to every node, `None` if unreachable
    fn bfs_levels(&self, start: Node) -> Vec<Option<usize>> {
        let mut levels = vec![None; self.nnodes()];
        levels[start as usize] = Some(0);
        let mut queue = VecDeque::from(vec![(start, 0)]);
        while let Some((v, level)) = queue.pop_front() {
            for u in self.iter_nodes() {
                if levels[u as usize].is_none() && self.has_edge(v, u) {
                    levels[u as usize] = Some(level + 1);
                    queue.push_back((u, level + 1));
                }
            }
        }
        return levels;
    }

    /// `[v][u]` is the hop distance between `v` and `u`
    fn distance_matrix(&self) -> Vec<Vec<Option<usize>>> {
        self.iter_nodes().map(|v| self.bfs_levels(v)).collect()
    }

    /// sorted node sets, ordered by their lowest node
    fn connected_components(&self) -> Vec<Vec<Node>> {
        let mut seen = vec![false; self.nnodes()];
        let mut components = vec![];
        for v in self.iter_nodes() {
            if seen[v as usize] {
                continue;
            }
            let component: Vec<Node> = (0..).zip(self.bfs_levels(v))
                .filter_map(|(u, level)| level.map(|_| u))
                .collect();
            for &u in &component {
                seen[u as usize] = true;
            }
            components.push(component);
        }
        return components;
    }

    /// the empty graph counts as connected
    fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }
}

impl<G: Graph> GraphExt for G {}

#[derive(Clone, PartialEq, Eq)]
pub struct BoolMatrixGraph {
    adjmat: Vec<bool>,
    nnodes: usize,
}
impl std::fmt::Debug for BoolMatrixGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "A graph with {} nodes and the following edges: {:?}", self.nnodes, self.edges())
    }
}

impl BoolMatrixGraph {
    fn index(&self, a: Node, b: Node) -> usize {
        if a as usize >= self.nnodes {
            panic!("node out of bounds: {} >= {}", a, self.nnodes);
        }
        if b as usize >= self.nnodes {
            panic!("node out of bounds: {} >= {}", b, self.nnodes);
        }
        return (a as usize) * self.nnodes + (b as usize);
    }
}

impl GraphNew for BoolMatrixGraph {
    fn new_disconnected(nnodes: usize) -> Self {
        let adjsize = nnodes.checked_mul(nnodes).expect("adjacency matrix size overflows");
        BoolMatrixGraph { adjmat: vec![false; adjsize], nnodes }
    }
}

impl Graph for BoolMatrixGraph {
    fn nnodes(&self) -> usize {
        self.nnodes
    }
    fn has_edge(&self, a: Node, b: Node) -> bool {
        self.adjmat[self.index(a, b)]
    }
    fn add_edge(&mut self, a: Node, b: Node) {
        // the diagonal stays false
        if a == b {
            return;
        }
        let ab = self.index(a, b);
        let ba = self.index(b, a);
        self.adjmat[ab] = true;
        self.adjmat[ba] = true;
    }
}


#[cfg(test)]
fn disconnected_sample() -> BoolMatrixGraph {
    // 0-1, 0-2, 1-3 | 4 | 5-6
    let mut g = BoolMatrixGraph::new_disconnected(7);
    for [a, b] in [[0, 1], [0, 2], [1, 3], [5, 6]] {
        g.add_edge(a, b);
    }
    return g;
}

#[test]
fn test_bool_matrix_graph_symmetric() {
    let mut g = BoolMatrixGraph::new_disconnected(4);
    g.add_edge(2, 0);
    g.add_edge(1, 3);
    assert!(g.has_edge(0, 2) && g.has_edge(2, 0));
    assert!(g.has_edge(3, 1) && g.has_edge(1, 3));
    assert!(!g.has_edge(0, 1));
    assert_eq!(g.edges(), vec![[0, 2], [1, 3]]);
    assert_eq!(g.edges_from(2), vec![0]);
}

#[test]
fn test_bool_matrix_graph_no_loops() {
    let mut g = BoolMatrixGraph::new_disconnected(2);
    g.add_edge(1, 1);
    assert!(!g.has_edge(1, 1));
    assert!(g.edges().is_empty());

    let empty = BoolMatrixGraph::new_disconnected(0);
    assert_eq!(empty.iter_nodes().count(), 0);
    assert!(empty.edges().is_empty());
}

#[test]
#[should_panic]
fn test_bool_matrix_graph_out_of_bounds() {
    let g = BoolMatrixGraph::new_disconnected(2);
    g.has_edge(0, 2);
}

#[test]
fn test_dfs_restarts_on_disconnected() {
    let g = disconnected_sample();
    assert_eq!(g.dfs(0), vec![0, 1, 3, 2, 4, 5, 6]);
    assert_eq!(g.dfs(5), vec![5, 6, 0, 1, 3, 2, 4]);
    assert_eq!(g.dfs(4), vec![4, 0, 1, 3, 2, 5, 6]);
}

#[test]
fn test_bfs_restarts_on_disconnected() {
    let g = disconnected_sample();
    assert_eq!(g.bfs(0), vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(g.bfs(3), vec![3, 1, 0, 2, 4, 5, 6]);
    assert_eq!(g.bfs(6), vec![6, 5, 0, 1, 2, 3, 4]);
}

#[test]
fn test_bfs_levels() {
    let g = disconnected_sample();
    assert_eq!(g.bfs_levels(3), vec![Some(2), Some(1), Some(3), Some(0), None, None, None]);
    assert_eq!(g.bfs_levels(4), vec![None, None, None, None, Some(0), None, None]);
}

#[test]
fn test_distance_matrix_symmetric() {
    let g = disconnected_sample();
    let d = g.distance_matrix();
    assert_eq!(d.len(), 7);
    for v in 0..7 {
        assert_eq!(d[v][v], Some(0));
        for u in 0..7 {
            assert_eq!(d[v][u], d[u][v]);
        }
    }
    assert_eq!(d[2][3], Some(3));
    assert_eq!(d[0][5], None);
    assert!(BoolMatrixGraph::new_disconnected(0).distance_matrix().is_empty());
}

#[test]
fn test_connected_components() {
    let g = disconnected_sample();
    assert_eq!(g.connected_components(), vec![vec![0, 1, 2, 3], vec![4], vec![5, 6]]);
    assert!(!g.is_connected());

    let mut g = BoolMatrixGraph::new_disconnected(3);
    g.add_edge(2, 0);
    g.add_edge(1, 2);
    assert_eq!(g.connected_components(), vec![vec![0, 1, 2]]);
    assert!(g.is_connected());

    let empty = BoolMatrixGraph::new_disconnected(0);
    assert!(empty.connected_components().is_empty());
    assert!(empty.is_connected());
}

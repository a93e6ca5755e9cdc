//! Co-occurrence adjacency over the distinct labels of a [`LabelMatrix`].
//!
//! Two labels are adjacent when some row holds both of them at different
//! positions. Rows are indexed by the [`LabelUniverse`], the distinct labels in
//! ascending order, so identical input always yields an identical matrix.

use indexmap::set::IndexSet;
use serde::Serialize;

use crate::graph::{BoolMatrixGraph, Edge, Graph, GraphExt, GraphNew, Node};
use crate::{Label, LabelMatrix};

/// The distinct labels of a matrix, sorted, with O(1) lookups both ways.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelUniverse {
    labels: IndexSet<Label>,
}

impl LabelUniverse {
    pub fn from_matrix(matrix: &LabelMatrix) -> Self {
        let mut labels: IndexSet<Label> = matrix.iter().flatten().cloned().collect();
        labels.sort();
        LabelUniverse { labels }
    }
    pub fn len(&self) -> usize {
        self.labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.get_index_of(label)
    }
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get_index(index).map(String::as_str)
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Cell {
    /// the diagonal
    #[serde(rename = "X")]
    Identity,
    #[serde(rename = "0")]
    Absent,
    #[serde(rename = "1")]
    Present,
}

impl Cell {
    pub fn as_str(self) -> &'static str {
        match self {
            Cell::Identity => "X",
            Cell::Absent => "0",
            Cell::Present => "1",
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Square, symmetric matrix over a [`LabelUniverse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    universe: LabelUniverse,
    graph: BoolMatrixGraph,
}

/// Serialized form of an [`AdjacencyMatrix`].
#[derive(Serialize)]
pub struct MatrixReport<'a> {
    pub labels: Vec<&'a str>,
    pub matrix: Vec<Vec<Cell>>,
}

/// Builds the adjacency matrix of `matrix`.
/// ```
/// use label_adjacency::adjacency::build;
/// use label_adjacency::format::parse;
/// let m = build(&parse("<{x,y,x}>").unwrap());
/// assert_eq!(m.to_strings(), vec![vec!["X", "1"], vec!["1", "X"]]);
/// ```
pub fn build(matrix: &LabelMatrix) -> AdjacencyMatrix {
    let universe = LabelUniverse::from_matrix(matrix);
    let mut graph = BoolMatrixGraph::new_disconnected(universe.len());
    for row in matrix {
        let nodes: Vec<Node> = row.iter()
            .filter_map(|label| universe.index_of(label))
            .map(|i| i as Node)
            .collect();
        for &a in &nodes {
            for &b in &nodes {
                // equal labels share a node, so repeats never touch the diagonal
                if a != b {
                    graph.add_edge(a, b);
                }
            }
        }
    }
    log::debug!("built {0}x{0} adjacency matrix with {1} edges", universe.len(), graph.edges().len());
    AdjacencyMatrix { universe, graph }
}

impl AdjacencyMatrix {
    pub fn dim(&self) -> usize {
        self.universe.len()
    }
    pub fn universe(&self) -> &LabelUniverse {
        &self.universe
    }
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.universe.iter()
    }
    pub fn graph(&self) -> &BoolMatrixGraph {
        &self.graph
    }

    /// panics if `i` or `j` is not below `dim()`
    pub fn cell(&self, i: usize, j: usize) -> Cell {
        let present = self.graph.has_edge(i as Node, j as Node);
        if i == j {
            Cell::Identity
        } else if present {
            Cell::Present
        } else {
            Cell::Absent
        }
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        (0..self.dim()).map(|i| (0..self.dim()).map(|j| self.cell(i, j)).collect()).collect()
    }

    pub fn to_strings(&self) -> Vec<Vec<String>> {
        self.rows().into_iter()
            .map(|row| row.into_iter().map(|c| c.as_str().to_string()).collect())
            .collect()
    }

    /// co-occurring pairs as universe indices `[i, j]`, `i < j`
    pub fn edges(&self) -> Vec<Edge> {
        self.graph.edges()
    }

    /// the labels that co-occur with `label`, in universe order
    pub fn neighbours(&self, label: &str) -> Option<Vec<&str>> {
        let i = self.universe.index_of(label)?;
        Some(self.graph.edges_from(i as Node).into_iter()
            .filter_map(|j| self.universe.label(j as usize))
            .collect())
    }

    fn to_labels(&self, nodes: Vec<Node>) -> Vec<&str> {
        nodes.into_iter().filter_map(|v| self.universe.label(v as usize)).collect()
    }

    /// depth first order from `label`, then the remaining labels' components
    pub fn dfs(&self, label: &str) -> Option<Vec<&str>> {
        let start = self.universe.index_of(label)?;
        return Some(self.to_labels(self.graph.dfs(start as Node)));
    }

    /// breadth first order from `label`, then the remaining labels' components
    pub fn bfs(&self, label: &str) -> Option<Vec<&str>> {
        let start = self.universe.index_of(label)?;
        return Some(self.to_labels(self.graph.bfs(start as Node)));
    }

    /// hop distance from `label` to every label in universe order
    pub fn levels(&self, label: &str) -> Option<Vec<(&str, Option<usize>)>> {
        let start = self.universe.index_of(label)?;
        return Some(self.labels().zip(self.graph.bfs_levels(start as Node)).collect());
    }

    /// `[i][j]` is the hop distance between labels `i` and `j`
    pub fn distances(&self) -> Vec<Vec<Option<usize>>> {
        self.graph.distance_matrix()
    }

    pub fn components(&self) -> Vec<Vec<&str>> {
        self.graph.connected_components().into_iter().map(|c| self.to_labels(c)).collect()
    }

    pub fn is_connected(&self) -> bool {
        self.graph.is_connected()
    }

    pub fn report(&self) -> MatrixReport<'_> {
        MatrixReport { labels: self.labels().collect(), matrix: self.rows() }
    }
}

/// One row per line, cells separated by a space.
impl std::fmt::Display for AdjacencyMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows() {
            let cells: Vec<&str> = row.iter().map(|c| c.as_str()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}


#[cfg(test)]
fn matrix(m: &[&[&str]]) -> LabelMatrix {
    m.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect()
}

#[cfg(test)]
fn assert_symmetric(m: &AdjacencyMatrix) {
    for i in 0..m.dim() {
        assert_eq!(m.cell(i, i), Cell::Identity);
        for j in 0..m.dim() {
            assert_eq!(m.cell(i, j), m.cell(j, i));
            if i != j {
                assert_ne!(m.cell(i, j), Cell::Identity);
            }
        }
    }
}

#[test]
fn test_universe_sorted_and_deduplicated() {
    let u = LabelUniverse::from_matrix(&matrix(&[&["c", "a"], &["b", "a", "c"]]));
    assert_eq!(u.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(u.index_of("b"), Some(1));
    assert_eq!(u.index_of("d"), None);
    assert_eq!(u.label(2), Some("c"));
    assert_eq!(u.label(3), None);

    // byte order, uppercase before lowercase, the empty label first
    let u = LabelUniverse::from_matrix(&matrix(&[&["b", "B", ""], &["a10", "a2"]]));
    assert_eq!(u.iter().collect::<Vec<_>>(), vec!["", "B", "a10", "a2", "b"]);
}

#[test]
fn test_build_two_rows() {
    let m = build(&matrix(&[&["a", "b"], &["b", "c"]]));
    assert_eq!(m.labels().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(m.to_strings(), vec![
        vec!["X", "1", "0"],
        vec!["1", "X", "1"],
        vec!["0", "1", "X"],
    ]);
    assert_eq!(m.edges(), vec![[0, 1], [1, 2]]);
    assert_symmetric(&m);
}

#[test]
fn test_build_repeated_label_skips_self_pair() {
    let m = build(&matrix(&[&["x", "y", "x"]]));
    assert_eq!(m.rows(), vec![
        vec![Cell::Identity, Cell::Present],
        vec![Cell::Present, Cell::Identity],
    ]);

    let m = build(&matrix(&[&["x", "x", "x"]]));
    assert_eq!(m.to_strings(), vec![vec!["X"]]);
}

#[test]
fn test_build_isolated_label() {
    let m = build(&matrix(&[&["a", "b"], &["z"]]));
    let z = m.universe().index_of("z").unwrap();
    for j in 0..m.dim() {
        let expected = if j == z { Cell::Identity } else { Cell::Absent };
        assert_eq!(m.cell(z, j), expected);
        assert_eq!(m.cell(j, z), expected);
    }
    assert_eq!(m.neighbours("z"), Some(vec![]));
    assert_eq!(m.neighbours("a"), Some(vec!["b"]));
    assert_eq!(m.neighbours("q"), None);
}

#[test]
fn test_build_empty() {
    let m = build(&LabelMatrix::new());
    assert_eq!(m.dim(), 0);
    assert!(m.rows().is_empty());
    assert_eq!(m.to_string(), "");

    // `<{}>` parses to one empty row
    let m = build(&matrix(&[&[]]));
    assert_eq!(m.dim(), 0);
}

#[test]
fn test_build_empty_label_is_a_label() {
    let m = build(&matrix(&[&["a", "", "b"]]));
    assert_eq!(m.labels().collect::<Vec<_>>(), vec!["", "a", "b"]);
    assert_eq!(m.neighbours(""), Some(vec!["a", "b"]));
}

#[test]
fn test_build_symmetric_and_deterministic() {
    let input = matrix(&[&["d", "a", "c"], &["b", "e"], &["a", "e", "a"], &["f"]]);
    let m = build(&input);
    assert_symmetric(&m);
    assert_eq!(m, build(&input));
    assert_eq!(m.to_strings(), build(&input).to_strings());

    // row order and order inside rows do not matter
    let shuffled = matrix(&[&["f"], &["e", "a", "a"], &["e", "b"], &["c", "d", "a"]]);
    assert_eq!(m, build(&shuffled));
}

#[test]
fn test_display_and_report() {
    let m = build(&matrix(&[&["x", "y"]]));
    assert_eq!(m.to_string(), "X 1\n1 X\n");
    let json = serde_json::to_string(&m.report()).unwrap();
    assert_eq!(json, r#"{"labels":["x","y"],"matrix":[["X","1"],["1","X"]]}"#);
}

#[test]
fn test_traversals_by_label() {
    // a-b, b-c | d | e-f
    let m = build(&matrix(&[&["a", "b"], &["c", "b"], &["d"], &["f", "e"]]));
    assert_eq!(m.dfs("a"), Some(vec!["a", "b", "c", "d", "e", "f"]));
    assert_eq!(m.dfs("e"), Some(vec!["e", "f", "a", "b", "c", "d"]));
    assert_eq!(m.bfs("b"), Some(vec!["b", "a", "c", "d", "e", "f"]));
    assert_eq!(m.dfs("q"), None);
    assert_eq!(m.bfs("q"), None);
    assert_eq!(m.components(), vec![vec!["a", "b", "c"], vec!["d"], vec!["e", "f"]]);
    assert!(!m.is_connected());
}

#[test]
fn test_levels_and_distances() {
    let m = build(&matrix(&[&["a", "b"], &["c", "b"], &["d"]]));
    assert_eq!(m.levels("a"), Some(vec![("a", Some(0)), ("b", Some(1)), ("c", Some(2)), ("d", None)]));
    assert_eq!(m.levels("d"), Some(vec![("a", None), ("b", None), ("c", None), ("d", Some(0))]));
    assert_eq!(m.levels("q"), None);
    let d = m.distances();
    assert_eq!(d[0], vec![Some(0), Some(1), Some(2), None]);
    assert_eq!(d[3], vec![None, None, None, Some(0)]);
}

#[test]
fn test_isolated_label_traversal() {
    let m = build(&matrix(&[&["x"]]));
    assert_eq!(m.dfs("x"), Some(vec!["x"]));
    assert_eq!(m.bfs("x"), Some(vec!["x"]));
    assert_eq!(m.components(), vec![vec!["x"]]);
    assert!(m.is_connected());
}

#[test]
fn test_empty_traversal() {
    let m = build(&LabelMatrix::new());
    assert_eq!(m.dfs(""), None);
    assert_eq!(m.levels("a"), None);
    assert!(m.components().is_empty());
    assert!(m.distances().is_empty());
    assert!(m.is_connected());
}

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

/// Enum representing the type of edge in a graph.
///
/// `Virtual` edges never come from an upload, they are added by the drawing code
/// (e.g. when triangulating a planar graph before computing coordinates).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeLabel {
    Real,
    Virtual,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Real => write!(f, "Real"),
            EdgeLabel::Virtual => write!(f, "Virtual"),
        }
    }
}

/// Wrapper for petgraph's graph type. Node weights are the node identifiers.
pub type UnGraph = petgraph::graph::UnGraph<String, EdgeLabel>;

/// Combinatorial embedding: both arcs of every edge are present and the outgoing
/// arcs of a node are stored in their rotation order. Node weights are indices.
pub type DiGraph = petgraph::graph::DiGraph<u32, EdgeLabel>;

/// Simple undirected graph with string node identifiers.
///
/// Edges form a set: adding an edge twice (in either direction) keeps one copy.
/// Node and edge iteration follow insertion order, as long as no edge was removed.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: UnGraph,
    index: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node if it is not present yet and returns its index.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.inner.add_node(id.to_string());
        self.index.insert(id.to_string(), idx);
        idx
    }

    /// Adds the edge `u - v`, creating missing endpoints.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, u: &str, v: &str) -> bool {
        let a = self.add_node(u);
        let b = self.add_node(v);
        if self.inner.find_edge(a, b).is_some() {
            return false;
        }
        self.inner.add_edge(a, b, EdgeLabel::Real);
        true
    }

    /// Removes the edge `u - v`. Returns `false` if there was no such edge.
    pub fn remove_edge(&mut self, u: &str, v: &str) -> bool {
        let (Some(&a), Some(&b)) = (self.index.get(u), self.index.get(v)) else {
            return false;
        };
        match self.inner.find_edge(a, b) {
            Some(eid) => self.inner.remove_edge(eid).is_some(),
            None => false,
        }
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        match (self.index.get(u), self.index.get(v)) {
            (Some(&a), Some(&b)) => self.inner.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.inner.node_weights().map(String::as_str)
    }

    /// Edges as `(source, target)` pairs, in the order petgraph stores them.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.edge_references().map(|e| {
            (
                self.inner[e.source()].as_str(),
                self.inner[e.target()].as_str(),
            )
        })
    }

    /// Degree of a node, a self-loop counts twice. Unknown nodes have degree 0.
    pub fn degree(&self, id: &str) -> usize {
        let Some(&idx) = self.index.get(id) else {
            return 0;
        };
        self.inner
            .edges(idx)
            .map(|e| if e.source() == e.target() { 2 } else { 1 })
            .sum()
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.inner.node_weight(idx).map(String::as_str)
    }

    /// Underlying petgraph graph. Node indices match [`Graph::node_index`].
    pub fn as_petgraph(&self) -> &UnGraph {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_form_a_set() {
        let mut graph = Graph::new();
        assert!(graph.add_edge("a", "b"));
        assert!(!graph.add_edge("b", "a"));
        assert!(graph.add_edge("a", "a"));
        assert!(!graph.add_edge("a", "a"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("a"), 3);
        assert_eq!(graph.degree("b"), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut graph = Graph::new();
        graph.add_node("z");
        graph.add_edge("x", "y");
        graph.add_edge("y", "z");
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["z", "x", "y"]);
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("x", "y"), ("y", "z")]
        );
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = Graph::new();
        graph.add_edge("1", "2");
        graph.add_edge("2", "3");
        assert!(graph.remove_edge("2", "1"));
        assert!(!graph.remove_edge("1", "2"));
        assert!(!graph.remove_edge("1", "missing"));
        assert!(!graph.contains_edge("1", "2"));
        assert!(graph.contains_edge("3", "2"));
        assert_eq!(graph.node_count(), 3);
    }
}

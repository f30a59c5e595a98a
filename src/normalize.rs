use tracing::debug;

use crate::decoding_blocks::DecodedGraph;
use crate::types::Graph;

/// Turns a decoded graph into a simple undirected [`Graph`] with string node ids.
///
/// Ids are stringified, parallel edges collapse into one and a directed input keeps
/// one undirected edge for every arc, whatever its direction.
pub fn normalize(decoded: DecodedGraph) -> Graph {
    if decoded.directed {
        debug!(arcs = decoded.edges.len(), "converting directed graph to undirected");
    }

    let mut graph = Graph::new();
    for node in &decoded.nodes {
        graph.add_node(&node.to_string());
    }
    for (u, v) in &decoded.edges {
        graph.add_edge(&u.to_string(), &v.to_string());
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding_blocks::NodeKey;

    #[test]
    fn test_ids_become_strings() {
        let mut decoded = DecodedGraph::new(false);
        decoded.add_node(NodeKey::Integer(7));
        decoded.add_node(NodeKey::Float(1.0));
        decoded.add_node(NodeKey::Bool(false));
        decoded.add_edge(NodeKey::Integer(7), "x");
        let graph = normalize(decoded);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["7", "1.0", "False", "x"]);
        assert!(graph.contains_edge("x", "7"));
    }

    #[test]
    fn test_parallel_and_reciprocal_edges_collapse() {
        let mut decoded = DecodedGraph::new(true);
        decoded.add_edge("a", "b");
        decoded.add_edge("b", "a");
        decoded.add_edge("a", "b");
        decoded.add_edge("b", "c");
        let graph = normalize(decoded);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_same_text_from_different_types_is_one_node() {
        let mut decoded = DecodedGraph::new(false);
        decoded.add_edge(NodeKey::Integer(1), NodeKey::Text("1".into()));
        let graph = normalize(decoded);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
    }
}

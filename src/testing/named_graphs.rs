use crate::Graph;

/// Complete graph on nodes `"0"..n-1`.
pub(crate) fn complete_graph(n: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(&i.to_string());
        for j in 0..i {
            graph.add_edge(&j.to_string(), &i.to_string());
        }
    }
    graph
}

/// Complete bipartite graph with sides `"a0".."a{a-1}"` and `"b0".."b{b-1}"`.
pub(crate) fn complete_bipartite_graph(a: usize, b: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..a {
        for j in 0..b {
            graph.add_edge(&format!("a{i}"), &format!("b{j}"));
        }
    }
    graph
}

/// Outer 5-cycle `0..4`, inner pentagram `5..9` and the spokes between them.
pub(crate) fn petersen_graph() -> Graph {
    let mut graph = Graph::new();
    for i in 0..5 {
        graph.add_edge(&i.to_string(), &((i + 1) % 5).to_string());
        graph.add_edge(&(i + 5).to_string(), &((i + 2) % 5 + 5).to_string());
        graph.add_edge(&i.to_string(), &(i + 5).to_string());
    }
    graph
}

/// Replaces every edge of `graph` with a path of length two through a fresh node.
pub(crate) fn subdivide(graph: &Graph) -> Graph {
    let mut result = Graph::new();
    for id in graph.nodes() {
        result.add_node(id);
    }
    for (i, (u, v)) in graph.edges().enumerate() {
        let mid = format!("s{i}");
        result.add_edge(u, &mid);
        result.add_edge(&mid, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(complete_graph(5).edge_count(), 10);
        assert_eq!(complete_bipartite_graph(3, 3).edge_count(), 9);
        let petersen = petersen_graph();
        assert_eq!(petersen.node_count(), 10);
        assert_eq!(petersen.edge_count(), 15);
        assert!(petersen.nodes().all(|v| petersen.degree(v) == 3));
        let k33 = subdivide(&complete_bipartite_graph(3, 3));
        assert_eq!(k33.node_count(), 15);
        assert_eq!(k33.edge_count(), 18);
    }
}

use petgraph::graph::NodeIndex;

use crate::embedding::is_planar;

/// Given a non-planar graph, extracts the edges of a Kuratowski subgraph. Works in O(m) planarity tests.
///
/// Edges are taken out one at a time, an edge is kept only if the remaining edges together with
/// the already kept ones become planar without it.
pub fn get_counterexample<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Vec<(NodeIndex, NodeIndex)> {
    let mut rest: petgraph::graph::UnGraph<(), ()> = graph.map(|_, _| (), |_, _| ());
    let mut kept: Vec<(NodeIndex, NodeIndex)> = Vec::new();

    while let Some(eid) = rest.edge_indices().next() {
        let Some((u, v)) = rest.edge_endpoints(eid) else {
            break;
        };
        rest.remove_edge(eid);

        let mut graph_test = rest.clone();
        for &(ret_u, ret_v) in &kept {
            graph_test.add_edge(ret_u, ret_v, ());
        }

        if is_planar(&graph_test) {
            kept.push((u, v));
        }
    }

    debug_assert!(!is_planar(&{
        let mut ret = graph.map(|_, _| (), |_, _| ());
        ret.clear_edges();
        for &(u, v) in &kept {
            ret.add_edge(u, v, ());
        }
        ret
    }));

    kept
}

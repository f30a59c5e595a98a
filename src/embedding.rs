use petgraph::graph::NodeIndex;

use crate::{
    embedding_blocks::{
        constraints::Constraints, embed::embed, kuratowski::get_counterexample,
        lr_graph::LrGraph,
    },
    types::DiGraph,
};

/// Result of the LR planarity test.
#[derive(Debug, Clone)]
pub enum Planarity {
    /// A combinatorial embedding of the input, node `i` of the embedding is node index `i` of the input.
    Planar(DiGraph),
    /// Edges of a Kuratowski subgraph, as pairs of input node indices.
    /// Empty if no counterexample was requested.
    NonPlanar(Vec<(NodeIndex, NodeIndex)>),
}

impl Planarity {
    pub fn is_planar(&self) -> bool {
        matches!(self, Planarity::Planar(_))
    }
}

/// Implements the LR planarity testing algorithm. Works for disconnected graphs as well,
/// self-loops and parallel edges are ignored by the test.
///
/// Returns a planar embedding of the graph, or, if the graph is not planar and
/// `with_counterexample` is set, the edges of its Kuratowski subgraph.
///
/// Reference:
/// [The Left-Right Planarity Test](https://acm.math.spbu.ru/~sk1/download/papers/planar//brandes2010-planarity.pdf)
pub fn test_planarity<N, E>(
    graph: &petgraph::graph::UnGraph<N, E>,
    with_counterexample: bool,
) -> Planarity {
    if graph.node_count() == 0 {
        return Planarity::Planar(DiGraph::new());
    }

    let mut g = LrGraph::new(graph);
    let roots = g.orient_components();
    g.sort_by_nesting();

    let mut constraints = Constraints::new(g.edge_count());
    for &root in &roots {
        if !constraints.check(&g, root) {
            let counterexample = if with_counterexample {
                get_counterexample(graph)
            } else {
                Vec::new()
            };
            return Planarity::NonPlanar(counterexample);
        }
    }

    Planarity::Planar(embed(g, constraints, &roots))
}

/// Shorthand for [`test_planarity`] without a counterexample.
pub fn is_planar<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> bool {
    test_planarity(graph, false).is_planar()
}

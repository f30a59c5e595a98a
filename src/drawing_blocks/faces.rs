use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;

use crate::error::{Error, Result};
use crate::types::DiGraph;

/// Face of an embedded graph, as the cyclic sequence of nodes on its boundary.
#[derive(Debug, Clone)]
pub struct Face {
    pub order: Vec<usize>,
}

/// Walks all faces of an embedding: after entering a node through an arc, the walk leaves
/// through the arc following the reverse arc in the rotation of that node.
///
/// Fails if some arc has no reverse arc.
pub fn get_faces(graph: &DiGraph) -> Result<Vec<Face>> {
    let rotation: Vec<Vec<EdgeIndex>> = graph
        .node_indices()
        .map(|u| graph.edges(u).map(|e| e.id()).collect())
        .collect();

    // position of every arc in the rotation of its source
    let mut slot = vec![0; graph.edge_count()];
    for arcs in &rotation {
        for (i, arc) in arcs.iter().enumerate() {
            slot[arc.index()] = i;
        }
    }
    let reverse: HashMap<(usize, usize), EdgeIndex> = graph
        .edge_references()
        .map(|e| ((e.target().index(), e.source().index()), e.id()))
        .collect();

    let mut walked = FixedBitSet::with_capacity(graph.edge_count());
    let mut faces = Vec::new();

    for &first in rotation.iter().flatten() {
        if walked.put(first.index()) {
            continue;
        }

        let mut order = Vec::new();
        let mut arc = first;
        loop {
            walked.insert(arc.index());
            let (u, v) = graph
                .edge_endpoints(arc)
                .map(|(s, t)| (s.index(), t.index()))
                .ok_or_else(|| Error::Layout("arc disappeared while walking a face".into()))?;
            order.push(u);

            let back = reverse
                .get(&(u, v))
                .ok_or_else(|| Error::Layout(format!("arc {u}->{v} has no reverse arc")))?;
            let around = &rotation[v];
            arc = around[(slot[back.index()] + 1) % around.len()];

            if arc == first {
                break;
            }
            if order.len() > graph.edge_count() {
                return Err(Error::Layout("face walk does not close".into()));
            }
        }
        faces.push(Face { order });
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Planarity, test_planarity};
    use crate::testing::named_graphs::complete_graph;

    #[test]
    fn test_faces_satisfy_euler_formula() {
        let graph = complete_graph(4);
        let Planarity::Planar(embedding) = test_planarity(graph.as_petgraph(), false) else {
            panic!("K4 is planar");
        };
        let faces = get_faces(&embedding).unwrap();
        // n - m + f = 2
        assert_eq!(faces.len(), 4);
        assert!(faces.iter().all(|f| f.order.len() == 3));
    }

    #[test]
    fn test_missing_twin_is_an_error() {
        let mut embedding = DiGraph::new();
        let a = embedding.add_node(0);
        let b = embedding.add_node(1);
        embedding.add_edge(a, b, crate::EdgeLabel::Real);
        assert!(get_faces(&embedding).is_err());
    }
}

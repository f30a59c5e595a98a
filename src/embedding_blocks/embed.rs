use hashbrown::HashMap;
use petgraph::graph::NodeIndex;

use super::constraints::{Constraints, Side};
use super::lr_graph::LrGraph;
use crate::types::{DiGraph, EdgeLabel};

/// Third DFS of the LR test.
///
/// Turns the sides found by [`Constraints::check`] into a combinatorial embedding: the arcs
/// leaving a node are stored in their clockwise order. Parallel edges and self-loops of the
/// input are given back as consecutive arcs.
pub(crate) fn embed(mut g: LrGraph, mut constraints: Constraints, roots: &[usize]) -> DiGraph {
    for eid in 0..g.edge_count() {
        if constraints.resolve(eid) == Side::Left {
            g.nesting[eid] = -g.nesting[eid];
        }
    }
    g.sort_by_nesting();

    let mut embedding = DiGraph::with_capacity(g.n, 0);
    for u in 0..g.n {
        embedding.add_node(u as u32);
    }

    let mut embedder = Embedder {
        left: vec![Vec::new(); g.n],
        right: vec![Vec::new(); g.n],
        pending: std::mem::take(&mut g.multiplicity),
        embedding,
    };
    for &root in roots {
        embedder.visit(&g, &constraints.side, root);
    }
    embedder.embedding
}

struct Embedder {
    /// Back edges ending at a node, to be placed left/right of the tree edge being finished.
    left: Vec<Vec<usize>>,
    right: Vec<Vec<usize>>,
    /// Arcs not emitted yet.
    pending: HashMap<(usize, usize), usize>,
    embedding: DiGraph,
}

impl Embedder {
    fn emit(&mut self, u: usize, v: usize) {
        if let Some(count) = self.pending.get_mut(&(u, v)) {
            for _ in 0..*count {
                self.embedding
                    .add_edge(NodeIndex::new(u), NodeIndex::new(v), EdgeLabel::Real);
            }
            *count = 0;
        }
    }

    fn visit(&mut self, g: &LrGraph, side: &[Side], root: usize) {
        let mut stack = vec![(root, 0)];
        while let Some(&(u, i)) = stack.last() {
            let Some(&eid) = g.adjacent[u].get(i) else {
                stack.pop();
                self.emit(u, u);
                if let Some(parent) = g.parent_edge[u] {
                    self.close_tree_edge(g.arcs[parent].0, u);
                }
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            let to = g.arcs[eid].1;
            if g.parent_edge[to] == Some(eid) {
                self.emit(to, u);
                stack.push((to, 0));
            } else {
                self.emit(u, to);
                match side[eid] {
                    Side::Right => self.right[to].push(u),
                    Side::Left => self.left[to].push(u),
                }
            }
        }
    }

    /// Places the tree edge `u -> to` between the back edges that entered `u` from the
    /// subtree of `to`.
    fn close_tree_edge(&mut self, u: usize, to: usize) {
        let left = std::mem::take(&mut self.left[u]);
        let right = std::mem::take(&mut self.right[u]);
        for &v in left.iter().rev() {
            self.emit(u, v);
        }
        self.emit(u, to);
        for &v in right.iter().rev() {
            self.emit(u, v);
        }
    }
}

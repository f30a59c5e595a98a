use petgraph::graph::NodeIndex;

use crate::error::{Error, Result};
use crate::types::DiGraph;

/// Grid coordinates of every node, indexed like the input embedding.
#[derive(Debug, Clone)]
pub struct GridDrawing {
    pub coordinates: Vec<(i64, i64)>,
}

/// One of the three trees of a Schnyder wood, rooted at an outer node.
#[derive(Debug, Clone)]
struct Tree {
    root: usize,
    children: Vec<Vec<usize>>,
    depth: Vec<usize>,
    size: Vec<usize>,
}

impl Tree {
    fn new(n: usize, root: usize) -> Self {
        Tree {
            root,
            children: vec![Vec::new(); n],
            depth: vec![0; n],
            size: vec![0; n],
        }
    }

    fn attach(&mut self, child: usize, parent: usize) {
        self.children[parent].push(child);
    }

    /// Nodes reachable from the root, every parent before its children.
    fn top_down(&self) -> Vec<(usize, Option<usize>)> {
        let mut order = vec![(self.root, None)];
        let mut i = 0;
        while i < order.len() {
            let u = order[i].0;
            order.extend(self.children[u].iter().map(|&c| (c, Some(u))));
            i += 1;
        }
        order
    }

    fn measure(&mut self) {
        let order = self.top_down();
        for &(u, parent) in &order {
            self.depth[u] = parent.map_or(0, |p| self.depth[p] + 1);
        }
        for &(u, _) in order.iter().rev() {
            self.size[u] = 1 + self.children[u].iter().map(|&c| self.size[c]).sum::<usize>();
        }
    }
}

/// Straight-line drawing of a triangulated embedding on the `(n - 2) x (n - 2)` grid,
/// computed from a Schnyder wood with node 0 on the outer face.
///
/// Every node is placed by counting the faces of the three regions cut out by its paths to
/// the three outer nodes.
pub fn draw(g: &DiGraph) -> Result<GridDrawing> {
    let n = g.node_count();
    if n < 3 {
        return Err(Error::Layout("Schnyder drawing needs at least three nodes".into()));
    }

    let around_first: Vec<usize> = g.neighbors(NodeIndex::new(0)).map(|v| v.index()).collect();
    if around_first.len() < 2 {
        return Err(Error::Layout("graph must be triangulated".into()));
    }
    // consecutive neighbours close a triangle with node 0
    let outer = [0, around_first[0], around_first[1]];

    let mut trees = grow_wood(g, outer)?;
    for tree in trees.iter_mut() {
        tree.measure();
    }

    // path_sum[t][j][u]: sizes in tree j summed along the path from u to the root of tree t
    let mut path_sum: [[Vec<usize>; 3]; 3] = std::array::from_fn(|_| std::array::from_fn(|_| vec![0; n]));
    for t in 0..3 {
        for (u, parent) in trees[t].top_down() {
            for j in (0..3).filter(|&j| j != t) {
                let above = parent.map_or(0, |p| path_sum[t][j][p]);
                path_sum[t][j][u] = above + trees[j].size[u];
            }
        }
    }

    let coordinates = (0..n)
        .map(|u| {
            let mut c = [0i64; 3];
            for i in 0..3 {
                let (next, prev) = ((i + 1) % 3, (i + 2) % 3);
                let mut region = (path_sum[next][i][u] + path_sum[prev][i][u]) as i64
                    - trees[i].size[u] as i64;
                if u == outer[i] {
                    region -= 2;
                }
                c[i] = region - trees[prev].depth[u] as i64 - 1;
            }
            (c[1], c[2])
        })
        .collect();

    Ok(GridDrawing { coordinates })
}

/// Peels nodes off the outer face in canonical order and records, for every peeled node,
/// its outgoing edge in each of the three trees.
fn grow_wood(g: &DiGraph, outer: [usize; 3]) -> Result<[Tree; 3]> {
    let n = g.node_count();
    let [a, b, c] = outer;

    // outer boundary of what is left, as a cyclic list a -> c -> b -> a
    let mut prev = vec![usize::MAX; n];
    let mut next = vec![usize::MAX; n];
    for (u, v) in [(a, c), (c, b), (b, a)] {
        next[u] = v;
        prev[v] = u;
    }

    let mut on_boundary = vec![false; n];
    for u in outer {
        on_boundary[u] = true;
    }
    let mut removed = vec![false; n];
    // chords between boundary nodes, a node with a chord cannot be removed yet
    let mut chords = vec![0usize; n];
    let mut candidates = vec![c];

    let mut trees = [Tree::new(n, a), Tree::new(n, b), Tree::new(n, c)];
    trees[0].attach(b, a);
    trees[1].attach(a, b);
    trees[2].attach(a, c);
    trees[2].attach(b, c);

    for _ in 2..n {
        let mut pick = None;
        while let Some(v) = candidates.pop() {
            if !removed[v] && on_boundary[v] && chords[v] == 0 && v != a && v != b {
                pick = Some(v);
                break;
            }
        }
        let Some(u) = pick else {
            break;
        };
        removed[u] = true;
        on_boundary[u] = false;

        let mut fan: Vec<usize> = g
            .neighbors(NodeIndex::new(u))
            .map(|v| v.index())
            .filter(|&v| !removed[v])
            .collect();
        if fan.is_empty() {
            continue;
        }

        let start = fan.iter().position(|&v| v == prev[u]).ok_or_else(|| {
            Error::Layout("previous boundary node is not an unused neighbour".into())
        })?;
        fan.rotate_left(start);
        if fan.len() > 2 && fan[1] == next[u] {
            fan[1..].reverse();
        }
        for pair in fan.windows(2) {
            next[pair[0]] = pair[1];
            prev[pair[1]] = pair[0];
        }

        let last = fan.len() - 1;
        trees[0].attach(u, fan[0]);
        trees[1].attach(u, fan[last]);

        for j in 1..last {
            let v = fan[j];
            trees[2].attach(v, u);
            on_boundary[v] = true;
            candidates.push(v);

            for w in g.neighbors(NodeIndex::new(v)).map(|w| w.index()) {
                if w != fan[j - 1] && w != fan[j + 1] && on_boundary[w] {
                    chords[w] += 1;
                    chords[v] += 1;
                }
            }
        }

        if fan.len() == 2 {
            for v in [fan[0], fan[1]] {
                chords[v] = chords[v].saturating_sub(1);
                candidates.push(v);
            }
        }
    }

    Ok(trees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing_blocks::triangulate::triangulate;
    use crate::embedding::is_planar;
    use crate::testing::graph_enumerator::GraphEnumeratorState;
    use petgraph::visit::EdgeRef;

    type Point = (i64, i64);

    fn orientation(a: Point, b: Point, c: Point) -> i64 {
        (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
    }

    fn in_box(a: Point, b: Point, p: Point) -> bool {
        (a.0.min(b.0)..=a.0.max(b.0)).contains(&p.0) && (a.1.min(b.1)..=a.1.max(b.1)).contains(&p.1)
    }

    fn touches(a: Point, b: Point, p: Point) -> bool {
        orientation(a, b, p) == 0 && in_box(a, b, p)
    }

    fn segments_meet(s: (Point, Point), t: (Point, Point)) -> bool {
        let (d1, d2) = (orientation(s.0, s.1, t.0), orientation(s.0, s.1, t.1));
        let (d3, d4) = (orientation(t.0, t.1, s.0), orientation(t.0, t.1, s.1));
        (d1.signum() * d2.signum() < 0 && d3.signum() * d4.signum() < 0)
            || touches(s.0, s.1, t.0)
            || touches(s.0, s.1, t.1)
            || touches(t.0, t.1, s.0)
            || touches(t.0, t.1, s.1)
    }

    fn assert_plane_drawing(g: &DiGraph, drawing: &GridDrawing) {
        let at = |u: usize| drawing.coordinates[u];
        let edges: Vec<(usize, usize)> = g
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .filter(|(u, v)| u < v)
            .collect();

        for (i, &(a, b)) in edges.iter().enumerate() {
            for &(c, d) in &edges[i + 1..] {
                if [c, d].contains(&a) || [c, d].contains(&b) {
                    continue;
                }
                assert!(
                    !segments_meet((at(a), at(b)), (at(c), at(d))),
                    "{a}-{b} meets {c}-{d}"
                );
            }
            for v in (0..g.node_count()).filter(|&v| v != a && v != b) {
                assert!(!touches(at(a), at(b), at(v)), "node {v} lies on {a}-{b}");
            }
        }
    }

    #[test]
    fn test_small_graphs_are_drawn_without_crossings() {
        for n in 3..=6 {
            for g in GraphEnumeratorState::new(n) {
                if !is_planar(g.as_petgraph()) {
                    continue;
                }
                let triangulated = triangulate(g.as_petgraph()).unwrap();
                let drawing = draw(&triangulated).unwrap();

                let limit = n as i64 - 2;
                for &(x, y) in &drawing.coordinates {
                    assert!((0..=limit).contains(&x) && (0..=limit).contains(&y));
                }
                assert_plane_drawing(&triangulated, &drawing);
            }
        }
    }

    #[test]
    fn test_needs_three_nodes() {
        let mut g = DiGraph::new();
        g.add_node(0);
        g.add_node(1);
        assert!(draw(&g).is_err());
    }

    #[test]
    fn test_tree_sizes() {
        let mut tree = Tree::new(4, 0);
        tree.attach(1, 0);
        tree.attach(2, 1);
        tree.attach(3, 0);
        tree.measure();
        assert_eq!(tree.size, vec![4, 2, 1, 1]);
        assert_eq!(tree.depth, vec![0, 1, 2, 1]);
    }
}

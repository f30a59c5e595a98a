use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

pub(crate) const UNSET: usize = usize::MAX;

/// Multigraph prepared for the LR test.
///
/// One copy of every non-loop edge takes part in the test, copies and self-loops are only
/// counted in `multiplicity` so that the embedding can give them back.
#[derive(Debug, Clone)]
pub(crate) struct LrGraph {
    pub n: usize,
    /// Edge endpoints, oriented from parent to child (tree edges) or from descendant to
    /// ancestor (back edges) once [`LrGraph::orient_components`] ran.
    pub arcs: Vec<(usize, usize)>,
    /// Incident edges before sorting, outgoing edges by nesting depth after.
    pub adjacent: Vec<Vec<usize>>,
    pub lowpt: Vec<usize>,
    pub lowpt2: Vec<usize>,
    pub nesting: Vec<isize>,
    pub parent_edge: Vec<Option<usize>>,
    pub height: Vec<usize>,
    /// Number of input edges between an ordered pair of nodes.
    pub multiplicity: HashMap<(usize, usize), usize>,
}

impl LrGraph {
    pub fn new<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Self {
        let n = graph.node_count();
        let mut g = LrGraph {
            n,
            arcs: Vec::new(),
            adjacent: vec![Vec::new(); n],
            lowpt: Vec::new(),
            lowpt2: Vec::new(),
            nesting: Vec::new(),
            parent_edge: vec![None; n],
            height: vec![UNSET; n],
            multiplicity: HashMap::new(),
        };
        for e in graph.edge_references() {
            g.add_edge(e.source().index(), e.target().index());
        }
        let m = g.arcs.len();
        g.lowpt = vec![UNSET; m];
        g.lowpt2 = vec![UNSET; m];
        g.nesting = vec![0; m];
        g
    }

    fn add_edge(&mut self, u: usize, v: usize) {
        let count = self.multiplicity.entry((u, v)).or_insert(0);
        *count += 1;
        if u == v {
            return;
        }
        let first = *count == 1;
        *self.multiplicity.entry((v, u)).or_insert(0) += 1;
        if first {
            let eid = self.arcs.len();
            self.arcs.push((u, v));
            self.adjacent[u].push(eid);
            self.adjacent[v].push(eid);
        }
    }

    pub fn edge_count(&self) -> usize {
        self.arcs.len()
    }

    /// Runs the orientation DFS from every unvisited node and returns the DFS roots.
    pub fn orient_components(&mut self) -> Vec<usize> {
        let mut roots = Vec::new();
        for u in 0..self.n {
            if self.height[u] == UNSET {
                self.height[u] = 0;
                self.orient(u);
                roots.push(u);
            }
        }
        roots
    }

    /// Orients edges along a DFS from `root` and computes lowpoints and nesting depths.
    ///
    /// Every frame of the DFS stack holds a node and the position of the next incident edge.
    fn orient(&mut self, root: usize) {
        let mut stack = vec![(root, 0)];
        while let Some(&(u, i)) = stack.last() {
            let Some(&eid) = self.adjacent[u].get(i) else {
                stack.pop();
                if let Some(eid) = self.parent_edge[u] {
                    self.finish(eid);
                }
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            if self.lowpt[eid] != UNSET {
                // oriented from the other side
                continue;
            }
            if self.arcs[eid].0 != u {
                let (a, b) = self.arcs[eid];
                self.arcs[eid] = (b, a);
            }
            let to = self.arcs[eid].1;

            self.lowpt[eid] = self.height[u];
            self.lowpt2[eid] = self.height[u];
            if self.height[to] == UNSET {
                self.parent_edge[to] = Some(eid);
                self.height[to] = self.height[u] + 1;
                stack.push((to, 0));
            } else {
                self.lowpt[eid] = self.height[to];
                self.finish(eid);
            }
        }
    }

    /// Sets the nesting depth of an oriented edge and passes its lowpoints up to the
    /// parent edge of its source.
    fn finish(&mut self, eid: usize) {
        let u = self.arcs[eid].0;
        let chordal = self.lowpt2[eid] < self.height[u];
        self.nesting[eid] = 2 * self.lowpt[eid] as isize + chordal as isize;

        if let Some(parent) = self.parent_edge[u] {
            let (low, low2) = (self.lowpt[eid], self.lowpt2[eid]);
            if low < self.lowpt[parent] {
                self.lowpt2[parent] = self.lowpt[parent].min(low2);
                self.lowpt[parent] = low;
            } else if low > self.lowpt[parent] {
                self.lowpt2[parent] = self.lowpt2[parent].min(low);
            } else {
                self.lowpt2[parent] = self.lowpt2[parent].min(low2);
            }
        }
    }

    /// Keeps only outgoing edges in `adjacent`, ordered by nesting depth.
    /// Ties keep the order of edge ids.
    pub fn sort_by_nesting(&mut self) {
        let mut order: Vec<usize> = (0..self.arcs.len()).collect();
        order.sort_by_key(|&eid| self.nesting[eid]);

        let mut outgoing = vec![Vec::new(); self.n];
        for eid in order {
            outgoing[self.arcs[eid].0].push(eid);
        }
        self.adjacent = outgoing;
    }
}

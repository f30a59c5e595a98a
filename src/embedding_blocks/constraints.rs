//! Second DFS of the LR test: left/right constraints between back edges.

use super::lr_graph::{LrGraph, UNSET};

/// Side of a back edge relative to its tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Consecutive back edges of one side, `low` is the one with the lowest return point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Interval {
    pub low: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ConflictPair {
    pub left: Option<Interval>,
    pub right: Option<Interval>,
}

impl ConflictPair {
    fn flip(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Lowest return point of the pair. Pairs on the stack are never empty.
    fn lowest(&self, g: &LrGraph) -> usize {
        [self.left, self.right]
            .iter()
            .flatten()
            .map(|interval| g.lowpt[interval.low])
            .min()
            .unwrap_or(UNSET)
    }
}

/// Conflict pair stack and the relative sides of all back edges.
#[derive(Debug, Clone)]
pub(crate) struct Constraints {
    /// Stack height when the edge was entered.
    stack_bottom: Vec<usize>,
    lowpt_edge: Vec<usize>,
    /// Edge whose side the side of this edge is relative to.
    pub reference: Vec<usize>,
    pub side: Vec<Side>,
    stack: Vec<ConflictPair>,
}

impl Constraints {
    pub fn new(m: usize) -> Self {
        Constraints {
            stack_bottom: vec![0; m],
            lowpt_edge: vec![0; m],
            reference: vec![UNSET; m],
            side: vec![Side::Right; m],
            stack: Vec::new(),
        }
    }

    /// Walks the DFS tree below `root` in nesting order, one `(node, next edge)` frame per
    /// tree level.
    ///
    /// Returns `false` as soon as two back edges would have to be on both sides.
    pub fn check(&mut self, g: &LrGraph, root: usize) -> bool {
        let mut stack = vec![(root, 0)];
        while let Some(&(u, i)) = stack.last() {
            let Some(&eid) = g.adjacent[u].get(i) else {
                stack.pop();
                self.leave(g, u);
                if let Some(parent) = g.parent_edge[u] {
                    if !self.constrain_parent(g, parent) {
                        return false;
                    }
                }
                continue;
            };
            let top = stack.len() - 1;
            stack[top].1 += 1;

            let to = g.arcs[eid].1;
            self.stack_bottom[eid] = self.stack.len();
            if g.parent_edge[to] == Some(eid) {
                stack.push((to, 0));
                continue;
            }

            self.lowpt_edge[eid] = eid;
            self.stack.push(ConflictPair {
                left: None,
                right: Some(Interval {
                    low: eid,
                    high: eid,
                }),
            });
            if !self.constrain_parent(g, eid) {
                return false;
            }
        }
        true
    }

    /// Edges returning above their source constrain the parent edge of that source.
    fn constrain_parent(&mut self, g: &LrGraph, eid: usize) -> bool {
        let u = g.arcs[eid].0;
        let Some(parent) = g.parent_edge[u].filter(|_| g.lowpt[eid] < g.height[u]) else {
            return true;
        };
        if eid == g.adjacent[u][0] {
            self.lowpt_edge[parent] = self.lowpt_edge[eid];
            true
        } else {
            self.add_constraints(g, eid, parent)
        }
    }

    /// Called once every edge leaving `u` is done.
    fn leave(&mut self, g: &LrGraph, u: usize) {
        let Some(parent) = g.parent_edge[u] else {
            return;
        };
        let from = g.arcs[parent].0;
        self.remove_back_edges(g, from);

        if g.lowpt[parent] < g.height[from] {
            if let Some(top) = self.stack.last() {
                self.reference[parent] = match (top.left, top.right) {
                    (Some(l), Some(r)) if g.lowpt[l.high] > g.lowpt[r.high] => l.high,
                    (_, Some(r)) => r.high,
                    (Some(l), None) => l.high,
                    (None, None) => UNSET,
                };
            }
        }
    }

    fn join(&mut self, target: &mut Option<Interval>, other: Option<Interval>) {
        match (target.as_mut(), other) {
            (Some(t), Some(o)) => {
                self.reference[t.low] = o.high;
                t.low = o.low;
            }
            (Some(_), None) => {}
            (None, o) => *target = o,
        }
    }

    fn conflicting(g: &LrGraph, interval: Option<Interval>, eid: usize) -> bool {
        interval.is_some_and(|i| g.lowpt[i.high] > g.lowpt[eid])
    }

    /// Merges the constraints of the subtree entered through `eid` into one pair.
    fn add_constraints(&mut self, g: &LrGraph, eid: usize, parent: usize) -> bool {
        let mut merged = ConflictPair::default();

        // the whole subtree return edges must end up on one side
        while let Some(mut q) = self.stack.pop() {
            if q.left.is_some() {
                q.flip();
            }
            if q.left.is_some() {
                return false;
            }
            if let Some(right) = q.right {
                if g.lowpt[right.low] > g.lowpt[parent] {
                    self.join(&mut merged.right, q.right);
                } else {
                    self.reference[right.low] = self.lowpt_edge[parent];
                }
            }
            if self.stack.len() <= self.stack_bottom[eid] {
                break;
            }
        }

        // older pairs that conflict with eid
        while let Some(top) = self.stack.last() {
            if !Self::conflicting(g, top.left, eid) && !Self::conflicting(g, top.right, eid) {
                break;
            }
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if Self::conflicting(g, q.right, eid) {
                q.flip();
            }
            if Self::conflicting(g, q.right, eid) {
                return false;
            }
            self.join(&mut merged.right, q.right);
            self.join(&mut merged.left, q.left);
        }

        if !merged.is_empty() {
            self.stack.push(merged);
        }
        true
    }

    /// Drops back edges ending at `u` from the stack, `u` being the parent of the
    /// subtree that was just finished.
    fn remove_back_edges(&mut self, g: &LrGraph, u: usize) {
        while let Some(top) = self.stack.last() {
            if top.lowest(g) != g.height[u] {
                break;
            }
            if let Some(left) = self.stack.pop().and_then(|q| q.left) {
                self.side[left.low] = Side::Left;
            }
        }

        if let Some(mut p) = self.stack.pop() {
            p.left = self.trim(g, u, p.left, p.right);
            p.right = self.trim(g, u, p.right, p.left);
            if !p.is_empty() {
                self.stack.push(p);
            }
        }
    }

    fn trim(
        &mut self,
        g: &LrGraph,
        u: usize,
        interval: Option<Interval>,
        other: Option<Interval>,
    ) -> Option<Interval> {
        let mut interval = interval?;
        while interval.high != UNSET && g.arcs[interval.high].1 == u {
            interval.high = self.reference[interval.high];
        }
        if interval.high != UNSET {
            return Some(interval);
        }
        if let Some(other) = other {
            self.reference[interval.low] = other.low;
        }
        self.side[interval.low] = Side::Left;
        None
    }

    /// Final side of an edge, following the chain of references.
    pub fn resolve(&mut self, eid: usize) -> Side {
        let mut chain = vec![eid];
        let mut e = eid;
        while self.reference[e] != UNSET {
            e = self.reference[e];
            chain.push(e);
        }
        // settle from the far end of the chain
        for pair in chain.windows(2).rev() {
            let (e, reference) = (pair[0], pair[1]);
            if self.side[reference] == Side::Left {
                self.side[e] = match self.side[e] {
                    Side::Left => Side::Right,
                    Side::Right => Side::Left,
                };
            }
            self.reference[e] = UNSET;
        }
        self.side[eid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_follows_reference_chain() {
        let mut constraints = Constraints::new(4);
        constraints.reference = vec![1, 2, 3, UNSET];
        constraints.side = vec![Side::Right, Side::Left, Side::Right, Side::Left];
        // 3 is left, so 2 flips to left, 1 flips to right, 0 stays right
        assert_eq!(constraints.resolve(0), Side::Right);
        assert_eq!(constraints.side, vec![Side::Right, Side::Right, Side::Left, Side::Left]);
        assert!(constraints.reference.iter().all(|&r| r == UNSET));
        assert_eq!(constraints.resolve(1), Side::Right);
    }

    #[test]
    fn test_long_reference_chain() {
        let m = 500_000;
        let mut constraints = Constraints::new(m);
        for eid in 0..m - 1 {
            constraints.reference[eid] = eid + 1;
        }
        constraints.side[m - 1] = Side::Left;
        // every edge ends up on the side of the last one
        assert_eq!(constraints.resolve(0), Side::Left);
        assert!(constraints.side.iter().all(|&side| side == Side::Left));
    }
}

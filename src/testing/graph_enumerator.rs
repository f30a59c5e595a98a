use crate::Graph;

/// Enumerates every graph on nodes `"0"..n-1` by walking through all edge masks.
pub(crate) struct GraphEnumeratorState {
    pub n: usize,
    pub mask: usize,
    pub last_mask: usize,
}

impl GraphEnumeratorState {
    pub fn new(n: usize) -> Self {
        GraphEnumeratorState {
            n,
            mask: 0,
            last_mask: 1 << (n * (n - 1) / 2),
        }
    }
}

impl Iterator for GraphEnumeratorState {
    type Item = Graph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == self.last_mask {
            return None;
        }

        let mut graph = Graph::new();
        for i in 0..self.n {
            graph.add_node(&i.to_string());
        }

        let mut check = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.mask & (1 << check) != 0 {
                    graph.add_edge(&i.to_string(), &j.to_string());
                }
                check += 1;
            }
        }

        self.mask = self.mask.wrapping_add(1);
        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerates_all_masks() {
        let graphs: Vec<_> = GraphEnumeratorState::new(3).collect();
        assert_eq!(graphs.len(), 8);
        assert_eq!(graphs[7].edge_count(), 3);
        assert!(graphs.iter().all(|g| g.node_count() == 3));
    }
}

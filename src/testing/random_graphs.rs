use crate::Graph;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Connected random graph on nodes `"0"..n-1` with at most `m` edges and no self-loops.
pub(crate) fn random_graph(n: usize, m: usize, seed: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = Graph::new();

    for i in 0..n {
        graph.add_node(&i.to_string());
        if i > 0 {
            let j = rng.random_range(0..i);
            graph.add_edge(&i.to_string(), &j.to_string());
        }
    }

    for _ in n.saturating_sub(1)..m {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        if s != t {
            graph.add_edge(&s.to_string(), &t.to_string());
        }
    }

    graph
}

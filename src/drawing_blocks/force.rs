use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Graph;

const THRESHOLD: f64 = 1e-4;
const MIN_DISTANCE: f64 = 0.01;

/// Fruchterman-Reingold spring layout, node `i` is the `i`-th node of [`Graph::nodes`].
///
/// Starts from uniformly random positions drawn from `seed` and cools down linearly over
/// `iterations` rounds. Positions are not rescaled.
pub fn spring_layout(graph: &Graph, iterations: usize, seed: u64) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![(0.0, 0.0)];
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    let mut adjacent = vec![vec![false; n]; n];
    for (u, v) in graph.edges() {
        if let (Some(a), Some(b)) = (graph.node_index(u), graph.node_index(v)) {
            adjacent[a.index()][b.index()] = true;
            adjacent[b.index()][a.index()] = true;
        }
    }

    // optimal distance between nodes
    let k = (1.0 / n as f64).sqrt();
    let (min_x, max_x, min_y, max_y) = bounds(&pos);
    let mut t = (max_x - min_x).max(max_y - min_y) * 0.1;
    let dt = t / (iterations + 1) as f64;

    for _ in 0..iterations {
        let mut moved = 0.0;
        let mut displacement = vec![(0.0, 0.0); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let distance = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let attraction = if adjacent[i][j] { distance / k } else { 0.0 };
                let force = k * k / (distance * distance) - attraction;
                displacement[i].0 += dx * force;
                displacement[i].1 += dy * force;
            }
        }
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d.0 * d.0 + d.1 * d.1).sqrt().max(MIN_DISTANCE);
            let step = (d.0 * t / length, d.1 * t / length);
            p.0 += step.0;
            p.1 += step.1;
            moved += (step.0 * step.0 + step.1 * step.1).sqrt();
        }
        t -= dt;
        if moved / (n as f64) < THRESHOLD {
            break;
        }
    }

    pos
}

pub(crate) fn bounds(pos: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    pos.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), &(x, y)| {
            (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y))
        },
    )
}

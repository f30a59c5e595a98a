//! Node coordinates for the response.
//!
//! Planar graphs get a straight-line drawing from a Schnyder wood of a triangulation.
//! Everything else, and every planar graph the drawing code rejects, gets a seeded
//! spring layout.

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    drawing_blocks::{force::bounds, force::spring_layout, schnyder::draw, triangulate::triangulate},
    error::Result,
    types::Graph,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Multiplier applied to the normalised coordinates.
    pub scale: f64,
    /// Rounds of the spring layout.
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 500.0,
            iterations: 50,
            seed: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// One position per node of `graph`, in the order of [`Graph::nodes`].
pub fn layout(graph: &Graph, planar: bool, config: &LayoutConfig) -> Vec<NodePosition> {
    let positions = if planar {
        match planar_layout(graph) {
            Ok(positions) => positions,
            Err(err) => {
                warn!(%err, "planar drawing failed, using spring layout");
                centered(spring_layout(graph, config.iterations, config.seed))
            }
        }
    } else {
        centered(spring_layout(graph, config.iterations, config.seed))
    };

    graph
        .nodes()
        .zip(positions)
        .map(|(id, (x, y))| NodePosition {
            id: id.to_string(),
            x: x * config.scale,
            y: y * config.scale,
        })
        .collect()
}

/// Schnyder drawing normalised into the unit square.
fn planar_layout(graph: &Graph) -> Result<Vec<(f64, f64)>> {
    // the drawing code works on simple graphs
    let simple = graph
        .as_petgraph()
        .filter_map(|_, id| Some(id.as_str()), |eid, label| {
            let (u, v) = graph.as_petgraph().edge_endpoints(eid)?;
            (u != v).then_some(*label)
        });
    let triangulated = triangulate(&simple)?;
    debug!(
        added = triangulated.edge_count() / 2 - simple.edge_count(),
        "triangulated"
    );
    let drawing = draw(&triangulated)?;

    let points: Vec<(f64, f64)> = drawing
        .coordinates
        .iter()
        .map(|&(x, y)| (x as f64, y as f64))
        .collect();
    let (min_x, max_x, min_y, max_y) = bounds(&points);
    let extent = (max_x - min_x).max(max_y - min_y);
    if extent <= 0.0 {
        return Ok(points.iter().map(|_| (0.0, 0.0)).collect());
    }
    Ok(points
        .iter()
        .map(|&(x, y)| ((x - min_x) / extent, (y - min_y) / extent))
        .collect())
}

/// Moves the centroid to the origin and scales the largest coordinate to 1.
fn centered(mut positions: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    if positions.is_empty() {
        return positions;
    }
    let n = positions.len() as f64;
    let cx = positions.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = positions.iter().map(|p| p.1).sum::<f64>() / n;
    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        limit = limit.max(p.0.abs()).max(p.1.abs());
    }
    if limit > 0.0 {
        for p in positions.iter_mut() {
            p.0 /= limit;
            p.1 /= limit;
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::is_planar;
    use crate::testing::graph_enumerator::GraphEnumeratorState;
    use crate::testing::named_graphs::{complete_bipartite_graph, complete_graph};

    fn assert_in_box(positions: &[NodePosition], low: f64, high: f64) {
        for p in positions {
            assert!(p.x >= low - 1e-9 && p.x <= high + 1e-9, "{p:?}");
            assert!(p.y >= low - 1e-9 && p.y <= high + 1e-9, "{p:?}");
        }
    }

    #[test]
    fn test_every_node_gets_a_position() {
        let config = LayoutConfig::default();
        for n in 1..=5 {
            for graph in GraphEnumeratorState::new(n) {
                let planar = is_planar(graph.as_petgraph());
                let positions = layout(&graph, planar, &config);
                let ids: Vec<&str> = positions.iter().map(|p| p.id.as_str()).collect();
                assert_eq!(ids, graph.nodes().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_planar_drawing_is_in_scaled_unit_square() {
        let config = LayoutConfig::default();
        let graph = complete_graph(4);
        assert_eq!(planar_layout(&graph).unwrap().len(), 4);
        let positions = layout(&graph, true, &config);
        assert_in_box(&positions, 0.0, config.scale);
    }

    #[test]
    fn test_planar_drawing_ignores_self_loops() {
        let mut graph = complete_graph(3);
        graph.add_edge("0", "0");
        assert_eq!(planar_layout(&graph).unwrap().len(), 3);
    }

    #[test]
    fn test_small_planar_graphs_fall_back() {
        let mut graph = Graph::new();
        graph.add_edge("a", "b");
        assert!(planar_layout(&graph).is_err());
        let positions = layout(&graph, true, &LayoutConfig::default());
        assert_eq!(positions.len(), 2);
        assert_in_box(&positions, -500.0, 500.0);
    }

    #[test]
    fn test_non_planar_graphs_use_spring_layout() {
        let config = LayoutConfig {
            scale: 10.0,
            ..LayoutConfig::default()
        };
        let graph = complete_bipartite_graph(3, 3);
        let positions = layout(&graph, false, &config);
        assert_eq!(positions.len(), 6);
        assert_in_box(&positions, -10.0, 10.0);
        assert_eq!(positions, layout(&graph, false, &config));
    }

    #[test]
    fn test_centered() {
        let positions = centered(vec![(0.0, 0.0), (2.0, 0.0), (1.0, 4.0)]);
        assert!(positions.iter().any(|p| p.1 == 1.0));
        let sum: f64 = positions.iter().map(|p| p.0 + p.1).sum();
        assert!(sum.abs() < 1e-9);
    }
}

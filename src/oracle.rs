//! Planarity oracle used by the checking pipeline.
//!
//! The pipeline only talks to the [`PlanarityOracle`] trait, so a different planarity test
//! can be plugged into a [`CheckContext`](crate::service::CheckContext).

use crate::embedding::{Planarity, test_planarity};
use crate::error::Result;
use crate::types::{DiGraph, Graph};

/// Evidence returned together with a planarity answer.
#[derive(Debug, Clone)]
pub enum Certificate {
    /// Combinatorial embedding of a planar graph.
    Embedding(DiGraph),
    /// Kuratowski subgraph of a non-planar graph, if the oracle could produce one.
    Counterexample(Option<Graph>),
}

pub trait PlanarityOracle {
    fn is_planar(&self, graph: &Graph) -> Result<bool>;

    fn check_with_certificate(&self, graph: &Graph) -> Result<(bool, Certificate)>;
}

/// The LR planarity test of [`crate::embedding`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftRight;

impl PlanarityOracle for LeftRight {
    fn is_planar(&self, graph: &Graph) -> Result<bool> {
        Ok(test_planarity(graph.as_petgraph(), false).is_planar())
    }

    fn check_with_certificate(&self, graph: &Graph) -> Result<(bool, Certificate)> {
        match test_planarity(graph.as_petgraph(), true) {
            Planarity::Planar(embedding) => Ok((true, Certificate::Embedding(embedding))),
            Planarity::NonPlanar(edges) => {
                let mut subgraph = Graph::new();
                for (u, v) in edges {
                    if let (Some(u), Some(v)) = (graph.node_id(u), graph.node_id(v)) {
                        subgraph.add_edge(u, v);
                    }
                }
                let subgraph = (subgraph.edge_count() > 0).then_some(subgraph);
                Ok((false, Certificate::Counterexample(subgraph)))
            }
        }
    }
}

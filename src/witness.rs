//! Extraction and classification of non-planarity witnesses.

use hashbrown::HashSet;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::oracle::PlanarityOracle;
use crate::types::Graph;

/// Order in which [`reduce`] tries to delete edges.
///
/// The order is part of the result: different orders may produce different,
/// equally valid, witnesses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeOrder {
    /// Order of [`Graph::edges`] on the input graph.
    #[default]
    Insertion,
    /// [`EdgeOrder::Insertion`] reversed.
    Reverse,
}

/// Trims a non-planar graph down to a subgraph in which no single edge can be removed
/// without making it planar.
///
/// Returns `(true, None)` for planar input. Otherwise every edge of the input is tried
/// exactly once, in the order fixed by `order` before the first deletion: the edge is
/// removed and stays removed if the rest is still non-planar.
///
/// Needs one oracle call per edge. The result is locally minimal only, it is not
/// guaranteed to be the smallest witness.
pub fn reduce(
    graph: &Graph,
    oracle: &dyn PlanarityOracle,
    order: EdgeOrder,
) -> Result<(bool, Option<Graph>)> {
    if oracle.is_planar(graph)? {
        return Ok((true, None));
    }

    let mut working = graph.clone();
    let mut candidates: Vec<(String, String)> = working
        .edges()
        .map(|(u, v)| (u.to_string(), v.to_string()))
        .collect();
    if order == EdgeOrder::Reverse {
        candidates.reverse();
    }

    for (u, v) in &candidates {
        working.remove_edge(u, v);
        if oracle.is_planar(&working)? {
            // load-bearing edge
            working.add_edge(u, v);
        }
    }

    debug!(
        edges_before = graph.edge_count(),
        edges_after = working.edge_count(),
        "reduced non-planar graph"
    );

    Ok((false, Some(working)))
}

/// Kind of obstruction a witness looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WitnessKind {
    #[serde(rename = "None")]
    None,
    #[serde(rename = "K5")]
    K5,
    #[serde(rename = "K3,3")]
    K33,
    #[serde(rename = "Complex Non-Planar")]
    Complex,
}

impl std::fmt::Display for WitnessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WitnessKind::None => write!(f, "None"),
            WitnessKind::K5 => write!(f, "K5"),
            WitnessKind::K33 => write!(f, "K3,3"),
            WitnessKind::Complex => write!(f, "Complex Non-Planar"),
        }
    }
}

/// Classifies a witness by the number of its principal nodes (degree above 2).
///
/// Five principal nodes mean K5, six mean K3,3. This is a degree signature only, no
/// isomorphism check is made, so an unrelated witness with 5 or 6 principal nodes is
/// labelled the same way.
pub fn classify(witness: Option<&Graph>) -> WitnessKind {
    let Some(witness) = witness else {
        return WitnessKind::None;
    };
    let principal = witness.nodes().filter(|v| witness.degree(v) > 2).count();
    match principal {
        5 => WitnessKind::K5,
        6 => WitnessKind::K33,
        _ => WitnessKind::Complex,
    }
}

/// Unordered edges of a witness, used to flag edges of the checked graph.
#[derive(Debug, Clone, Default)]
pub struct ConflictEdges {
    edges: HashSet<(String, String)>,
}

impl ConflictEdges {
    pub fn from_witness(witness: &Graph) -> Self {
        let edges = witness
            .edges()
            .map(|(u, v)| Self::key(u, v))
            .collect();
        ConflictEdges { edges }
    }

    pub fn contains(&self, u: &str, v: &str) -> bool {
        self.edges.contains(&Self::key(u, v))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn key(u: &str, v: &str) -> (String, String) {
        if u <= v {
            (u.to_string(), v.to_string())
        } else {
            (v.to_string(), u.to_string())
        }
    }
}

//! JSON payloads returned by [`check_planarity`](crate::service::check_planarity).

use serde::Serialize;

use crate::layout::NodePosition;
use crate::types::Graph;
use crate::witness::{ConflictEdges, WitnessKind};

pub const PLANAR_MESSAGE: &str = "Graph is planar!";
pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid file format: upload a valid edge list, adjacency matrix or supported graph file.";
pub const NO_FILE_MESSAGE: &str = "No file uploaded.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Planar,
    NonPlanar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeEntry {
    pub source: String,
    pub target: String,
    pub is_conflict: bool,
}

/// Result of a successful check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckedGraph {
    pub status: Status,
    #[serde(rename = "type")]
    pub kind: WitnessKind,
    pub nodes: Vec<NodePosition>,
    pub edges: Vec<EdgeEntry>,
    pub message: String,
    /// Wall-clock time of the planarity test and witness reduction only.
    pub execution_time_ms: f64,
}

/// The upload could not be turned into a graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidInput {
    pub status: &'static str,
    pub message: String,
    pub error_code: u16,
}

impl InvalidInput {
    pub fn new(message: impl Into<String>) -> Self {
        InvalidInput {
            status: "InvalidInput",
            message: message.into(),
            error_code: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckOutcome {
    Checked(CheckedGraph),
    InvalidInput(InvalidInput),
    Failure(Failure),
}

impl CheckOutcome {
    pub fn failure(error: impl ToString) -> Self {
        CheckOutcome::Failure(Failure {
            error: error.to_string(),
        })
    }
}

/// Builds the payload for a checked graph.
///
/// `witness` is ignored for planar graphs. An edge is flagged as a conflict iff its unordered
/// endpoint pair is an edge of the witness.
pub fn assemble(
    graph: &Graph,
    planar: bool,
    witness: Option<&Graph>,
    nodes: Vec<NodePosition>,
    execution_time_ms: f64,
) -> CheckedGraph {
    let (status, kind, conflicts) = if planar {
        (Status::Planar, WitnessKind::None, ConflictEdges::default())
    } else {
        let conflicts = witness.map(ConflictEdges::from_witness).unwrap_or_default();
        (Status::NonPlanar, crate::witness::classify(witness), conflicts)
    };

    let edges = graph
        .edges()
        .map(|(u, v)| EdgeEntry {
            source: u.to_string(),
            target: v.to_string(),
            is_conflict: conflicts.contains(u, v),
        })
        .collect();

    let message = match status {
        Status::Planar => PLANAR_MESSAGE.to_string(),
        Status::NonPlanar => format!("Graph is not planar. Contains a {kind} subgraph."),
    };

    CheckedGraph {
        status,
        kind,
        nodes,
        edges,
        message,
        execution_time_ms,
    }
}

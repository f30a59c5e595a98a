//! The checking pipeline: upload in, HTTP-shaped reply out.

use std::str::FromStr;
use std::time::Instant;

use tracing::{error, info};

use crate::decoding::{Upload, decode_upload};
use crate::error::{Error, Result};
use crate::layout::{LayoutConfig, layout};
use crate::oracle::{Certificate, LeftRight, PlanarityOracle};
use crate::response::{
    CheckOutcome, CheckedGraph, INVALID_FORMAT_MESSAGE, InvalidInput, NO_FILE_MESSAGE, assemble,
};
use crate::types::Graph;
use crate::witness::{EdgeOrder, reduce};

/// How a non-planarity witness is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Counterexample returned by the oracle together with its answer.
    #[default]
    LeftRight,
    /// Greedy trial deletion, see [`reduce`].
    KuratowskiSearch,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::LeftRight => "Left-Right",
            Algorithm::KuratowskiSearch => "kuratowski_search",
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Left-Right" => Ok(Algorithm::LeftRight),
            "kuratowski_search" => Ok(Algorithm::KuratowskiSearch),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Everything one check needs besides its input.
pub struct CheckContext {
    pub oracle: Box<dyn PlanarityOracle>,
    pub layout: LayoutConfig,
    pub edge_order: EdgeOrder,
}

impl Default for CheckContext {
    fn default() -> Self {
        CheckContext {
            oracle: Box::new(LeftRight),
            layout: LayoutConfig::default(),
            edge_order: EdgeOrder::default(),
        }
    }
}

/// Form fields of a check request.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub file: Option<Upload>,
    /// Algorithm name, [`Algorithm::LeftRight`] when absent.
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status_code: u16,
    pub body: CheckOutcome,
}

impl HttpReply {
    fn ok(body: CheckOutcome) -> Self {
        HttpReply {
            status_code: 200,
            body,
        }
    }
}

/// Runs a full check.
///
/// Unusable uploads give an `InvalidInput` body with status 200, an unknown algorithm
/// gives 400 and an oracle failure gives 500.
pub fn check_planarity(ctx: &CheckContext, request: &CheckRequest) -> HttpReply {
    let Some(upload) = &request.file else {
        return HttpReply::ok(CheckOutcome::InvalidInput(InvalidInput::new(NO_FILE_MESSAGE)));
    };

    let algorithm = match request.algorithm.as_deref().map(Algorithm::from_str) {
        None => Algorithm::default(),
        Some(Ok(algorithm)) => algorithm,
        Some(Err(err)) => {
            return HttpReply {
                status_code: 400,
                body: CheckOutcome::failure(err),
            };
        }
    };

    let Some(graph) = decode_upload(upload) else {
        return HttpReply::ok(CheckOutcome::InvalidInput(InvalidInput::new(
            INVALID_FORMAT_MESSAGE,
        )));
    };

    match check_graph(ctx, &graph, algorithm) {
        Ok(checked) => HttpReply::ok(CheckOutcome::Checked(checked)),
        Err(err) => {
            error!(%err, "planarity check failed");
            HttpReply {
                status_code: 500,
                body: CheckOutcome::failure(err),
            }
        }
    }
}

/// Tests `graph`, extracts a witness if it is not planar and lays it out.
pub fn check_graph(ctx: &CheckContext, graph: &Graph, algorithm: Algorithm) -> Result<CheckedGraph> {
    info!(
        algorithm = algorithm.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "checking planarity"
    );

    let start = Instant::now();
    let (planar, witness) = match algorithm {
        Algorithm::LeftRight => match ctx.oracle.check_with_certificate(graph)? {
            (planar, Certificate::Counterexample(witness)) => (planar, witness),
            (planar, Certificate::Embedding(_)) => (planar, None),
        },
        Algorithm::KuratowskiSearch => reduce(graph, ctx.oracle.as_ref(), ctx.edge_order)?,
    };
    let execution_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    info!(
        planar,
        witness_edges = witness.as_ref().map(Graph::edge_count),
        execution_time_ms,
        "planarity decided"
    );

    let nodes = layout(graph, planar, &ctx.layout);
    Ok(assemble(graph, planar, witness.as_ref(), nodes, execution_time_ms))
}

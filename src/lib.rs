// #![warn(missing_docs)]

//! # planarity_witness
//!
//! Decides whether an uploaded graph is planar and, when it is not, points at a
//! Kuratowski subgraph (a subdivision of K5 or K3,3) that proves it.
//!
//! Uploads may be plain edge lists, adjacency matrices, node-link JSON, GraphML, GEXF,
//! GML, DOT, Matrix Market or Pajek files. Every format is normalised into a simple
//! undirected [`Graph`] with string node ids.
//!
//! Based on [`petgraph`](https://docs.rs/petgraph).
//!
//! ```
//! use planarity_witness::{CheckContext, CheckOutcome, CheckRequest, Upload, check_planarity};
//!
//! let request = CheckRequest {
//!     file: Some(Upload::new("0 1\n1 2\n2 0\n", "triangle.txt")),
//!     algorithm: None,
//! };
//! let reply = check_planarity(&CheckContext::default(), &request);
//! assert_eq!(reply.status_code, 200);
//! let CheckOutcome::Checked(checked) = reply.body else { panic!() };
//! assert_eq!(checked.message, "Graph is planar!");
//! ```

pub mod decoding;
pub mod decoding_blocks;
mod drawing_blocks;
pub mod embedding;
mod embedding_blocks;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod oracle;
pub mod output;
pub mod response;
pub mod service;
pub mod types;
pub mod witness;

#[cfg(test)]
pub(crate) mod testing;

pub use decoding::{Upload, decode_upload};
pub use error::{Error, Result};
pub use oracle::{Certificate, LeftRight, PlanarityOracle};
pub use response::CheckOutcome;
pub use service::{Algorithm, CheckContext, CheckRequest, HttpReply, check_planarity};
pub use types::{DiGraph, EdgeLabel, Graph, UnGraph};
pub use witness::{EdgeOrder, WitnessKind, classify, reduce};

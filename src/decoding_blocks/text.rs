use tracing::{debug, info};

use crate::decoding_blocks::DecodedGraph;

/// Which plain-text dialect a text upload was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDialect {
    AdjacencyMatrix,
    EdgeList,
}

/// Outcome of reading a text as an adjacency matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixOutcome {
    Success(DecodedGraph),
    /// Some row has a different number of cells than the first one.
    Malformed,
}

/// Reads a plain-text graph: either an adjacency matrix or an edge list.
///
/// Adjacency matrix (only if there are as many non-blank lines as cells in the first line,
/// at least two of them, and no letters in the first line):
/// ```text
/// 0 1 1
/// 1 0 1
/// 1 1 0
/// ```
/// every cell other than the literal `0` at row `r`, column `c` is an edge `r - c`.
/// The diagonal is not special, a non-zero diagonal cell gives a self-loop.
///
/// Edge list, one edge per line, further tokens (weights) are ignored and lines with
/// less than two tokens are skipped:
/// ```text
/// a b
/// b c 2.5
/// ```
///
/// If a matrix candidate has a malformed row, the whole text is read as an edge list.
///
/// Returns `None` for blank input and for an edge list without any edge.
pub fn parse_text(text: &str) -> Option<(DecodedGraph, TextDialect)> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return None;
    }

    if is_matrix_candidate(&lines) {
        match parse_matrix(&lines) {
            MatrixOutcome::Success(graph) => {
                info!(rows = lines.len(), "detected format: adjacency matrix");
                return Some((graph, TextDialect::AdjacencyMatrix));
            }
            MatrixOutcome::Malformed => {
                debug!("matrix parsing failed, falling back to edge list");
            }
        }
    }

    info!("detected format: edge list");
    let graph = parse_edge_list(&lines);
    if graph.edges.is_empty() {
        return None;
    }
    Some((graph, TextDialect::EdgeList))
}

fn is_matrix_candidate(lines: &[&str]) -> bool {
    let header: Vec<&str> = lines[0].split_whitespace().collect();
    let cols = header.len();
    lines.len() == cols
        && cols > 1
        && header
            .iter()
            .all(|token| !token.chars().any(char::is_alphabetic))
}

/// Reads the lines as a square adjacency matrix. The first row fixes the width.
pub fn parse_matrix(lines: &[&str]) -> MatrixOutcome {
    let cols = lines.first().map_or(0, |line| line.split_whitespace().count());
    let mut graph = DecodedGraph::new(false);

    for (r, line) in lines.iter().enumerate() {
        let values: Vec<&str> = line.split_whitespace().collect();
        if values.len() != cols {
            return MatrixOutcome::Malformed;
        }
        for (c, value) in values.iter().enumerate() {
            if *value != "0" {
                graph.add_edge(r.to_string(), c.to_string());
            }
        }
    }

    MatrixOutcome::Success(graph)
}

/// Reads the lines as `source target [ignored...]` pairs.
pub fn parse_edge_list(lines: &[&str]) -> DecodedGraph {
    let mut graph = DecodedGraph::new(false);
    for line in lines {
        let mut parts = line.split_whitespace();
        if let (Some(u), Some(v)) = (parts.next(), parts.next()) {
            graph.add_edge(u, v);
        }
    }
    graph
}

//! Turning an uploaded file into a [`Graph`].
//!
//! The format is picked by [`sniff`]: the content is looked at first, the file extension only
//! when the content has no recognisable signature, and the plain-text dialect otherwise.

use tracing::{info, warn};

use crate::decoding_blocks::{
    DecodedGraph, dot::parse_dot, gml::parse_gml, matrix_market::parse_matrix_market,
    node_link::parse_node_link, pajek::parse_pajek, text::parse_text, xml::parse_gexf,
    xml::parse_graphml,
};
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::types::Graph;

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl Upload {
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Upload {
            bytes: bytes.into(),
            filename: filename.into(),
        }
    }
}

/// How an upload is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodingStrategy {
    NodeLinkJson,
    GraphMl,
    Gexf,
    Gml,
    Dot,
    MatrixMarket,
    Pajek,
    /// Adjacency matrix or edge list, decided while parsing.
    Text,
}

impl DecodingStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            DecodingStrategy::NodeLinkJson => "node-link JSON",
            DecodingStrategy::GraphMl => "GraphML",
            DecodingStrategy::Gexf => "GEXF",
            DecodingStrategy::Gml => "GML",
            DecodingStrategy::Dot => "DOT",
            DecodingStrategy::MatrixMarket => "Matrix Market",
            DecodingStrategy::Pajek => "Pajek",
            DecodingStrategy::Text => "text",
        }
    }
}

fn as_text(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    Some(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Chooses how to decode an upload.
///
/// Content signatures win over the extension: `{`/`[` means JSON, `<` means XML (GEXF if
/// the text mentions `gexf` and not `graphml`, GraphML otherwise). Then the extension
/// decides, and anything else is plain text.
pub fn sniff(bytes: &[u8], filename: &str) -> DecodingStrategy {
    if let Some(text) = as_text(bytes) {
        let trimmed = text.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return DecodingStrategy::NodeLinkJson;
        }
        if trimmed.starts_with('<') {
            let lower = trimmed.to_lowercase();
            if lower.contains("graphml") {
                return DecodingStrategy::GraphMl;
            }
            if lower.contains("gexf") {
                return DecodingStrategy::Gexf;
            }
            return DecodingStrategy::GraphMl;
        }
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("json") => DecodingStrategy::NodeLinkJson,
        Some("gml") => DecodingStrategy::Gml,
        Some("dot" | "gv") => DecodingStrategy::Dot,
        Some("mtx") => DecodingStrategy::MatrixMarket,
        Some("net") => DecodingStrategy::Pajek,
        _ => DecodingStrategy::Text,
    }
}

fn decode_with(strategy: DecodingStrategy, bytes: &[u8]) -> Result<Option<DecodedGraph>> {
    let text = as_text(bytes).ok_or_else(|| Error::decode(strategy.name(), "input is not UTF-8"))?;
    let graph = match strategy {
        DecodingStrategy::NodeLinkJson => parse_node_link(text)?,
        DecodingStrategy::GraphMl => parse_graphml(text)?,
        DecodingStrategy::Gexf => parse_gexf(text)?,
        DecodingStrategy::Gml => parse_gml(text)?,
        DecodingStrategy::Dot => parse_dot(text)?,
        DecodingStrategy::MatrixMarket => parse_matrix_market(text)?,
        DecodingStrategy::Pajek => parse_pajek(text)?,
        DecodingStrategy::Text => match parse_text(text) {
            Some((graph, dialect)) => {
                info!(?dialect, "decoded plain text");
                graph
            }
            None => return Ok(None),
        },
    };
    Ok(Some(graph))
}

/// Decodes an upload into a simple undirected graph.
///
/// Never fails: decoder errors, undecodable bytes and graphs without nodes all give `None`.
pub fn decode_upload(upload: &Upload) -> Option<Graph> {
    let strategy = sniff(&upload.bytes, &upload.filename);
    info!(filename = %upload.filename, format = strategy.name(), "decoding upload");

    let decoded = match decode_with(strategy, &upload.bytes) {
        Ok(Some(decoded)) => decoded,
        Ok(None) => return None,
        Err(error) => {
            warn!(%error, "could not decode upload");
            return None;
        }
    };

    let graph = normalize(decoded);
    if graph.node_count() == 0 {
        return None;
    }
    Some(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(content: &str, filename: &str) -> Option<Graph> {
        decode_upload(&Upload::new(content, filename))
    }

    fn sorted_edges(graph: &Graph) -> Vec<(String, String)> {
        let mut edges: Vec<_> = graph
            .edges()
            .map(|(u, v)| {
                let (u, v) = if u <= v { (u, v) } else { (v, u) };
                (u.to_string(), v.to_string())
            })
            .collect();
        edges.sort();
        edges
    }

    #[test]
    fn test_content_beats_extension() {
        assert_eq!(
            sniff(br#"{"nodes":[],"links":[]}"#, "graph.gml"),
            DecodingStrategy::NodeLinkJson
        );
        assert_eq!(sniff(b"  [1, 2]", "a.net"), DecodingStrategy::NodeLinkJson);
        assert_eq!(sniff(b"<graphml/>", "a.gexf.dot"), DecodingStrategy::GraphMl);
        assert_eq!(sniff(b"<GEXF version='1.3'/>", "a.txt"), DecodingStrategy::Gexf);
        assert_eq!(sniff(b"<?xml version='1.0'?><root/>", "a.json"), DecodingStrategy::GraphMl);
    }

    #[test]
    fn test_extension() {
        assert_eq!(sniff(b"graph [ ]", "g.GML"), DecodingStrategy::Gml);
        assert_eq!(sniff(b"graph { }", "g.dot"), DecodingStrategy::Dot);
        assert_eq!(sniff(b"graph { }", "g.gv"), DecodingStrategy::Dot);
        assert_eq!(sniff(b"%%MatrixMarket", "g.mtx"), DecodingStrategy::MatrixMarket);
        assert_eq!(sniff(b"*Vertices 1", "g.net"), DecodingStrategy::Pajek);
        assert_eq!(sniff(b"1 2", "g.json"), DecodingStrategy::NodeLinkJson);
        assert_eq!(sniff(b"1 2", "g.txt"), DecodingStrategy::Text);
        assert_eq!(sniff(b"1 2", "edges"), DecodingStrategy::Text);
        assert_eq!(sniff(&[0xff, 0xfe, b'{'], "g.gml"), DecodingStrategy::Gml);
    }

    #[test]
    fn test_json_named_gml_decodes_as_json() {
        assert!(decode(r#"{"nodes":[],"links":[]}"#, "graph.gml").is_none());
        let graph = decode(
            r#"{"nodes":[{"id":"a"},{"id":"b"}],"links":[{"source":"a","target":"b"}]}"#,
            "graph.gml",
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_decoder_failure_is_no_graph() {
        assert!(decode("graph [ node [ id 1 ]", "broken.gml").is_none());
        assert!(decode("{ not json", "x.txt").is_none());
        assert!(decode("<graphml><graph>", "x.graphml").is_none());
        assert!(decode_upload(&Upload::new(vec![0xff, 0x00, 0x31], "bin.txt")).is_none());
    }

    #[test]
    fn test_blank_text_is_no_graph() {
        assert!(decode("", "empty.txt").is_none());
        assert!(decode("\n \n", "blank.txt").is_none());
        assert!(decode("0 0\n0 0\n", "zeros.txt").is_none());
    }

    #[test]
    fn test_directed_inputs_become_undirected() {
        let graph = decode("digraph { a -> b; b -> a; b -> c }", "g.dot").unwrap();
        assert_eq!(
            sorted_edges(&graph),
            vec![
                ("a".to_string(), "b".to_string()),
                ("b".to_string(), "c".to_string())
            ]
        );
    }

    #[test]
    fn test_every_format_decodes() {
        let inputs = [
            ("0 1\n1 2\n2 0\n", "t.txt"),
            ("0 1 1\n1 0 1\n1 1 0\n", "m.txt"),
            (
                r#"{"nodes":[{"id":0},{"id":1},{"id":2}],"links":[{"source":0,"target":1},{"source":1,"target":2},{"source":2,"target":0}]}"#,
                "g.json",
            ),
            (
                r#"<graphml><graph edgedefault="undirected"><edge source="0" target="1"/><edge source="1" target="2"/><edge source="2" target="0"/></graph></graphml>"#,
                "g.graphml",
            ),
            (
                r#"<gexf><graph><nodes/><edges><edge source="0" target="1"/><edge source="1" target="2"/><edge source="2" target="0"/></edges></graph></gexf>"#,
                "g.gexf",
            ),
            (
                "graph [ node [ id 0 ] node [ id 1 ] node [ id 2 ] edge [ source 0 target 1 ] edge [ source 1 target 2 ] edge [ source 2 target 0 ] ]",
                "g.gml",
            ),
            ("graph { 0 -- 1 -- 2 -- 0 }", "g.dot"),
            (
                "%%MatrixMarket matrix coordinate pattern symmetric\n3 3 3\n2 1\n3 2\n3 1\n",
                "g.mtx",
            ),
            ("*Vertices 3\n*Edges\n0 1\n1 2\n2 0\n", "g.net"),
        ];
        let expected = vec![
            ("0".to_string(), "1".to_string()),
            ("0".to_string(), "2".to_string()),
            ("1".to_string(), "2".to_string()),
        ];
        for (content, filename) in inputs {
            let graph = decode(content, filename).unwrap_or_else(|| panic!("{filename} failed"));
            assert_eq!(sorted_edges(&graph), expected, "{filename}");
            assert_eq!(graph.node_count(), 3, "{filename}");
        }
    }

    #[test]
    fn test_decoding_is_idempotent() {
        let content = "a b\nb c\nc d 4\n";
        let first = decode(content, "g.txt").unwrap();
        let second = decode(content, "g.txt").unwrap();
        assert_eq!(
            first.nodes().collect::<Vec<_>>(),
            second.nodes().collect::<Vec<_>>()
        );
        assert_eq!(sorted_edges(&first), sorted_edges(&second));
    }
}

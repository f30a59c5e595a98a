use serde::Deserialize;
use serde_json::Value;

use crate::decoding_blocks::{DecodedGraph, NodeKey};
use crate::error::{Error, Result};

const FORMAT: &str = "node-link JSON";

#[derive(Debug, Deserialize)]
struct NodeLinkDocument {
    #[serde(default)]
    directed: bool,
    nodes: Vec<NodeEntry>,
    #[serde(alias = "edges")]
    links: Vec<LinkEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NodeEntry {
    Object { id: Value },
    Bare(Value),
}

#[derive(Debug, Deserialize)]
struct LinkEntry {
    source: Value,
    target: Value,
}

/// Reads a node-link JSON document:
/// ```json
/// {"directed": false, "nodes": [{"id": 1}, {"id": "b"}], "links": [{"source": 1, "target": "b"}]}
/// ```
/// `edges` is accepted in place of `links`. Node ids may be strings, numbers or booleans.
pub fn parse_node_link(text: &str) -> Result<DecodedGraph> {
    let document: NodeLinkDocument = serde_json::from_str(text)?;
    let mut graph = DecodedGraph::new(document.directed);

    for node in document.nodes {
        let id = match node {
            NodeEntry::Object { id } => id,
            NodeEntry::Bare(id) => id,
        };
        graph.add_node(node_key(id)?);
    }
    for link in document.links {
        graph.add_edge(node_key(link.source)?, node_key(link.target)?);
    }

    Ok(graph)
}

fn node_key(value: Value) -> Result<NodeKey> {
    match value {
        Value::String(s) => Ok(NodeKey::Text(s)),
        Value::Bool(b) => Ok(NodeKey::Bool(b)),
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Ok(NodeKey::Integer(i))
            } else if let Some(x) = number.as_f64().filter(|_| !number.is_u64()) {
                Ok(NodeKey::Float(x))
            } else {
                Ok(NodeKey::Text(number.to_string()))
            }
        }
        other => Err(Error::decode(
            FORMAT,
            format!("node identifier must be a scalar, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_link() {
        let graph = parse_node_link(
            r#"{"directed": true, "multigraph": false, "graph": {},
                "nodes": [{"id": 1}, {"id": "b", "color": "red"}, {"id": 2.5}],
                "links": [{"source": 1, "target": "b", "weight": 3}]}"#,
        )
        .unwrap();
        assert!(graph.directed);
        assert_eq!(
            graph.nodes,
            vec![
                NodeKey::Integer(1),
                NodeKey::Text("b".into()),
                NodeKey::Float(2.5)
            ]
        );
        assert_eq!(
            graph.edges,
            vec![(NodeKey::Integer(1), NodeKey::Text("b".into()))]
        );
    }

    #[test]
    fn test_edges_alias_and_bare_nodes() {
        let graph =
            parse_node_link(r#"{"nodes": [true, "x"], "edges": [{"source": true, "target": "x"}]}"#)
                .unwrap();
        assert!(!graph.directed);
        assert_eq!(graph.nodes[0], NodeKey::Bool(true));
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let graph = parse_node_link(r#"{"nodes":[],"links":[]}"#).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_rejects_other_documents() {
        assert!(parse_node_link("[[1, 2]]").is_err());
        assert!(parse_node_link(r#"{"nodes": [{"id": [1]}], "links": []}"#).is_err());
        assert!(parse_node_link(r#"{"nodes": [], "links": [{"source": 1}]}"#).is_err());
        assert!(parse_node_link("{").is_err());
    }
}

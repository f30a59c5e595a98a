//! GraphML and GEXF, the two XML encodings. Element names are matched without namespaces.

use roxmltree::{Document, Node};

use crate::decoding_blocks::DecodedGraph;
use crate::error::{Error, Result};

fn find_graph<'a, 'input>(
    document: &'a Document<'input>,
    format: &'static str,
) -> Result<Node<'a, 'input>> {
    document
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "graph")
        .ok_or_else(|| Error::decode(format, "no <graph> element"))
}

fn required<'a>(node: Node<'a, '_>, attribute: &str, format: &'static str) -> Result<&'a str> {
    node.attribute(attribute).ok_or_else(|| {
        Error::decode(
            format,
            format!("<{}> without '{attribute}'", node.tag_name().name()),
        )
    })
}

/// Reads a GraphML document: `<node id>` and `<edge source target>` elements of the first graph.
pub fn parse_graphml(text: &str) -> Result<DecodedGraph> {
    const FORMAT: &str = "GraphML";

    let document = Document::parse(text).map_err(|e| Error::decode(FORMAT, e.to_string()))?;
    let graph_node = find_graph(&document, FORMAT)?;

    let mut directed = graph_node.attribute("edgedefault") == Some("directed");
    let mut graph = DecodedGraph::default();

    for node in graph_node.descendants().filter(Node::is_element) {
        match node.tag_name().name() {
            "node" => graph.add_node(required(node, "id", FORMAT)?),
            "edge" => {
                let source = required(node, "source", FORMAT)?;
                let target = required(node, "target", FORMAT)?;
                if node.attribute("directed") == Some("true") {
                    directed = true;
                }
                graph.add_edge(source, target);
            }
            _ => {}
        }
    }

    graph.directed = directed;
    Ok(graph)
}

/// Reads a GEXF document: `<nodes><node id>` and `<edges><edge source target>`.
pub fn parse_gexf(text: &str) -> Result<DecodedGraph> {
    const FORMAT: &str = "GEXF";

    let document = Document::parse(text).map_err(|e| Error::decode(FORMAT, e.to_string()))?;
    let graph_node = find_graph(&document, FORMAT)?;

    let mut directed = graph_node.attribute("defaultedgetype") == Some("directed");
    let mut graph = DecodedGraph::default();

    for node in graph_node.descendants().filter(Node::is_element) {
        let parent_tag = node.parent_element().map(|p| p.tag_name().name());
        match (node.tag_name().name(), parent_tag) {
            ("node", Some("nodes")) => graph.add_node(required(node, "id", FORMAT)?),
            ("edge", Some("edges")) => {
                let source = required(node, "source", FORMAT)?;
                let target = required(node, "target", FORMAT)?;
                if node.attribute("type") == Some("directed") {
                    directed = true;
                }
                graph.add_edge(source, target);
            }
            _ => {}
        }
    }

    graph.directed = directed;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding_blocks::NodeKey;

    #[test]
    fn test_graphml() {
        let graph = parse_graphml(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<graphml xmlns="http://graphml.graphdrawing.org/xmlns">
  <key id="d0" for="node" attr.name="color" attr.type="string"/>
  <graph id="G" edgedefault="undirected">
    <node id="n0"><data key="d0">green</data></node>
    <node id="n1"/>
    <node id="n2"/>
    <edge source="n0" target="n2"/>
    <edge source="n1" target="n2"/>
  </graph>
</graphml>"#,
        )
        .unwrap();
        assert!(!graph.directed);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(
            graph.edges[1],
            (NodeKey::Text("n1".into()), NodeKey::Text("n2".into()))
        );
    }

    #[test]
    fn test_graphml_directed() {
        let graph = parse_graphml(
            r#"<graphml><graph edgedefault="directed"><edge source="a" target="b"/></graph></graphml>"#,
        )
        .unwrap();
        assert!(graph.directed);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_graphml_errors() {
        assert!(parse_graphml("<graphml><graph>").is_err());
        assert!(parse_graphml("<graphml/>").is_err());
        assert!(parse_graphml(r#"<graphml><graph><edge source="a"/></graph></graphml>"#).is_err());
    }

    #[test]
    fn test_gexf() {
        let graph = parse_gexf(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gexf xmlns="http://gexf.net/1.3" version="1.3">
  <graph mode="static" defaultedgetype="directed">
    <nodes>
      <node id="0" label="Hello"/>
      <node id="1" label="World"/>
    </nodes>
    <edges>
      <edge id="0" source="0" target="1"/>
    </edges>
  </graph>
</gexf>"#,
        )
        .unwrap();
        assert!(graph.directed);
        assert_eq!(
            graph.nodes,
            vec![NodeKey::Text("0".into()), NodeKey::Text("1".into())]
        );
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_gexf_undirected_by_default() {
        let graph = parse_gexf(
            r#"<gexf><graph><nodes><node id="a"/></nodes><edges><edge source="a" target="a"/></edges></graph></gexf>"#,
        )
        .unwrap();
        assert!(!graph.directed);
        assert_eq!(graph.edges.len(), 1);
    }
}

use dot::{Edges, GraphWalk, Labeller, Nodes, Style};
use hashbrown::HashMap;

use crate::error::Result;
use crate::response::CheckedGraph;

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    source: Node,
    target: Node,
    is_conflict: bool,
}

struct DotGraph<'a> {
    labels: Vec<&'a str>,
    edges: Vec<Edge>,
}

impl<'a> Labeller<'a, Node, Edge> for DotGraph<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("G").unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        dot::LabelText::label(self.labels[*n].to_string())
    }

    fn edge_style(&self, e: &Edge) -> Style {
        if e.is_conflict { Style::Bold } else { Style::None }
    }

    fn edge_color(&self, e: &Edge) -> Option<dot::LabelText<'a>> {
        e.is_conflict.then(|| dot::LabelText::label("red"))
    }

    fn kind(&self) -> dot::Kind {
        dot::Kind::Graph
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for DotGraph<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        (0..self.labels.len()).collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Returns a checked graph in DOT format.
///
/// Nodes are labelled with their ids, conflict edges are bold and red.
pub fn to_dot(checked: &CheckedGraph) -> Result<String> {
    let mut position: HashMap<&str, Node> = HashMap::new();
    let mut labels = Vec::new();
    for p in &checked.nodes {
        position.entry(p.id.as_str()).or_insert_with(|| {
            labels.push(p.id.as_str());
            labels.len() - 1
        });
    }

    let mut edges = Vec::with_capacity(checked.edges.len());
    for e in &checked.edges {
        for id in [e.source.as_str(), e.target.as_str()] {
            position.entry(id).or_insert_with(|| {
                labels.push(id);
                labels.len() - 1
            });
        }
        edges.push(Edge {
            source: position[e.source.as_str()],
            target: position[e.target.as_str()],
            is_conflict: e.is_conflict,
        });
    }

    let graph = DotGraph { labels, edges };
    let mut buffer = std::io::Cursor::new(Vec::new());
    dot::render(&graph, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
}

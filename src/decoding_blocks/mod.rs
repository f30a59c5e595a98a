pub(crate) mod dot;
pub(crate) mod gml;
pub(crate) mod matrix_market;
pub(crate) mod node_link;
pub(crate) mod pajek;
pub(crate) mod text;
pub(crate) mod xml;

/// Node identifier as it appears in an input file, before it is turned into a string.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKey {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKey::Text(s) => write!(f, "{s}"),
            NodeKey::Integer(i) => write!(f, "{i}"),
            // `1.0` stays `1.0`, not `1`
            NodeKey::Float(x) => write!(f, "{x:?}"),
            NodeKey::Bool(true) => write!(f, "True"),
            NodeKey::Bool(false) => write!(f, "False"),
        }
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey::Text(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        NodeKey::Text(value)
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        NodeKey::Integer(value)
    }
}

/// Graph as produced by a decoder: possibly directed, possibly with repeated edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedGraph {
    pub directed: bool,
    pub nodes: Vec<NodeKey>,
    pub edges: Vec<(NodeKey, NodeKey)>,
}

impl DecodedGraph {
    pub fn new(directed: bool) -> Self {
        DecodedGraph {
            directed,
            ..Default::default()
        }
    }

    pub fn add_node(&mut self, key: impl Into<NodeKey>) {
        self.nodes.push(key.into());
    }

    pub fn add_edge(&mut self, u: impl Into<NodeKey>, v: impl Into<NodeKey>) {
        self.edges.push((u.into(), v.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

use hashbrown::{HashMap, HashSet};

use crate::decoding_blocks::{DecodedGraph, NodeKey};
use crate::error::{Error, Result};

const FORMAT: &str = "GML";

#[derive(Debug, Clone, PartialEq)]
enum GmlValue {
    Integer(i64),
    Real(f64),
    Str(String),
    List(Vec<(String, GmlValue)>),
}

impl GmlValue {
    fn get(&self, key: &str) -> Option<&GmlValue> {
        match self {
            GmlValue::List(items) => items.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    fn all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a GmlValue> {
        let items = match self {
            GmlValue::List(items) => items.as_slice(),
            _ => &[],
        };
        items.iter().filter(move |(k, _)| k == key).map(|(_, v)| v)
    }

    fn as_key(&self) -> Result<NodeKey> {
        match self {
            GmlValue::Integer(i) => Ok(NodeKey::Integer(*i)),
            GmlValue::Real(x) => Ok(NodeKey::Float(*x)),
            GmlValue::Str(s) => Ok(NodeKey::Text(s.clone())),
            GmlValue::List(_) => Err(Error::decode(FORMAT, "a list cannot identify a node")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Integer(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '#' {
            while chars.next_if(|&(_, c)| c != '\n').is_some() {}
        } else if c == '[' {
            chars.next();
            tokens.push(Token::Open);
        } else if c == ']' {
            chars.next();
            tokens.push(Token::Close);
        } else if c == '"' {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some((_, '"')) => break,
                    Some((_, c)) => value.push(c),
                    None => return Err(Error::decode(FORMAT, "unterminated string")),
                }
            }
            tokens.push(Token::Str(value));
        } else {
            let mut end = start;
            while let Some((i, c)) = chars.next_if(|&(_, c)| !c.is_whitespace() && c != '[' && c != ']') {
                end = i + c.len_utf8();
            }
            let word = &text[start..end];
            let token = if let Ok(i) = word.parse::<i64>() {
                Token::Integer(i)
            } else if let Ok(x) = word.parse::<f64>() {
                Token::Real(x)
            } else if word.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
                Token::Key(word.to_string())
            } else {
                return Err(Error::decode(FORMAT, format!("unexpected token '{word}'")));
            };
            tokens.push(token);
        }
    }

    Ok(tokens)
}

/// Lists nested deeper than this are rejected.
const MAX_DEPTH: usize = 64;

fn parse_list(tokens: &mut std::vec::IntoIter<Token>, depth: usize) -> Result<Vec<(String, GmlValue)>> {
    if depth > MAX_DEPTH {
        return Err(Error::decode(FORMAT, format!("lists nested deeper than {MAX_DEPTH}")));
    }
    let nested = depth > 0;
    let mut items = Vec::new();
    loop {
        let key = match tokens.next() {
            Some(Token::Key(key)) => key,
            Some(Token::Close) if nested => return Ok(items),
            None if !nested => return Ok(items),
            None => return Err(Error::decode(FORMAT, "missing ']'")),
            Some(other) => {
                return Err(Error::decode(FORMAT, format!("expected a key, found {other:?}")));
            }
        };
        let value = match tokens.next() {
            Some(Token::Integer(i)) => GmlValue::Integer(i),
            Some(Token::Real(x)) => GmlValue::Real(x),
            Some(Token::Str(s)) => GmlValue::Str(s),
            Some(Token::Open) => GmlValue::List(parse_list(tokens, depth + 1)?),
            _ => return Err(Error::decode(FORMAT, format!("missing value for '{key}'"))),
        };
        items.push((key, value));
    }
}

/// Reads a GML document:
/// ```text
/// graph [
///   directed 0
///   node [ id 0 label "a" ]
///   node [ id 1 label "b" ]
///   edge [ source 0 target 1 ]
/// ]
/// ```
/// Nodes are named by their `label` if they have one, by their `id` otherwise.
/// Edges refer to node ids.
pub fn parse_gml(text: &str) -> Result<DecodedGraph> {
    let mut tokens = tokenize(text)?.into_iter();
    let root = GmlValue::List(parse_list(&mut tokens, 0)?);
    let graph_value = root
        .get("graph")
        .filter(|v| matches!(v, GmlValue::List(_)))
        .ok_or_else(|| Error::decode(FORMAT, "no graph list"))?;

    let directed = matches!(graph_value.get("directed"), Some(GmlValue::Integer(1)));
    let mut graph = DecodedGraph::new(directed);

    let mut names: HashMap<String, NodeKey> = HashMap::new();
    let mut labels: HashSet<String> = HashSet::new();
    for (i, node) in graph_value.all("node").enumerate() {
        let id = node
            .get("id")
            .ok_or_else(|| Error::decode(FORMAT, format!("node #{i} has no 'id'")))?
            .as_key()?;
        let name = match node.get("label") {
            Some(label) => {
                let label = label.as_key()?;
                if !labels.insert(label.to_string()) {
                    return Err(Error::decode(FORMAT, format!("duplicated label {label}")));
                }
                label
            }
            None => id.clone(),
        };
        if names.insert(id.to_string(), name.clone()).is_some() {
            return Err(Error::decode(FORMAT, format!("node id {id} is duplicated")));
        }
        graph.add_node(name);
    }

    for (i, edge) in graph_value.all("edge").enumerate() {
        let endpoint = |side: &str| -> Result<NodeKey> {
            let id = edge
                .get(side)
                .ok_or_else(|| Error::decode(FORMAT, format!("edge #{i} has no {side}")))?
                .as_key()?;
            names
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| Error::decode(FORMAT, format!("edge #{i} has undefined {side} {id}")))
        };
        let source = endpoint("source")?;
        let target = endpoint("target")?;
        graph.add_edge(source, target);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gml_with_labels() {
        let graph = parse_gml(
            r#"Creator "someone"
graph [
  # comment line
  directed 1
  node [ id 0 label "a" ]
  node [ id 1 label "b" weight 2.5 ]
  node [ id 2 ]
  edge [ source 0 target 1 ]
  edge [ source 1 target 2 data [ w 1 ] ]
]"#,
        )
        .unwrap();
        assert!(graph.directed);
        assert_eq!(
            graph.nodes,
            vec![
                NodeKey::Text("a".into()),
                NodeKey::Text("b".into()),
                NodeKey::Integer(2)
            ]
        );
        assert_eq!(
            graph.edges,
            vec![
                (NodeKey::Text("a".into()), NodeKey::Text("b".into())),
                (NodeKey::Text("b".into()), NodeKey::Integer(2)),
            ]
        );
    }

    #[test]
    fn test_gml_undirected_default() {
        let graph = parse_gml("graph [ node [ id 1 ] node [ id 2 ] edge [ source 1 target 2 ] ]").unwrap();
        assert!(!graph.directed);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_gml_errors() {
        assert!(parse_gml("graph [ node [ id 1 ]").is_err());
        assert!(parse_gml("graph [ node [ id 1 ] edge [ source 1 target 9 ] ]").is_err());
        assert!(parse_gml(r#"graph [ node [ id 1 label "x" ] node [ id 2 label "x" ] ]"#).is_err());
        assert!(parse_gml("nodes [ ]").is_err());
        assert!(parse_gml(r#"graph [ label "open ]"#).is_err());
    }

    #[test]
    fn test_gml_deep_nesting_is_an_error() {
        let depth = 100_000;
        let text = format!("graph [ {} ]", "a [ ".repeat(depth) + &"] ".repeat(depth));
        assert!(parse_gml(&text).is_err());

        let shallow = format!("graph [ node [ id 0 ] {} ]", "a [ ".repeat(10) + &"] ".repeat(10));
        assert_eq!(parse_gml(&shallow).unwrap().nodes.len(), 1);
    }
}

use hashbrown::HashMap;

use crate::decoding_blocks::{DecodedGraph, NodeKey};
use crate::error::{Error, Result};

const FORMAT: &str = "Pajek";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Vertices,
    Arcs,
    Edges,
    ArcsList,
    EdgesList,
}

/// Splits a line into tokens, double-quoted tokens may contain spaces.
fn split_quoted(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Reads a Pajek `.net` file.
///
/// Vertices declared as `1 "label"` are named by their label, otherwise by their number.
/// Any `*Arcs`/`*Arcslist` section makes the graph directed.
pub fn parse_pajek(text: &str) -> Result<DecodedGraph> {
    let mut graph = DecodedGraph::default();
    let mut names: HashMap<String, NodeKey> = HashMap::new();
    let mut section = Section::Preamble;

    let name_of = |names: &HashMap<String, NodeKey>, token: &str| {
        names
            .get(token)
            .cloned()
            .unwrap_or_else(|| NodeKey::Text(token.to_string()))
    };

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if let Some(header) = line.strip_prefix('*') {
            let keyword = header
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase();
            section = match keyword.as_str() {
                "vertices" => Section::Vertices,
                "arcs" => Section::Arcs,
                "edges" => Section::Edges,
                "arcslist" => Section::ArcsList,
                "edgeslist" => Section::EdgesList,
                "network" => Section::Preamble,
                other => return Err(Error::decode(FORMAT, format!("unknown section *{other}"))),
            };
            if matches!(section, Section::Arcs | Section::ArcsList) {
                graph.directed = true;
            }
            continue;
        }

        let tokens = split_quoted(line);
        let Some(first) = tokens.first() else {
            continue;
        };
        match section {
            Section::Preamble => {}
            Section::Vertices => {
                let number = first.clone();
                let name = match tokens.get(1) {
                    Some(label) => NodeKey::Text(label.clone()),
                    None => NodeKey::Text(number.clone()),
                };
                names.insert(number, name.clone());
                graph.add_node(name);
            }
            Section::Arcs | Section::Edges => {
                if tokens.len() < 2 {
                    return Err(Error::decode(FORMAT, format!("bad edge line '{line}'")));
                }
                graph.add_edge(name_of(&names, first), name_of(&names, &tokens[1]));
            }
            Section::ArcsList | Section::EdgesList => {
                let source = name_of(&names, first);
                for target in &tokens[1..] {
                    graph.add_edge(source.clone(), name_of(&names, target));
                }
            }
        }
    }

    if section == Section::Preamble && graph.is_empty() {
        return Err(Error::decode(FORMAT, "no *Vertices, *Arcs or *Edges section"));
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> NodeKey {
        NodeKey::Text(s.to_string())
    }

    #[test]
    fn test_labelled_vertices() {
        let graph = parse_pajek(
            "*Vertices 3\n1 \"New York\" 0.1 0.2\n2 \"B\"\n3\n*Edges\n1 2 1.0\n2 3\n",
        )
        .unwrap();
        assert!(!graph.directed);
        assert_eq!(graph.nodes, vec![text("New York"), text("B"), text("3")]);
        assert_eq!(
            graph.edges,
            vec![(text("New York"), text("B")), (text("B"), text("3"))]
        );
    }

    #[test]
    fn test_arcs_and_lists() {
        let graph = parse_pajek("*Vertices 3\n*Arcs\n1 2\n*Edgeslist\n3 1 2\n").unwrap();
        assert!(graph.directed);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.edges[2], (text("3"), text("2")));
    }

    #[test]
    fn test_errors() {
        assert!(parse_pajek("1 2\n2 3\n").is_err());
        assert!(parse_pajek("*Edges\n1\n").is_err());
        assert!(parse_pajek("*Matrix\n0 1\n1 0\n").is_err());
    }
}

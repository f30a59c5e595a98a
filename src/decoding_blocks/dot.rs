use crate::decoding_blocks::DecodedGraph;
use crate::error::{Error, Result};

const FORMAT: &str = "DOT";

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Id(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Eq,
    Colon,
    EdgeOp,
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            c if c.is_whitespace() => i += 1,
            '#' => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('/') => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(Error::decode(FORMAT, "unterminated comment"));
                }
                i += 2;
            }
            '{' | '}' | '[' | ']' | ';' | ',' | '=' | ':' => {
                tokens.push(match c {
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ';' => Token::Semi,
                    ',' => Token::Comma,
                    '=' => Token::Eq,
                    _ => Token::Colon,
                });
                i += 1;
            }
            '-' if next == Some('-') || next == Some('>') => {
                tokens.push(Token::EdgeOp);
                i += 2;
            }
            '"' => {
                let mut value = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(Error::decode(FORMAT, "unterminated string")),
                        Some('"') => break,
                        Some('\\') if chars.get(i + 1) == Some(&'"') => {
                            value.push('"');
                            i += 2;
                        }
                        Some(&c) => {
                            value.push(c);
                            i += 1;
                        }
                    }
                }
                i += 1;
                tokens.push(Token::Id(value));
            }
            '<' => {
                let start = i;
                let mut depth = 0;
                loop {
                    match chars.get(i) {
                        None => return Err(Error::decode(FORMAT, "unterminated HTML string")),
                        Some('<') => depth += 1,
                        Some('>') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
                i += 1;
                tokens.push(Token::Id(chars[start + 1..i - 1].iter().collect()));
            }
            c if is_id_char(c) || c == '-' => {
                let start = i;
                i += 1;
                while i < chars.len() && is_id_char(chars[i]) {
                    i += 1;
                }
                tokens.push(Token::Id(chars[start..i].iter().collect()));
            }
            other => {
                return Err(Error::decode(FORMAT, format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

fn is_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

fn is_keyword(token: Option<&Token>, keyword: &str) -> bool {
    matches!(token, Some(Token::Id(id)) if id.eq_ignore_ascii_case(keyword))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: DecodedGraph,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            found => Err(Error::decode(
                FORMAT,
                format!("expected {expected:?}, found {found:?}"),
            )),
        }
    }

    fn id(&mut self) -> Result<String> {
        match self.next() {
            Some(Token::Id(id)) => Ok(id),
            found => Err(Error::decode(FORMAT, format!("expected an identifier, found {found:?}"))),
        }
    }

    fn parse_graph(&mut self) -> Result<()> {
        if is_keyword(self.peek(), "strict") {
            self.next();
        }
        self.graph.directed = if is_keyword(self.peek(), "digraph") {
            true
        } else if is_keyword(self.peek(), "graph") {
            false
        } else {
            return Err(Error::decode(FORMAT, "expected 'graph' or 'digraph'"));
        };
        self.next();
        if matches!(self.peek(), Some(Token::Id(_))) {
            self.next();
        }
        self.expect(Token::LBrace)?;
        self.stmt_list()?;
        Ok(())
    }

    /// Parses statements up to the closing brace. Returns the nodes mentioned inside.
    fn stmt_list(&mut self) -> Result<Vec<String>> {
        let mut mentioned = Vec::new();
        loop {
            match self.peek() {
                None => return Err(Error::decode(FORMAT, "missing '}'")),
                Some(Token::RBrace) => {
                    self.next();
                    return Ok(mentioned);
                }
                Some(Token::Semi | Token::Comma) => {
                    self.next();
                }
                _ => self.stmt(&mut mentioned)?,
            }
        }
    }

    fn stmt(&mut self, mentioned: &mut Vec<String>) -> Result<()> {
        let token = self.peek();
        if ["graph", "node", "edge"]
            .iter()
            .any(|keyword| is_keyword(token, keyword))
        {
            self.next();
            return self.attr_list();
        }
        if matches!(self.peek_at(1), Some(Token::Eq)) && !is_keyword(token, "subgraph") {
            self.id()?;
            self.next();
            self.id()?;
            return Ok(());
        }

        let (mut lhs, single) = self.operand()?;
        mentioned.extend(lhs.iter().cloned());
        let mut has_edges = false;
        while matches!(self.peek(), Some(Token::EdgeOp)) {
            self.next();
            let (rhs, _) = self.operand()?;
            mentioned.extend(rhs.iter().cloned());
            for u in &lhs {
                for v in &rhs {
                    self.graph.add_edge(u.as_str(), v.as_str());
                }
            }
            lhs = rhs;
            has_edges = true;
        }
        self.attr_list()?;

        if single && !has_edges {
            for id in lhs {
                self.graph.add_node(id);
            }
        }
        Ok(())
    }

    /// A node id (ports dropped) or a subgraph. The flag tells which one it was.
    fn operand(&mut self) -> Result<(Vec<String>, bool)> {
        if is_keyword(self.peek(), "subgraph") || matches!(self.peek(), Some(Token::LBrace)) {
            if is_keyword(self.peek(), "subgraph") {
                self.next();
                if matches!(self.peek(), Some(Token::Id(_))) {
                    self.next();
                }
            }
            self.expect(Token::LBrace)?;
            return Ok((self.stmt_list()?, false));
        }

        let id = self.id()?;
        for _ in 0..2 {
            if matches!(self.peek(), Some(Token::Colon)) {
                self.next();
                self.id()?;
            }
        }
        Ok((vec![id], true))
    }

    fn attr_list(&mut self) -> Result<()> {
        while matches!(self.peek(), Some(Token::LBracket)) {
            self.next();
            loop {
                match self.next() {
                    Some(Token::RBracket) => break,
                    Some(Token::Id(_) | Token::Eq | Token::Semi | Token::Comma) => {}
                    found => {
                        return Err(Error::decode(
                            FORMAT,
                            format!("unexpected {found:?} in attribute list"),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Reads a Graphviz DOT document. Attributes are ignored, subgraphs are flattened and
/// an edge to a subgraph connects every node inside it.
pub fn parse_dot(text: &str) -> Result<DecodedGraph> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
        graph: DecodedGraph::default(),
    };
    parser.parse_graph()?;
    Ok(parser.graph)
}

//! Hand-written scanner and recursive-descent parser for the DOT subset this
//! toolkit reads: one `digraph`, node statements with attribute lists, edge
//! chains, quoted or bare identifiers, and `//`, `/* */`, `#` comments.
//!
//! Only the first graph in the input is read; anything after its closing
//! brace is silently ignored. Undirected graphs and subgraphs are rejected.

use std::collections::BTreeMap;

use primer_core::{PrimerError, PrimerResult};

use crate::ast::DotGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Equals,
    Arrow,
}

fn syntax_error(line: usize, message: impl Into<String>) -> PrimerError {
    PrimerError::DotSyntax {
        line,
        message: message.into(),
    }
}

fn tokenize(input: &str) -> PrimerResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1usize;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '{' => tokens.push((Token::LBrace, line)),
            '}' => tokens.push((Token::RBrace, line)),
            '[' => tokens.push((Token::LBracket, line)),
            ']' => tokens.push((Token::RBracket, line)),
            ';' => tokens.push((Token::Semi, line)),
            ',' => tokens.push((Token::Comma, line)),
            '=' => tokens.push((Token::Equals, line)),
            '#' => {
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '/' => match chars.peek() {
                Some('/') => {
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next == '\n' {
                            line += 1;
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    let mut closed = false;
                    while let Some(next) = chars.next() {
                        if next == '\n' {
                            line += 1;
                        } else if next == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(syntax_error(line, "unterminated block comment"));
                    }
                }
                _ => return Err(syntax_error(line, "unexpected character '/'")),
            },
            '"' => {
                let mut value = String::new();
                let mut closed = false;
                while let Some(next) = chars.next() {
                    match next {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some('"') => value.push('"'),
                            Some('\\') => value.push('\\'),
                            Some(other) => {
                                value.push('\\');
                                if other == '\n' {
                                    line += 1;
                                }
                                value.push(other);
                            }
                            None => break,
                        },
                        '\n' => {
                            line += 1;
                            value.push('\n');
                        }
                        other => value.push(other),
                    }
                }
                if !closed {
                    return Err(syntax_error(line, "unterminated quoted string"));
                }
                tokens.push((Token::Ident(value), line));
            }
            '-' => match chars.peek() {
                Some('>') => {
                    chars.next();
                    tokens.push((Token::Arrow, line));
                }
                Some('-') => {
                    return Err(syntax_error(line, "undirected edges are not supported"));
                }
                Some(&next) if next.is_ascii_digit() || next == '.' => {
                    let mut value = String::from("-");
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() || next == '.' {
                            value.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push((Token::Ident(value), line));
                }
                _ => return Err(syntax_error(line, "unexpected character '-'")),
            },
            c if c.is_alphanumeric() || c == '_' || c == '.' => {
                let mut value = String::new();
                value.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '.' {
                        value.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(value), line));
            }
            other => {
                return Err(syntax_error(line, format!("unexpected character '{other}'")));
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |(_, line)| *line)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_ident(&mut self, what: &str) -> PrimerResult<String> {
        let line = self.line();
        match self.advance() {
            Some(Token::Ident(id)) => Ok(id),
            _ => Err(syntax_error(line, format!("expected {what}"))),
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> PrimerResult<()> {
        let line = self.line();
        match self.advance() {
            Some(t) if t == token => Ok(()),
            _ => Err(syntax_error(line, format!("expected {what}"))),
        }
    }

    /// Zero or more bracketed attribute lists, merged left to right.
    fn attr_lists(&mut self) -> PrimerResult<BTreeMap<String, String>> {
        let mut attrs = BTreeMap::new();
        while self.peek() == Some(&Token::LBracket) {
            self.advance();
            loop {
                match self.peek() {
                    Some(Token::RBracket) => {
                        self.advance();
                        break;
                    }
                    Some(Token::Comma) | Some(Token::Semi) => {
                        self.advance();
                    }
                    Some(Token::Ident(_)) => {
                        let key = self.expect_ident("attribute name")?;
                        self.expect(Token::Equals, "'=' after attribute name")?;
                        let value = self.expect_ident("attribute value")?;
                        attrs.insert(key, value);
                    }
                    _ => return Err(syntax_error(self.line(), "expected ']' or attribute")),
                }
            }
        }
        Ok(attrs)
    }

    fn graph(&mut self) -> PrimerResult<DotGraph> {
        let keyword = self.expect_ident("'digraph'")?;
        let keyword = if keyword.eq_ignore_ascii_case("strict") {
            self.expect_ident("'digraph'")?
        } else {
            keyword
        };
        if keyword.eq_ignore_ascii_case("graph") {
            return Err(syntax_error(
                self.line(),
                "only directed graphs are supported",
            ));
        }
        if !keyword.eq_ignore_ascii_case("digraph") {
            return Err(syntax_error(self.line(), "expected 'digraph'"));
        }

        let name = match self.peek() {
            Some(Token::Ident(_)) => Some(self.expect_ident("graph name")?),
            _ => None,
        };
        self.expect(Token::LBrace, "'{'")?;

        let mut graph = DotGraph::new(name);
        loop {
            match self.peek() {
                None => return Err(syntax_error(self.line(), "expected '}'")),
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(Token::Semi) => {
                    self.advance();
                }
                Some(Token::Ident(_)) => self.statement(&mut graph)?,
                _ => return Err(syntax_error(self.line(), "expected statement")),
            }
        }
        Ok(graph)
    }

    fn statement(&mut self, graph: &mut DotGraph) -> PrimerResult<()> {
        let id = self.expect_ident("identifier")?;

        if id.eq_ignore_ascii_case("subgraph") {
            return Err(syntax_error(self.line(), "subgraphs are not supported"));
        }
        // Default-attribute statements (`node [...]`, `edge [...]`, `graph
        // [...]`) are accepted and dropped.
        if self.peek() == Some(&Token::LBracket)
            && (id.eq_ignore_ascii_case("node")
                || id.eq_ignore_ascii_case("edge")
                || id.eq_ignore_ascii_case("graph"))
        {
            self.attr_lists()?;
            return Ok(());
        }

        match self.peek() {
            // Graph-level attribute assignment (`rankdir=LR`), dropped.
            Some(Token::Equals) => {
                self.advance();
                self.expect_ident("attribute value")?;
                Ok(())
            }
            Some(Token::Arrow) => {
                let mut chain = vec![id];
                while self.peek() == Some(&Token::Arrow) {
                    self.advance();
                    chain.push(self.expect_ident("edge target")?);
                }
                let attrs = self.attr_lists()?;
                for pair in chain.windows(2) {
                    graph.add_edge(&pair[0], &pair[1], attrs.clone());
                }
                Ok(())
            }
            _ => {
                let attrs = self.attr_lists()?;
                let node = graph.ensure_node(&id);
                node.attrs.extend(attrs);
                Ok(())
            }
        }
    }
}

/// Parse the first graph in the input. Trailing content after its closing
/// brace is ignored.
pub fn parse(input: &str) -> PrimerResult<DotGraph> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.graph()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_edges_and_attributes() {
        let graph = parse(
            r#"digraph model {
                // exogenous
                Z [x="0", y="1"];
                X -> Y [label=beta];
                Z -> X;
                Z -> Y;
            }"#,
        )
        .unwrap();

        assert_eq!(graph.name.as_deref(), Some("model"));
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.node("Z").unwrap().attrs.get("x").unwrap(), "0");
        assert_eq!(graph.edges[0].attrs.get("label").unwrap(), "beta");
    }

    #[test]
    fn edge_chain_expands_to_pairs() {
        let graph = parse("digraph { a -> b -> c [label=\"w\"]; }").unwrap();
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].source, "a");
        assert_eq!(graph.edges[1].target, "c");
        assert_eq!(graph.edges[1].attrs.get("label").unwrap(), "w");
    }

    #[test]
    fn quoted_ids_and_negative_numerals() {
        let graph = parse("digraph { \"a node\" [x=\"-1.5\", y=2]; }").unwrap();
        let node = graph.node("a node").unwrap();
        assert_eq!(node.attrs.get("x").unwrap(), "-1.5");
        assert_eq!(node.attrs.get("y").unwrap(), "2");
    }

    #[test]
    fn comments_are_skipped() {
        let graph = parse(
            "digraph { # hash\n /* block\n comment */ a -> b; // trailing\n }",
        )
        .unwrap();
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn only_the_first_graph_is_read() {
        let graph = parse("digraph one { a -> b; }\ndigraph two { c -> d; }").unwrap();
        assert_eq!(graph.name.as_deref(), Some("one"));
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.node("c").is_none());
    }

    #[test]
    fn undirected_graphs_are_rejected() {
        assert!(parse("graph { a -- b; }").is_err());
    }

    #[test]
    fn syntax_errors_carry_the_line() {
        let err = parse("digraph {\n a -> ;\n}").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "got: {message}");
    }

    #[test]
    fn default_attribute_statements_are_dropped() {
        let graph = parse("digraph { node [shape=circle]; rankdir=LR; a -> b; }").unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
    }
}

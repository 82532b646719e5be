//! DOT text emitter. Nodes come first (with their attributes), then edges.
//! Identifiers that are not bare DOT IDs are quoted.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::ast::DotGraph;

/// Serialize the graph to DOT text.
pub fn to_dot_string(graph: &DotGraph) -> String {
    let mut out = String::new();
    match &graph.name {
        Some(name) => {
            let _ = writeln!(out, "digraph {} {{", quote_id(name));
        }
        None => out.push_str("digraph {\n"),
    }

    for node in &graph.nodes {
        let _ = writeln!(out, "    {}{};", quote_id(&node.id), format_attrs(&node.attrs));
    }
    if !graph.nodes.is_empty() && !graph.edges.is_empty() {
        out.push('\n');
    }
    for edge in &graph.edges {
        let _ = writeln!(
            out,
            "    {} -> {}{};",
            quote_id(&edge.source),
            quote_id(&edge.target),
            format_attrs(&edge.attrs)
        );
    }
    out.push_str("}\n");
    out
}

fn format_attrs(attrs: &BTreeMap<String, String>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let body = attrs
        .iter()
        .map(|(key, value)| format!("{}={}", quote_id(key), quote_id(value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" [{body}]")
}

/// Quote an identifier unless it is a bare DOT ID (alphanumeric word not
/// starting with a digit, or a numeral).
fn quote_id(id: &str) -> String {
    if is_bare_word(id) || is_numeral(id) {
        id.to_string()
    } else {
        format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn is_bare_word(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    if digits.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    digits != "."
}

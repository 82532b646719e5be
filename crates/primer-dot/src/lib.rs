//! # primer-dot
//!
//! Reader and writer for the DOT subset the causal-DAG toolkit persists
//! models in: a single `digraph` with node statements, edge chains, and
//! attribute lists. Not a general graphviz front end.

pub mod ast;
mod parse;
mod write;

pub use ast::{DotEdge, DotGraph, DotNode};
pub use parse::parse;
pub use write::to_dot_string;

use std::path::Path;

use tracing::debug;

use primer_core::PrimerResult;

/// Read and parse a `.dot` file. Only the first graph in the file is read.
pub fn read_file(path: impl AsRef<Path>) -> PrimerResult<DotGraph> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let graph = parse(&contents)?;
    debug!(
        path = %path.display(),
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "read dot file"
    );
    Ok(graph)
}

/// Serialize the graph and write it to a file.
pub fn write_file(graph: &DotGraph, path: impl AsRef<Path>) -> PrimerResult<()> {
    let path = path.as_ref();
    let text = to_dot_string(graph);
    std::fs::write(path, &text)?;
    debug!(path = %path.display(), bytes = text.len(), "wrote dot file");
    Ok(())
}

//! petgraph::StableGraph wrapper with string-labeled nodes and annotated edges.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use primer_core::{Layout, Palette, PrimerError, PrimerResult};

/// Annotation carried on a causal edge: an optional mechanism name or
/// coefficient label, shown next to the edge when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalLink {
    pub label: Option<String>,
}

impl CausalLink {
    /// An unannotated link.
    pub fn new() -> Self {
        Self { label: None }
    }

    /// A link annotated with a label.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

/// A directed edge identified by its endpoint labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// The underlying directed graph type.
pub type CausalGraph = StableDiGraph<String, CausalLink>;

/// A causal DAG: one directed graph plus an optional node layout and a
/// palette of display colors.
///
/// Node identity is string equality on the label. Edges are unique per
/// ordered node pair; re-adding an edge replaces its annotation. Acyclicity
/// is not enforced on mutation — it is only checked where the queries
/// require it (equivalence-class candidates, layered layout).
#[derive(Debug, Clone)]
pub struct CausalModel {
    pub(crate) graph: CausalGraph,
    /// Map from node label to NodeIndex for O(1) lookup.
    pub(crate) node_index: HashMap<String, NodeIndex>,
    pub(crate) layout: Option<Layout>,
    pub(crate) palette: Palette,
}

impl CausalModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            node_index: HashMap::new(),
            layout: None,
            palette: Palette::default(),
        }
    }

    /// Add a causal link from `source` to `target` with an optional label.
    /// Both nodes are created if absent. An existing link between the same
    /// pair is replaced, never duplicated.
    pub fn add_causation(&mut self, source: &str, target: &str, label: Option<&str>) {
        let link = match label {
            Some(l) => CausalLink::labeled(l),
            None => CausalLink::new(),
        };
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        match self.graph.find_edge(s, t) {
            Some(idx) => {
                if let Some(weight) = self.graph.edge_weight_mut(idx) {
                    *weight = link;
                }
            }
            None => {
                self.graph.add_edge(s, t, link);
            }
        }
    }

    /// Get or create the node with the given label.
    pub fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    /// Look up a node index by label.
    pub fn node(&self, label: &str) -> Option<NodeIndex> {
        self.node_index.get(label).copied()
    }

    /// Look up a node index, failing with `NodeNotFound`.
    pub(crate) fn require_node(&self, label: &str) -> PrimerResult<NodeIndex> {
        self.node(label).ok_or_else(|| PrimerError::NodeNotFound {
            label: label.to_string(),
        })
    }

    /// Whether a node with this label exists.
    pub fn contains_node(&self, label: &str) -> bool {
        self.node_index.contains_key(label)
    }

    /// Remove a node and all its incident edges.
    pub fn remove_node(&mut self, label: &str) -> bool {
        if let Some(idx) = self.node_index.remove(label) {
            self.graph.remove_node(idx);
            true
        } else {
            false
        }
    }

    /// Remove the edge between two labeled nodes, returning its annotation.
    pub fn remove_edge_between(&mut self, source: &str, target: &str) -> Option<CausalLink> {
        let s = self.node(source)?;
        let t = self.node(target)?;
        let edge = self.graph.find_edge(s, t)?;
        self.graph.remove_edge(edge)
    }

    /// The annotation on the edge between two labeled nodes, if present.
    pub fn edge(&self, source: &str, target: &str) -> Option<&CausalLink> {
        let s = self.node(source)?;
        let t = self.node(target)?;
        let idx = self.graph.find_edge(s, t)?;
        self.graph.edge_weight(idx)
    }

    /// Whether a directed edge exists between two labeled nodes.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    /// Iterator over node labels.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// All node labels, sorted.
    pub fn node_labels(&self) -> BTreeSet<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// Iterator over edges as (source, target, annotation).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &CausalLink)> {
        self.graph.edge_references().filter_map(move |edge| {
            let source = self.graph.node_weight(edge.source())?;
            let target = self.graph.node_weight(edge.target())?;
            Some((source.as_str(), target.as_str(), edge.weight()))
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &CausalGraph {
        &self.graph
    }

    /// The node layout, if one has been computed or loaded.
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Assign a node layout.
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = Some(layout);
    }

    /// Discard the node layout.
    pub fn clear_layout(&mut self) {
        self.layout = None;
    }

    /// The display palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Default for CausalModel {
    fn default() -> Self {
        Self::new()
    }
}

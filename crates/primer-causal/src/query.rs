//! Structural queries: parents, children, ancestors, descendants, and the
//! zero-degree input/output sets.

use std::collections::BTreeSet;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{Dfs, Reversed};
use petgraph::Direction;

use primer_core::PrimerResult;

use crate::model::CausalModel;

impl CausalModel {
    /// Direct predecessors of a node, sorted by label.
    pub fn parents(&self, node: &str) -> PrimerResult<Vec<String>> {
        let idx = self.require_node(node)?;
        Ok(self.parents_of(idx))
    }

    /// Direct successors of a node, sorted by label.
    pub fn children(&self, node: &str) -> PrimerResult<Vec<String>> {
        let idx = self.require_node(node)?;
        Ok(self.children_of(idx))
    }

    /// Every node that can reach `node` through directed edges.
    pub fn ancestors(&self, node: &str) -> PrimerResult<BTreeSet<String>> {
        let idx = self.require_node(node)?;
        Ok(self.ancestors_of(idx))
    }

    /// Every node reachable from `node` through directed edges.
    pub fn descendants(&self, node: &str) -> PrimerResult<BTreeSet<String>> {
        let idx = self.require_node(node)?;
        Ok(self.descendants_of(idx))
    }

    /// Nodes with zero in-degree (exogenous variables). Isolated nodes count.
    pub fn inputs(&self) -> BTreeSet<String> {
        self.degree_zero(Direction::Incoming)
    }

    /// Nodes with zero out-degree (terminal effects). Isolated nodes count.
    pub fn outputs(&self) -> BTreeSet<String> {
        self.degree_zero(Direction::Outgoing)
    }

    pub(crate) fn parents_of(&self, idx: NodeIndex) -> Vec<String> {
        let mut labels: Vec<String> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect();
        labels.sort();
        labels
    }

    pub(crate) fn children_of(&self, idx: NodeIndex) -> Vec<String> {
        let mut labels: Vec<String> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).cloned())
            .collect();
        labels.sort();
        labels
    }

    pub(crate) fn ancestors_of(&self, idx: NodeIndex) -> BTreeSet<String> {
        // DFS over the reversed graph reaches exactly the ancestors.
        let reversed = Reversed(&self.graph);
        let mut dfs = Dfs::new(reversed, idx);
        let mut out = BTreeSet::new();
        while let Some(node) = dfs.next(reversed) {
            if node != idx {
                if let Some(label) = self.graph.node_weight(node) {
                    out.insert(label.clone());
                }
            }
        }
        out
    }

    pub(crate) fn descendants_of(&self, idx: NodeIndex) -> BTreeSet<String> {
        let mut dfs = Dfs::new(&self.graph, idx);
        let mut out = BTreeSet::new();
        while let Some(node) = dfs.next(&self.graph) {
            if node != idx {
                if let Some(label) = self.graph.node_weight(node) {
                    out.insert(label.clone());
                }
            }
        }
        out
    }

    fn degree_zero(&self, direction: Direction) -> BTreeSet<String> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_directed(idx, direction).next().is_none())
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }
}

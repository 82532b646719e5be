//! Intervention graphs: the do()-operator as edge surgery. Incoming edges of
//! the intervened nodes are removed; a conditional intervention then wires in
//! replacement dependencies.

use petgraph::stable_graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use primer_core::{PrimerError, PrimerResult};

use crate::model::{CausalModel, Edge};

impl CausalModel {
    /// Copy of the model with every incoming edge of each named node removed.
    /// With `drop_isolated`, degree-zero nodes are deleted afterwards along
    /// with their layout entries; a layout that is present but lacks an entry
    /// for a dropped node is an error.
    pub fn intervention_graph(
        &self,
        nodes: &[&str],
        drop_isolated: bool,
    ) -> PrimerResult<CausalModel> {
        let mut surgery = self.clone();
        surgery.cut_incoming(nodes)?;
        if drop_isolated {
            surgery.drop_isolated_nodes()?;
        }
        Ok(surgery)
    }

    /// Intervention followed by a replacement mechanism: after the edge
    /// removal, each dependency edge is added (unannotated).
    pub fn conditional_intervention_graph(
        &self,
        nodes: &[&str],
        dependencies: &[Edge],
        drop_isolated: bool,
    ) -> PrimerResult<CausalModel> {
        let mut surgery = self.clone();
        surgery.cut_incoming(nodes)?;
        for dep in dependencies {
            surgery.add_causation(&dep.source, &dep.target, None);
        }
        if drop_isolated {
            surgery.drop_isolated_nodes()?;
        }
        Ok(surgery)
    }

    fn cut_incoming(&mut self, nodes: &[&str]) -> PrimerResult<()> {
        for node in nodes {
            let idx = self.require_node(node)?;
            let incoming: Vec<EdgeIndex> = self
                .graph
                .edges_directed(idx, Direction::Incoming)
                .map(|edge| edge.id())
                .collect();
            for edge in incoming {
                self.graph.remove_edge(edge);
            }
        }
        Ok(())
    }

    fn drop_isolated_nodes(&mut self) -> PrimerResult<()> {
        let isolated: Vec<String> = self
            .graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
                    && self
                        .graph
                        .neighbors_directed(idx, Direction::Outgoing)
                        .next()
                        .is_none()
            })
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect();

        for label in isolated {
            self.remove_node(&label);
            if let Some(layout) = self.layout.as_mut() {
                if layout.remove(&label).is_none() {
                    return Err(PrimerError::LayoutEntryMissing { label });
                }
            }
        }
        Ok(())
    }
}

//! Collider detection: a v-structure is a node with two incoming edges whose
//! parents are not adjacent in either direction.

use std::collections::BTreeSet;
use std::fmt;

use petgraph::Direction;
use serde::{Deserialize, Serialize};

use crate::model::{CausalModel, Edge};

/// An unordered pair of incoming edges forming a collider. The pair is kept
/// sorted so that equal structures compare equal regardless of discovery
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VStructure {
    pub first: Edge,
    pub second: Edge,
}

impl VStructure {
    pub fn new(a: Edge, b: Edge) -> Self {
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// The collider node both edges point into.
    pub fn collider(&self) -> &str {
        &self.first.target
    }
}

impl fmt::Display for VStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} <- {}",
            self.first.source, self.first.target, self.second.source
        )
    }
}

impl CausalModel {
    /// All v-structures in the graph.
    pub fn v_structures(&self) -> BTreeSet<VStructure> {
        let mut structs = BTreeSet::new();

        for idx in self.graph.node_indices() {
            let Some(collider) = self.graph.node_weight(idx) else {
                continue;
            };
            let mut parents: Vec<&str> = self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .filter_map(|n| self.graph.node_weight(n).map(String::as_str))
                .collect();
            if parents.len() < 2 {
                continue;
            }
            parents.sort_unstable();

            for i in 0..parents.len() {
                for j in (i + 1)..parents.len() {
                    let (a, b) = (parents[i], parents[j]);
                    if self.has_edge(a, b) || self.has_edge(b, a) {
                        continue;
                    }
                    structs.insert(VStructure::new(
                        Edge::new(a, collider.as_str()),
                        Edge::new(b, collider.as_str()),
                    ));
                }
            }
        }
        structs
    }
}

//! Markov-equivalence enumeration by single-edge reversal: an edge is
//! reversible iff flipping it preserves every v-structure and acyclicity.
//!
//! Only single-edge flips are explored, not joint reversals of several
//! edges, so the result under-approximates the full equivalence class when
//! multiple edges are jointly reversible. This is documented behavior.

use crate::acyclicity;
use crate::model::{CausalLink, CausalModel, Edge};

/// A member of the Markov equivalence class. `reversed` names the flipped
/// edge in its new orientation; `None` marks the original model.
#[derive(Debug, Clone)]
pub struct EquivalentModel {
    pub model: CausalModel,
    pub reversed: Option<Edge>,
}

impl CausalModel {
    /// The original model followed by every valid single-edge-flip variant,
    /// in deterministic edge order. Layout and palette carry over to each
    /// member.
    pub fn equivalence_class(&self) -> Vec<EquivalentModel> {
        let mut members = vec![EquivalentModel {
            model: self.clone(),
            reversed: None,
        }];

        let structs = self.v_structures();
        let mut edges: Vec<(String, String, CausalLink)> = self
            .edges()
            .map(|(source, target, link)| (source.to_string(), target.to_string(), link.clone()))
            .collect();
        edges.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

        for (source, target, link) in edges {
            let mut candidate = self.clone();
            candidate.remove_edge_between(&source, &target);
            candidate.add_causation(&target, &source, link.label.as_deref());

            if candidate.v_structures() == structs && acyclicity::is_acyclic(&candidate) {
                members.push(EquivalentModel {
                    model: candidate,
                    reversed: Some(Edge::new(target.as_str(), source.as_str())),
                });
            }
        }
        members
    }
}

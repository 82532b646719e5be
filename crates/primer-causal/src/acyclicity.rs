//! Cycle detection over the causal graph. Acyclicity is not enforced on
//! mutation; these checks run where the queries require a DAG.

use petgraph::algo::{is_cyclic_directed, tarjan_scc};

use crate::model::CausalModel;

/// Whether the graph contains no directed cycle (self-loops included).
pub fn is_acyclic(model: &CausalModel) -> bool {
    !is_cyclic_directed(model.graph())
}

/// All strongly connected components with more than one node, as label lists.
/// Empty on a DAG. Does not report self-loops.
pub fn find_cycles(model: &CausalModel) -> Vec<Vec<String>> {
    tarjan_scc(model.graph())
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            scc.into_iter()
                .filter_map(|idx| model.graph().node_weight(idx).cloned())
                .collect()
        })
        .collect()
}

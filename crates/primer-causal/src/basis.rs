//! Basis set of testable independence statements: the local Markov property
//! renders every node independent of its non-effects given its parents.

use std::collections::BTreeSet;

use crate::model::CausalModel;

impl CausalModel {
    /// One formatted statement per node: `"N _||_ A, B | P, Q"`, where the
    /// right-hand side is every node that is neither `N`, a parent of `N`,
    /// nor a descendant of `N`. The conditioning bar is dropped for parentless
    /// nodes, and nodes with nothing on the right-hand side are skipped.
    /// Returned sorted.
    pub fn basis_set(&self) -> Vec<String> {
        let nodes = self.node_labels();
        let mut statements = Vec::new();

        for idx in self.graph.node_indices() {
            let Some(node) = self.graph.node_weight(idx) else {
                continue;
            };
            let parents = self.parents_of(idx);
            let descendants = self.descendants_of(idx);

            let others: BTreeSet<&str> = nodes
                .iter()
                .map(String::as_str)
                .filter(|&n| n != node)
                .filter(|&n| !parents.iter().any(|p| p == n))
                .filter(|&n| !descendants.contains(n))
                .collect();
            if others.is_empty() {
                continue;
            }

            let others = others.into_iter().collect::<Vec<_>>().join(", ");
            let statement = if parents.is_empty() {
                format!("{node} _||_ {others}")
            } else {
                format!("{node} _||_ {others} | {}", parents.join(", "))
            };
            statements.push(statement);
        }

        statements.sort();
        statements
    }
}

//! Simple-path enumeration: directed paths, undirected paths, conditioning,
//! and backdoor paths as the set difference of the two.
//!
//! No pruning or limits are applied; simple-path enumeration can blow up
//! exponentially on dense graphs. The target graphs are small teaching DAGs.

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::all_simple_paths;
use petgraph::graph::{NodeIndex, UnGraph};

use primer_core::PrimerResult;

use crate::model::CausalModel;

/// A set of simple paths, each an ordered node-label sequence.
pub type PathSet = BTreeSet<Vec<String>>;

impl CausalModel {
    /// All simple directed paths from `source` to `target`.
    pub fn directed_paths(&self, source: &str, target: &str) -> PrimerResult<PathSet> {
        let s = self.require_node(source)?;
        let t = self.require_node(target)?;
        let paths = all_simple_paths::<Vec<NodeIndex>, _>(&self.graph, s, t, 0, None)
            .map(|path| {
                path.into_iter()
                    .filter_map(|idx| self.graph.node_weight(idx).cloned())
                    .collect()
            })
            .collect();
        Ok(paths)
    }

    /// All simple paths between `source` and `target` ignoring edge direction.
    pub fn all_paths(&self, source: &str, target: &str) -> PrimerResult<PathSet> {
        self.all_paths_conditional(source, target, &[])
    }

    /// Undirected simple paths after deleting `removed` nodes and their
    /// incident edges. Models conditioning on the removed set.
    pub fn all_paths_conditional(
        &self,
        source: &str,
        target: &str,
        removed: &[&str],
    ) -> PrimerResult<PathSet> {
        self.require_node(source)?;
        self.require_node(target)?;

        let (undirected, index) = self.undirected_view(removed);
        let s = index
            .get(source)
            .copied()
            .ok_or_else(|| primer_core::PrimerError::NodeNotFound {
                label: source.to_string(),
            })?;
        let t = index
            .get(target)
            .copied()
            .ok_or_else(|| primer_core::PrimerError::NodeNotFound {
                label: target.to_string(),
            })?;

        let paths = all_simple_paths::<Vec<NodeIndex>, _>(&undirected, s, t, 0, None)
            .map(|path| {
                path.into_iter()
                    .map(|idx| undirected[idx].clone())
                    .collect()
            })
            .collect();
        Ok(paths)
    }

    /// Undirected paths that are not also directed paths: the potential
    /// confounding routes between `source` and `target`.
    pub fn backdoor_paths(&self, source: &str, target: &str) -> PrimerResult<PathSet> {
        let all = self.all_paths(source, target)?;
        let directed = self.directed_paths(source, target)?;
        Ok(all.difference(&directed).cloned().collect())
    }

    /// Undirected copy of the graph, minus `removed` nodes. Antiparallel edge
    /// pairs collapse to a single undirected edge.
    fn undirected_view(&self, removed: &[&str]) -> (UnGraph<String, ()>, HashMap<String, NodeIndex>) {
        let mut undirected = UnGraph::new_undirected();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        for label in self.nodes() {
            if removed.contains(&label) {
                continue;
            }
            let idx = undirected.add_node(label.to_string());
            index.insert(label.to_string(), idx);
        }
        for (source, target, _) in self.edges() {
            let (Some(&s), Some(&t)) = (index.get(source), index.get(target)) else {
                continue;
            };
            if undirected.find_edge(s, t).is_none() {
                undirected.add_edge(s, t, ());
            }
        }
        (undirected, index)
    }
}

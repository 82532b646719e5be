//! Property tests over random forward-edge DAGs: path-set algebra,
//! equivalence-class invariants, intervention surgery, and basis formatting.

use proptest::prelude::*;

use primer_causal::{acyclicity, CausalModel};

/// Random DAG on `n` nodes: every edge runs from a lower to a higher index,
/// so the graph is acyclic by construction.
fn dag_strategy() -> impl Strategy<Value = CausalModel> {
    (3usize..8).prop_flat_map(|n| {
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        let len = pairs.len();
        prop::collection::vec(any::<bool>(), len).prop_map(move |mask| {
            let mut model = CausalModel::new();
            for i in 0..n {
                model.ensure_node(&format!("n{i}"));
            }
            for (keep, (i, j)) in mask.iter().zip(&pairs) {
                if *keep {
                    model.add_causation(&format!("n{i}"), &format!("n{j}"), None);
                }
            }
            model
        })
    })
}

proptest! {
    // directed ⊆ all, backdoor = all − directed, and the two are disjoint.
    #[test]
    fn path_set_algebra_holds(model in dag_strategy()) {
        let labels = model.node_labels();
        let source = labels.iter().next().unwrap();
        let target = labels.iter().last().unwrap();

        let directed = model.directed_paths(source, target).unwrap();
        let all = model.all_paths(source, target).unwrap();
        let backdoor = model.backdoor_paths(source, target).unwrap();

        prop_assert!(directed.is_subset(&all));
        prop_assert!(backdoor.is_disjoint(&directed));
        let union: primer_causal::PathSet = directed.union(&backdoor).cloned().collect();
        prop_assert_eq!(union, all);
    }

    // Every equivalence-class member is acyclic with identical v-structures
    // and an unchanged edge count; the original comes first, untagged.
    #[test]
    fn equivalence_class_members_are_markov_equivalent(model in dag_strategy()) {
        let structs = model.v_structures();
        let class = model.equivalence_class();

        prop_assert!(class[0].reversed.is_none());
        for member in &class {
            prop_assert!(acyclicity::is_acyclic(&member.model));
            prop_assert_eq!(member.model.v_structures(), structs.clone());
            prop_assert_eq!(member.model.edge_count(), model.edge_count());
        }
    }

    // After do(node), the node has no parents and no other node gained one.
    #[test]
    fn intervention_leaves_the_target_parentless(model in dag_strategy()) {
        let labels = model.node_labels();
        let target = labels.iter().next().unwrap();

        let surgery = model.intervention_graph(&[target.as_str()], false).unwrap();
        prop_assert!(surgery.parents(target).unwrap().is_empty());
        for label in labels.iter().filter(|l| l.as_str() != target) {
            prop_assert_eq!(
                surgery.parents(label).unwrap(),
                model.parents(label).unwrap()
            );
        }
    }

    // Basis statements are sorted and well-formed.
    #[test]
    fn basis_statements_are_sorted_and_well_formed(model in dag_strategy()) {
        let basis = model.basis_set();
        let mut sorted = basis.clone();
        sorted.sort();
        prop_assert_eq!(&basis, &sorted);
        for statement in &basis {
            prop_assert!(statement.contains(" _||_ "));
        }
    }
}

//! Integration tests for primer-causal: structural queries, path
//! enumeration, v-structures, Markov equivalence, basis sets, and
//! intervention surgery, on hand-built graphs and the teaching fixtures.

use primer_causal::{CausalModel, Edge};
use primer_core::PrimerError;

/// X -> Y -> Z.
fn chain() -> CausalModel {
    let mut model = CausalModel::new();
    model.add_causation("X", "Y", None);
    model.add_causation("Y", "Z", None);
    model
}

/// Confounder over a direct effect: Z -> X, Z -> Y, X -> Y.
fn confounded() -> CausalModel {
    let mut model = CausalModel::new();
    model.add_causation("Z", "X", None);
    model.add_causation("Z", "Y", None);
    model.add_causation("X", "Y", None);
    model
}

fn path(nodes: &[&str]) -> Vec<String> {
    nodes.iter().map(|n| n.to_string()).collect()
}

fn primer_fig_2_9() -> CausalModel {
    CausalModel::load(test_fixtures::fixture_path("dags/Primer.Fig.2.9.dot")).unwrap()
}

// =============================================================================
// Structural queries
// =============================================================================

#[test]
fn chain_structure() {
    let model = chain();
    assert_eq!(model.parents("Y").unwrap(), vec!["X"]);
    assert_eq!(model.children("Y").unwrap(), vec!["Z"]);
    assert_eq!(
        model.ancestors("Z").unwrap(),
        ["X", "Y"].iter().map(|n| n.to_string()).collect()
    );
    assert_eq!(
        model.descendants("X").unwrap(),
        ["Y", "Z"].iter().map(|n| n.to_string()).collect()
    );
}

#[test]
fn inputs_and_outputs_are_the_zero_degree_nodes() {
    let model = primer_fig_2_9();
    assert_eq!(
        model.inputs(),
        ["Z1", "Z2"].iter().map(|n| n.to_string()).collect()
    );
    assert_eq!(
        model.outputs(),
        ["Y"].iter().map(|n| n.to_string()).collect()
    );
}

#[test]
fn unknown_node_fails_with_node_not_found() {
    let model = chain();
    assert!(matches!(
        model.parents("Q"),
        Err(PrimerError::NodeNotFound { ref label }) if label == "Q"
    ));
}

// =============================================================================
// Path enumeration
// =============================================================================

#[test]
fn directed_paths_are_a_subset_of_all_paths() {
    let model = primer_fig_2_9();
    let directed = model.directed_paths("X", "Y").unwrap();
    let all = model.all_paths("X", "Y").unwrap();
    assert!(directed.is_subset(&all));
    assert_eq!(directed.len(), 1);
    assert_eq!(all.len(), 5);
}

#[test]
fn backdoor_paths_are_disjoint_from_directed_paths() {
    let model = primer_fig_2_9();
    let directed = model.directed_paths("X", "Y").unwrap();
    let backdoor = model.backdoor_paths("X", "Y").unwrap();
    assert!(backdoor.is_disjoint(&directed));
    assert_eq!(backdoor.len(), 4);
    assert!(backdoor.contains(&path(&["X", "Z3", "Y"])));
    assert!(backdoor.contains(&path(&["X", "Z1", "Z3", "Z2", "Y"])));
}

#[test]
fn conditioning_removes_paths_through_the_adjustment_set() {
    let model = primer_fig_2_9();
    let open = model.all_paths_conditional("X", "Y", &["Z3"]).unwrap();
    // Every backdoor route runs through Z3; only the causal path survives.
    assert_eq!(open.len(), 1);
    assert!(open.contains(&path(&["X", "W", "Y"])));
}

// =============================================================================
// v-structures
// =============================================================================

#[test]
fn collider_is_a_single_v_structure() {
    let mut model = CausalModel::new();
    model.add_causation("X", "Y", None);
    model.add_causation("Z", "Y", None);
    assert_eq!(model.v_structures().len(), 1);

    // Connecting the parents dissolves it.
    model.add_causation("X", "Z", None);
    assert!(model.v_structures().is_empty());
}

#[test]
fn fig_2_9_has_three_v_structures() {
    let model = primer_fig_2_9();
    let structs = model.v_structures();
    assert_eq!(structs.len(), 3);
    let rendered: Vec<String> = structs.iter().map(|v| v.to_string()).collect();
    assert!(rendered.contains(&"Z1 -> Z3 <- Z2".to_string()));
    assert!(rendered.contains(&"W -> Y <- Z2".to_string()));
    assert!(rendered.contains(&"W -> Y <- Z3".to_string()));
}

// =============================================================================
// Markov equivalence
// =============================================================================

#[test]
fn chain_equivalence_class_contains_the_fork() {
    let model = chain();
    let class = model.equivalence_class();
    assert_eq!(class.len(), 2);
    assert!(class[0].reversed.is_none());
    assert_eq!(class[1].reversed, Some(Edge::new("Y", "X")));
}

#[test]
fn equivalence_members_share_skeleton_and_v_structures() {
    let model = primer_fig_2_9();
    let structs = model.v_structures();
    for member in model.equivalence_class() {
        assert_eq!(member.model.v_structures(), structs);
        assert_eq!(member.model.edge_count(), model.edge_count());
        assert!(primer_causal::acyclicity::is_acyclic(&member.model));
    }
}

#[test]
fn cycle_inducing_flip_is_excluded() {
    // a -> b plus a -> c -> b: flipping a -> b would close a cycle.
    let mut model = CausalModel::new();
    model.add_causation("a", "b", None);
    model.add_causation("a", "c", None);
    model.add_causation("c", "b", None);

    for member in model.equivalence_class() {
        assert!(primer_causal::acyclicity::is_acyclic(&member.model));
        assert_ne!(member.reversed, Some(Edge::new("b", "a")));
    }
}

// =============================================================================
// Basis sets
// =============================================================================

#[test]
fn chain_basis_is_the_screened_off_endpoint() {
    assert_eq!(chain().basis_set(), vec!["Z _||_ X | Y".to_string()]);
}

#[test]
fn fig_2_9_basis_statements() {
    let basis = primer_fig_2_9().basis_set();
    assert!(basis.contains(&"Z1 _||_ Z2".to_string()));
    assert!(basis.contains(&"W _||_ Z1, Z2, Z3 | X".to_string()));
    // Sorted output.
    let mut sorted = basis.clone();
    sorted.sort();
    assert_eq!(basis, sorted);
}

// =============================================================================
// Interventions
// =============================================================================

#[test]
fn intervention_cuts_every_incoming_edge() {
    let model = primer_fig_2_9();
    let surgery = model.intervention_graph(&["X"], false).unwrap();
    assert!(surgery.parents("X").unwrap().is_empty());
    assert!(surgery.has_edge("X", "W"));
    // Downstream structure is untouched.
    assert_eq!(surgery.parents("Y").unwrap(), model.parents("Y").unwrap());
}

#[test]
fn sequential_interventions_compose() {
    let model = primer_fig_2_9();
    let surgery = model
        .intervention_graph(&["X"], false)
        .unwrap()
        .intervention_graph(&["Z3"], false)
        .unwrap();
    assert!(surgery.parents("X").unwrap().is_empty());
    assert!(surgery.parents("Z3").unwrap().is_empty());
}

#[test]
fn conditional_intervention_installs_the_replacement_mechanism() {
    let model = confounded();
    let surgery = model
        .conditional_intervention_graph(&["X"], &[Edge::new("W", "X")], false)
        .unwrap();
    assert_eq!(surgery.parents("X").unwrap(), vec!["W"]);
    assert!(!surgery.has_edge("Z", "X"));
}

//! # primer-causal
//!
//! The causal-DAG model. Wraps a `petgraph` directed graph with labeled
//! edges and an optional 2D layout, and provides the graph-theoretic
//! queries used in causal-inference pedagogy: structural relations,
//! path enumeration (directed vs. backdoor), v-structure detection,
//! Markov-equivalence enumeration, basis sets, and intervention surgery.

pub mod acyclicity;
pub mod equivalence;
pub mod model;
pub mod v_structures;

mod basis;
mod intervention;
mod paths;
mod persistence;
mod query;

pub use equivalence::EquivalentModel;
pub use model::{CausalGraph, CausalLink, CausalModel, Edge};
pub use paths::PathSet;
pub use v_structures::VStructure;

//! # primer-core
//!
//! Foundation crate for the primer causal-DAG toolkit.
//! Defines the error taxonomy, 2D geometry for node layouts, and the
//! display palette. Every other crate in the workspace depends on this.

pub mod errors;
pub mod geometry;
pub mod palette;

// Re-export the most commonly used types at the crate root.
pub use errors::{PrimerError, PrimerResult};
pub use geometry::{Layout, Point};
pub use palette::Palette;

//! # primer-render
//!
//! Presentation layer for causal-DAG models: a layered hierarchical layout
//! and an SVG writer with categorical node coloring, edge-label annotations,
//! and path highlighting.

pub mod layout;
pub mod svg;

pub use layout::layered_layout;
pub use svg::{
    render_path_svg, render_path_to_file, render_svg, render_to_file, RenderOptions,
};

//! Display palette: an ordered list of colors used cyclically when
//! rendering node categories and highlighted paths.

use serde::{Deserialize, Serialize};

/// Index of the color used for regular nodes.
pub const ROLE_REGULAR: usize = 0;
/// Index of the color used for output nodes (zero out-degree).
pub const ROLE_OUTPUT: usize = 1;
/// Index of the color used for input nodes (zero in-degree).
pub const ROLE_INPUT: usize = 2;

/// An ordered color cycle. Indexing wraps around, so any role or path index
/// maps to a color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette from explicit hex colors.
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    /// Color for the given index, wrapping around the cycle.
    pub fn color(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    /// Number of distinct colors before the cycle repeats.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    /// The matplotlib default property cycle ("tab10").
    fn default() -> Self {
        Self {
            colors: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
                "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
        }
    }
}

//! Load and save models through the DOT text format. A coordinate map is
//! read back iff every node in the file carries `x` and `y` attributes.

use std::path::Path;

use tracing::debug;

use primer_core::{Layout, Point, PrimerError, PrimerResult};
use primer_dot::DotGraph;

use crate::model::CausalModel;

impl CausalModel {
    /// Load a model from a `.dot` file. Only the first graph in the file is
    /// read; the rest are silently ignored.
    pub fn load(path: impl AsRef<Path>) -> PrimerResult<Self> {
        let path = path.as_ref();
        let dot = primer_dot::read_file(path)?;
        let model = Self::from_dot(&dot)?;
        debug!(
            path = %path.display(),
            nodes = model.node_count(),
            edges = model.edge_count(),
            layout = model.layout().is_some(),
            "loaded causal model"
        );
        Ok(model)
    }

    /// Save the model as a `.dot` file, injecting per-node `x`/`y`
    /// attributes when a layout is present.
    pub fn save(&self, path: impl AsRef<Path>) -> PrimerResult<()> {
        let path = path.as_ref();
        let dot = self.to_dot()?;
        primer_dot::write_file(&dot, path)?;
        debug!(
            path = %path.display(),
            nodes = self.node_count(),
            edges = self.edge_count(),
            "saved causal model"
        );
        Ok(())
    }

    /// Build a model from a parsed DOT graph. Node `x`/`y` attributes become
    /// the layout when every node carries both; otherwise no layout is set.
    pub fn from_dot(dot: &DotGraph) -> PrimerResult<Self> {
        let mut model = CausalModel::new();
        for node in &dot.nodes {
            model.ensure_node(&node.id);
        }
        for edge in &dot.edges {
            model.add_causation(
                &edge.source,
                &edge.target,
                edge.attrs.get("label").map(String::as_str),
            );
        }

        let mut layout = Layout::new();
        let mut complete = !dot.nodes.is_empty();
        for node in &dot.nodes {
            match (node.attrs.get("x"), node.attrs.get("y")) {
                (Some(x), Some(y)) => {
                    layout.insert(
                        node.id.clone(),
                        Point::new(
                            parse_coordinate(&node.id, x)?,
                            parse_coordinate(&node.id, y)?,
                        ),
                    );
                }
                _ => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            model.set_layout(layout);
        }
        Ok(model)
    }

    /// Serialize to a DOT graph. A layout that is present but missing a
    /// node's entry is an error.
    pub fn to_dot(&self) -> PrimerResult<DotGraph> {
        let mut dot = DotGraph::new(None);
        for label in self.nodes() {
            let node = dot.ensure_node(label);
            if let Some(layout) = self.layout() {
                let point =
                    layout
                        .get(label)
                        .ok_or_else(|| PrimerError::LayoutEntryMissing {
                            label: label.to_string(),
                        })?;
                node.attrs.insert("x".to_string(), point.x.to_string());
                node.attrs.insert("y".to_string(), point.y.to_string());
            }
        }
        for (source, target, link) in self.edges() {
            let mut attrs = std::collections::BTreeMap::new();
            if let Some(label) = &link.label {
                attrs.insert("label".to_string(), label.clone());
            }
            dot.add_edge(source, target, attrs);
        }
        Ok(dot)
    }
}

fn parse_coordinate(label: &str, value: &str) -> PrimerResult<f64> {
    value
        .parse()
        .map_err(|_| PrimerError::InvalidCoordinate {
            label: label.to_string(),
            value: value.to_string(),
        })
}

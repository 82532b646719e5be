//! Layered (Sugiyama-style) layout: longest-path layering over a topological
//! order, barycenter ordering within layers, and coordinates centered and
//! rescaled to unit radius. A degenerate single-column layout is rotated to
//! run horizontally.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use primer_causal::{acyclicity, CausalModel};
use primer_core::{Layout, Point, PrimerError, PrimerResult};

const EQUAL_EPS: f64 = 1e-9;

/// Compute a hierarchical layout for the model. Fails on cyclic graphs.
pub fn layered_layout(model: &CausalModel) -> PrimerResult<Layout> {
    if model.node_count() == 0 {
        return Ok(Layout::new());
    }
    let graph = model.graph();
    let order = toposort(graph, None).map_err(|cycle| {
        let path = acyclicity::find_cycles(model)
            .into_iter()
            .next()
            .map(|mut labels| {
                labels.push(labels[0].clone());
                labels.join(" -> ")
            })
            .or_else(|| graph.node_weight(cycle.node_id()).cloned())
            .unwrap_or_default();
        PrimerError::CycleDetected { path }
    })?;

    // Longest-path layering: roots at layer 0, every other node one past its
    // deepest predecessor.
    let mut layer_of: HashMap<NodeIndex, usize> = HashMap::new();
    let mut depth = 0;
    for &idx in &order {
        let layer = graph
            .neighbors_directed(idx, Direction::Incoming)
            .filter_map(|p| layer_of.get(&p))
            .max()
            .map_or(0, |deepest| deepest + 1);
        depth = depth.max(layer);
        layer_of.insert(idx, layer);
    }
    let mut layers: Vec<Vec<NodeIndex>> = vec![Vec::new(); depth + 1];
    for &idx in &order {
        layers[layer_of[&idx]].push(idx);
    }

    // Barycenter sweeps: order each layer by the mean position of its
    // predecessors to reduce crossings.
    let mut position: HashMap<NodeIndex, f64> = HashMap::new();
    for layer in &layers {
        for (i, &idx) in layer.iter().enumerate() {
            position.insert(idx, i as f64);
        }
    }
    for _ in 0..2 {
        for layer in layers.iter_mut().skip(1) {
            let barycenter: HashMap<NodeIndex, f64> = layer
                .iter()
                .map(|&idx| {
                    let preds: Vec<f64> = graph
                        .neighbors_directed(idx, Direction::Incoming)
                        .filter_map(|p| position.get(&p).copied())
                        .collect();
                    let center = if preds.is_empty() {
                        position[&idx]
                    } else {
                        preds.iter().sum::<f64>() / preds.len() as f64
                    };
                    (idx, center)
                })
                .collect();
            layer.sort_by(|a, b| {
                barycenter[a]
                    .partial_cmp(&barycenter[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            for (i, &idx) in layer.iter().enumerate() {
                position.insert(idx, i as f64);
            }
        }
    }

    // Coordinates: layers run top to bottom, nodes centered within a layer.
    let mut points: Vec<(String, Point)> = Vec::with_capacity(order.len());
    for (layer_index, layer) in layers.iter().enumerate() {
        let offset = (layer.len() as f64 - 1.0) / 2.0;
        for (i, &idx) in layer.iter().enumerate() {
            let Some(label) = graph.node_weight(idx) else {
                continue;
            };
            points.push((
                label.clone(),
                Point::new(i as f64 - offset, -(layer_index as f64)),
            ));
        }
    }

    rescale_to_unit(&mut points);

    // All x equal means a single column: rotate to lay the graph out
    // horizontally.
    let xs: Vec<f64> = points.iter().map(|(_, p)| p.x).collect();
    if span(&xs) < EQUAL_EPS {
        for (_, point) in points.iter_mut() {
            *point = Point::new(-point.y, point.x);
        }
    }

    Ok(points.into_iter().collect())
}

/// Center on the mean and scale the largest absolute coordinate to 1.
fn rescale_to_unit(points: &mut [(String, Point)]) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(_, p)| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, p)| p.y).sum::<f64>() / n;
    let mut limit = 0.0f64;
    for (_, point) in points.iter_mut() {
        point.x -= mean_x;
        point.y -= mean_y;
        limit = limit.max(point.x.abs()).max(point.y.abs());
    }
    if limit > 0.0 {
        for (_, point) in points.iter_mut() {
            point.x /= limit;
            point.y /= limit;
        }
    }
}

fn span(values: &[f64]) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        max - min
    } else {
        0.0
    }
}

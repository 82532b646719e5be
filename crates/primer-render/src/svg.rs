//! SVG text writer: palette-colored node circles, labeled arrowhead edges,
//! an optional legend, and optional path highlighting. Fixed 960x720 canvas.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use tracing::debug;

use primer_causal::CausalModel;
use primer_core::{palette, Layout, Point, PrimerError, PrimerResult};

use crate::layout::layered_layout;

const NODE_RADIUS: f64 = 18.0;
const MARGIN: f64 = 70.0;

/// Rendering knobs. Defaults match the plain draw: fixed canvas, regular
/// coloring for every node, no legend.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    /// Color inputs and outputs differently from regular nodes.
    pub color_roles: bool,
    pub legend: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 720.0,
            color_roles: false,
            legend: false,
        }
    }
}

/// Render the model as an SVG document. Uses the model's layout, computing a
/// layered one when none is set.
pub fn render_svg(model: &CausalModel, options: &RenderOptions) -> PrimerResult<String> {
    let layout = effective_layout(model)?;
    document(model, &layout, None, false, options)
}

/// Render with one path highlighted by a thick stroke; a conditioning path is
/// drawn dashed. The path is an ordered node sequence; its edges match the
/// graph's edges regardless of orientation.
pub fn render_path_svg(
    model: &CausalModel,
    path: &[String],
    conditional: bool,
    options: &RenderOptions,
) -> PrimerResult<String> {
    let layout = effective_layout(model)?;
    document(model, &layout, Some(path), conditional, options)
}

/// Render to an SVG file.
pub fn render_to_file(
    model: &CausalModel,
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> PrimerResult<()> {
    let path = path.as_ref();
    let svg = render_svg(model, options)?;
    std::fs::write(path, &svg)?;
    debug!(path = %path.display(), bytes = svg.len(), "rendered model to file");
    Ok(())
}

/// Render with a highlighted path to an SVG file.
pub fn render_path_to_file(
    model: &CausalModel,
    highlighted: &[String],
    conditional: bool,
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> PrimerResult<()> {
    let path = path.as_ref();
    let svg = render_path_svg(model, highlighted, conditional, options)?;
    std::fs::write(path, &svg)?;
    debug!(path = %path.display(), bytes = svg.len(), "rendered path to file");
    Ok(())
}

fn effective_layout(model: &CausalModel) -> PrimerResult<Layout> {
    match model.layout() {
        Some(layout) => Ok(layout.clone()),
        None => layered_layout(model),
    }
}

fn document(
    model: &CausalModel,
    layout: &Layout,
    highlighted: Option<&[String]>,
    conditional: bool,
    options: &RenderOptions,
) -> PrimerResult<String> {
    let palette = model.palette();
    let inputs = model.inputs();
    let outputs = model.outputs();

    // Unordered node pairs covered by the highlighted path.
    let highlight_pairs: BTreeSet<(String, String)> = highlighted
        .unwrap_or(&[])
        .windows(2)
        .map(|pair| ordered_pair(&pair[0], &pair[1]))
        .collect();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">",
        options.width, options.height, options.width, options.height
    );
    svg.push_str(
        "  <defs>\n    <marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" \
         markerWidth=\"8\" markerHeight=\"8\" orient=\"auto-start-reverse\">\n      \
         <path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"#333333\"/>\n    </marker>\n  </defs>\n",
    );
    let _ = writeln!(
        svg,
        "  <rect width=\"{:.0}\" height=\"{:.0}\" fill=\"#ffffff\"/>",
        options.width, options.height
    );

    // Edges first so circles cover the line ends.
    for (source, target, link) in model.edges() {
        let from = canvas_point(require_entry(layout, source)?, options);
        let to = canvas_point(require_entry(layout, target)?, options);
        let (start, end) = trim_to_radius(from, to);

        let highlighted_edge = highlight_pairs.contains(&ordered_pair(source, target));
        let (stroke, width) = if highlighted_edge {
            (palette.color(palette::ROLE_OUTPUT), 4.0)
        } else {
            ("#333333", 1.5)
        };
        let dash = if highlighted_edge && conditional {
            " stroke-dasharray=\"6, 4\""
        } else {
            ""
        };
        let _ = writeln!(
            svg,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" \
             stroke-width=\"{:.1}\"{} marker-end=\"url(#arrow)\"/>",
            start.x, start.y, end.x, end.y, stroke, width, dash
        );

        if let Some(label) = &link.label {
            let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
            let _ = writeln!(
                svg,
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"12\" \
                 fill=\"#555555\" text-anchor=\"middle\" dy=\"-4\">{}</text>",
                mid.x,
                mid.y,
                escape_text(label)
            );
        }
    }

    for label in model.nodes() {
        let center = canvas_point(require_entry(layout, label)?, options);
        let fill = if options.color_roles && inputs.contains(label) {
            palette.color(palette::ROLE_INPUT)
        } else if options.color_roles && outputs.contains(label) {
            palette.color(palette::ROLE_OUTPUT)
        } else {
            palette.color(palette::ROLE_REGULAR)
        };
        let _ = writeln!(
            svg,
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{:.0}\" fill=\"{}\" stroke=\"#333333\"/>",
            center.x, center.y, NODE_RADIUS, fill
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"14\" \
             fill=\"#ffffff\" text-anchor=\"middle\" dy=\"0.35em\">{}</text>",
            center.x,
            center.y,
            escape_text(label)
        );
    }

    if options.legend {
        let entries = [
            ("Regular node", palette.color(palette::ROLE_REGULAR)),
            ("Input", palette.color(palette::ROLE_INPUT)),
            ("Output", palette.color(palette::ROLE_OUTPUT)),
        ];
        for (i, (name, color)) in entries.iter().enumerate() {
            let y = 24.0 + i as f64 * 24.0;
            let _ = writeln!(
                svg,
                "  <circle cx=\"24\" cy=\"{y:.0}\" r=\"8\" fill=\"{color}\" stroke=\"#333333\"/>"
            );
            let _ = writeln!(
                svg,
                "  <text x=\"40\" y=\"{y:.0}\" font-family=\"sans-serif\" font-size=\"13\" \
                 fill=\"#333333\" dy=\"0.35em\">{name}</text>"
            );
        }
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn require_entry<'a>(layout: &'a Layout, label: &str) -> PrimerResult<&'a Point> {
    layout.get(label).ok_or_else(|| PrimerError::LayoutEntryMissing {
        label: label.to_string(),
    })
}

/// Map a layout point (roughly the unit box) onto the canvas, y up.
fn canvas_point(point: &Point, options: &RenderOptions) -> Point {
    Point::new(
        options.width / 2.0 + point.x * (options.width / 2.0 - MARGIN),
        options.height / 2.0 - point.y * (options.height / 2.0 - MARGIN),
    )
}

/// Pull both endpoints in by the node radius so arrowheads touch the circle
/// border instead of its center.
fn trim_to_radius(from: Point, to: Point) -> (Point, Point) {
    let distance = from.distance(&to);
    if distance <= 2.0 * NODE_RADIUS {
        return (from, to);
    }
    let ux = (to.x - from.x) / distance;
    let uy = (to.y - from.y) / distance;
    (
        Point::new(from.x + ux * NODE_RADIUS, from.y + uy * NODE_RADIUS),
        Point::new(to.x - ux * NODE_RADIUS, to.y - uy * NODE_RADIUS),
    )
}

fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confounded() -> CausalModel {
        let mut model = CausalModel::new();
        model.add_causation("Z", "X", None);
        model.add_causation("Z", "Y", None);
        model.add_causation("X", "Y", Some("direct"));
        model
    }

    #[test]
    fn renders_one_circle_per_node() {
        let svg = render_svg(&confounded(), &RenderOptions::default()).unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<line").count(), 3);
        assert!(svg.contains("marker-end=\"url(#arrow)\""));
        assert!(svg.contains(">direct</text>"));
    }

    #[test]
    fn role_coloring_distinguishes_inputs_and_outputs() {
        let model = confounded();
        let plain = render_svg(&model, &RenderOptions::default()).unwrap();
        let colored = render_svg(
            &model,
            &RenderOptions {
                color_roles: true,
                ..RenderOptions::default()
            },
        )
        .unwrap();
        let input_color = model.palette().color(palette::ROLE_INPUT);
        assert!(!plain.contains(input_color));
        assert!(colored.contains(input_color));
    }

    #[test]
    fn conditional_path_is_dashed() {
        let model = confounded();
        let path = vec!["X".to_string(), "Z".to_string(), "Y".to_string()];
        let solid = render_path_svg(&model, &path, false, &RenderOptions::default()).unwrap();
        let dashed = render_path_svg(&model, &path, true, &RenderOptions::default()).unwrap();
        assert!(!solid.contains("stroke-dasharray"));
        assert_eq!(dashed.matches("stroke-dasharray").count(), 2);
    }

    #[test]
    fn legend_lists_the_three_roles() {
        let svg = render_svg(
            &confounded(),
            &RenderOptions {
                legend: true,
                ..RenderOptions::default()
            },
        )
        .unwrap();
        assert!(svg.contains("Regular node"));
        assert!(svg.contains(">Input</text>"));
        assert!(svg.contains(">Output</text>"));
    }

    #[test]
    fn labels_are_escaped() {
        let mut model = CausalModel::new();
        model.add_causation("A", "B", Some("a<b"));
        let svg = render_svg(&model, &RenderOptions::default()).unwrap();
        assert!(svg.contains("a&lt;b"));
    }
}

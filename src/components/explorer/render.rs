//! Canvas drawing for the explorer.
//!
//! Two surfaces: the main graph canvas (links with directional arrows and
//! zoom-gated labels, then nodes with zoom-gated id labels) and the 200x200
//! minimap (node dots plus the red viewport outline). Colors are resolved
//! per paint through the core's pure color functions; nothing here mutates
//! state.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use crate::graph::minimap::{MINIMAP_SIZE, MinimapFrame};
use crate::graph::selection::{self, Highlight};
use crate::graph::store::DEFAULT_NODE_COLOR;
use crate::graph::types::Graph;

use super::view::{NodePoint, ViewState};

const BACKGROUND_COLOR: &str = "#ffffff";
const NODE_RADIUS: f64 = 5.0;
const LINK_WIDTH: f64 = 2.0;
const ARROW_SIZE: f64 = 6.0;
const LABEL_COLOR: &str = "#1a1a1a";

/// Node id labels appear once zoomed in past this level.
const NODE_LABEL_MIN_ZOOM: f64 = 1.5;
/// Link relation labels appear once zoomed in past this level.
const LINK_LABEL_MIN_ZOOM: f64 = 2.0;

const MINIMAP_DOT_RADIUS: f64 = 1.5;

/// Draw the full graph view for one frame.
pub fn render(
	view: &ViewState,
	graph: &Graph,
	highlight: &Highlight,
	ctx: &CanvasRenderingContext2d,
) {
	ctx.set_fill_style_str(BACKGROUND_COLOR);
	ctx.fill_rect(0.0, 0.0, view.width, view.height);

	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);

	let points = view.nodes();
	let positions: HashMap<DefaultNodeIdx, (f64, f64)> =
		points.iter().map(|p| (p.idx, (p.x, p.y))).collect();
	let k = view.transform.k;
	// Keep nodes at least 5px on screen when zoomed far out.
	let radius = NODE_RADIUS.max(NODE_RADIUS / k);

	draw_links(view, graph, highlight, ctx, &positions, k, radius);
	draw_nodes(graph, highlight, ctx, &points, k, radius);

	ctx.restore();
}

#[allow(clippy::too_many_arguments)]
fn draw_links(
	view: &ViewState,
	graph: &Graph,
	highlight: &Highlight,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
	k: f64,
	radius: f64,
) {
	ctx.set_line_width(LINK_WIDTH / k);

	for edge in &view.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(&edge.a), positions.get(&edge.b))
		else {
			continue;
		};
		let Some(link) = graph.links.get(edge.link) else {
			continue;
		};
		let color = selection::link_color(edge.link, link, highlight);

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_stroke_style_str(color);
		ctx.begin_path();
		ctx.move_to(x1 + ux * radius, y1 + uy * radius);
		ctx.line_to(x2 - ux * (radius + ARROW_SIZE), y2 - uy * (radius + ARROW_SIZE));
		ctx.stroke();

		// Directional arrowhead at the target end.
		let (tip_x, tip_y) = (x2 - ux * radius, y2 - uy * radius);
		let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
		let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();

		if k >= LINK_LABEL_MIN_ZOOM {
			if let Some(label) = &link.label {
				ctx.set_fill_style_str(LABEL_COLOR);
				ctx.set_font(&format!("{}px sans-serif", 12.0 / k));
				ctx.set_text_align("center");
				ctx.set_text_baseline("middle");
				let _ = ctx.fill_text(label, (x1 + x2) / 2.0, (y1 + y2) / 2.0);
				ctx.set_text_align("start");
				ctx.set_text_baseline("alphabetic");
			}
		}
	}
}

fn draw_nodes(
	graph: &Graph,
	highlight: &Highlight,
	ctx: &CanvasRenderingContext2d,
	points: &[NodePoint],
	k: f64,
	radius: f64,
) {
	for point in points {
		let Some(node) = graph.nodes.get(point.index) else {
			continue;
		};
		ctx.begin_path();
		let _ = ctx.arc(point.x, point.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(selection::node_color(node, highlight));
		ctx.fill();

		if k >= NODE_LABEL_MIN_ZOOM {
			ctx.set_fill_style_str("black");
			ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k));
			let _ = ctx.fill_text(&node.id, point.x + 6.0, point.y + 6.0);
		}
	}
}

/// Draw one minimap frame. A `None` frame means the layout has produced no
/// positions yet; the canvas is cleared and the caller retries next frame.
pub fn render_minimap(frame: Option<&MinimapFrame>, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, MINIMAP_SIZE, MINIMAP_SIZE);
	let Some(frame) = frame else {
		return;
	};

	ctx.set_fill_style_str(DEFAULT_NODE_COLOR);
	for &(x, y) in &frame.points {
		ctx.begin_path();
		let _ = ctx.arc(x, y, MINIMAP_DOT_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
	}

	ctx.set_stroke_style_str("red");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(
		frame.viewport.x,
		frame.viewport.y,
		frame.viewport.width,
		frame.viewport.height,
	);
}

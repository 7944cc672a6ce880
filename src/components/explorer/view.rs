//! Renderer-boundary state for the explorer view.
//!
//! Wraps the `force_graph` physics simulation with pan/zoom transforms,
//! drag/pan tracking, node and link hit-testing, and an eased camera
//! animation for search focus. This layer owns node positions and camera
//! state; the analysis core under `crate::graph` only ever reads them.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::minimap::Camera;
use crate::graph::types::Graph;

/// Per-node metadata attached to each simulation node: where it lives in
/// the filtered graph snapshot.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	/// Index into the filtered graph's node vector.
	pub index: usize,
	/// Node id, kept for position carry-over across rebuilds.
	pub id: String,
}

/// Pan and zoom transform applied to the entire view.
#[derive(Clone, Copy, Debug)]
pub struct ViewTransform {
	/// Screen-space x offset.
	pub x: f64,
	/// Screen-space y offset.
	pub y: f64,
	/// Zoom factor, clamped to 0.1..10.0.
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a drag is active.
	pub active: bool,
	/// The dragged simulation node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer x at drag start.
	pub start_x: f64,
	/// Pointer y at drag start.
	pub start_y: f64,
	/// Node x at drag start.
	pub node_start_x: f32,
	/// Node y at drag start.
	pub node_start_y: f32,
}

/// Tracks an in-progress background pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is active.
	pub active: bool,
	/// Pointer x at pan start.
	pub start_x: f64,
	/// Pointer y at pan start.
	pub start_y: f64,
	/// Transform x at pan start.
	pub transform_start_x: f64,
	/// Transform y at pan start.
	pub transform_start_y: f64,
}

/// An edge of the view: two simulation nodes and the filtered-graph link
/// they render.
#[derive(Clone, Copy, Debug)]
pub struct ViewEdge {
	/// Source simulation node.
	pub a: DefaultNodeIdx,
	/// Target simulation node.
	pub b: DefaultNodeIdx,
	/// Index into the filtered graph's link vector.
	pub link: usize,
}

/// A node's position snapshot for one frame.
#[derive(Clone, Copy, Debug)]
pub struct NodePoint {
	/// Simulation index.
	pub idx: DefaultNodeIdx,
	/// Index into the filtered graph's node vector.
	pub index: usize,
	/// Graph-space x.
	pub x: f64,
	/// Graph-space y.
	pub y: f64,
}

/// An eased in-flight camera transition.
struct CameraAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

const NODE_HIT_RADIUS: f64 = 12.0;
const LINK_HIT_DISTANCE: f64 = 6.0;

/// View state: simulation, transform, interaction trackers, camera motion.
pub struct ViewState {
	sim: ForceGraph<NodeVisual, ()>,
	/// Edges in filtered-link order.
	pub edges: Vec<ViewEdge>,
	/// Current pan/zoom transform.
	pub transform: ViewTransform,
	/// Current drag tracker.
	pub drag: DragState,
	/// Current pan tracker.
	pub pan: PanState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	camera_animation: Option<CameraAnimation>,
}

impl ViewState {
	/// Build a view for a filtered graph snapshot.
	pub fn new(graph: &Graph, width: f64, height: f64) -> Self {
		Self::build(
			graph,
			width,
			height,
			&HashMap::new(),
			ViewTransform {
				x: 0.0,
				y: 0.0,
				k: 1.0,
			},
		)
	}

	/// Rebuild after a refilter, carrying over positions of surviving nodes
	/// so tightening the threshold does not scramble the layout.
	pub fn rebuild(&mut self, graph: &Graph) {
		let mut previous: HashMap<String, (f32, f32)> = HashMap::new();
		self.sim.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		*self = Self::build(graph, self.width, self.height, &previous, self.transform);
	}

	fn build(
		graph: &Graph,
		width: f64,
		height: f64,
		previous: &HashMap<String, (f32, f32)>,
		transform: ViewTransform,
	) -> Self {
		let mut sim = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let mut id_to_idx = HashMap::new();
		for (i, node) in graph.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / graph.nodes.len() as f64;
			let (x, y) = previous.get(&node.id).copied().unwrap_or((
				(width / 2.0 + 100.0 * angle.cos()) as f32,
				(height / 2.0 + 100.0 * angle.sin()) as f32,
			));
			let idx = sim.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeVisual {
					index: i,
					id: node.id.clone(),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::with_capacity(graph.links.len());
		for (i, link) in graph.links.iter().enumerate() {
			if let (Some(&a), Some(&b)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				sim.add_edge(a, b, EdgeData::default());
				edges.push(ViewEdge { a, b, link: i });
			}
		}

		Self {
			sim,
			edges,
			transform,
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			camera_animation: None,
		}
	}

	/// Snapshot every node's current position.
	pub fn nodes(&self) -> Vec<NodePoint> {
		let mut points = Vec::new();
		self.sim.visit_nodes(|node| {
			points.push(NodePoint {
				idx: node.index(),
				index: node.data.user_data.index,
				x: node.x() as f64,
				y: node.y() as f64,
			});
		});
		points
	}

	/// Current position of a node by id.
	pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
		let mut found = None;
		self.sim.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	/// Map a screen point into graph space under the current transform.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Camera state as the minimap reads it: the graph-space point at the
	/// screen center plus the zoom factor.
	pub fn camera(&self) -> Camera {
		let (x, y) = self.screen_to_graph(self.width / 2.0, self.height / 2.0);
		Camera {
			x,
			y,
			zoom: self.transform.k,
		}
	}

	/// Hit-test a screen point against node circles. The hit radius stays
	/// roughly constant on screen regardless of zoom.
	pub fn node_at(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let radius = (NODE_HIT_RADIUS / self.transform.k)
			.clamp(NODE_HIT_RADIUS / 2.0, NODE_HIT_RADIUS * 2.0);
		let mut found = None;
		self.sim.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Filtered-graph node index for a simulation node.
	pub fn graph_index(&self, idx: DefaultNodeIdx) -> Option<usize> {
		let mut found = None;
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.index);
			}
		});
		found
	}

	/// Hit-test a screen point against link segments, returning the
	/// filtered-graph link index of the closest hit.
	pub fn link_at(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let tolerance = LINK_HIT_DISTANCE / self.transform.k.max(1.0);
		let positions: HashMap<DefaultNodeIdx, (f64, f64)> = self
			.nodes()
			.into_iter()
			.map(|p| (p.idx, (p.x, p.y)))
			.collect();

		let mut best: Option<(usize, f64)> = None;
		for edge in &self.edges {
			let (Some(&(x1, y1)), Some(&(x2, y2))) =
				(positions.get(&edge.a), positions.get(&edge.b))
			else {
				continue;
			};
			let d = point_segment_distance(gx, gy, x1, y1, x2, y2);
			if d < tolerance && best.is_none_or(|(_, bd)| d < bd) {
				best = Some((edge.link, d));
			}
		}
		best.map(|(link, _)| link)
	}

	/// Start dragging a node: record pointer and node origins and pin it.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = sx;
		self.drag.start_y = sy;
		self.sim.visit_nodes(|node| {
			if node.index() == idx {
				self.drag.node_start_x = node.x();
				self.drag.node_start_y = node.y();
			}
		});
	}

	/// Move the dragged node along with the pointer.
	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (nx, ny) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.sim.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// End any drag, anchoring the released node where it was dropped.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx {
			self.sim.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.is_anchor = true;
				}
			});
		}
		self.drag = DragState::default();
	}

	/// Start panning the background.
	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.camera_animation = None;
		self.pan.active = true;
		self.pan.start_x = sx;
		self.pan.start_y = sy;
		self.pan.transform_start_x = self.transform.x;
		self.pan.transform_start_y = self.transform.y;
	}

	/// Continue a pan.
	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	/// End any pan.
	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom towards a screen point, keeping it fixed under the cursor.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.camera_animation = None;
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Animate the camera so the given graph point lands at the screen
	/// center at the given zoom. Eased over `duration_ms`; a new user pan
	/// or zoom cancels the animation.
	pub fn fly_to(&mut self, gx: f64, gy: f64, zoom: f64, duration_ms: f64) {
		let to = ViewTransform {
			x: self.width / 2.0 - gx * zoom,
			y: self.height / 2.0 - gy * zoom,
			k: zoom,
		};
		self.camera_animation = Some(CameraAnimation {
			from: self.transform,
			to,
			elapsed: 0.0,
			duration: (duration_ms / 1000.0).max(f64::EPSILON),
		});
	}

	/// Advance physics and camera animation by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		self.sim.update(dt as f32);
		if let Some(anim) = &mut self.camera_animation {
			anim.elapsed += dt;
			let t = smooth_step((anim.elapsed / anim.duration).clamp(0.0, 1.0));
			self.transform = ViewTransform {
				x: anim.from.x + (anim.to.x - anim.from.x) * t,
				y: anim.from.y + (anim.to.y - anim.from.y) * t,
				k: anim.from.k + (anim.to.k - anim.from.k) * t,
			};
			if anim.elapsed >= anim.duration {
				self.camera_animation = None;
			}
		}
	}

	/// Resize the view to new canvas dimensions.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Distance from a point to a line segment.
fn point_segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq > 0.0 {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	} else {
		0.0
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn segment_distance_handles_endpoints_and_interior() {
		assert_eq!(point_segment_distance(0.0, 5.0, 0.0, 0.0, 10.0, 0.0), 5.0);
		assert_eq!(point_segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0), 3.0);
		// Beyond the end, distance is to the endpoint.
		assert_eq!(point_segment_distance(13.0, 4.0, 0.0, 0.0, 10.0, 0.0), 5.0);
		// Degenerate segment is a point.
		assert_eq!(point_segment_distance(3.0, 4.0, 0.0, 0.0, 0.0, 0.0), 5.0);
	}

	#[test]
	fn smooth_step_hits_its_endpoints() {
		assert_eq!(smooth_step(0.0), 0.0);
		assert_eq!(smooth_step(1.0), 1.0);
		assert_eq!(smooth_step(0.5), 0.5);
	}

	#[test]
	fn fly_to_centers_target_at_requested_zoom() {
		use crate::graph::test_support::graph_of;
		let graph = graph_of(&["a", "b"], &[("a", "b", None)]);
		let mut view = ViewState::new(&graph, 800.0, 600.0);
		view.fly_to(50.0, 40.0, 4.0, 1000.0);
		view.tick(0.5);
		view.tick(0.6);
		let camera = view.camera();
		assert!((camera.x - 50.0).abs() < 1e-9);
		assert!((camera.y - 40.0).abs() < 1e-9);
		assert!((camera.zoom - 4.0).abs() < 1e-9);
	}

	#[test]
	fn pan_cancels_camera_animation() {
		use crate::graph::test_support::graph_of;
		let graph = graph_of(&["a"], &[]);
		let mut view = ViewState::new(&graph, 800.0, 600.0);
		view.fly_to(50.0, 40.0, 4.0, 1000.0);
		view.begin_pan(10.0, 10.0);
		view.pan_to(30.0, 10.0);
		view.tick(2.0);
		assert_eq!(view.transform.k, 1.0, "zoom untouched after cancel");
		assert_eq!(view.transform.x, 20.0);
	}

	#[test]
	fn rebuild_preserves_surviving_positions() {
		use crate::graph::test_support::graph_of;
		let graph = graph_of(&["a", "b"], &[]);
		let mut view = ViewState::new(&graph, 800.0, 600.0);
		let before = view.position_of("a").unwrap();
		view.rebuild(&graph_of(&["a"], &[]));
		assert_eq!(view.position_of("a").unwrap(), before);
		assert!(view.position_of("b").is_none());
	}
}

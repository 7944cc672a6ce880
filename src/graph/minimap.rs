//! Overview projection: graph-space positions into the fixed minimap square.
//!
//! The projector runs once per animation frame. It reads live node positions
//! and camera state from the renderer and produces a frame of mapped points
//! plus a viewport rectangle; drawing is the caller's job. Until the
//! renderer has positioned at least one node there is nothing to project and
//! the frame is skipped, to be retried next tick.

/// Side length of the square minimap output region.
pub const MINIMAP_SIZE: f64 = 200.0;

/// Camera state read from the renderer each frame: the graph-space point at
/// the center of the main view and the current zoom factor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	/// Graph-space x of the view center.
	pub x: f64,
	/// Graph-space y of the view center.
	pub y: f64,
	/// Zoom factor of the main view.
	pub zoom: f64,
}

/// The main view's extent mapped into minimap coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Rectangle width.
	pub width: f64,
	/// Rectangle height.
	pub height: f64,
}

/// One projected frame: node dots and the viewport outline to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimapFrame {
	/// Node positions in minimap coordinates.
	pub points: Vec<(f64, f64)>,
	/// Visible-extent rectangle in minimap coordinates.
	pub viewport: ViewportRect,
}

/// Project positioned nodes and the camera into the minimap square.
///
/// Returns `None` when no positioned nodes exist yet ("not ready", retry
/// next frame). The bounding box of all positions maps linearly onto the
/// `MINIMAP_SIZE` square, min corner to (0,0) and max corner to
/// (`MINIMAP_SIZE`, `MINIMAP_SIZE`); a degenerate axis substitutes a unit
/// extent so the division stays defined. The viewport rectangle is
/// `MINIMAP_SIZE / zoom` on each side, centered on the mapped camera point.
pub fn project(positions: &[(f64, f64)], camera: Camera) -> Option<MinimapFrame> {
	if positions.is_empty() {
		return None;
	}

	let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
	let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
	for &(x, y) in positions {
		min_x = min_x.min(x);
		max_x = max_x.max(x);
		min_y = min_y.min(y);
		max_y = max_y.max(y);
	}
	let span_x = if max_x > min_x { max_x - min_x } else { 1.0 };
	let span_y = if max_y > min_y { max_y - min_y } else { 1.0 };

	let map = |x: f64, y: f64| {
		(
			(x - min_x) / span_x * MINIMAP_SIZE,
			(y - min_y) / span_y * MINIMAP_SIZE,
		)
	};

	let points = positions.iter().map(|&(x, y)| map(x, y)).collect();
	let (cx, cy) = map(camera.x, camera.y);
	let side = MINIMAP_SIZE / camera.zoom;
	Some(MinimapFrame {
		points,
		viewport: ViewportRect {
			x: cx - side / 2.0,
			y: cy - side / 2.0,
			width: side,
			height: side,
		},
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	const CAMERA: Camera = Camera {
		x: 0.0,
		y: 0.0,
		zoom: 1.0,
	};

	#[test]
	fn no_positions_means_not_ready() {
		assert_eq!(project(&[], CAMERA), None);
	}

	#[test]
	fn corners_map_to_output_corners() {
		let frame = project(&[(-10.0, 5.0), (30.0, 45.0)], CAMERA).unwrap();
		assert_eq!(frame.points[0], (0.0, 0.0));
		assert_eq!(frame.points[1], (MINIMAP_SIZE, MINIMAP_SIZE));
	}

	#[test]
	fn relative_position_is_preserved() {
		let frame = project(&[(0.0, 0.0), (5.0, 25.0), (10.0, 100.0)], CAMERA).unwrap();
		assert_eq!(frame.points[1], (100.0, 50.0));
	}

	#[test]
	fn degenerate_extent_uses_unit_span() {
		// All nodes on one point: every coordinate lands on the min corner
		// instead of dividing by zero.
		let frame = project(&[(7.0, 7.0), (7.0, 7.0)], CAMERA).unwrap();
		assert_eq!(frame.points[0], (0.0, 0.0));
		assert_eq!(frame.points[1], (0.0, 0.0));
	}

	#[test]
	fn viewport_tracks_camera_and_zoom() {
		let camera = Camera {
			x: 50.0,
			y: 50.0,
			zoom: 2.0,
		};
		let frame = project(&[(0.0, 0.0), (100.0, 100.0)], camera).unwrap();
		// Camera at the graph center maps to the minimap center; at zoom 2
		// the view covers half the square on each side.
		assert_eq!(frame.viewport.width, 100.0);
		assert_eq!(frame.viewport.height, 100.0);
		assert_eq!(frame.viewport.x, 50.0);
		assert_eq!(frame.viewport.y, 50.0);
	}
}

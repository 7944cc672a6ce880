//! Selection and highlight computation.
//!
//! Clicking a node derives its immediate neighborhood: a set of highlighted
//! node ids, a set of highlighted link indices, and a per-link connection
//! list for the side panel. The whole highlight state is recomputed from
//! scratch on every selection change, never patched incrementally, so a
//! reader can only ever observe a complete snapshot.

use std::collections::HashSet;

use super::types::{Graph, Link, Node};

/// Color substituted for highlighted nodes and links.
pub const HIGHLIGHT_COLOR: &str = "#2a4d6f";

/// Relation placeholder for links without a label.
pub const NO_RELATION: &str = "–";

/// Transient highlight marking, derived from the current selection.
/// Links are tracked by index into the filtered graph's link vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Highlight {
	/// Highlighted node ids.
	pub nodes: HashSet<String>,
	/// Highlighted link indices.
	pub links: HashSet<usize>,
}

/// One entry in the selected node's connection list. Parallel links to the
/// same neighbor each produce their own entry, preserving the relation of
/// every individual link.
#[derive(Clone, Debug, PartialEq)]
pub struct NeighborEntry {
	/// Neighbor node id.
	pub id: String,
	/// Name shown to the user (name, falling back to label, then id).
	pub display_name: String,
	/// Relation label of the traversed link, or [`NO_RELATION`].
	pub relation: String,
}

/// The current selection: at most one node or one link.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
	/// A selected node and its connection list.
	Node {
		/// Selected node id.
		id: String,
		/// Display name of the selected node.
		display_name: String,
		/// One entry per incident link.
		neighbors: Vec<NeighborEntry>,
	},
	/// A selected link.
	Link {
		/// Source node id.
		source: String,
		/// Target node id.
		target: String,
		/// Relation label, if any.
		label: Option<String>,
	},
}

/// Select a node: compute its selection record and the new highlight state.
///
/// Every link touching the node qualifies; both endpoints of a qualifying
/// link are highlighted and the link itself is highlighted. A node with no
/// incident links highlights exactly itself with an empty connection list.
pub fn select_node(graph: &Graph, id: &str) -> (Selection, Highlight) {
	let mut highlight = Highlight::default();
	highlight.nodes.insert(id.to_string());

	let mut neighbors = Vec::new();
	for (idx, link) in graph.links.iter().enumerate() {
		if link.source != id && link.target != id {
			continue;
		}
		highlight.nodes.insert(link.source.clone());
		highlight.nodes.insert(link.target.clone());
		highlight.links.insert(idx);

		let other = if link.source == id {
			&link.target
		} else {
			&link.source
		};
		// The clicked node stays out of its own connection list
		// (self-loops still highlight).
		if other == id {
			continue;
		}
		if let Some(node) = graph.node(other) {
			neighbors.push(NeighborEntry {
				id: node.id.clone(),
				display_name: node.display_name().to_string(),
				relation: link
					.label
					.clone()
					.unwrap_or_else(|| NO_RELATION.to_string()),
			});
		}
	}

	let display_name = graph
		.node(id)
		.map(|n| n.display_name().to_string())
		.unwrap_or_else(|| id.to_string());
	(
		Selection::Node {
			id: id.to_string(),
			display_name,
			neighbors,
		},
		highlight,
	)
}

/// Select a link: a passthrough of its endpoints and label. Link selection
/// leaves the highlight state untouched.
pub fn select_link(graph: &Graph, idx: usize) -> Option<Selection> {
	graph.links.get(idx).map(|link| Selection::Link {
		source: link.source.clone(),
		target: link.target.clone(),
		label: link.label.clone(),
	})
}

/// Resolve the color a node should be painted with right now. Pure function
/// of the node and the highlight state, evaluated per paint; no color field
/// is ever mutated.
pub fn node_color<'a>(node: &'a Node, highlight: &Highlight) -> &'a str {
	if highlight.nodes.contains(&node.id) {
		HIGHLIGHT_COLOR
	} else {
		&node.original_color
	}
}

/// Resolve the color a link should be painted with right now.
pub fn link_color<'a>(idx: usize, link: &'a Link, highlight: &Highlight) -> &'a str {
	if highlight.links.contains(&idx) {
		HIGHLIGHT_COLOR
	} else {
		&link.original_color
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::test_support::graph_of;

	#[test]
	fn isolated_node_highlights_only_itself() {
		let graph = graph_of(&["a", "b"], &[]);
		let (selection, highlight) = select_node(&graph, "a");
		assert_eq!(highlight.nodes, HashSet::from(["a".to_string()]));
		assert!(highlight.links.is_empty());
		match selection {
			Selection::Node { neighbors, .. } => assert!(neighbors.is_empty()),
			_ => panic!("expected node selection"),
		}
	}

	#[test]
	fn neighborhood_of_middle_node() {
		// A -knows-> B, B -> C (unlabeled): selecting B highlights all
		// three nodes and both links, and lists A and C.
		let graph = graph_of(
			&["A", "B", "C"],
			&[("A", "B", Some("knows")), ("B", "C", None)],
		);
		let (selection, highlight) = select_node(&graph, "B");
		let expected: HashSet<String> =
			["A", "B", "C"].into_iter().map(String::from).collect();
		assert_eq!(highlight.nodes, expected);
		assert_eq!(highlight.links, HashSet::from([0, 1]));

		let Selection::Node { neighbors, .. } = selection else {
			panic!("expected node selection");
		};
		assert_eq!(neighbors.len(), 2);
		assert_eq!(neighbors[0].id, "A");
		assert_eq!(neighbors[0].relation, "knows");
		assert_eq!(neighbors[1].id, "C");
		assert_eq!(neighbors[1].relation, NO_RELATION);
	}

	#[test]
	fn parallel_links_list_per_link_but_collapse_in_highlight() {
		let graph = graph_of(
			&["a", "b"],
			&[("a", "b", Some("wrote")), ("b", "a", Some("cites"))],
		);
		let (selection, highlight) = select_node(&graph, "a");
		assert_eq!(highlight.nodes.len(), 2);
		assert_eq!(highlight.links.len(), 2);

		let Selection::Node { neighbors, .. } = selection else {
			panic!("expected node selection");
		};
		assert_eq!(neighbors.len(), 2);
		assert!(neighbors.iter().all(|n| n.id == "b"));
		let relations: Vec<&str> = neighbors.iter().map(|n| n.relation.as_str()).collect();
		assert_eq!(relations, ["wrote", "cites"]);
	}

	#[test]
	fn self_loop_highlights_but_is_not_listed() {
		let graph = graph_of(&["a"], &[("a", "a", None)]);
		let (selection, highlight) = select_node(&graph, "a");
		assert_eq!(highlight.nodes.len(), 1);
		assert_eq!(highlight.links, HashSet::from([0]));
		let Selection::Node { neighbors, .. } = selection else {
			panic!("expected node selection");
		};
		assert!(neighbors.is_empty());
	}

	#[test]
	fn link_selection_is_a_passthrough() {
		let graph = graph_of(&["a", "b"], &[("a", "b", Some("knows"))]);
		let selection = select_link(&graph, 0).unwrap();
		assert_eq!(
			selection,
			Selection::Link {
				source: "a".to_string(),
				target: "b".to_string(),
				label: Some("knows".to_string()),
			}
		);
		assert!(select_link(&graph, 7).is_none());
	}

	#[test]
	fn colors_resolve_from_highlight_membership() {
		let graph = graph_of(&["a", "b", "c"], &[("a", "b", None)]);
		let (_, highlight) = select_node(&graph, "a");
		assert_eq!(node_color(&graph.nodes[0], &highlight), HIGHLIGHT_COLOR);
		assert_eq!(node_color(&graph.nodes[1], &highlight), HIGHLIGHT_COLOR);
		assert_eq!(
			node_color(&graph.nodes[2], &highlight),
			graph.nodes[2].original_color
		);
		assert_eq!(link_color(0, &graph.links[0], &highlight), HIGHLIGHT_COLOR);
		assert_eq!(
			link_color(0, &graph.links[0], &Highlight::default()),
			graph.links[0].original_color
		);
	}
}

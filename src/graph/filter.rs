//! Size-based component filtering.

use std::collections::HashSet;

use super::partition::connected_components;
use super::types::Graph;

/// Inclusive bounds of the minimum-component-size control.
pub const THRESHOLD_MIN: usize = 1;
/// Upper bound of the minimum-component-size control.
pub const THRESHOLD_MAX: usize = 50;

/// Produce the filtered graph: every node whose component has at least
/// `min_size` members, and every link whose endpoints both survive.
///
/// `min_size = 1` is the identity filter (isolated singletons included).
/// Recomputation is total rather than incremental; component discovery is
/// linear in graph size, which is cheap at interactive scale. An empty
/// result is a valid state, not an error.
pub fn filter_by_component_size(full: &Graph, min_size: usize) -> Graph {
	let mut keep: HashSet<String> = HashSet::new();
	for component in connected_components(full) {
		if component.len() >= min_size {
			keep.extend(component);
		}
	}

	let nodes = full
		.nodes
		.iter()
		.filter(|n| keep.contains(&n.id))
		.cloned()
		.collect();
	let links = full
		.links
		.iter()
		.filter(|l| keep.contains(&l.source) && keep.contains(&l.target))
		.cloned()
		.collect();
	Graph::new(nodes, links)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::test_support::graph_of;

	fn ids(graph: &Graph) -> Vec<&str> {
		graph.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn min_size_one_is_identity() {
		let graph = graph_of(&["a", "b", "c"], &[("a", "b", None)]);
		let filtered = filter_by_component_size(&graph, 1);
		assert_eq!(ids(&filtered), ids(&graph));
		assert_eq!(filtered.links, graph.links);
	}

	#[test]
	fn drops_small_components_and_their_links() {
		let graph = graph_of(
			&["a", "b", "c"],
			&[("a", "b", None), ("c", "c", None)],
		);
		let filtered = filter_by_component_size(&graph, 2);
		assert_eq!(ids(&filtered), ["a", "b"]);
		assert_eq!(filtered.links.len(), 1);
		assert_eq!(filtered.links[0].source, "a");
	}

	#[test]
	fn filtering_is_idempotent() {
		let graph = graph_of(
			&["a", "b", "c", "d", "e"],
			&[("a", "b", None), ("c", "d", None), ("d", "e", None)],
		);
		let once = filter_by_component_size(&graph, 3);
		let twice = filter_by_component_size(&once, 3);
		assert_eq!(ids(&once), ids(&twice));
		assert_eq!(once.links, twice.links);
	}

	#[test]
	fn threshold_above_everything_yields_empty_graph() {
		let graph = graph_of(&["a", "b"], &[("a", "b", None)]);
		let filtered = filter_by_component_size(&graph, 10);
		assert!(filtered.is_empty());
		assert!(filtered.links.is_empty());
	}

	#[test]
	fn endpoint_invariant_holds_on_output() {
		let graph = graph_of(
			&["a", "b", "c", "d"],
			&[("a", "b", None), ("b", "c", None), ("d", "d", None)],
		);
		let filtered = filter_by_component_size(&graph, 2);
		for link in &filtered.links {
			assert!(filtered.contains(&link.source));
			assert!(filtered.contains(&link.target));
		}
	}
}

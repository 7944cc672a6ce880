//! Query resolution and live suggestions.

use super::types::{Graph, Node};

/// Zoom level the camera animates to after a successful search.
pub const FOCUS_ZOOM: f64 = 4.0;

/// Duration of the search-focus camera transition, in milliseconds. A smooth
/// transition, never an instantaneous jump.
pub const FOCUS_DURATION_MS: f64 = 1000.0;

/// Maximum number of live suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 10;

/// Resolve a query to a node by case-insensitive exact match on the full id.
/// Substring matching is the suggestion feature's job, not this one's.
pub fn resolve<'a>(graph: &'a Graph, query: &str) -> Option<&'a Node> {
	let query = query.to_lowercase();
	graph.nodes.iter().find(|n| n.id.to_lowercase() == query)
}

/// Compute up to [`MAX_SUGGESTIONS`] node ids whose lowercase form contains
/// the lowercase query. Queries of one character or less suggest nothing.
pub fn suggestions<'a>(graph: &'a Graph, query: &str) -> Vec<&'a str> {
	if query.chars().count() <= 1 {
		return Vec::new();
	}
	let needle = query.to_lowercase();
	graph
		.nodes
		.iter()
		.map(|n| n.id.as_str())
		.filter(|id| id.to_lowercase().contains(&needle))
		.take(MAX_SUGGESTIONS)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::test_support::graph_of;

	#[test]
	fn resolves_case_insensitively() {
		let graph = graph_of(&["X1", "X12"], &[]);
		assert_eq!(resolve(&graph, "x1").unwrap().id, "X1");
		assert_eq!(resolve(&graph, "X1").unwrap().id, "X1");
	}

	#[test]
	fn no_substring_resolution() {
		let graph = graph_of(&["X12"], &[]);
		assert!(resolve(&graph, "x1").is_none());
		assert!(resolve(&graph, "zzz").is_none());
	}

	#[test]
	fn suggestions_need_more_than_one_character() {
		let graph = graph_of(&["alpha", "beta"], &[]);
		assert!(suggestions(&graph, "").is_empty());
		assert!(suggestions(&graph, "a").is_empty());
		assert_eq!(suggestions(&graph, "al"), ["alpha"]);
	}

	#[test]
	fn suggestions_match_substrings_and_cap_at_ten() {
		let ids: Vec<String> = (0..15).map(|i| format!("Node{i}")).collect();
		let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
		let graph = graph_of(&id_refs, &[]);
		let hits = suggestions(&graph, "node");
		assert_eq!(hits.len(), MAX_SUGGESTIONS);
		assert_eq!(hits[0], "Node0");
	}
}

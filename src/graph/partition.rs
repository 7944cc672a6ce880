//! Connected-component partitioning.

use std::collections::{HashMap, HashSet};

use super::types::Graph;

/// Partition the graph into connected components, treating every link as
/// undirected.
///
/// Every node appears in exactly one returned component, and two nodes share
/// a component iff some undirected path of links connects them. Components
/// are discovered in node input order, so the result is deterministic for a
/// fixed input. Traversal uses an explicit stack; depth is bounded by node
/// count regardless of graph shape, so dense cyclic graphs cannot overflow
/// the call stack.
pub fn connected_components(graph: &Graph) -> Vec<Vec<String>> {
	let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
	for link in &graph.links {
		adjacency
			.entry(link.source.as_str())
			.or_default()
			.push(link.target.as_str());
		// Self-loops contribute a single adjacency entry.
		if link.source != link.target {
			adjacency
				.entry(link.target.as_str())
				.or_default()
				.push(link.source.as_str());
		}
	}

	let mut visited: HashSet<&str> = HashSet::with_capacity(graph.nodes.len());
	let mut components = Vec::new();
	for node in &graph.nodes {
		if visited.contains(node.id.as_str()) {
			continue;
		}
		let mut component = Vec::new();
		let mut stack = vec![node.id.as_str()];
		// Marked visited on push, not on pop, so cycles terminate.
		visited.insert(node.id.as_str());
		while let Some(id) = stack.pop() {
			component.push(id.to_string());
			for &next in adjacency.get(id).into_iter().flatten() {
				if visited.insert(next) {
					stack.push(next);
				}
			}
		}
		components.push(component);
	}
	components
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::test_support::graph_of;

	fn sorted(mut component: Vec<String>) -> Vec<String> {
		component.sort();
		component
	}

	#[test]
	fn partitions_disconnected_graph() {
		let graph = graph_of(
			&["a", "b", "c", "d", "e"],
			&[("a", "b", None), ("b", "c", None)],
		);
		let components = connected_components(&graph);
		assert_eq!(components.len(), 3);
		assert_eq!(sorted(components[0].clone()), ["a", "b", "c"]);
		assert_eq!(components[1], ["d"]);
		assert_eq!(components[2], ["e"]);
	}

	#[test]
	fn every_node_appears_exactly_once() {
		let graph = graph_of(
			&["a", "b", "c", "d"],
			&[("a", "b", None), ("b", "a", None), ("c", "c", None)],
		);
		let mut seen: Vec<String> = connected_components(&graph).into_iter().flatten().collect();
		seen.sort();
		assert_eq!(seen, ["a", "b", "c", "d"]);
	}

	#[test]
	fn cycles_terminate() {
		let graph = graph_of(
			&["a", "b", "c"],
			&[("a", "b", None), ("b", "c", None), ("c", "a", None)],
		);
		let components = connected_components(&graph);
		assert_eq!(components.len(), 1);
		assert_eq!(components[0].len(), 3);
	}

	#[test]
	fn self_loop_is_a_singleton_component() {
		let graph = graph_of(&["a"], &[("a", "a", None)]);
		let components = connected_components(&graph);
		assert_eq!(components, [["a"]]);
	}

	#[test]
	fn empty_graph_has_no_components() {
		let graph = graph_of(&[], &[]);
		assert!(connected_components(&graph).is_empty());
	}

	#[test]
	fn large_path_does_not_overflow() {
		// A 10k-node path would blow the stack under naive recursion.
		let ids: Vec<String> = (0..10_000).map(|i| format!("n{i}")).collect();
		let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
		let links: Vec<(&str, &str, Option<&str>)> = id_refs
			.windows(2)
			.map(|w| (w[0], w[1], None))
			.collect();
		let graph = graph_of(&id_refs, &links);
		let components = connected_components(&graph);
		assert_eq!(components.len(), 1);
		assert_eq!(components[0].len(), 10_000);
	}
}

//! Graph analysis and interaction-state core.
//!
//! Everything under this module is pure Rust with no DOM dependency, so it
//! runs (and is tested) on the host as well as in the browser. The
//! rendering layer under `components::explorer` consumes it.

pub mod engine;
pub mod filter;
pub mod minimap;
pub mod partition;
pub mod search;
pub mod selection;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support {
	use super::store::{DEFAULT_LINK_COLOR, DEFAULT_NODE_COLOR};
	use super::types::{Graph, Link, Node};

	/// Build a graph from bare ids and `(source, target, label)` triples.
	pub fn graph_of(ids: &[&str], links: &[(&str, &str, Option<&str>)]) -> Graph {
		let nodes = ids
			.iter()
			.map(|id| Node {
				id: id.to_string(),
				name: None,
				label: None,
				group: None,
				original_color: DEFAULT_NODE_COLOR.to_string(),
			})
			.collect();
		let links = links
			.iter()
			.map(|&(source, target, label)| Link {
				source: source.to_string(),
				target: target.to_string(),
				label: label.map(String::from),
				original_color: DEFAULT_LINK_COLOR.to_string(),
			})
			.collect();
		Graph::new(nodes, links)
	}
}

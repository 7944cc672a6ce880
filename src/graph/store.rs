//! Graph loading and default color assignment.
//!
//! Parses the raw `{ nodes, links }` document, normalizes link endpoints,
//! drops links that reference unknown node ids (logged, not fatal), and
//! stamps every node and link with its permanent original color. Original
//! colors are assigned exactly once here; highlighting never rewrites them.

use std::collections::HashMap;

use log::warn;
use thiserror::Error;

use super::types::{Graph, Link, Node, RawDocument};

/// Default node color for nodes without a group.
pub const DEFAULT_NODE_COLOR: &str = "#4682b4";

/// Default link color.
pub const DEFAULT_LINK_COLOR: &str = "#cce5f6";

/// Categorical palette for grouped nodes, assigned in order of first
/// appearance of each group.
const GROUP_PALETTE: [&str; 8] = [
	"#5e81ac", "#81a1c1", "#6494a0", "#88a0af", "#6c8ead", "#779ea5", "#8fa3b4", "#7a99a8",
];

/// The input document could not be interpreted as a graph at all.
///
/// Individual bad links are recoverable and never produce this error; only
/// a document missing its `nodes`/`links` arrays (or otherwise failing to
/// deserialize) does.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The document is not valid graph JSON.
	#[error("malformed graph document: {0}")]
	Malformed(#[from] serde_json::Error),
}

/// Parse a JSON document and load it into a [`Graph`].
pub fn parse(json: &str) -> Result<Graph, LoadError> {
	let doc: RawDocument = serde_json::from_str(json)?;
	Ok(load(doc))
}

/// Load an already-deserialized document into a [`Graph`].
///
/// Links whose endpoints do not resolve to a known node id are dropped with
/// a warning. The returned graph upholds the endpoint invariant.
pub fn load(doc: RawDocument) -> Graph {
	let mut group_colors: HashMap<String, &str> = HashMap::new();
	let nodes: Vec<Node> = doc
		.nodes
		.into_iter()
		.map(|raw| {
			let original_color = match &raw.group {
				Some(group) => {
					let next = GROUP_PALETTE[group_colors.len() % GROUP_PALETTE.len()];
					(*group_colors.entry(group.clone()).or_insert(next)).to_string()
				}
				None => DEFAULT_NODE_COLOR.to_string(),
			};
			Node {
				id: raw.id,
				name: raw.name,
				label: raw.label,
				group: raw.group,
				original_color,
			}
		})
		.collect();

	let graph = Graph::new(nodes, Vec::new());
	let mut links = Vec::with_capacity(doc.links.len());
	for raw in doc.links {
		let source = raw.source.into_id();
		let target = raw.target.into_id();
		if !graph.contains(&source) || !graph.contains(&target) {
			warn!("dropping link {source} -> {target}: unknown endpoint");
			continue;
		}
		links.push(Link {
			source,
			target,
			label: raw.label,
			original_color: DEFAULT_LINK_COLOR.to_string(),
		});
	}

	Graph::new(graph.nodes, links)
}

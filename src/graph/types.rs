//! Core graph data model.
//!
//! The raw document shape mirrors the JSON the page embeds: `{ nodes, links }`.
//! Link endpoints may arrive either as bare id strings or as embedded node
//! objects (renderers commonly rewrite them in place); both forms are
//! normalized to plain ids here, at the serde boundary, so the rest of the
//! crate never inspects endpoint shapes.

use std::collections::HashMap;

use serde::Deserialize;

/// A link endpoint: either a bare node id or an object carrying one.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawEndpoint {
	/// Plain id string, the shape static documents use.
	Id(String),
	/// Embedded node object, the shape a renderer rewrites links into.
	Object {
		/// The referenced node's id.
		id: String,
	},
}

impl RawEndpoint {
	/// Normalize to the referenced node id.
	pub fn into_id(self) -> String {
		match self {
			RawEndpoint::Id(id) => id,
			RawEndpoint::Object { id } => id,
		}
	}
}

/// A node as it appears in the input document.
#[derive(Clone, Debug, Deserialize)]
pub struct RawNode {
	/// Unique identifier, the join key for all lookups.
	pub id: String,
	/// Optional human-readable name.
	pub name: Option<String>,
	/// Optional display label.
	pub label: Option<String>,
	/// Optional group for categorical coloring.
	pub group: Option<String>,
}

/// A link as it appears in the input document.
#[derive(Clone, Debug, Deserialize)]
pub struct RawLink {
	/// Source endpoint.
	pub source: RawEndpoint,
	/// Target endpoint.
	pub target: RawEndpoint,
	/// Optional relation label.
	pub label: Option<String>,
}

/// Complete input document: nodes and links. Other top-level fields are
/// ignored.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDocument {
	/// All nodes.
	pub nodes: Vec<RawNode>,
	/// All links between them.
	pub links: Vec<RawLink>,
}

/// A loaded node. `original_color` is assigned once at load time and never
/// overwritten; the color actually painted each frame is derived from it and
/// the current highlight state.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Unique identifier.
	pub id: String,
	/// Optional human-readable name.
	pub name: Option<String>,
	/// Optional display label.
	pub label: Option<String>,
	/// Optional group for categorical coloring.
	pub group: Option<String>,
	/// Permanent default color, distinct from the transient highlight color.
	pub original_color: String,
}

impl Node {
	/// Display name shown to the user: name, falling back to label, falling
	/// back to the id.
	pub fn display_name(&self) -> &str {
		self.name
			.as_deref()
			.or(self.label.as_deref())
			.unwrap_or(&self.id)
	}
}

/// A loaded link. Undirected for traversal purposes, drawn with a
/// directional arrow. Links carry no id of their own; within one graph
/// snapshot they are identified by their index in [`Graph::links`].
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Optional relation label.
	pub label: Option<String>,
	/// Permanent default color.
	pub original_color: String,
}

/// A graph snapshot: nodes, links, and an id lookup table.
///
/// Invariant: every link's source and target id exist in `nodes`. Snapshots
/// are immutable once built; filtering produces a fresh snapshot rather than
/// mutating in place.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Nodes in input order.
	pub nodes: Vec<Node>,
	/// Links in input order.
	pub links: Vec<Link>,
	index: HashMap<String, usize>,
}

impl Graph {
	/// Build a snapshot from nodes and links, indexing nodes by id.
	pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
		let index = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.clone(), i))
			.collect();
		Self {
			nodes,
			links,
			index,
		}
	}

	/// Look up a node by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// Whether a node with this id exists.
	pub fn contains(&self, id: &str) -> bool {
		self.index.contains_key(id)
	}

	/// True when the snapshot has no nodes at all.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

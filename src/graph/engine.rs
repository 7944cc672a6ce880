//! The owning interaction context.
//!
//! All shared exploration state lives here: the immutable full graph, the
//! current threshold, the filtered graph, and the selection/highlight
//! snapshots. Every update replaces the affected snapshot wholesale inside
//! one synchronous call, so readers (the renderer, the projector) never see
//! a torn intermediate state within an event turn.

use super::filter::{self, THRESHOLD_MAX, THRESHOLD_MIN};
use super::search;
use super::selection::{self, Highlight, Selection};
use super::types::Graph;

/// Exploration state for one loaded graph.
pub struct Engine {
	full: Graph,
	min_size: usize,
	filtered: Graph,
	selection: Option<Selection>,
	highlight: Highlight,
}

impl Engine {
	/// Start exploring a loaded graph at the identity threshold.
	pub fn new(full: Graph) -> Self {
		let filtered = filter::filter_by_component_size(&full, THRESHOLD_MIN);
		Self {
			full,
			min_size: THRESHOLD_MIN,
			filtered,
			selection: None,
			highlight: Highlight::default(),
		}
	}

	/// The visible, interactive subset of the graph.
	pub fn filtered(&self) -> &Graph {
		&self.filtered
	}

	/// Current minimum component size.
	pub fn min_size(&self) -> usize {
		self.min_size
	}

	/// Current selection, if any.
	pub fn selection(&self) -> Option<&Selection> {
		self.selection.as_ref()
	}

	/// Current highlight snapshot.
	pub fn highlight(&self) -> &Highlight {
		&self.highlight
	}

	/// Change the minimum component size and refilter from the full graph.
	///
	/// The filtered graph is recomputed in full before this returns.
	/// Selection and highlight are cleared: highlighted link indices point
	/// into the old filtered snapshot and would be meaningless in the new
	/// one.
	pub fn set_min_size(&mut self, min_size: usize) {
		self.min_size = min_size.clamp(THRESHOLD_MIN, THRESHOLD_MAX);
		self.filtered = filter::filter_by_component_size(&self.full, self.min_size);
		self.clear_selection();
	}

	/// Select a node (clicks and drags both land here), replacing any
	/// previous selection and recomputing the highlight snapshot.
	pub fn select_node(&mut self, id: &str) {
		let (selection, highlight) = selection::select_node(&self.filtered, id);
		self.selection = Some(selection);
		self.highlight = highlight;
	}

	/// Select a link by its index in the filtered graph. Highlight state is
	/// left as-is; link selection only drives the side panel.
	pub fn select_link(&mut self, idx: usize) {
		if let Some(selection) = selection::select_link(&self.filtered, idx) {
			self.selection = Some(selection);
		}
	}

	/// Drop the selection and its highlight.
	pub fn clear_selection(&mut self) {
		self.selection = None;
		self.highlight = Highlight::default();
	}

	/// Resolve a search query against the filtered graph. A hit becomes the
	/// new selection and its id is returned so the caller can move the
	/// camera; a miss changes nothing.
	pub fn search(&mut self, query: &str) -> Option<String> {
		let id = search::resolve(&self.filtered, query)?.id.clone();
		self.select_node(&id);
		Some(id)
	}

	/// Live suggestions for the search box.
	pub fn suggestions(&self, query: &str) -> Vec<String> {
		search::suggestions(&self.filtered, query)
			.into_iter()
			.map(String::from)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::test_support::graph_of;

	fn engine() -> Engine {
		Engine::new(graph_of(
			&["A", "B", "C"],
			&[("A", "B", Some("knows")), ("C", "C", None)],
		))
	}

	#[test]
	fn starts_unfiltered_and_unselected() {
		let engine = engine();
		assert_eq!(engine.min_size(), 1);
		assert_eq!(engine.filtered().nodes.len(), 3);
		assert!(engine.selection().is_none());
		assert!(engine.highlight().nodes.is_empty());
	}

	#[test]
	fn refiltering_clears_selection() {
		let mut engine = engine();
		engine.select_node("A");
		assert!(engine.selection().is_some());

		engine.set_min_size(2);
		assert_eq!(engine.filtered().nodes.len(), 2);
		assert!(engine.selection().is_none());
		assert!(engine.highlight().nodes.is_empty());
	}

	#[test]
	fn threshold_is_clamped_to_contract_range() {
		let mut engine = engine();
		engine.set_min_size(0);
		assert_eq!(engine.min_size(), 1);
		engine.set_min_size(500);
		assert_eq!(engine.min_size(), 50);
	}

	#[test]
	fn search_hit_selects_and_returns_id() {
		let mut engine = engine();
		assert_eq!(engine.search("a"), Some("A".to_string()));
		assert!(matches!(
			engine.selection(),
			Some(Selection::Node { id, .. }) if id == "A"
		));
		assert!(engine.highlight().nodes.contains("B"));
	}

	#[test]
	fn search_miss_leaves_selection_unchanged() {
		let mut engine = engine();
		engine.select_node("B");
		assert_eq!(engine.search("zzz"), None);
		assert!(matches!(
			engine.selection(),
			Some(Selection::Node { id, .. }) if id == "B"
		));
	}

	#[test]
	fn search_only_sees_the_filtered_graph() {
		let mut engine = engine();
		engine.set_min_size(2);
		assert_eq!(engine.search("c"), None, "C was filtered out");
		assert!(engine.suggestions("c?").is_empty());
	}

	#[test]
	fn link_selection_keeps_highlight() {
		let mut engine = engine();
		engine.select_node("A");
		let highlighted = engine.highlight().clone();
		engine.select_link(0);
		assert!(matches!(engine.selection(), Some(Selection::Link { .. })));
		assert_eq!(engine.highlight(), &highlighted);
	}
}

//! graph-explorer: interactive exploration of node-link graphs.
//!
//! This crate renders a force-directed graph and lets the user explore it:
//! search by node id, click to highlight a node's neighborhood, filter out
//! small disconnected clusters, and track the viewport in a minimap. The
//! analysis core under [`graph`] is pure and host-testable; the WASM
//! component layer under [`components`] draws it and feeds interaction
//! events back in.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod graph;

pub use components::explorer::GraphExplorer;
pub use graph::engine::Engine;
pub use graph::types::{Graph, Link, Node};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("graph-explorer: logging initialized");
}

/// Load the graph document from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_graph() -> Option<Graph> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match graph::store::parse(&json_text) {
		Ok(graph) => {
			info!(
				"graph-explorer: loaded {} nodes, {} links",
				graph.nodes.len(),
				graph.links.len()
			);
			Some(graph)
		}
		Err(e) => {
			warn!("graph-explorer: failed to load graph data: {e}");
			None
		}
	}
}

/// Main application component.
///
/// Loads the graph from the DOM and mounts the explorer. A missing or
/// malformed document leaves the page in its loading presentation; the
/// failure is logged, never thrown.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph = load_graph();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Graph Explorer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{match graph {
			Some(graph) if !graph.is_empty() => {
				view! { <GraphExplorer graph=graph /> }.into_any()
			}
			_ => view! { <p class="placeholder">"Loading graph…"</p> }.into_any(),
		}}
	}
}

//! Interactive graph explorer component.
//!
//! Renders the filtered graph on an HTML canvas with:
//! - Click-to-highlight of a node's immediate neighborhood
//! - Node dragging, background panning and cursor-anchored zooming
//! - Search with live suggestions and an animated camera focus
//! - A minimum-component-size slider that refilters immediately
//! - A minimap tracking all node positions and the current viewport

mod component;
mod render;
mod view;

pub use component::GraphExplorer;

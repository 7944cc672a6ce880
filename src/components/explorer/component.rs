//! Leptos component wiring the explorer together.
//!
//! Creates the main canvas and the minimap canvas, wires mouse/wheel events
//! for selection, dragging, panning and zooming, and runs one
//! `requestAnimationFrame` loop that ticks the simulation and redraws both
//! surfaces. The loop's frame handle is stored so teardown can cancel it;
//! an orphaned recurring frame against a destroyed view would be a leak.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use send_wrapper::SendWrapper;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use crate::graph::engine::Engine;
use crate::graph::filter::{THRESHOLD_MAX, THRESHOLD_MIN};
use crate::graph::minimap::{self, MINIMAP_SIZE};
use crate::graph::search::{FOCUS_DURATION_MS, FOCUS_ZOOM};
use crate::graph::selection::Selection;
use crate::graph::types::Graph;

use super::render;
use super::view::ViewState;

/// The owning interaction context: analysis engine plus renderer-boundary
/// state, mutated only from event handlers and the frame loop.
struct ExplorerContext {
	engine: Engine,
	view: ViewState,
}

/// Interactive node-link graph explorer.
///
/// Renders the filtered graph full-screen with a search box, a
/// minimum-component-size slider, a selection side panel and a minimap
/// tracking the current viewport.
#[component]
pub fn GraphExplorer(
	/// The loaded full graph. Immutable for the component's lifetime.
	graph: Graph,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let minimap_ref = NodeRef::<leptos::html::Canvas>::new();

	let context: Rc<RefCell<Option<ExplorerContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let search_term = RwSignal::new(String::new());
	let suggestions = RwSignal::new(Vec::<String>::new());
	let notice = RwSignal::new(None::<String>);
	let selection = RwSignal::new(None::<Selection>);
	let visible_nodes = RwSignal::new(graph.nodes.len());
	let min_size = RwSignal::new(THRESHOLD_MIN);

	let (context_init, animate_init, resize_cb_init, frame_handle_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		frame_handle.clone(),
	);
	Effect::new(move |_| {
		if context_init.borrow().is_some() {
			return;
		}
		let (Some(canvas), Some(mini)) = (canvas_ref.get(), minimap_ref.get()) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let mini: HtmlCanvasElement = mini.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		mini.set_width(MINIMAP_SIZE as u32);
		mini.set_height(MINIMAP_SIZE as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let mini_ctx: CanvasRenderingContext2d = mini
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let engine = Engine::new(graph.clone());
		visible_nodes.set(engine.filtered().nodes.len());
		let view = ViewState::new(engine.filtered(), w, h);
		*context_init.borrow_mut() = Some(ExplorerContext { engine, view });

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.view.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner, frame_handle_anim) = (
			context_init.clone(),
			animate_init.clone(),
			frame_handle_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.view.tick(0.016);
				render::render(&c.view, c.engine.filtered(), c.engine.highlight(), &ctx);

				let positions: Vec<(f64, f64)> =
					c.view.nodes().iter().map(|p| (p.x, p.y)).collect();
				let frame = minimap::project(&positions, c.view.camera());
				render::render_minimap(frame.as_ref(), &mini_ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(id) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					frame_handle_anim.set(Some(id));
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				frame_handle_init.set(Some(id));
			}
		}
	});

	on_cleanup({
		// `on_cleanup` demands `Send + Sync`; CSR runs single-threaded, so the
		// wrapper is never dereferenced off-thread.
		let cleanup = SendWrapper::new((
			context.clone(),
			animate.clone(),
			resize_cb.clone(),
			frame_handle.clone(),
		));
		move || {
			let (context, animate, resize_cb, frame_handle) = cleanup.take();
			if let Some(window) = web_sys::window() {
				if let Some(id) = frame_handle.take() {
					let _ = window.cancel_animation_frame(id);
				}
				if let Some(cb) = resize_cb.borrow_mut().take() {
					let _ = window
						.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
				}
			}
			animate.borrow_mut().take();
			context.borrow_mut().take();
		}
	});

	let run_search: Rc<dyn Fn(&str)> = Rc::new({
		let context = context.clone();
		move |term: &str| {
			suggestions.set(Vec::new());
			let mut borrow = context.borrow_mut();
			let Some(c) = borrow.as_mut() else {
				return;
			};
			match c.engine.search(term) {
				Some(id) => {
					notice.set(None);
					selection.set(c.engine.selection().cloned());
					if let Some((x, y)) = c.view.position_of(&id) {
						c.view.fly_to(x, y, FOCUS_ZOOM, FOCUS_DURATION_MS);
					}
				}
				None => notice.set(Some("Node not found!".to_string())),
			}
		}
	});

	let context_in = context.clone();
	let on_search_input = move |ev| {
		let term = event_target_value(&ev);
		notice.set(None);
		if let Some(ref c) = *context_in.borrow() {
			suggestions.set(c.engine.suggestions(&term));
		}
		search_term.set(term);
	};

	let run_search_key = run_search.clone();
	let on_search_keydown = move |ev: web_sys::KeyboardEvent| {
		if ev.key() == "Enter" {
			run_search_key(&search_term.get_untracked());
		}
	};

	let run_search_btn = run_search.clone();
	let on_search_click = move |_| {
		run_search_btn(&search_term.get_untracked());
	};

	let context_th = context.clone();
	let on_threshold_input = move |ev| {
		let value = event_target_value(&ev).parse().unwrap_or(THRESHOLD_MIN);
		min_size.set(value);
		// Refilter and rebuild synchronously, before the next frame paints.
		if let Some(ref mut c) = *context_th.borrow_mut() {
			c.engine.set_min_size(value);
			c.view.rebuild(c.engine.filtered());
			selection.set(None);
			visible_nodes.set(c.engine.filtered().nodes.len());
			suggestions.set(c.engine.suggestions(&search_term.get_untracked()));
		}
	};

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(idx) = c.view.node_at(x, y) {
				c.view.begin_drag(idx, x, y);
				// Dragging a node selects it, same as a plain click.
				if let Some(i) = c.view.graph_index(idx) {
					let id = c.engine.filtered().nodes[i].id.clone();
					c.engine.select_node(&id);
					selection.set(c.engine.selection().cloned());
				}
			} else if let Some(link) = c.view.link_at(x, y) {
				c.engine.select_link(link);
				selection.set(c.engine.selection().cloned());
			} else {
				c.view.begin_pan(x, y);
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.view.drag.active {
				c.view.drag_to(x, y);
			} else if c.view.pan.active {
				c.view.pan_to(x, y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.view.end_drag();
			c.view.end_pan();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.view.end_drag();
			c.view.end_pan();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.view.zoom_at(x, y, factor);
		}
	};

	let context_close = SendWrapper::new(context.clone());
	let on_close_panel = move |_| {
		if let Some(ref mut c) = *context_close.borrow_mut() {
			c.engine.clear_selection();
		}
		selection.set(None);
	};

	let run_search_pick = SendWrapper::new(run_search.clone());
	view! {
		<div class="graph-explorer">
			<div class="top-controls">
				<div class="search-bar">
					<input
						type="text"
						placeholder="Search node..."
						prop:value=search_term
						on:input=on_search_input
						on:keydown=on_search_keydown
					/>
					<button on:click=on_search_click>"Go"</button>
					<Show when=move || !suggestions.get().is_empty()>
						<ul class="suggestions">
							<For
								each=move || suggestions.get()
								key=|s| s.clone()
								children={
									let run_search_pick = run_search_pick.clone();
									move |s: String| {
										let run_search_pick = run_search_pick.clone();
										let picked = s.clone();
										view! {
											<li on:click=move |_| {
												search_term.set(picked.clone());
												run_search_pick(&picked);
											}>{s}</li>
										}
									}
								}
							/>
						</ul>
					</Show>
					<Show when=move || notice.get().is_some()>
						<p class="search-notice">{move || notice.get().unwrap_or_default()}</p>
					</Show>
				</div>

				<div class="slider-bar">
					<label>
						<b>"Min Component Size: "</b>
						{move || min_size.get()}
					</label>
					<input
						type="range"
						min=THRESHOLD_MIN.to_string()
						max=THRESHOLD_MAX.to_string()
						prop:value=move || min_size.get().to_string()
						on:input=on_threshold_input
					/>
				</div>
			</div>

			<div class="graph-pane">
				<canvas
					node_ref=canvas_ref
					class="graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style="display: block; cursor: grab;"
				/>
				<Show when=move || visible_nodes.get() == 0>
					<p class="placeholder">"Loading graph…"</p>
				</Show>
				<canvas node_ref=minimap_ref class="mini-map" />
			</div>

			<Show when=move || selection.get().is_some()>
				<div class="side-pane">
					<button
						class="close-btn"
						on:click={
							let on_close_panel = on_close_panel.clone();
							move |ev| on_close_panel(ev)
						}
					>
						"✕"
					</button>
					{move || {
						selection
							.get()
							.map(|sel| match sel {
								Selection::Node { display_name, neighbors, .. } => {
									view! {
										<div>
											<h2>"Node"</h2>
											<p>
												<strong>"Name of node: "</strong>
												{display_name}
											</p>
											<Show when={
												let has_neighbors = !neighbors.is_empty();
												move || has_neighbors
											}>
												<p>
													<strong>"Connected to:"</strong>
												</p>
											</Show>
											<ul>
												{neighbors
													.iter()
													.map(|n| {
														view! {
															<li>
																{format!("{} ({})", n.display_name, n.relation)}
															</li>
														}
													})
													.collect_view()}
											</ul>
										</div>
									}
										.into_any()
								}
								Selection::Link { source, target, label } => {
									view! {
										<div>
											<h2>"Edge"</h2>
											<p>
												<strong>"Source: "</strong>
												{source}
											</p>
											<p>
												<strong>"Target: "</strong>
												{target}
											</p>
											{label
												.map(|l| {
													view! {
														<p>
															<strong>"Label: "</strong>
															{l}
														</p>
													}
												})}
										</div>
									}
										.into_any()
								}
							})
					}}
				</div>
			</Show>
		</div>
	}
}

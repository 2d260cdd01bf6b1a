//! Browser implementation of [`Surface`].
//!
//! The overlay is a `.snowflakes` container appended to the host element.
//! Each flake is an outer element (falls) wrapping an inner element (drifts,
//! rotates, shows the image). Keyframes and images live in per-session
//! `<style>` nodes; the base stylesheet is shared through [`BASE_STYLE`].

use std::cell::RefCell;

use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlStyleElement, Window};

use super::config::SnowfallConfig;
use super::constants::*;
use super::flake::{Declarations, FlakeStyle};
use super::keyframes::AnimationDescription;
use super::registry::{StyleHandle, StyleRegistry};
use super::styles::{base_style, images_style};
use super::surface::Surface;

thread_local! {
	/// Base stylesheet shared by every session on the page.
	static BASE_STYLE: RefCell<StyleRegistry<HtmlStyleElement>> =
		const { RefCell::new(StyleRegistry::new(0)) };
}

/// Random source seeded from `Math.random`.
pub fn browser_rng() -> SmallRng {
	SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

/// Elements rendering one flake.
pub struct FlakeElement {
	outer: HtmlElement,
	inner: HtmlElement,
}

/// A `.snowflakes` container attached to a host element.
pub struct DomSurface {
	window: Window,
	document: Document,
	host: HtmlElement,
	container: HtmlElement,
	is_body: bool,
	max_size: f64,
	animation_style: Option<HtmlStyleElement>,
	images_style: Option<HtmlStyleElement>,
	base_handle: Option<StyleHandle>,
}

fn create_html(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
	Ok(document.create_element(tag)?.dyn_into::<HtmlElement>()?)
}

fn apply_declarations(element: &HtmlElement, declarations: &Declarations) {
	let style = element.style();
	for (property, value) in declarations {
		if let Err(e) = style.set_property(property, value) {
			warn!("snowfall: failed to set {property}: {e:?}");
		}
	}
}

fn inject_style(document: &Document, css: &str) -> Result<HtmlStyleElement, JsValue> {
	let node: HtmlStyleElement = document.create_element("style")?.dyn_into()?;
	node.set_text_content(Some(css));
	document.body().ok_or("document has no body")?.append_child(&node)?;
	Ok(node)
}

fn release_base_style(handle: StyleHandle) {
	if let Some(node) = BASE_STYLE.with(|registry| registry.borrow_mut().release(handle)) {
		node.remove();
	}
}

impl DomSurface {
	/// Attach an overlay container to `host`, or to `<body>` when `host` is `None`.
	pub fn new(host: Option<HtmlElement>, config: &SnowfallConfig) -> Result<Self, JsValue> {
		let window = web_sys::window().ok_or("no window")?;
		let document = window.document().ok_or("no document")?;
		let body = document.body();
		let host = match host {
			Some(host) => host,
			None => body.clone().ok_or("document has no body")?,
		};
		let is_body = body.as_ref() == Some(&host);

		let container = create_html(&document, "div")?;
		container.class_list().add_1(CONTAINER_CLASS)?;
		if is_body {
			container.class_list().add_1(CONTAINER_BODY_CLASS)?;
		}
		container.style().set_property("z-index", &config.z_index.to_string())?;

		// The container goes into the page last, so any failure before it
		// leaves nothing behind.
		let images_style = inject_style(&document, &images_style(config.types, &config.color))?;
		let base_handle = match BASE_STYLE
			.with(|registry| registry.borrow_mut().try_acquire(|| inject_style(&document, &base_style())))
		{
			Ok(handle) => handle,
			Err(e) => {
				images_style.remove();
				return Err(e);
			}
		};
		if let Err(e) = host.append_child(&container) {
			images_style.remove();
			release_base_style(base_handle);
			return Err(e);
		}

		Ok(Self {
			window,
			document,
			host,
			container,
			is_body,
			max_size: config.max_size,
			animation_style: None,
			images_style: Some(images_style),
			base_handle: Some(base_handle),
		})
	}
}

impl Surface for DomSurface {
	type Handle = Option<FlakeElement>;

	fn measure_height(&self) -> f64 {
		if self.is_body {
			self.window
				.inner_height()
				.ok()
				.and_then(|h| h.as_f64())
				.unwrap_or_else(|| {
					self.document
						.document_element()
						.map_or(0.0, |e| e.client_height() as f64)
				})
		} else {
			self.host.offset_height() as f64 + self.max_size
		}
	}

	fn attach_flake(&mut self, style: &FlakeStyle) -> Option<FlakeElement> {
		let build = || -> Result<FlakeElement, JsValue> {
			let outer = create_html(&self.document, "div")?;
			outer.class_list().add_1(FLAKE_CLASS)?;
			apply_declarations(&outer, &style.outer);

			let inner = create_html(&self.document, "div")?;
			for class in &style.inner_classes {
				inner.class_list().add_1(class)?;
			}
			apply_declarations(&inner, &style.inner);

			outer.append_child(&inner)?;
			self.container.append_child(&outer)?;
			Ok(FlakeElement { outer, inner })
		};
		build().map_err(|e| warn!("snowfall: failed to attach flake: {e:?}")).ok()
	}

	fn update_flake(&mut self, handle: &Option<FlakeElement>, timing: &Declarations) {
		if let Some(element) = handle {
			apply_declarations(&element.outer, timing);
		}
	}

	fn detach_flake(&mut self, handle: Option<FlakeElement>) {
		if let Some(element) = handle {
			element.inner.remove();
			element.outer.remove();
		}
	}

	fn replace_animation(&mut self, description: &AnimationDescription) {
		let css = description.to_css();
		match &self.animation_style {
			Some(node) => node.set_text_content(Some(&css)),
			None => match inject_style(&self.document, &css) {
				Ok(node) => self.animation_style = Some(node),
				Err(e) => warn!("snowfall: keyframe injection failed: {e:?}"),
			},
		}
	}

	fn set_paused(&mut self, paused: bool) {
		let classes = self.container.class_list();
		let result = if paused {
			classes.add_1(PAUSED_CLASS)
		} else {
			classes.remove_1(PAUSED_CLASS)
		};
		if let Err(e) = result {
			warn!("snowfall: failed to toggle pause: {e:?}");
		}
	}

	fn hide(&mut self) {
		let _ = self.container.style().set_property("display", "none");
	}

	fn show(&mut self) {
		let _ = self.container.style().remove_property("display");
	}

	fn teardown(&mut self) {
		self.container.remove();
		if let Some(node) = self.animation_style.take() {
			node.remove();
		}
		if let Some(node) = self.images_style.take() {
			node.remove();
		}
		if let Some(handle) = self.base_handle.take() {
			release_base_style(handle);
		}
	}
}

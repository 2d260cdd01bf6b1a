//! JavaScript entry point: `new Snowflakes(params, container)`.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::config::SnowfallConfig;
use super::dom::{DomSurface, browser_rng};
use super::error::SnowfallError;
use super::session::SnowfallSession;

pub(crate) type SharedSession = Rc<RefCell<SnowfallSession<DomSurface>>>;

fn to_js(err: SnowfallError) -> JsValue {
	JsValue::from_str(&err.to_string())
}

/// Decode a plain JS options object into a validated configuration.
pub fn config_from_js(params: &JsValue) -> Result<SnowfallConfig, JsValue> {
	if params.is_undefined() || params.is_null() {
		return Ok(SnowfallConfig::default());
	}
	let text: String = js_sys::JSON::stringify(params)?.into();
	SnowfallConfig::from_json(&text).map_err(to_js)
}

/// Register a window resize listener that resizes `session`.
pub(crate) fn listen_for_resize(session: SharedSession) -> Option<Closure<dyn FnMut()>> {
	let window = web_sys::window()?;
	let on_resize = Closure::<dyn FnMut()>::new(move || match session.try_borrow_mut() {
		Ok(mut session) => {
			if let Err(e) = session.resize() {
				warn!("snowfall: resize failed: {e}");
			}
		}
		Err(_) => warn!("snowfall: resize skipped, session busy"),
	});
	window
		.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
		.ok()?;
	Some(on_resize)
}

pub(crate) fn stop_listening(on_resize: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
	}
}

/// A snowfall overlay controlled from JavaScript.
#[wasm_bindgen]
pub struct Snowflakes {
	session: SharedSession,
	on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl Snowflakes {
	/// Start snowing over `container`, or over the whole page when omitted.
	#[wasm_bindgen(constructor)]
	pub fn new(params: JsValue, container: Option<HtmlElement>) -> Result<Snowflakes, JsValue> {
		let config = config_from_js(&params)?;
		let surface = DomSurface::new(container, &config)?;
		let session = SnowfallSession::new(config, surface, &mut browser_rng()).map_err(to_js)?;
		let session = Rc::new(RefCell::new(session));
		let on_resize = listen_for_resize(session.clone());
		Ok(Self { session, on_resize })
	}

	/// Resume the animation.
	pub fn start(&self) -> Result<(), JsValue> {
		self.session.borrow_mut().start().map_err(to_js)
	}

	/// Pause the animation.
	pub fn stop(&self) -> Result<(), JsValue> {
		self.session.borrow_mut().stop().map_err(to_js)
	}

	/// Re-measure the container and rescale every flake.
	pub fn resize(&self) -> Result<(), JsValue> {
		self.session.borrow_mut().resize().map_err(to_js)
	}

	/// Remove the overlay and its styles.
	pub fn destroy(&mut self) -> Result<(), JsValue> {
		if let Some(on_resize) = self.on_resize.take() {
			stop_listening(&on_resize);
		}
		self.session.borrow_mut().destroy().map_err(to_js)
	}
}

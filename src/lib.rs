//! snowfall: declarative CSS snowfall overlay for web pages.
//!
//! This crate derives per-flake parameters and the matching CSS keyframes,
//! and attaches them to a page either through the Leptos [`Snowfall`]
//! component or the `Snowflakes` class exported to JavaScript.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::snowfall::{
	AnimationDescription, Flake, FlakeParams, Snowfall, SnowfallConfig, SnowfallError,
	SnowfallSession, Snowflakes, Surface, derive_flake_params, generate_animation_description,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("snowfall: logging initialized");
}

/// Load configuration from a script element with id="snowfall-config".
/// Expected format: JSON with optional camelCase keys, e.g. { "count": 80 }
fn load_config() -> Option<SnowfallConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("snowfall-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SnowfallConfig::from_json(&json_text) {
		Ok(config) => {
			info!("snowfall: loaded config with {} flakes", config.count);
			Some(config)
		}
		Err(e) => {
			warn!("snowfall: ignoring config: {}", e);
			None
		}
	}
}

/// Demo application: full-page snowfall with a pause toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();
	let (paused, set_paused) = signal(config.stop);

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Snowfall" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Snowfall config=config paused=Signal::from(paused) fullscreen=true />
		<button
			class="snowfall-toggle"
			on:click=move |_| set_paused.update(|p| *p = !*p)
		>
			{move || if paused.get() { "Start" } else { "Stop" }}
		</button>
	}
}

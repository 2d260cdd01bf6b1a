//! Leptos component wrapping a snowfall session.
//!
//! The component renders a host `<div>` and, once it is mounted, attaches a
//! [`DomSurface`] to it (or to `<body>` when `fullscreen`). Window resizes
//! are forwarded to the session; an optional `paused` signal starts and
//! stops the animation. Unmounting removes the listener and destroys the
//! session, taking the overlay and its styles with it.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use super::config::SnowfallConfig;
use super::dom::{DomSurface, browser_rng};
use super::error::{Result, SnowfallError};
use super::js::{listen_for_resize, stop_listening};
use super::session::SnowfallSession;
use super::surface::Surface;

/// A session owned by a mounted component, plus its resize listener.
struct Mounted<S: Surface, L> {
	session: Rc<RefCell<SnowfallSession<S>>>,
	listener: Option<L>,
}

impl<S: Surface, L> Mounted<S, L> {
	/// Unregister the listener, then destroy the session.
	fn unmount(self, stop: impl FnOnce(&L)) -> Result<()> {
		if let Some(listener) = &self.listener {
			stop(listener);
		}
		self.session.borrow_mut().destroy()
	}
}

type MountedSlot = Rc<RefCell<Option<Mounted<DomSurface, Closure<dyn FnMut()>>>>>;

fn set_paused<S: Surface>(session: &RefCell<SnowfallSession<S>>, paused: bool) {
	let mut session = session.borrow_mut();
	let result = if paused { session.stop() } else { session.start() };
	if let Err(e) = result {
		warn!("snowfall: {e}");
	}
}

/// Snowfall overlay over the component's parent, or over the whole page.
#[component]
pub fn Snowfall(
	#[prop(optional)] config: Option<SnowfallConfig>,
	#[prop(optional)] paused: Option<Signal<bool>>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let mounted: MountedSlot = Rc::new(RefCell::new(None));
	let mounted_init = mounted.clone();

	Effect::new(move |_| {
		let Some(host) = host_ref.get() else {
			return;
		};
		if mounted_init.borrow().is_some() {
			return;
		}
		let host: HtmlElement = host.into();
		let config = config.clone().unwrap_or_default();

		let to_js = |e: SnowfallError| JsValue::from_str(&e.to_string());
		let created = config
			.validate()
			.map_err(to_js)
			.and_then(|()| DomSurface::new((!fullscreen).then_some(host), &config))
			.and_then(|surface| SnowfallSession::new(config, surface, &mut browser_rng()).map_err(to_js));
		let session = match created {
			Ok(created) => Rc::new(RefCell::new(created)),
			Err(e) => {
				error!("snowfall: failed to start: {e:?}");
				return;
			}
		};

		if let Some(paused) = paused {
			set_paused(&session, paused.get_untracked());
		}
		let listener = listen_for_resize(session.clone());
		*mounted_init.borrow_mut() = Some(Mounted { session, listener });
	});

	if let Some(paused) = paused {
		let mounted_paused = mounted.clone();
		Effect::new(move |_| {
			let paused = paused.get();
			if let Some(ref m) = *mounted_paused.borrow() {
				set_paused(&m.session, paused);
			}
		});
	}

	// Cleanup must be `Send`; the slot only ever lives on the main thread.
	let mounted_cleanup = SendWrapper::new(mounted);
	on_cleanup(move || {
		let mounted = mounted_cleanup.take();
		let Some(m) = mounted.borrow_mut().take() else {
			return;
		};
		if let Err(e) = m.unmount(stop_listening) {
			warn!("snowfall: teardown failed: {e}");
		}
	});

	view! {
		<div
			node_ref=host_ref
			class="snowfall-host"
			style="position: relative; width: 100%; height: 100%; pointer-events: none;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::snowfall::surface::testing::{Event, RecordingSurface};

	fn mounted(count: usize, listener: Option<u32>) -> Mounted<RecordingSurface, u32> {
		let config = SnowfallConfig { count, ..Default::default() };
		let session =
			SnowfallSession::new(config, RecordingSurface::tall(400.0), &mut StdRng::seed_from_u64(3))
				.unwrap();
		Mounted {
			session: Rc::new(RefCell::new(session)),
			listener,
		}
	}

	#[test]
	fn unmount_stops_listening_and_tears_down() {
		let m = mounted(2, Some(7));
		let session = m.session.clone();
		let stopped = Cell::new(None);

		m.unmount(|listener| stopped.set(Some(*listener))).unwrap();

		assert_eq!(stopped.get(), Some(7));
		let session = session.borrow();
		assert!(session.is_destroyed());
		assert!(session.flakes().is_empty());
		assert!(
			session
				.surface()
				.events
				.ends_with(&[Event::Detach(0), Event::Detach(1), Event::Teardown])
		);
	}

	#[test]
	fn unmount_without_listener_still_destroys() {
		let m = mounted(1, None);
		let session = m.session.clone();
		let called = Cell::new(false);

		m.unmount(|_| called.set(true)).unwrap();

		assert!(!called.get());
		assert!(session.borrow().is_destroyed());
	}

	#[test]
	fn remount_gets_a_fresh_session() {
		let first = mounted(1, None);
		let first_session = first.session.clone();
		first.unmount(|_| {}).unwrap();

		let second = mounted(1, None);
		assert!(first_session.borrow().is_destroyed());
		assert!(!second.session.borrow().is_destroyed());
		assert_eq!(second.session.borrow().flakes().len(), 1);
	}
}

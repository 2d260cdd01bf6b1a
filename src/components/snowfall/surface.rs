//! Host surface abstraction.
//!
//! The session drives everything that touches the host through this trait,
//! so the orchestration can run against the DOM or a test recorder.

use super::flake::{Declarations, FlakeStyle};
use super::keyframes::AnimationDescription;

/// The container a snowfall session renders into.
pub trait Surface {
	/// Handle to one attached flake element.
	type Handle;

	/// Current height available to fall through, in pixels.
	fn measure_height(&self) -> f64;

	/// Attach a flake element styled with `style`.
	fn attach_flake(&mut self, style: &FlakeStyle) -> Self::Handle;

	/// Apply updated timing declarations to an attached flake.
	fn update_flake(&mut self, handle: &Self::Handle, timing: &Declarations);

	/// Detach a flake element.
	fn detach_flake(&mut self, handle: Self::Handle);

	/// Replace the injected keyframes with `description`, wholesale.
	fn replace_animation(&mut self, description: &AnimationDescription);

	/// Toggle the paused state of every animation on the surface.
	fn set_paused(&mut self, paused: bool);

	/// Hide the container while it is being reflowed.
	fn hide(&mut self);

	/// Show the container again.
	fn show(&mut self);

	/// Remove the container and every style the surface injected.
	fn teardown(&mut self);
}

#[cfg(test)]
pub(crate) mod testing {
	//! A [`Surface`] that records every call.

	use super::*;

	#[derive(Debug, Clone, PartialEq)]
	pub enum Event {
		Attach(usize),
		Update(usize),
		Detach(usize),
		Animation(f64, usize),
		Paused(bool),
		Hide,
		Show,
		Teardown,
	}

	#[derive(Default)]
	pub struct RecordingSurface {
		pub height: f64,
		pub next: usize,
		pub events: Vec<Event>,
	}

	impl RecordingSurface {
		pub fn tall(height: f64) -> Self {
			Self { height, ..Default::default() }
		}
	}

	impl Surface for RecordingSurface {
		type Handle = usize;

		fn measure_height(&self) -> f64 {
			self.height
		}

		fn attach_flake(&mut self, _style: &FlakeStyle) -> usize {
			let id = self.next;
			self.next += 1;
			self.events.push(Event::Attach(id));
			id
		}

		fn update_flake(&mut self, handle: &usize, _timing: &Declarations) {
			self.events.push(Event::Update(*handle));
		}

		fn detach_flake(&mut self, handle: usize) {
			self.events.push(Event::Detach(handle));
		}

		fn replace_animation(&mut self, description: &AnimationDescription) {
			self.events.push(Event::Animation(description.fall_distance, description.bucket_count()));
		}

		fn set_paused(&mut self, paused: bool) {
			self.events.push(Event::Paused(paused));
		}

		fn hide(&mut self) {
			self.events.push(Event::Hide);
		}

		fn show(&mut self) {
			self.events.push(Event::Show);
		}

		fn teardown(&mut self) {
			self.events.push(Event::Teardown);
		}
	}
}

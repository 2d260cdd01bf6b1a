//! Snowfall session: creates the flakes, owns the animation description and
//! keeps both in step with the surface.

use log::{debug, info};
use rand::Rng;

use super::config::SnowfallConfig;
use super::error::{Result, SnowfallError};
use super::flake::Flake;
use super::keyframes::{AnimationDescription, generate};
use super::surface::Surface;

/// Steps of a resize, executed in [`ResizePhase::ORDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizePhase {
	/// Hide the container so the host doesn't paint a half-updated state.
	Hide,
	/// Measure the surface and rescale every flake.
	Recompute,
	/// Replace the keyframes and push new timing to the flake elements.
	Reflow,
	/// Show the container again.
	Show,
}

impl ResizePhase {
	pub const ORDER: [ResizePhase; 4] = [Self::Hide, Self::Recompute, Self::Reflow, Self::Show];
}

fn usable_height(height: f64) -> bool {
	height.is_finite() && height >= 0.0
}

/// A running snowfall on one surface.
pub struct SnowfallSession<S: Surface> {
	config: SnowfallConfig,
	surface: S,
	flakes: Vec<Flake<S::Handle>>,
	description: AnimationDescription,
	height: f64,
	paused: bool,
	destroyed: bool,
}

impl<S: Surface> SnowfallSession<S> {
	/// Validate `config` and populate `surface` with `config.count` flakes.
	///
	/// Nothing is attached when the configuration is invalid.
	pub fn new<R: Rng + ?Sized>(config: SnowfallConfig, mut surface: S, rng: &mut R) -> Result<Self> {
		config.validate()?;

		let height = config.resolve_height(surface.measure_height());
		if !usable_height(height) {
			return Err(SnowfallError::InvalidConfiguration(format!(
				"surface height must be a non-negative number, got {height}"
			)));
		}
		let description = generate(&config, height);
		surface.replace_animation(&description);

		let mut flakes = Vec::with_capacity(config.count);
		for index in 0..config.count {
			let mut flake = Flake::new(index, height, &config, rng);
			let handle = surface.attach_flake(&flake.style(&config));
			flake.attach(handle)?;
			flake.start_animating()?;
			flakes.push(flake);
		}

		let paused = config.stop;
		if paused {
			surface.set_paused(true);
		}

		info!("snowfall: started {} flakes over {}px", flakes.len(), height);
		Ok(Self {
			config,
			surface,
			flakes,
			description,
			height,
			paused,
			destroyed: false,
		})
	}

	pub fn config(&self) -> &SnowfallConfig {
		&self.config
	}

	pub fn flakes(&self) -> &[Flake<S::Handle>] {
		&self.flakes
	}

	pub fn description(&self) -> &AnimationDescription {
		&self.description
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Height the current description and flake timings were built for.
	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn is_paused(&self) -> bool {
		self.paused
	}

	pub fn is_destroyed(&self) -> bool {
		self.destroyed
	}

	/// Resume the animation.
	pub fn start(&mut self) -> Result<()> {
		self.ensure_alive("start")?;
		self.paused = false;
		self.surface.set_paused(false);
		Ok(())
	}

	/// Pause the animation.
	pub fn stop(&mut self) -> Result<()> {
		self.ensure_alive("stop")?;
		self.paused = true;
		self.surface.set_paused(true);
		Ok(())
	}

	/// Re-measure the surface and bring flakes and keyframes up to date.
	pub fn resize(&mut self) -> Result<()> {
		self.ensure_alive("resize")?;
		let measured = self.surface.measure_height();
		self.resize_to(self.config.resolve_height(measured))
	}

	/// Resize to an explicit height.
	///
	/// The description is replaced wholesale and every flake is rescaled
	/// before the container is shown again.
	/// A negative or non-finite height is rejected and leaves the session unchanged.
	pub fn resize_to(&mut self, height: f64) -> Result<()> {
		self.ensure_alive("resize")?;
		if !usable_height(height) {
			return Err(SnowfallError::InapplicableOperation(format!(
				"cannot resize to a height of {height}px"
			)));
		}
		let mut description = None;

		for phase in ResizePhase::ORDER {
			debug!("snowfall: resize phase {phase:?} ({} -> {height}px)", self.height);
			match phase {
				ResizePhase::Hide => self.surface.hide(),
				ResizePhase::Recompute => {
					for flake in &mut self.flakes {
						flake.resize(height, &self.config)?;
					}
					description = Some(generate(&self.config, height));
				}
				ResizePhase::Reflow => {
					if let Some(description) = description.take() {
						self.description = description;
					}
					self.surface.replace_animation(&self.description);
					for flake in &self.flakes {
						if let Some(handle) = flake.handle() {
							self.surface.update_flake(handle, &flake.timing_style());
						}
					}
					self.height = height;
				}
				ResizePhase::Show => self.surface.show(),
			}
		}
		Ok(())
	}

	/// Detach every flake and tear the surface down. Terminal.
	pub fn destroy(&mut self) -> Result<()> {
		self.ensure_alive("destroy")?;
		for mut flake in self.flakes.drain(..) {
			if let Some(handle) = flake.destroy()? {
				self.surface.detach_flake(handle);
			}
		}
		self.surface.teardown();
		self.destroyed = true;
		info!("snowfall: session destroyed");
		Ok(())
	}

	fn ensure_alive(&self, op: &str) -> Result<()> {
		if self.destroyed {
			return Err(SnowfallError::InapplicableOperation(format!(
				"cannot {op} a destroyed session"
			)));
		}
		Ok(())
	}
}

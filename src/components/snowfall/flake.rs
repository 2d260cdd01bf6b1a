//! A single animated flake.
//!
//! Lifecycle: `Constructed -> Animating -> (resize -> Animating)* -> Destroyed`.
//! Destroyed is terminal; resizing or destroying again is rejected.

use rand::Rng;

use super::config::SnowfallConfig;
use super::constants::{FALL_KEYFRAMES, INNER_CLASS};
use super::error::{Result, SnowfallError};
use super::keyframes::drift_keyframes_name;
use super::params::{FlakeParams, derive, fall_timing};

/// Lifecycle state of a flake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlakeState {
	Constructed,
	Animating,
	Destroyed,
}

/// CSS declarations as `(property, value)` pairs.
pub type Declarations = Vec<(&'static str, String)>;

/// Inline styles and classes for the two elements making up a flake.
///
/// The outer element falls; the inner element drifts and carries the image.
#[derive(Clone, Debug, PartialEq)]
pub struct FlakeStyle {
	pub outer: Declarations,
	pub inner: Declarations,
	pub inner_classes: Vec<String>,
}

/// One particle: derived parameters plus its handle into the surface.
#[derive(Debug)]
pub struct Flake<H> {
	index: usize,
	params: FlakeParams,
	height: f64,
	state: FlakeState,
	handle: Option<H>,
}

impl<H> Flake<H> {
	/// Derive parameters for flake `index` on a surface `height` pixels tall.
	pub fn new<R: Rng + ?Sized>(
		index: usize,
		height: f64,
		config: &SnowfallConfig,
		rng: &mut R,
	) -> Self {
		Self {
			index,
			params: derive(index, config, height, rng),
			height,
			state: FlakeState::Constructed,
			handle: None,
		}
	}

	/// Record the surface element rendering this flake.
	pub fn attach(&mut self, handle: H) -> Result<()> {
		self.ensure_alive("attach")?;
		self.handle = Some(handle);
		Ok(())
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn params(&self) -> &FlakeParams {
		&self.params
	}

	pub fn state(&self) -> FlakeState {
		self.state
	}

	/// Surface height the current timing was computed for.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Surface handle, while the flake is alive.
	pub fn handle(&self) -> Option<&H> {
		self.handle.as_ref()
	}

	/// Mark the flake as handed to the host animation engine.
	pub fn start_animating(&mut self) -> Result<()> {
		self.ensure_alive("start")?;
		self.state = FlakeState::Animating;
		Ok(())
	}

	/// Rescale fall duration and delay to a new surface height.
	///
	/// Both scale by `new_height / old_height`. Size, opacity, buckets,
	/// variant and placement stay as they were.
	pub fn resize(&mut self, new_height: f64, config: &SnowfallConfig) -> Result<()> {
		self.ensure_alive("resize")?;
		let timing = fall_timing(new_height, config, self.params.duration_factor, self.params.phase);
		self.params.fall_duration = timing.duration;
		self.params.start_delay = timing.delay;
		self.height = new_height;
		self.state = FlakeState::Animating;
		Ok(())
	}

	/// Release the surface handle, if one was attached. Parameters are left untouched.
	pub fn destroy(&mut self) -> Result<Option<H>> {
		self.ensure_alive("destroy")?;
		self.state = FlakeState::Destroyed;
		Ok(self.handle.take())
	}

	fn ensure_alive(&self, op: &str) -> Result<()> {
		if self.state == FlakeState::Destroyed {
			return Err(SnowfallError::InapplicableOperation(format!(
				"cannot {op} destroyed flake {}",
				self.index
			)));
		}
		Ok(())
	}

	/// Fall timing declarations. The only part of the style a resize changes.
	pub fn timing_style(&self) -> Declarations {
		vec![
			("animation-duration", format!("{}s", self.params.fall_duration)),
			("animation-delay", format!("{}s", self.params.start_delay)),
		]
	}

	/// Full style for attaching the flake to a surface.
	pub fn style(&self, config: &SnowfallConfig) -> FlakeStyle {
		let p = &self.params;
		let mut outer = vec![("animation-name", FALL_KEYFRAMES.to_string())];
		outer.extend(self.timing_style());
		outer.extend([
			("left", format!("{}%", p.left_percent)),
			("margin-top", format!("{}px", -std::f64::consts::SQRT_2 * p.size)),
			("width", format!("{}px", p.size)),
			("height", format!("{}px", p.size)),
			("opacity", format!("{}", p.opacity)),
		]);

		let mut inner = Vec::new();
		let mut inner_classes = vec![
			INNER_CLASS.to_string(),
			format!("{INNER_CLASS}_type_{}", p.variant),
		];
		if config.wind {
			inner_classes.push(format!("{INNER_CLASS}_wind"));
			inner.push(("animation-name", drift_keyframes_name(p.drift_bucket)));
			inner.push(("animation-delay", format!("{}s", p.drift_delay)));
		}
		if let Some(rotation) = p.rotation {
			let class = if rotation.reverse { "rotation_reverse" } else { "rotation" };
			inner_classes.push(format!("{INNER_CLASS}_{class}"));
			inner.push(("--snowflake-rotation-duration", format!("{}s", rotation.duration)));
		}

		FlakeStyle {
			outer,
			inner,
			inner_classes,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn flake(height: f64, config: &SnowfallConfig) -> Flake<()> {
		let mut f = Flake::new(4, height, config, &mut StdRng::seed_from_u64(42));
		f.attach(()).unwrap();
		f
	}

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
	}

	#[test]
	fn resize_scales_timing_by_height_ratio() {
		let config = SnowfallConfig::default();
		let mut f = flake(600.0, &config);
		let before = f.params().clone();

		f.resize(900.0, &config).unwrap();
		let after = f.params();
		assert!(close(after.fall_duration, before.fall_duration * 1.5));
		assert!(close(after.start_delay, before.start_delay * 1.5));
		assert_eq!(f.height(), 900.0);
	}

	#[test]
	fn resize_keeps_visual_identity() {
		let config = SnowfallConfig::default();
		let mut f = flake(600.0, &config);
		let before = f.params().clone();
		f.resize(250.0, &config).unwrap();
		f.resize(1200.0, &config).unwrap();
		let after = f.params();
		assert_eq!(
			(before.size, before.opacity, before.size_bucket, before.drift_bucket, before.variant),
			(after.size, after.opacity, after.size_bucket, after.drift_bucket, after.variant)
		);
		assert_eq!(before.left_percent, after.left_percent);
		assert_eq!(before.rotation, after.rotation);
	}

	#[test]
	fn lifecycle_runs_to_destroyed() {
		let config = SnowfallConfig::default();
		let mut f = flake(500.0, &config);
		assert_eq!(f.state(), FlakeState::Constructed);
		f.start_animating().unwrap();
		assert_eq!(f.state(), FlakeState::Animating);
		f.resize(400.0, &config).unwrap();
		assert_eq!(f.state(), FlakeState::Animating);
		assert_eq!(f.destroy().unwrap(), Some(()));
		assert_eq!(f.state(), FlakeState::Destroyed);
		assert!(f.handle().is_none());
	}

	#[test]
	fn destroyed_flake_rejects_further_operations() {
		let config = SnowfallConfig::default();
		let mut f = flake(500.0, &config);
		f.destroy().unwrap();
		let params = f.params().clone();

		assert!(matches!(f.resize(800.0, &config), Err(SnowfallError::InapplicableOperation(_))));
		assert!(matches!(f.destroy(), Err(SnowfallError::InapplicableOperation(_))));
		assert!(matches!(f.start_animating(), Err(SnowfallError::InapplicableOperation(_))));
		assert!(matches!(f.attach(()), Err(SnowfallError::InapplicableOperation(_))));
		assert_eq!(f.params(), &params);
	}

	#[test]
	fn style_references_own_drift_bucket() {
		let config = SnowfallConfig::default();
		let f = flake(500.0, &config);
		let style = f.style(&config);
		let expected = drift_keyframes_name(f.params().drift_bucket);
		assert!(style.inner.contains(&("animation-name", expected)));
		assert!(style.outer.contains(&("animation-name", FALL_KEYFRAMES.to_string())));
		assert!(style.inner_classes.contains(&"snowflake__inner_wind".to_string()));
	}

	#[test]
	fn calm_still_flake_has_no_inner_animation() {
		let config = SnowfallConfig { wind: false, rotation: false, ..Default::default() };
		let style = flake(500.0, &config).style(&config);
		assert!(style.inner.is_empty());
		assert_eq!(style.inner_classes.len(), 2);
	}
}

//! Snowfall configuration.
//!
//! A [`SnowfallConfig`] is built once per session, validated, and only read
//! afterwards. It decodes from camelCase JSON where every key is optional:
//!
//! ```json
//! { "count": 80, "minSize": 6, "maxSize": 20, "wind": false }
//! ```

use serde::Deserialize;

use super::constants::*;
use super::error::{Result, SnowfallError};

/// Options controlling the look and motion of a snowfall session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SnowfallConfig {
	/// CSS color used to tint the flake images.
	pub color: String,
	/// Number of flakes.
	pub count: usize,
	/// Animation speed multiplier. Higher values fall faster.
	pub speed: f64,
	/// Start the session paused.
	pub stop: bool,
	/// Rotate flakes while they fall.
	pub rotation: bool,
	pub min_opacity: f64,
	pub max_opacity: f64,
	/// Smallest flake size in pixels.
	pub min_size: f64,
	/// Largest flake size in pixels.
	pub max_size: f64,
	/// Number of size buckets and image variants.
	pub types: usize,
	/// Explicit surface width. Informational; flakes are placed by percent.
	pub width: Option<f64>,
	/// Explicit surface height. Measured from the host when absent.
	pub height: Option<f64>,
	/// Sway flakes sideways while they fall.
	pub wind: bool,
	/// Stacking order of the overlay container.
	pub z_index: i32,
}

impl Default for SnowfallConfig {
	fn default() -> Self {
		Self {
			color: DEFAULT_COLOR.to_string(),
			count: DEFAULT_COUNT,
			speed: DEFAULT_SPEED,
			stop: false,
			rotation: true,
			min_opacity: DEFAULT_MIN_OPACITY,
			max_opacity: DEFAULT_MAX_OPACITY,
			min_size: DEFAULT_MIN_SIZE,
			max_size: DEFAULT_MAX_SIZE,
			types: DEFAULT_TYPES,
			width: None,
			height: None,
			wind: true,
			z_index: DEFAULT_Z_INDEX,
		}
	}
}

impl SnowfallConfig {
	/// Decode and validate a configuration from JSON text.
	pub fn from_json(text: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Check ranges and counts. Called once before any flake is created.
	pub fn validate(&self) -> Result<()> {
		let invalid = |msg: String| Err(SnowfallError::InvalidConfiguration(msg));

		if !(self.min_size.is_finite() && self.min_size > 0.0) {
			return invalid(format!("minSize must be positive, got {}", self.min_size));
		}
		if !(self.max_size.is_finite() && self.max_size > 0.0) {
			return invalid(format!("maxSize must be positive, got {}", self.max_size));
		}
		if self.min_size > self.max_size {
			return invalid(format!(
				"minSize {} is greater than maxSize {}",
				self.min_size, self.max_size
			));
		}
		if !(0.0..=1.0).contains(&self.min_opacity) || !(0.0..=1.0).contains(&self.max_opacity) {
			return invalid(format!(
				"opacity range [{}, {}] must lie within [0, 1]",
				self.min_opacity, self.max_opacity
			));
		}
		if self.min_opacity > self.max_opacity {
			return invalid(format!(
				"minOpacity {} is greater than maxOpacity {}",
				self.min_opacity, self.max_opacity
			));
		}
		if self.types < 1 {
			return invalid("types must be at least 1".to_string());
		}
		if !(self.speed.is_finite() && self.speed > 0.0) {
			return invalid(format!("speed must be positive, got {}", self.speed));
		}
		if let Some(height) = self.height {
			if !(height.is_finite() && height > 0.0) {
				return invalid(format!("height must be positive, got {height}"));
			}
		}
		Ok(())
	}

	/// The surface height to animate over: the explicit height, or the measured one.
	pub fn resolve_height(&self, measured: f64) -> f64 {
		self.height.unwrap_or(measured)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = SnowfallConfig::default();
		assert_eq!(config.count, 50);
		assert_eq!(config.types, 6);
		assert_eq!(config.min_size, 8.0);
		assert_eq!(config.max_size, 18.0);
		assert!(config.rotation && config.wind && !config.stop);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn json_keys_are_camel_case_and_optional() {
		let config =
			SnowfallConfig::from_json(r#"{"count": 3, "minSize": 10, "zIndex": 5, "wind": false}"#)
				.unwrap();
		assert_eq!(
			config,
			SnowfallConfig {
				count: 3,
				min_size: 10.0,
				z_index: 5,
				wind: false,
				..SnowfallConfig::default()
			}
		);
	}

	#[test]
	fn inverted_size_range_is_rejected() {
		let err = SnowfallConfig::from_json(r#"{"minSize": 20, "maxSize": 10}"#).unwrap_err();
		assert!(matches!(err, SnowfallError::InvalidConfiguration(_)));
	}

	#[test]
	fn negative_count_is_rejected_at_decoding() {
		let err = SnowfallConfig::from_json(r#"{"count": -1}"#).unwrap_err();
		assert!(err.is_invalid_configuration());
	}

	#[test]
	fn bad_ranges_are_rejected() {
		let cases = [
			SnowfallConfig { min_opacity: 0.9, max_opacity: 0.2, ..Default::default() },
			SnowfallConfig { max_opacity: 1.5, ..Default::default() },
			SnowfallConfig { types: 0, ..Default::default() },
			SnowfallConfig { speed: 0.0, ..Default::default() },
			SnowfallConfig { min_size: 0.0, ..Default::default() },
			SnowfallConfig { height: Some(-10.0), ..Default::default() },
		];
		for config in cases {
			assert!(config.validate().is_err(), "{config:?} should be rejected");
		}
	}

	#[test]
	fn degenerate_but_valid_configs_pass() {
		let config = SnowfallConfig {
			count: 0,
			types: 1,
			min_size: 12.0,
			max_size: 12.0,
			..Default::default()
		};
		assert!(config.validate().is_ok());
	}

	#[test]
	fn explicit_height_wins_over_measured() {
		let config = SnowfallConfig { height: Some(300.0), ..Default::default() };
		assert_eq!(config.resolve_height(900.0), 300.0);
		assert_eq!(SnowfallConfig::default().resolve_height(900.0), 900.0);
	}
}

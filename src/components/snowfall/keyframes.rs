//! Declarative animation description shared by all flakes.
//!
//! One vertical fall keyframe set moves every flake from the top of the
//! surface to `height + max_size`. One horizontal drift keyframe set per
//! size bucket sways flakes by [`drift_amplitude`]. Flakes reference these
//! by name and supply their own duration and delay.

use std::fmt;

use super::config::SnowfallConfig;
use super::constants::{DRIFT_KEYFRAMES_PREFIX, FALL_KEYFRAMES};
use super::params::{drift_amplitude, max_inner_size};

/// Distances the keyframe sets translate by, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDescription {
	/// Vertical travel of the fall keyframes.
	pub fall_distance: f64,
	/// Horizontal travel per drift bucket, indexed by bucket.
	pub drift_distances: Vec<f64>,
}

/// Build the description for a surface of `height` pixels.
///
/// Pure: identical inputs give identical output, so re-injecting after a
/// resize with an unchanged height is a no-op for the host.
pub fn generate(config: &SnowfallConfig, height: f64) -> AnimationDescription {
	AnimationDescription {
		fall_distance: height + config.max_size,
		drift_distances: (0..=max_inner_size(config))
			.map(|bucket| drift_amplitude(bucket, config))
			.collect(),
	}
}

/// Keyframe name for a drift bucket.
pub fn drift_keyframes_name(bucket: usize) -> String {
	format!("{DRIFT_KEYFRAMES_PREFIX}{bucket}")
}

impl AnimationDescription {
	/// Number of drift keyframe sets.
	pub fn bucket_count(&self) -> usize {
		self.drift_distances.len()
	}

	/// Drift travel for a bucket, if that bucket exists.
	pub fn drift_distance(&self, bucket: usize) -> Option<f64> {
		self.drift_distances.get(bucket).copied()
	}

	/// Render as CSS `@keyframes` rules (with `-webkit-` duplicates).
	pub fn to_css(&self) -> String {
		self.to_string()
	}
}

fn write_keyframes(f: &mut fmt::Formatter<'_>, name: &str, axis: char, to: f64) -> fmt::Result {
	writeln!(
		f,
		"@-webkit-keyframes {name}{{from{{-webkit-transform:translate{axis}(0px)}}to{{-webkit-transform:translate{axis}({to}px);}}}}"
	)?;
	writeln!(
		f,
		"@keyframes {name}{{from{{transform:translate{axis}(0px)}}to{{transform:translate{axis}({to}px)}}}}"
	)
}

impl fmt::Display for AnimationDescription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_keyframes(f, FALL_KEYFRAMES, 'Y', self.fall_distance)?;
		for (bucket, distance) in self.drift_distances.iter().enumerate() {
			write_keyframes(f, &drift_keyframes_name(bucket), 'X', *distance)?;
		}
		Ok(())
	}
}

//! Per-flake parameter derivation.
//!
//! Derivation runs in two passes:
//!
//! - [`discretize`] picks the size bucket, image variant and drift bucket.
//!   It is a pure function of `(index, config)` so the buckets it returns can
//!   be used as keys into the generated keyframe sets.
//! - [`sample`] draws the continuous values (opacity, timing jitter,
//!   placement, rotation) from a caller-supplied random source.
//!
//! The size and drift formulas here are shared with
//! [`keyframes`](super::keyframes); a flake must never reference a drift
//! bucket whose keyframes were generated from a different formula.

use rand::Rng;

use super::config::SnowfallConfig;
use super::constants::*;

/// Buckets chosen for a flake. Stable for a given `(index, config)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Discretized {
	pub size_bucket: usize,
	pub variant: usize,
	pub drift_bucket: usize,
}

/// Rotation of the inner flake element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
	/// Spin counter-clockwise.
	pub reverse: bool,
	/// Seconds per full turn.
	pub duration: f64,
}

/// Randomly drawn values for a flake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Samples {
	pub opacity: f64,
	/// Fraction of the slowest fall time, in `[FALL_JITTER_MIN, 1]`.
	pub duration_factor: f64,
	/// Start delay as a fraction of the fall duration, in `[0, 1)`.
	pub phase: f64,
	pub left_percent: f64,
	pub drift_delay: f64,
	pub rotation: Option<Rotation>,
}

/// Everything a flake needs to render and animate.
#[derive(Clone, Debug, PartialEq)]
pub struct FlakeParams {
	pub size_bucket: usize,
	/// Rendered size in pixels, `bucket_size(size_bucket)`.
	pub size: f64,
	pub variant: usize,
	pub drift_bucket: usize,
	pub opacity: f64,
	/// Seconds to fall the full surface height.
	pub fall_duration: f64,
	/// Seconds before the first fall starts.
	pub start_delay: f64,
	pub duration_factor: f64,
	pub phase: f64,
	pub left_percent: f64,
	pub drift_delay: f64,
	pub rotation: Option<Rotation>,
}

/// Fall duration and start delay for one surface height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FallTiming {
	pub duration: f64,
	pub delay: f64,
}

/// Highest bucket index emitted for this configuration.
pub fn max_inner_size(config: &SnowfallConfig) -> usize {
	config.types.saturating_sub(1)
}

/// Rendered size of a bucket, interpolated across `[min_size, max_size]`.
pub fn bucket_size(bucket: usize, config: &SnowfallConfig) -> f64 {
	let max_bucket = max_inner_size(config);
	if max_bucket == 0 {
		return config.min_size;
	}
	let t = bucket.min(max_bucket) as f64 / max_bucket as f64;
	(config.min_size + (config.max_size - config.min_size) * t).clamp(config.min_size, config.max_size)
}

/// Horizontal travel of a drift keyframe set.
pub fn drift_amplitude(bucket: usize, config: &SnowfallConfig) -> f64 {
	(bucket_size(bucket, config) - config.min_size) * DRIFT_SCALE
}

/// Drift bucket referenced by a flake of the given size bucket.
///
/// Buckets are mirrored so the largest flakes use the smallest amplitude.
pub fn drift_bucket_for(size_bucket: usize, config: &SnowfallConfig) -> usize {
	if config.wind {
		max_inner_size(config) - size_bucket.min(max_inner_size(config))
	} else {
		0
	}
}

/// Deterministic pseudo-random value in `[0, 1)` for a seed.
fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	x - x.floor()
}

fn pick_bucket(u: f64, buckets: usize) -> usize {
	((u * buckets as f64) as usize).min(buckets.saturating_sub(1))
}

/// Choose size bucket, variant and drift bucket for a flake.
pub fn discretize(index: usize, config: &SnowfallConfig) -> Discretized {
	let seed = index as f64 + 1.0;
	let size_bucket = if config.min_size == config.max_size {
		0
	} else {
		pick_bucket(pseudo_random(seed * 1.1), config.types)
	};
	Discretized {
		size_bucket,
		variant: pick_bucket(pseudo_random(seed * 2.3), config.types),
		drift_bucket: drift_bucket_for(size_bucket, config),
	}
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Draw the continuous per-flake values.
pub fn sample<R: Rng + ?Sized>(config: &SnowfallConfig, rng: &mut R) -> Samples {
	let opacity = lerp(config.min_opacity, config.max_opacity, rng.random::<f64>())
		.clamp(config.min_opacity, config.max_opacity);
	let duration_factor = lerp(FALL_JITTER_MIN, 1.0, rng.random::<f64>());
	let phase = rng.random::<f64>();
	let left_percent = rng.random::<f64>() * LEFT_PERCENT_MAX;
	let drift_delay = rng.random::<f64>() * DRIFT_DELAY_MAX_SECS;
	let rotation = config.rotation.then(|| Rotation {
		reverse: rng.random_bool(0.5),
		duration: lerp(ROTATION_MIN_SECS, ROTATION_MAX_SECS, rng.random::<f64>()),
	});

	Samples {
		opacity,
		duration_factor,
		phase,
		left_percent,
		drift_delay,
		rotation,
	}
}

/// Fall timing at a surface height.
///
/// Both values are linear in `height`, so taller surfaces take
/// proportionally longer at the same apparent speed.
pub fn fall_timing(
	height: f64,
	config: &SnowfallConfig,
	duration_factor: f64,
	phase: f64,
) -> FallTiming {
	let longest = height / FALL_PIXELS_PER_SECOND / config.speed;
	let duration = longest * duration_factor;
	FallTiming {
		duration,
		delay: duration * phase,
	}
}

/// Derive the full parameter set for flake `index` on a surface of `height` pixels.
pub fn derive<R: Rng + ?Sized>(
	index: usize,
	config: &SnowfallConfig,
	height: f64,
	rng: &mut R,
) -> FlakeParams {
	let buckets = discretize(index, config);
	let samples = sample(config, rng);
	let timing = fall_timing(height, config, samples.duration_factor, samples.phase);

	FlakeParams {
		size_bucket: buckets.size_bucket,
		size: bucket_size(buckets.size_bucket, config),
		variant: buckets.variant,
		drift_bucket: buckets.drift_bucket,
		opacity: samples.opacity,
		fall_duration: timing.duration,
		start_delay: timing.delay,
		duration_factor: samples.duration_factor,
		phase: samples.phase,
		left_percent: samples.left_percent,
		drift_delay: samples.drift_delay,
		rotation: samples.rotation,
	}
}

//! Snowfall constants.

// Configuration defaults
pub const DEFAULT_COLOR: &str = "#5ECDEF";
pub const DEFAULT_COUNT: usize = 50;
pub const DEFAULT_SPEED: f64 = 1.0;
pub const DEFAULT_MIN_OPACITY: f64 = 0.6;
pub const DEFAULT_MAX_OPACITY: f64 = 1.0;
pub const DEFAULT_MIN_SIZE: f64 = 8.0;
pub const DEFAULT_MAX_SIZE: f64 = 18.0;
pub const DEFAULT_TYPES: usize = 6;
pub const DEFAULT_Z_INDEX: i32 = 9999;

/// Horizontal drift in pixels per pixel of size above `min_size`.
pub const DRIFT_SCALE: f64 = 4.0;

/// Surface pixels covered per second by the slowest flake at speed 1.
pub const FALL_PIXELS_PER_SECOND: f64 = 50.0;
/// Fastest flake falls in this fraction of the slowest flake's time.
pub const FALL_JITTER_MIN: f64 = 1.0 / 3.0;

// Per-flake placement and motion
pub const LEFT_PERCENT_MAX: f64 = 99.0;
pub const DRIFT_DELAY_MAX_SECS: f64 = 4.0;
pub const DRIFT_PERIOD_SECS: f64 = 1.0;
pub const ROTATION_MIN_SECS: f64 = 6.0;
pub const ROTATION_MAX_SECS: f64 = 12.0;

// CSS names shared by the stylesheet and the flake elements
pub const CONTAINER_CLASS: &str = "snowflakes";
pub const CONTAINER_BODY_CLASS: &str = "snowflakes_body";
pub const PAUSED_CLASS: &str = "snowflakes_paused";
pub const FLAKE_CLASS: &str = "snowflake";
pub const INNER_CLASS: &str = "snowflake__inner";
pub const FALL_KEYFRAMES: &str = "snowflake_y";
pub const DRIFT_KEYFRAMES_PREFIX: &str = "snowflake_x_";

//! Declarative snowfall overlay.
//!
//! Flakes are plain elements animated by CSS keyframes; nothing runs per
//! frame. The pieces, bottom-up:
//!
//! - [`params`] derives each flake's size, opacity, timing and buckets
//! - [`keyframes`] generates the fall and drift keyframe sets those buckets refer to
//! - [`flake`] holds one flake and rescales it on resize
//! - [`session`] creates the flakes and keeps them in step with a [`Surface`]
//! - [`dom`] is the browser [`Surface`]
//!
//! # Example
//!
//! ```ignore
//! use snowfall::{Snowfall, SnowfallConfig};
//!
//! let config = SnowfallConfig { count: 80, wind: false, ..Default::default() };
//! view! { <Snowfall config=config fullscreen=true /> }
//! ```

mod component;
pub mod config;
pub mod constants;
mod dom;
pub mod error;
pub mod flake;
mod js;
pub mod keyframes;
pub mod params;
pub mod registry;
pub mod session;
mod styles;
pub mod surface;

pub use component::Snowfall;
pub use config::SnowfallConfig;
pub use dom::DomSurface;
pub use error::{Result, SnowfallError};
pub use flake::{Flake, FlakeState};
pub use js::Snowflakes;
pub use keyframes::AnimationDescription;
pub use params::FlakeParams;
pub use session::SnowfallSession;
pub use surface::Surface;

use rand::Rng;

/// Derive the parameters of flake `index` on a surface `height` pixels tall.
pub fn derive_flake_params<R: Rng + ?Sized>(
	index: usize,
	config: &SnowfallConfig,
	height: f64,
	rng: &mut R,
) -> FlakeParams {
	params::derive(index, config, height, rng)
}

/// Generate the keyframe distances for a surface `height` pixels tall.
pub fn generate_animation_description(config: &SnowfallConfig, height: f64) -> AnimationDescription {
	keyframes::generate(config, height)
}

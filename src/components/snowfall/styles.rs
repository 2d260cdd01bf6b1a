//! Stylesheets injected into the host document.
//!
//! The base stylesheet is shared by every session on the page. The image
//! stylesheet depends on the session's color and number of variants.

use std::f64::consts::PI;
use std::fmt::Write;

use super::constants::*;

/// Layout, pause and rotation rules shared by all sessions.
pub fn base_style() -> String {
	format!(
		".{CONTAINER_CLASS}{{pointer-events:none;position:absolute;top:0;left:0;width:100%;height:100%;overflow:hidden}}\n\
		 .{CONTAINER_BODY_CLASS}{{position:fixed}}\n\
		 .{PAUSED_CLASS} .{FLAKE_CLASS},.{PAUSED_CLASS} .{INNER_CLASS},.{PAUSED_CLASS} .{INNER_CLASS}:before{{animation-play-state:paused}}\n\
		 .{FLAKE_CLASS}{{position:absolute;top:0;animation-timing-function:linear;animation-iteration-count:infinite;will-change:transform}}\n\
		 .{INNER_CLASS}{{position:absolute;top:0;right:0;bottom:0;left:0}}\n\
		 .{INNER_CLASS}:before{{content:'';position:absolute;top:0;right:0;bottom:0;left:0;background-size:100% 100%}}\n\
		 .{INNER_CLASS}_wind{{animation-duration:{DRIFT_PERIOD_SECS}s;animation-timing-function:ease-in-out;animation-iteration-count:infinite;animation-direction:alternate}}\n\
		 .{INNER_CLASS}_rotation:before{{animation:snowflake_rotation var(--snowflake-rotation-duration,{ROTATION_MIN_SECS}s) linear infinite}}\n\
		 .{INNER_CLASS}_rotation_reverse:before{{animation:snowflake_rotation_reverse var(--snowflake-rotation-duration,{ROTATION_MIN_SECS}s) linear infinite}}\n\
		 @keyframes snowflake_rotation{{from{{transform:rotate(0deg)}}to{{transform:rotate(360deg)}}}}\n\
		 @keyframes snowflake_rotation_reverse{{from{{transform:rotate(0deg)}}to{{transform:rotate(-360deg)}}}}\n"
	)
}

/// Percent-encode the characters that break an SVG data URI inside CSS.
fn encode_svg(svg: &str) -> String {
	svg.replace('%', "%25")
		.replace('#', "%23")
		.replace('<', "%3C")
		.replace('>', "%3E")
		.replace('"', "'")
}

/// A six-armed flake. Variants differ in how many side branches each arm has
/// and how far they reach.
pub fn flake_svg(variant: usize, color: &str) -> String {
	const ARMS: usize = 6;
	const RADIUS: f64 = 14.0;
	let branches = variant % 3 + 1;
	let reach = 3.0 + (variant % 4) as f64 * 1.5;

	let mut path = String::new();
	for arm in 0..ARMS {
		let angle = arm as f64 * 2.0 * PI / ARMS as f64;
		let (sin, cos) = angle.sin_cos();
		let _ = write!(path, "M16 16L{:.1} {:.1}", 16.0 + RADIUS * cos, 16.0 + RADIUS * sin);
		for branch in 1..=branches {
			let along = RADIUS * branch as f64 / (branches + 1) as f64;
			let (bx, by) = (16.0 + along * cos, 16.0 + along * sin);
			for side in [-1.0, 1.0] {
				let (s, c) = (angle + side * PI / 4.0).sin_cos();
				let _ = write!(path, "M{bx:.1} {by:.1}L{:.1} {:.1}", bx + reach * c, by + reach * s);
			}
		}
	}

	format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 32 32\"><path d=\"{path}\" stroke=\"{color}\" stroke-width=\"1.6\" stroke-linecap=\"round\" fill=\"none\"/></svg>"
	)
}

/// Background image rules for `types` variants tinted with `color`.
pub fn images_style(types: usize, color: &str) -> String {
	let mut css = String::new();
	for variant in 0..types {
		let _ = writeln!(
			css,
			".{INNER_CLASS}_type_{variant}:before{{background-image:url(\"data:image/svg+xml,{}\")}}",
			encode_svg(&flake_svg(variant, color))
		);
	}
	css
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_style_covers_pause_and_rotation() {
		let css = base_style();
		assert!(css.contains(".snowflakes_paused .snowflake"));
		assert!(css.contains("@keyframes snowflake_rotation{"));
		assert!(css.contains("--snowflake-rotation-duration"));
	}

	#[test]
	fn one_image_rule_per_variant() {
		let css = images_style(4, "#5ECDEF");
		assert_eq!(css.lines().count(), 4);
		assert!(css.contains("snowflake__inner_type_3:before"));
		assert!(!css.contains("snowflake__inner_type_4"));
	}

	#[test]
	fn color_is_encoded_into_data_uri() {
		let css = images_style(1, "#5ECDEF");
		assert!(css.contains("%235ECDEF"));
		assert!(!css.contains('#'));
		assert!(!css.contains('<'));
	}

	#[test]
	fn variants_look_different() {
		assert_ne!(flake_svg(0, "white"), flake_svg(1, "white"));
	}
}

//! Error type shared by configuration, flakes and sessions.

use thiserror::Error;

/// Errors raised by the snowfall core.
#[derive(Debug, Error)]
pub enum SnowfallError {
	/// The configuration has inconsistent ranges or counts.
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// The configuration JSON could not be decoded.
	#[error("invalid configuration: {0}")]
	Json(#[from] serde_json::Error),

	/// The operation is not valid in the current lifecycle state.
	#[error("inapplicable operation: {0}")]
	InapplicableOperation(String),
}

impl SnowfallError {
	/// Whether this error rejects the configuration (including undecodable JSON).
	pub fn is_invalid_configuration(&self) -> bool {
		matches!(self, Self::InvalidConfiguration(_) | Self::Json(_))
	}
}

/// Result alias for snowfall operations.
pub type Result<T> = std::result::Result<T, SnowfallError>;

//! Tunables for the optimizing encoders.

use serde::{Deserialize, Serialize};

/// Default half width of the per-block step index search window
pub const DEFAULT_WINDOW_HALF_WIDTH: u8 = 24;

/// Search parameters used by the optimizing encode modes.
///
/// Deserializes from partial documents; missing fields take their defaults.
///
/// ```
/// use xadpcm_codec::config::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{ "window_half_width": 8 }"#).unwrap();
/// assert_eq!(config.window_half_width, 8);
/// assert_eq!(config.metric_range, u64::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	/// Step indices searched on each side of the previous block's winner.
	///
	/// Wider windows fit each block better but allow larger jumps of the
	/// starting step between neighbouring blocks, which can pop on fast
	/// attacks.
	pub window_half_width: u8,
	/// Total range of the distortion metric, split evenly across blocks
	pub metric_range: u64,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			window_half_width: DEFAULT_WINDOW_HALF_WIDTH,
			metric_range: u64::MAX,
		}
	}
}

//! Benchmark helper utilities for xadpcm-rs
//!
//! This module provides utilities for generating synthetic PCM buffers used by
//! the codec benchmarks. The signals are deterministic so runs stay comparable.

/// Generates interleaved 16-bit PCM made of a sine sweep with a small buzz on top
///
/// The sweep exercises step index adaptation in both directions, the buzz
/// keeps the low step sizes busy during quiet passages.
pub fn generate_test_pcm(frames: usize, channels: usize) -> Vec<i16> {
	let mut samples = Vec::with_capacity(frames * channels);

	for frame in 0..frames {
		let t = frame as f64 / frames.max(1) as f64;
		// Frequency rises from 0.01 to 0.5 radians per sample
		let phase = frame as f64 * (0.01 + 0.49 * t);
		// Amplitude envelope: quiet, loud, quiet
		let envelope = (t * std::f64::consts::PI).sin();

		for channel in 0..channels {
			let offset = channel as f64 * 0.9;
			let tone = (phase + offset).sin() * 20000.0 * envelope;
			let buzz = if (frame / 3 + channel) % 2 == 0 { 40.0 } else { -40.0 };
			samples.push((tone + buzz).clamp(-32768.0, 32767.0) as i16);
		}
	}

	samples
}

/// Common benchmark sizes in sample frames
pub mod sizes {
	/// One 64-frame block
	pub const ONE_BLOCK: usize = 64;
	/// Short effect: 16 blocks (~46 ms at 22050 Hz)
	pub const SHORT: usize = 64 * 16;
	/// One second at 22050 Hz, rounded down to whole blocks
	pub const ONE_SECOND: usize = 22050 / 64 * 64;
	/// Ten seconds at 44100 Hz, rounded down to whole blocks
	pub const LONG: usize = 441_000 / 64 * 64;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_pcm() {
		let pcm = generate_test_pcm(1000, 2);
		assert_eq!(pcm.len(), 2000);
		assert!(pcm.iter().any(|&sample| sample > 10000));
		assert!(pcm.iter().any(|&sample| sample < -10000));
	}

	#[test]
	fn test_sizes_are_whole_blocks() {
		assert_eq!(sizes::ONE_BLOCK % 64, 0);
		assert_eq!(sizes::SHORT % 64, 0);
		assert_eq!(sizes::ONE_SECOND % 64, 0);
		assert_eq!(sizes::LONG % 64, 0);
	}
}

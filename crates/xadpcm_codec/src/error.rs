//! Error types for format validation and block conversion.

use std::fmt::Display;

use thiserror::Error;

use crate::codec::CodecMode;

/// The check a format descriptor failed during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatViolation {
	/// Format tag does not match the expected wave format
	FormatTag {
		/// Expected format tag
		expected: u16,
		/// Format tag found in the descriptor
		actual: u16,
	},
	/// Channel count is neither mono nor stereo
	ChannelCount(u16),
	/// Sample rate is zero
	SampleRate(u32),
	/// Bits per sample does not match the fixed sample width
	BitsPerSample {
		/// Expected bits per sample
		expected: u16,
		/// Bits per sample found in the descriptor
		actual: u16,
	},
	/// Block alignment disagrees with the value derived from the other fields
	BlockAlign {
		/// Derived block alignment
		expected: u16,
		/// Block alignment found in the descriptor
		actual: u16,
	},
	/// Average byte rate disagrees with `block_align * sample_rate`
	ByteRate {
		/// Derived byte rate
		expected: u32,
		/// Byte rate found in the descriptor
		actual: u32,
	},
	/// Extra format bytes do not match the ADPCM format extension size
	ExtraSize(u16),
	/// A block must hold at least the header sample
	SamplesPerBlock(u16),
}

impl Display for FormatViolation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FormatTag { expected, actual } => {
				write!(f, "format tag 0x{actual:04X}, expected 0x{expected:04X}")
			}
			Self::ChannelCount(channels) => {
				write!(f, "{channels} channels, only mono and stereo are supported")
			}
			Self::SampleRate(rate) => write!(f, "sample rate {rate} Hz, must be positive"),
			Self::BitsPerSample { expected, actual } => {
				write!(f, "{actual} bits per sample, expected {expected}")
			}
			Self::BlockAlign { expected, actual } => {
				write!(f, "block alignment {actual}, expected {expected}")
			}
			Self::ByteRate { expected, actual } => {
				write!(f, "average byte rate {actual}, expected {expected}")
			}
			Self::ExtraSize(size) => write!(f, "{size} extra format bytes, expected 2"),
			Self::SamplesPerBlock(samples) => write!(f, "{samples} samples per block"),
		}
	}
}

/// Errors that can occur when setting up or running the codec
#[derive(Debug, Error)]
pub enum CodecError {
	/// Format descriptor failed validation
	#[error("Invalid format: {reason}")]
	InvalidFormat {
		/// The failed check
		reason: FormatViolation,
	},

	/// Encoded stream carries a step index outside the step table
	#[error("Corrupt stream: block {block}, channel {channel} has step index {step_index}")]
	CorruptStream {
		/// Index of the offending block
		block: usize,
		/// Channel whose header is corrupt (0 = left/mono, 1 = right)
		channel: usize,
		/// Step index read from the header
		step_index: u8,
	},

	/// Input buffer does not hold exactly the requested number of blocks
	#[error("Buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
	BufferSizeMismatch {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Block layer asked for a channel layout it cannot pack
	#[error("Unsupported channel count: {0}")]
	UnsupportedChannels(u16),

	/// Sample-level helper called on a codec running the opposite direction
	#[error("Operation not available in {0} mode")]
	ModeMismatch(CodecMode),
}

impl From<FormatViolation> for CodecError {
	fn from(reason: FormatViolation) -> Self {
		Self::InvalidFormat { reason }
	}
}

//! Stream format descriptors.
//!
//! [`PcmFormat`] describes the 16-bit PCM side of the codec and
//! [`AdpcmFormat`] the encoded side. Both derive their block alignment and byte
//! rate from the channel count, so the constructors are the only sensible way
//! to build them; the validators exist for descriptors that arrive from
//! elsewhere (a file header, a config file).

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::FormatViolation;

/// Wave format tag for integer PCM
pub const WAVE_FORMAT_PCM: u16 = 0x0001;

/// Wave format tag for the 4-bit ADPCM layout produced by this codec
pub const WAVE_FORMAT_XBOX_ADPCM: u16 = 0x0069;

/// Bits per sample on the PCM side
pub const PCM_BITS_PER_SAMPLE: u16 = 16;

/// Bits per encoded sample on the ADPCM side
pub const ADPCM_BITS_PER_SAMPLE: u16 = 4;

/// Size of one channel's block header in bytes
pub const ADPCM_HEADER_LENGTH: u16 = 4;

/// Number of extra format bytes following the base ADPCM wave format
pub const ADPCM_EXTRA_SIZE: u16 = 2;

/// Maximum number of channels the codec handles
pub const MAX_CHANNELS: u16 = 2;

/// Computes the encoded block size for `channels` and `samples_per_block`.
///
/// The first sample of every channel lives in the block header, the rest are
/// packed at four bits each. The data area is padded to a multiple of eight
/// bytes, which is what the stereo packer consumes per step, and mono blocks
/// are padded the same way.
pub fn compute_adpcm_alignment(channels: u16, samples_per_block: u16) -> u16 {
	u16::try_from(alignment_bytes(channels, samples_per_block)).unwrap_or(u16::MAX)
}

fn alignment_bytes(channels: u16, samples_per_block: u16) -> u64 {
	let encoded_sample_bits = u64::from(channels) * u64::from(ADPCM_BITS_PER_SAMPLE);
	let header_bytes = u64::from(channels) * u64::from(ADPCM_HEADER_LENGTH);

	let raw_samples = u64::from(samples_per_block).saturating_sub(1);
	let data_bytes = (raw_samples * encoded_sample_bits).div_ceil(8);
	let data_bytes = data_bytes.div_ceil(8) * 8;

	data_bytes + header_bytes
}

/// Description of a 16-bit PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PcmFormat {
	/// Wave format tag, always [`WAVE_FORMAT_PCM`]
	pub format_tag: u16,
	/// Number of channels (1 for mono, 2 for stereo)
	pub channels: u16,
	/// Sample rate in Hz
	pub sample_rate: u32,
	/// Average bytes per second
	pub avg_bytes_per_sec: u32,
	/// Bytes per sample frame
	pub block_align: u16,
	/// Bits per sample, always 16
	pub bits_per_sample: u16,
}

impl PcmFormat {
	/// Creates a PCM format with derived alignment and byte rate
	pub fn new(channels: u16, sample_rate: u32) -> Self {
		let block_align = channels.wrapping_mul(PCM_BITS_PER_SAMPLE / 8);
		Self {
			format_tag: WAVE_FORMAT_PCM,
			channels,
			sample_rate,
			avg_bytes_per_sec: u32::from(block_align).wrapping_mul(sample_rate),
			block_align,
			bits_per_sample: PCM_BITS_PER_SAMPLE,
		}
	}

	/// Checks the descriptor, reporting the first violated constraint
	pub fn validate(&self) -> Result<(), FormatViolation> {
		if self.format_tag != WAVE_FORMAT_PCM {
			return Err(FormatViolation::FormatTag {
				expected: WAVE_FORMAT_PCM,
				actual: self.format_tag,
			});
		}
		validate_channels(self.channels)?;
		validate_sample_rate(self.sample_rate)?;
		if self.bits_per_sample != PCM_BITS_PER_SAMPLE {
			return Err(FormatViolation::BitsPerSample {
				expected: PCM_BITS_PER_SAMPLE,
				actual: self.bits_per_sample,
			});
		}

		let block_align = self.channels * self.bits_per_sample / 8;
		if self.block_align != block_align {
			return Err(FormatViolation::BlockAlign {
				expected: block_align,
				actual: self.block_align,
			});
		}

		let avg_bytes_per_sec = u32::from(self.block_align).wrapping_mul(self.sample_rate);
		if self.avg_bytes_per_sec != avg_bytes_per_sec {
			return Err(FormatViolation::ByteRate {
				expected: avg_bytes_per_sec,
				actual: self.avg_bytes_per_sec,
			});
		}

		Ok(())
	}

	/// Returns `true` if the descriptor passes [`PcmFormat::validate`]
	pub fn is_valid(&self) -> bool {
		self.validate().is_ok()
	}
}

impl Display for PcmFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"PcmFormat:\n\
			- Channels: {}\n\
			- Sample Rate: {} Hz\n\
			- Block Align: {}\n\
			- Bytes/s: {}",
			self.channels, self.sample_rate, self.block_align, self.avg_bytes_per_sec
		)
	}
}

/// Description of a 4-bit ADPCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdpcmFormat {
	/// Wave format tag, always [`WAVE_FORMAT_XBOX_ADPCM`]
	pub format_tag: u16,
	/// Number of channels (1 for mono, 2 for stereo)
	pub channels: u16,
	/// Sample rate in Hz
	pub sample_rate: u32,
	/// Average bytes per second
	pub avg_bytes_per_sec: u32,
	/// Bytes per encoded block
	pub block_align: u16,
	/// Bits per encoded sample, always 4
	pub bits_per_sample: u16,
	/// Size of the format extension, always [`ADPCM_EXTRA_SIZE`]
	pub extra_size: u16,
	/// PCM sample frames per encoded block
	pub samples_per_block: u16,
}

impl AdpcmFormat {
	/// Creates an ADPCM format with derived alignment and byte rate
	pub fn new(channels: u16, sample_rate: u32, samples_per_block: u16) -> Self {
		let block_align = compute_adpcm_alignment(channels, samples_per_block);
		let avg_bytes_per_sec = if samples_per_block == 0 {
			0
		} else {
			let rate = u64::from(sample_rate) * u64::from(block_align) / u64::from(samples_per_block);
			u32::try_from(rate).unwrap_or(u32::MAX)
		};

		Self {
			format_tag: WAVE_FORMAT_XBOX_ADPCM,
			channels,
			sample_rate,
			avg_bytes_per_sec,
			block_align,
			bits_per_sample: ADPCM_BITS_PER_SAMPLE,
			extra_size: ADPCM_EXTRA_SIZE,
			samples_per_block,
		}
	}

	/// Checks the descriptor, reporting the first violated constraint
	pub fn validate(&self) -> Result<(), FormatViolation> {
		if self.format_tag != WAVE_FORMAT_XBOX_ADPCM {
			return Err(FormatViolation::FormatTag {
				expected: WAVE_FORMAT_XBOX_ADPCM,
				actual: self.format_tag,
			});
		}
		if self.extra_size != ADPCM_EXTRA_SIZE {
			return Err(FormatViolation::ExtraSize(self.extra_size));
		}
		validate_channels(self.channels)?;
		validate_sample_rate(self.sample_rate)?;
		if self.bits_per_sample != ADPCM_BITS_PER_SAMPLE {
			return Err(FormatViolation::BitsPerSample {
				expected: ADPCM_BITS_PER_SAMPLE,
				actual: self.bits_per_sample,
			});
		}
		if self.samples_per_block == 0
			|| alignment_bytes(self.channels, self.samples_per_block) > u64::from(u16::MAX)
		{
			return Err(FormatViolation::SamplesPerBlock(self.samples_per_block));
		}

		let block_align = compute_adpcm_alignment(self.channels, self.samples_per_block);
		if self.block_align != block_align {
			return Err(FormatViolation::BlockAlign {
				expected: block_align,
				actual: self.block_align,
			});
		}

		Ok(())
	}

	/// Returns `true` if the descriptor passes [`AdpcmFormat::validate`]
	pub fn is_valid(&self) -> bool {
		self.validate().is_ok()
	}

	/// The PCM format this stream decodes to
	pub fn pcm_format(&self) -> PcmFormat {
		PcmFormat::new(self.channels, self.sample_rate)
	}

	/// Bytes of interleaved 16-bit PCM covered by one encoded block
	pub fn pcm_block_size(&self) -> usize {
		usize::from(self.samples_per_block)
			* usize::from(self.channels)
			* usize::from(PCM_BITS_PER_SAMPLE / 8)
	}
}

impl Display for AdpcmFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"AdpcmFormat:\n\
			- Channels: {}\n\
			- Sample Rate: {} Hz\n\
			- Samples/Block: {}\n\
			- Block Align: {}\n\
			- Bytes/s: {}",
			self.channels,
			self.sample_rate,
			self.samples_per_block,
			self.block_align,
			self.avg_bytes_per_sec
		)
	}
}

fn validate_sample_rate(sample_rate: u32) -> Result<(), FormatViolation> {
	if sample_rate == 0 {
		return Err(FormatViolation::SampleRate(sample_rate));
	}
	Ok(())
}

fn validate_channels(channels: u16) -> Result<(), FormatViolation> {
	if channels == 0 || channels > MAX_CHANNELS {
		return Err(FormatViolation::ChannelCount(channels));
	}
	Ok(())
}

//! One-call helpers for the fixed 64-sample block layout.
//!
//! Asset pipelines usually do not care about block sizes or encoder modes;
//! these helpers pick the 64 frames per block layout and the per-block
//! optimizing encoder. A trailing partial block is dropped, never padded.

use crate::codec::{Codec, CodecMode};
use crate::error::CodecError;
use crate::format::AdpcmFormat;

/// Sample frames per block of the fixed layout
pub const XBOX_SAMPLES_PER_BLOCK: u16 = 64;

/// ADPCM format with 64 frames per block
pub fn xbox_format(channels: u16, sample_rate: u32) -> AdpcmFormat {
	AdpcmFormat::new(channels, sample_rate, XBOX_SAMPLES_PER_BLOCK)
}

/// Size in bytes of the encoding of `sample_frames` frames.
///
/// Only whole blocks count.
pub fn encoded_size(sample_frames: usize, channels: u16) -> usize {
	let format = xbox_format(channels, 0);
	sample_frames / usize::from(XBOX_SAMPLES_PER_BLOCK) * usize::from(format.block_align)
}

/// Encodes interleaved 16-bit samples with the per-block optimizing encoder.
///
/// # Arguments
/// * `samples` - Interleaved PCM samples
/// * `channels` - Number of channels (1 = mono, 2 = stereo)
/// * `sample_rate` - Sample rate in Hz, recorded in the returned format
///
/// # Returns
/// The format describing the encoding and the encoded blocks
pub fn encode_pcm16(
	samples: &[i16],
	channels: u16,
	sample_rate: u32,
) -> Result<(AdpcmFormat, Vec<u8>), CodecError> {
	let format = xbox_format(channels, sample_rate);
	let mut codec = Codec::new(format, CodecMode::EncodeOptimizePerBlock)?;

	let block_len = usize::from(XBOX_SAMPLES_PER_BLOCK) * usize::from(channels);
	let whole_blocks = samples.len() / block_len;
	let encoded = codec.encode_samples(&samples[..whole_blocks * block_len])?;

	Ok((format, encoded))
}

/// Decodes every whole block of `data`
pub fn decode_pcm16(data: &[u8], format: &AdpcmFormat) -> Result<Vec<i16>, CodecError> {
	let mut codec = Codec::new(*format, CodecMode::Decode)?;
	let block_align = codec.encode_alignment();
	let whole_blocks = data.len() / block_align;
	codec.decode_samples(&data[..whole_blocks * block_align])
}

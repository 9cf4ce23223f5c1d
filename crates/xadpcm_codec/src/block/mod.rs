//! Block packing for mono and stereo streams.
//!
//! # Block Structure
//!
//! Every block starts with one 4-byte header per channel:
//!
//! | Offset | Size | Content                         |
//! |--------|------|---------------------------------|
//! | 0      | 2    | First sample (`i16`, LE)        |
//! | 2      | 1    | Step index at block start (0-88)|
//! | 3      | 1    | Reserved, zero                  |
//!
//! Mono blocks follow the header with two codes per byte, low nibble first.
//! Stereo blocks follow the two headers (left, right) with 8-byte groups:
//! a little-endian `u32` holding eight left codes, then one holding eight
//! right codes. Code `i` of a group sits in bits `4*i..4*i+4`. Unused nibbles
//! and the padding up to `block_align` are zero.
//!
//! The packers keep no state of their own. The step index of each channel is
//! handed in through [`StepIndices`] and written back when a block is done,
//! so consecutive calls continue the adaptive sequence.

mod mono;
mod stereo;

use crate::error::CodecError;
use crate::format::{ADPCM_HEADER_LENGTH, AdpcmFormat};
use crate::sample::{decode_sample, encode_sample};
use crate::tables::{is_valid_step_index, next_step_index, step_size};

/// Per-channel step indices carried across blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StepIndices {
	/// Left channel step index (the only one used by mono streams)
	pub left: u8,
	/// Right channel step index
	pub right: u8,
}

impl StepIndices {
	/// Both channels starting from the same step index
	pub fn splat(step_index: u8) -> Self {
		Self {
			left: step_index,
			right: step_index,
		}
	}
}

/// Channel layout of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
	/// One channel, nibble-packed bytes
	Mono,
	/// Two channels, interleaved 32-bit code words
	Stereo,
}

impl ChannelLayout {
	/// Selects the layout for a channel count
	pub fn from_channels(channels: u16) -> Result<Self, CodecError> {
		match channels {
			1 => Ok(Self::Mono),
			2 => Ok(Self::Stereo),
			other => Err(CodecError::UnsupportedChannels(other)),
		}
	}

	/// Number of interleaved channels
	pub fn channels(self) -> usize {
		match self {
			Self::Mono => 1,
			Self::Stereo => 2,
		}
	}
}

/// Encodes and decodes whole blocks of a fixed format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCodec {
	layout: ChannelLayout,
	samples_per_block: usize,
	block_align: usize,
}

impl BlockCodec {
	/// Creates a block codec for a validated ADPCM format
	pub fn new(format: &AdpcmFormat) -> Result<Self, CodecError> {
		format.validate()?;
		Ok(Self {
			layout: ChannelLayout::from_channels(format.channels)?,
			samples_per_block: usize::from(format.samples_per_block),
			block_align: usize::from(format.block_align),
		})
	}

	/// Channel layout of the blocks
	pub fn layout(&self) -> ChannelLayout {
		self.layout
	}

	/// Sample frames per block
	pub fn samples_per_block(&self) -> usize {
		self.samples_per_block
	}

	/// Encoded bytes per block
	pub fn block_align(&self) -> usize {
		self.block_align
	}

	/// Interleaved PCM samples per block
	pub fn pcm_block_len(&self) -> usize {
		self.samples_per_block * self.layout.channels()
	}

	/// Encodes `pcm` into `output`, one block per `pcm_block_len()` samples.
	///
	/// `output` must hold exactly `block_align()` bytes for every block in
	/// `pcm`. On return `state` holds the step indices after the last block.
	pub fn encode(
		&self,
		pcm: &[i16],
		output: &mut [u8],
		state: &mut StepIndices,
	) -> Result<(), CodecError> {
		let block_count = self.check_pcm_len(pcm.len())?;
		check_len(block_count * self.block_align, output.len())?;

		for (frames, block) in
			pcm.chunks_exact(self.pcm_block_len()).zip(output.chunks_exact_mut(self.block_align))
		{
			match self.layout {
				ChannelLayout::Mono => mono::encode_block(frames, block, &mut state.left),
				ChannelLayout::Stereo => stereo::encode_block(frames, block, state),
			}
		}

		if self.layout == ChannelLayout::Mono {
			state.right = state.left;
		}
		Ok(())
	}

	/// Decodes `adpcm` into interleaved PCM samples.
	///
	/// `output` must hold exactly `pcm_block_len()` samples for every block in
	/// `adpcm`. A header carrying a step index outside the step table aborts
	/// the whole call; `state` is left untouched in that case.
	pub fn decode(
		&self,
		adpcm: &[u8],
		output: &mut [i16],
		state: &mut StepIndices,
	) -> Result<(), CodecError> {
		let block_count = self.check_adpcm_len(adpcm.len())?;
		check_len(block_count * self.pcm_block_len(), output.len())?;

		let mut indices = *state;
		for (block_index, (block, frames)) in adpcm
			.chunks_exact(self.block_align)
			.zip(output.chunks_exact_mut(self.pcm_block_len()))
			.enumerate()
		{
			let decoded = match self.layout {
				ChannelLayout::Mono => mono::decode_block(block, frames, &mut indices.left),
				ChannelLayout::Stereo => stereo::decode_block(block, frames, &mut indices),
			};
			decoded.map_err(|corrupt| corrupt.at_block(block_index))?;
		}

		if self.layout == ChannelLayout::Mono {
			indices.right = indices.left;
		}
		*state = indices;
		Ok(())
	}

	fn check_pcm_len(&self, len: usize) -> Result<usize, CodecError> {
		let block_len = self.pcm_block_len();
		check_len(len.div_ceil(block_len) * block_len, len)?;
		Ok(len / block_len)
	}

	fn check_adpcm_len(&self, len: usize) -> Result<usize, CodecError> {
		check_len(len.div_ceil(self.block_align) * self.block_align, len)?;
		Ok(len / self.block_align)
	}
}

fn check_len(expected: usize, actual: usize) -> Result<(), CodecError> {
	if expected != actual {
		return Err(CodecError::BufferSizeMismatch { expected, actual });
	}
	Ok(())
}

/// Header of one channel that carried an out-of-range step index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CorruptHeader {
	channel: usize,
	step_index: u8,
}

impl CorruptHeader {
	fn at_block(self, block: usize) -> CodecError {
		log::warn!(
			"Rejecting ADPCM block {block}: channel {} has step index {}",
			self.channel,
			self.step_index
		);
		CodecError::CorruptStream {
			block,
			channel: self.channel,
			step_index: self.step_index,
		}
	}
}

/// Predictor and step index of one channel while a block is processed
#[derive(Debug, Clone, Copy)]
struct ChannelState {
	predictor: i32,
	step_index: u8,
}

impl ChannelState {
	fn new(first_sample: i16, step_index: u8) -> Self {
		Self {
			predictor: i32::from(first_sample),
			step_index,
		}
	}

	fn encode(&mut self, sample: i16) -> u8 {
		let code = encode_sample(sample, &mut self.predictor, step_size(self.step_index));
		self.step_index = next_step_index(code, self.step_index);
		code
	}

	fn decode(&mut self, code: u8) -> i16 {
		let sample = decode_sample(code, self.predictor, step_size(self.step_index));
		self.step_index = next_step_index(code, self.step_index);
		self.predictor = i32::from(sample);
		sample
	}
}

const HEADER_LEN: usize = ADPCM_HEADER_LENGTH as usize;

fn write_header(header: &mut [u8], first_sample: i16, step_index: u8) {
	header[..2].copy_from_slice(&first_sample.to_le_bytes());
	header[2] = step_index;
	header[3] = 0;
}

fn read_header(header: &[u8], channel: usize) -> Result<(i16, u8), CorruptHeader> {
	let first_sample = i16::from_le_bytes([header[0], header[1]]);
	let step_index = header[2];
	if !is_valid_step_index(step_index) {
		return Err(CorruptHeader { channel, step_index });
	}
	Ok((first_sample, step_index))
}

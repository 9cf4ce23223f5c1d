//! Stateful block converter.
//!
//! A [`Codec`] is bound to one [`AdpcmFormat`] and one [`CodecMode`] for its
//! whole life. It carries the step index of each channel from one
//! [`Codec::convert`] call to the next, so a long stream can be converted in
//! several batches of blocks. Call [`Codec::reset`] before starting an
//! unrelated stream.
//!
//! # Examples
//!
//! ```
//! use xadpcm_codec::prelude::*;
//!
//! # fn main() -> Result<(), CodecError> {
//! let format = AdpcmFormat::new(1, 22050, 64);
//! let pcm: Vec<i16> = (0..256).map(|i| (i * 40) as i16).collect();
//!
//! let mut encoder = Codec::new(format, CodecMode::EncodeOptimizePerBlock)?;
//! let encoded = encoder.encode_samples(&pcm)?;
//! assert_eq!(encoded.len(), 4 * encoder.encode_alignment());
//!
//! let mut decoder = Codec::new(format, CodecMode::Decode)?;
//! let decoded = decoder.decode_samples(&encoded)?;
//! assert_eq!(decoded.len(), pcm.len());
//! # Ok(())
//! # }
//! ```

pub mod distortion;
mod search;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::block::{BlockCodec, StepIndices};
use crate::config::SearchConfig;
use crate::error::CodecError;
use crate::format::AdpcmFormat;
use crate::tables::MAX_STEP_INDEX;

use self::search::EncodeOutcome;

/// Conversion performed by a [`Codec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecMode {
	/// ADPCM blocks to PCM
	Decode,
	/// PCM to ADPCM in a single pass from the current step indices
	EncodeNormal,
	/// PCM to ADPCM, trying every starting step index for the whole buffer
	EncodeOptimizeWholeFile,
	/// PCM to ADPCM, searching the starting step index block by block
	EncodeOptimizePerBlock,
}

impl CodecMode {
	/// All modes, in declaration order
	pub const ALL: [Self; 4] = [
		Self::Decode,
		Self::EncodeNormal,
		Self::EncodeOptimizeWholeFile,
		Self::EncodeOptimizePerBlock,
	];

	/// Returns `true` for the three encoding modes
	pub fn is_encoder(self) -> bool {
		self != Self::Decode
	}
}

impl Display for CodecMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Decode => "decode",
			Self::EncodeNormal => "normal encoding",
			Self::EncodeOptimizeWholeFile => "whole file encoding",
			Self::EncodeOptimizePerBlock => "per-block encoding",
		};
		f.write_str(name)
	}
}

/// Diagnostics of the most recent encode
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversionReport {
	/// Mode that produced the encoding
	pub mode: CodecMode,
	/// Number of blocks encoded
	pub block_count: usize,
	/// Distortion between the input and its decoded encoding, lower is better
	pub distortion: u64,
	/// Starting step index picked by the whole file search
	pub step_index: Option<u8>,
	/// Starting (left channel) step index written into each block header
	pub block_step_indices: Vec<u8>,
}

impl Display for ConversionReport {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"ConversionReport:\n\
			- Mode: {}\n\
			- Blocks: {}\n\
			- Distortion: 0x{:x}",
			self.mode, self.block_count, self.distortion
		)?;
		if let Some(step_index) = self.step_index {
			write!(f, "\n- Step index chosen: {step_index}")?;
		}
		Ok(())
	}
}

/// IMA ADPCM block converter
#[derive(Debug, Clone)]
pub struct Codec {
	format: AdpcmFormat,
	mode: CodecMode,
	config: SearchConfig,
	blocks: BlockCodec,
	state: StepIndices,
	last_report: Option<ConversionReport>,
}

impl Codec {
	/// Creates a codec with the default search configuration.
	///
	/// Fails with [`CodecError::InvalidFormat`] if `format` does not validate.
	pub fn new(format: AdpcmFormat, mode: CodecMode) -> Result<Self, CodecError> {
		Self::with_config(format, mode, SearchConfig::default())
	}

	/// Creates a codec with an explicit search configuration
	pub fn with_config(
		format: AdpcmFormat,
		mode: CodecMode,
		config: SearchConfig,
	) -> Result<Self, CodecError> {
		let blocks = BlockCodec::new(&format)?;
		Ok(Self {
			format,
			mode,
			config,
			blocks,
			state: StepIndices::default(),
			last_report: None,
		})
	}

	/// The encoded stream format
	pub fn format(&self) -> &AdpcmFormat {
		&self.format
	}

	/// The conversion this codec performs
	pub fn mode(&self) -> CodecMode {
		self.mode
	}

	/// Search parameters of the optimizing modes
	pub fn config(&self) -> &SearchConfig {
		&self.config
	}

	/// Step indices the next block will start from
	pub fn step_indices(&self) -> StepIndices {
		self.state
	}

	/// Overrides the step indices the next block will start from.
	///
	/// Indices beyond the step table are clamped to its last entry.
	pub fn set_step_indices(&mut self, indices: StepIndices) {
		self.state = StepIndices {
			left: indices.left.min(MAX_STEP_INDEX),
			right: indices.right.min(MAX_STEP_INDEX),
		};
	}

	/// Zeroes the step indices; the mode is kept
	pub fn reset(&mut self) {
		self.state = StepIndices::default();
	}

	/// Diagnostics of the last successful encode, `None` after a decode
	pub fn last_report(&self) -> Option<&ConversionReport> {
		self.last_report.as_ref()
	}

	/// Bytes per encoded (ADPCM) block
	pub fn encode_alignment(&self) -> usize {
		self.blocks.block_align()
	}

	/// Bytes per decoded (PCM) block
	pub fn decode_alignment(&self) -> usize {
		self.format.pcm_block_size()
	}

	/// Bytes per block consumed by [`Codec::convert`] in this mode
	pub fn source_alignment(&self) -> usize {
		if self.mode.is_encoder() {
			self.decode_alignment()
		} else {
			self.encode_alignment()
		}
	}

	/// Bytes per block produced by [`Codec::convert`] in this mode
	pub fn destination_alignment(&self) -> usize {
		if self.mode.is_encoder() {
			self.encode_alignment()
		} else {
			self.decode_alignment()
		}
	}

	/// Converts `block_count` blocks of `input`.
	///
	/// Encoders read little-endian interleaved 16-bit PCM and write ADPCM
	/// blocks; the decoder does the reverse. `input` must be exactly
	/// `block_count * source_alignment()` bytes long. On failure nothing is
	/// returned and the step indices keep their previous value.
	pub fn convert(&mut self, input: &[u8], block_count: usize) -> Result<Vec<u8>, CodecError> {
		let expected = block_count.checked_mul(self.source_alignment()).unwrap_or(usize::MAX);
		if input.len() != expected {
			return Err(CodecError::BufferSizeMismatch {
				expected,
				actual: input.len(),
			});
		}

		if self.mode.is_encoder() {
			let pcm: Vec<i16> = input
				.chunks_exact(2)
				.map(|bytes| i16::from_le_bytes([bytes[0], bytes[1]]))
				.collect();
			self.encode_pcm(&pcm)
		} else {
			let pcm = self.decode_pcm(input)?;
			Ok(pcm.iter().flat_map(|sample| sample.to_le_bytes()).collect())
		}
	}

	/// Encodes interleaved samples, one block per `samples_per_block` frames.
	///
	/// Fails with [`CodecError::BufferSizeMismatch`] if `pcm` does not hold a
	/// whole number of blocks.
	pub fn encode_samples(&mut self, pcm: &[i16]) -> Result<Vec<u8>, CodecError> {
		self.ensure_mode(true)?;
		let block_len = self.blocks.pcm_block_len();
		if pcm.len() % block_len != 0 {
			return Err(CodecError::BufferSizeMismatch {
				expected: pcm.len().div_ceil(block_len) * block_len,
				actual: pcm.len(),
			});
		}
		self.encode_pcm(pcm)
	}

	/// Decodes whole ADPCM blocks into interleaved samples
	pub fn decode_samples(&mut self, adpcm: &[u8]) -> Result<Vec<i16>, CodecError> {
		self.ensure_mode(false)?;
		self.decode_pcm(adpcm)
	}

	fn ensure_mode(&self, encoder: bool) -> Result<(), CodecError> {
		if self.mode.is_encoder() != encoder {
			return Err(CodecError::ModeMismatch(self.mode));
		}
		Ok(())
	}

	fn encode_pcm(&mut self, pcm: &[i16]) -> Result<Vec<u8>, CodecError> {
		log::info!("Using {}...", self.mode);

		let outcome = match self.mode {
			CodecMode::EncodeNormal => {
				search::encode_once(&self.blocks, pcm, self.state, &self.config)?
			}
			CodecMode::EncodeOptimizeWholeFile => {
				search::search_whole_stream(&self.blocks, pcm, &self.config)?
			}
			CodecMode::EncodeOptimizePerBlock => {
				search::search_per_block(&self.blocks, pcm, self.state, &self.config)?
			}
			CodecMode::Decode => return Err(CodecError::ModeMismatch(self.mode)),
		};

		let EncodeOutcome {
			encoded,
			state,
			distortion,
			block_step_indices,
		} = outcome;

		let step_index = match self.mode {
			CodecMode::EncodeOptimizeWholeFile => block_step_indices.first().copied(),
			_ => None,
		};

		log::info!("Difference between original and decoded streams: 0x{distortion:x}");
		if let Some(step_index) = step_index {
			log::info!("Step index chosen: {step_index}");
		}

		self.state = state;
		self.last_report = Some(ConversionReport {
			mode: self.mode,
			block_count: pcm.len() / self.blocks.pcm_block_len(),
			distortion,
			step_index,
			block_step_indices,
		});

		Ok(encoded)
	}

	fn decode_pcm(&mut self, adpcm: &[u8]) -> Result<Vec<i16>, CodecError> {
		let block_count = adpcm.len() / self.blocks.block_align();
		let mut pcm = vec![0i16; block_count * self.blocks.pcm_block_len()];
		self.blocks.decode(adpcm, &mut pcm, &mut self.state)?;
		self.last_report = None;
		Ok(pcm)
	}
}

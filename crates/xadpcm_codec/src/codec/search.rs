//! Encoder strategies: a single pass and the two starting step searches.
//!
//! A trial encodes a span of blocks from one starting step index, decodes it
//! back and measures the distortion. The searches run trials over a range of
//! starting indices and keep the lowest distortion; ties go to the lowest
//! index since candidates are visited in ascending order.

use std::ops::RangeInclusive;

use crate::block::{BlockCodec, StepIndices};
use crate::config::SearchConfig;
use crate::error::CodecError;
use crate::tables::MAX_STEP_INDEX;

use super::distortion;

/// Result of one encoder strategy over a whole buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodeOutcome {
	/// Encoded blocks
	pub encoded: Vec<u8>,
	/// Step indices continuing the stream after the last block
	pub state: StepIndices,
	/// Distortion of the whole buffer
	pub distortion: u64,
	/// Starting step index chosen for each block
	pub block_step_indices: Vec<u8>,
}

/// One candidate encoding of a span of blocks
#[derive(Debug, Clone)]
struct Trial {
	step_index: u8,
	encoded: Vec<u8>,
	state: StepIndices,
	distortion: u64,
}

/// Encodes `pcm` once from `state`, measuring distortion for the report.
pub(crate) fn encode_once(
	blocks: &BlockCodec,
	pcm: &[i16],
	state: StepIndices,
	config: &SearchConfig,
) -> Result<EncodeOutcome, CodecError> {
	let block_count = pcm.len() / blocks.pcm_block_len();
	let mut state = state;
	let mut encoded = vec![0u8; block_count * blocks.block_align()];
	blocks.encode(pcm, &mut encoded, &mut state)?;

	let distortion = measure_encoding(blocks, pcm, &encoded, block_count, config)?;
	let block_step_indices =
		encoded.chunks_exact(blocks.block_align()).map(|block| block[2]).collect();

	Ok(EncodeOutcome {
		encoded,
		state,
		distortion,
		block_step_indices,
	})
}

/// Encodes the whole buffer from every starting step index and keeps the best.
pub(crate) fn search_whole_stream(
	blocks: &BlockCodec,
	pcm: &[i16],
	config: &SearchConfig,
) -> Result<EncodeOutcome, CodecError> {
	let block_count = pcm.len() / blocks.pcm_block_len();
	let best = best_trial(blocks, pcm, 0..=MAX_STEP_INDEX, block_count, config)?;

	log::debug!(
		"Whole stream search picked step index {} (distortion 0x{:x})",
		best.step_index,
		best.distortion
	);

	Ok(EncodeOutcome {
		block_step_indices: vec![best.step_index; block_count],
		encoded: best.encoded,
		state: best.state,
		distortion: best.distortion,
	})
}

/// Searches the starting step index of every block separately.
///
/// The first block tries the whole step table; each later block only tries
/// the window around the previous block's winner.
pub(crate) fn search_per_block(
	blocks: &BlockCodec,
	pcm: &[i16],
	state: StepIndices,
	config: &SearchConfig,
) -> Result<EncodeOutcome, CodecError> {
	let block_count = pcm.len() / blocks.pcm_block_len();

	let initial = EncodeOutcome {
		encoded: Vec::with_capacity(block_count * blocks.block_align()),
		state,
		distortion: 0,
		block_step_indices: Vec::with_capacity(block_count),
	};

	let mut outcome = pcm.chunks_exact(blocks.pcm_block_len()).enumerate().try_fold(
		initial,
		|mut outcome, (block_index, block_pcm)| {
			let candidates = match outcome.block_step_indices.last() {
				Some(&previous) => search_window(previous, config.window_half_width),
				None => 0..=MAX_STEP_INDEX,
			};

			let best = best_trial(blocks, block_pcm, candidates, block_count, config)?;
			log::debug!(
				"Block {block_index}: step index {} (distortion 0x{:x})",
				best.step_index,
				best.distortion
			);

			outcome.encoded.extend_from_slice(&best.encoded);
			outcome.state = best.state;
			outcome.block_step_indices.push(best.step_index);
			Ok::<_, CodecError>(outcome)
		},
	)?;

	outcome.distortion = measure_encoding(blocks, pcm, &outcome.encoded, block_count, config)?;
	Ok(outcome)
}

/// Step indices within `half_width` of `center`, clipped to the step table
fn search_window(center: u8, half_width: u8) -> RangeInclusive<u8> {
	center.saturating_sub(half_width)..=center.saturating_add(half_width).min(MAX_STEP_INDEX)
}

fn best_trial(
	blocks: &BlockCodec,
	pcm: &[i16],
	candidates: RangeInclusive<u8>,
	total_blocks: usize,
	config: &SearchConfig,
) -> Result<Trial, CodecError> {
	let mut best = run_trial(blocks, pcm, *candidates.start(), total_blocks, config)?;

	for step_index in candidates.skip(1) {
		let trial = run_trial(blocks, pcm, step_index, total_blocks, config)?;
		if trial.distortion < best.distortion {
			best = trial;
		}
	}

	Ok(best)
}

fn run_trial(
	blocks: &BlockCodec,
	pcm: &[i16],
	step_index: u8,
	total_blocks: usize,
	config: &SearchConfig,
) -> Result<Trial, CodecError> {
	let mut state = StepIndices::splat(step_index);
	let mut encoded = vec![0u8; pcm.len() / blocks.pcm_block_len() * blocks.block_align()];
	blocks.encode(pcm, &mut encoded, &mut state)?;

	let distortion = measure_encoding(blocks, pcm, &encoded, total_blocks, config)?;

	Ok(Trial {
		step_index,
		encoded,
		state,
		distortion,
	})
}

/// Decodes `encoded` and measures it against the `pcm` it came from
pub(crate) fn measure_encoding(
	blocks: &BlockCodec,
	pcm: &[i16],
	encoded: &[u8],
	total_blocks: usize,
	config: &SearchConfig,
) -> Result<u64, CodecError> {
	let mut decoded = vec![0i16; pcm.len()];
	blocks.decode(encoded, &mut decoded, &mut StepIndices::default())?;

	Ok(distortion::measure(
		pcm,
		&decoded,
		blocks.pcm_block_len(),
		total_blocks,
		config.metric_range,
	))
}

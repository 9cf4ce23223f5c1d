//! Stereo block packer: 8-byte groups of one left and one right code word.

use super::{ChannelState, CorruptHeader, HEADER_LEN, StepIndices, read_header, write_header};

/// Codes per channel in one 32-bit word
const CODES_PER_WORD: usize = 8;

/// Bytes per group: one left word followed by one right word
const GROUP_LEN: usize = 8;

/// Encodes one block of interleaved `frames` into `block`.
pub(super) fn encode_block(frames: &[i16], block: &mut [u8], state: &mut StepIndices) {
	block.fill(0);

	if frames.len() < 2 {
		return;
	}
	let (first, rest) = frames.split_at(2);

	let (headers, data) = block.split_at_mut(2 * HEADER_LEN);
	write_header(&mut headers[..HEADER_LEN], first[0], state.left);
	write_header(&mut headers[HEADER_LEN..], first[1], state.right);

	let mut left = ChannelState::new(first[0], state.left);
	let mut right = ChannelState::new(first[1], state.right);

	for (group, chunk) in rest.chunks(2 * CODES_PER_WORD).zip(data.chunks_exact_mut(GROUP_LEN)) {
		let mut left_word = 0u32;
		let mut right_word = 0u32;

		for (i, frame) in group.chunks_exact(2).enumerate() {
			left_word |= u32::from(left.encode(frame[0])) << (4 * i);
			right_word |= u32::from(right.encode(frame[1])) << (4 * i);
		}

		chunk[..4].copy_from_slice(&left_word.to_le_bytes());
		chunk[4..].copy_from_slice(&right_word.to_le_bytes());
	}

	state.left = left.step_index;
	state.right = right.step_index;
}

/// Decodes one `block` into interleaved `frames` (L, R, L, R, ...).
pub(super) fn decode_block(
	block: &[u8],
	frames: &mut [i16],
	state: &mut StepIndices,
) -> Result<(), CorruptHeader> {
	let (headers, data) = block.split_at(2 * HEADER_LEN);
	let (left_first, left_index) = read_header(&headers[..HEADER_LEN], 0)?;
	let (right_first, right_index) = read_header(&headers[HEADER_LEN..], 1)?;

	if frames.len() < 2 {
		return Ok(());
	}
	let (first, rest) = frames.split_at_mut(2);
	first[0] = left_first;
	first[1] = right_first;

	let mut left = ChannelState::new(left_first, left_index);
	let mut right = ChannelState::new(right_first, right_index);

	for (group, chunk) in rest.chunks_mut(2 * CODES_PER_WORD).zip(data.chunks_exact(GROUP_LEN)) {
		let mut left_word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
		let mut right_word = u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);

		for frame in group.chunks_exact_mut(2) {
			frame[0] = left.decode((left_word & 0x0F) as u8);
			frame[1] = right.decode((right_word & 0x0F) as u8);
			left_word >>= 4;
			right_word >>= 4;
		}
	}

	state.left = left.step_index;
	state.right = right.step_index;
	Ok(())
}

//! Mono block packer: two codes per byte, low nibble first.

use super::{ChannelState, CorruptHeader, HEADER_LEN, read_header, write_header};

/// Encodes one block of `frames` into `block`.
///
/// `block` is fully overwritten, so padding always ends up zero.
pub(super) fn encode_block(frames: &[i16], block: &mut [u8], step_index: &mut u8) {
	block.fill(0);

	let Some((&first, rest)) = frames.split_first() else {
		return;
	};

	let (header, data) = block.split_at_mut(HEADER_LEN);
	write_header(header, first, *step_index);

	let mut channel = ChannelState::new(first, *step_index);
	for (pair, byte) in rest.chunks(2).zip(data.iter_mut()) {
		for (nibble, &sample) in pair.iter().enumerate() {
			*byte |= channel.encode(sample) << (4 * nibble);
		}
	}

	*step_index = channel.step_index;
}

/// Decodes one `block` into `frames`, filling every slot.
pub(super) fn decode_block(
	block: &[u8],
	frames: &mut [i16],
	step_index: &mut u8,
) -> Result<(), CorruptHeader> {
	let (header, data) = block.split_at(HEADER_LEN);
	let (first, start_index) = read_header(header, 0)?;

	let Some((head, rest)) = frames.split_first_mut() else {
		return Ok(());
	};
	*head = first;

	let mut channel = ChannelState::new(first, start_index);
	for (pair, &byte) in rest.chunks_mut(2).zip(data) {
		for (nibble, slot) in pair.iter_mut().enumerate() {
			*slot = channel.decode((byte >> (4 * nibble)) & 0x0F);
		}
	}

	*step_index = channel.step_index;
	Ok(())
}

//! Step size and step index tables shared by the encoder and decoder.

/// Number of entries in the IMA ADPCM step size table
pub const STEP_TABLE_ENTRIES: usize = 89;

/// Largest valid step index
pub const MAX_STEP_INDEX: u8 = (STEP_TABLE_ENTRIES - 1) as u8;

/// IMA ADPCM step index adjustment table, indexed by a 4-bit code
pub const STEP_INDEX_DELTAS: [i8; 16] = [-1, -1, -1, -1, 2, 4, 6, 8, -1, -1, -1, -1, 2, 4, 6, 8];

/// IMA ADPCM quantization step sizes, indexed by step index
pub const STEP_SIZES: [i16; STEP_TABLE_ENTRIES] = [
	7, 8, 9, 10, 11, 12, 13, 14, 16, 17, 19, 21, 23, 25, 28, 31, 34, 37, 41, 45, 50, 55, 60, 66, 73,
	80, 88, 97, 107, 118, 130, 143, 157, 173, 190, 209, 230, 253, 279, 307, 337, 371, 408, 449,
	494, 544, 598, 658, 724, 796, 876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066, 2272,
	2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358, 5894, 6484, 7132, 7845, 8630, 9493,
	10442, 11487, 12635, 13899, 15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

/// Returns the step size for a step index.
///
/// Callers must pass an index in `0..=88`; every index produced by
/// [`next_step_index`] or accepted by [`is_valid_step_index`] is.
#[inline]
pub fn step_size(step_index: u8) -> i32 {
	i32::from(STEP_SIZES[usize::from(step_index)])
}

/// Computes the step index to use after emitting or consuming `code`.
#[inline]
pub fn next_step_index(code: u8, step_index: u8) -> u8 {
	let delta = STEP_INDEX_DELTAS[usize::from(code & 0x0F)];
	(i16::from(step_index) + i16::from(delta)).clamp(0, i16::from(MAX_STEP_INDEX)) as u8
}

/// Checks whether a step index read from a stream addresses the step table
#[inline]
pub fn is_valid_step_index(step_index: u8) -> bool {
	step_index <= MAX_STEP_INDEX
}

//! Distortion metric used to rank candidate encodings.
//!
//! Every block contributes its squared error scaled into an equal share of
//! the metric range, so the sum over any number of blocks stays inside a
//! `u64`. Lower is better.

/// Squared error of the largest possible sample difference, `(2^16)^2`
const MAX_SAMPLE_ERROR: u64 = 1 << 32;

/// Sum of squared sample differences between two equally long blocks
pub fn block_squared_error(original: &[i16], decoded: &[i16]) -> u64 {
	original
		.iter()
		.zip(decoded)
		.map(|(&a, &b)| {
			let difference = i64::from(a) - i64::from(b);
			(difference * difference) as u64
		})
		.sum()
}

/// Measures the distortion of `decoded` against `original`.
///
/// # Arguments
/// * `original` - Source samples of the span being measured
/// * `decoded` - Samples reconstructed from the candidate encoding
/// * `block_len` - Interleaved samples per block
/// * `total_blocks` - Block count of the whole stream; sets each block's share
/// * `metric_range` - Upper bound of the metric for the whole stream
///
/// # Returns
/// The summed per-block contributions, at most `metric_range`
pub fn measure(
	original: &[i16],
	decoded: &[i16],
	block_len: usize,
	total_blocks: usize,
	metric_range: u64,
) -> u64 {
	if block_len == 0 || total_blocks == 0 {
		return 0;
	}

	let max_block_contribution = metric_range / total_blocks as u64;
	let max_block_error = MAX_SAMPLE_ERROR * block_len as u64;

	original
		.chunks(block_len)
		.zip(decoded.chunks(block_len))
		.map(|(original, decoded)| {
			let block_error = block_squared_error(original, decoded);
			let share = block_error as f64 / max_block_error as f64;
			(share * max_block_contribution as f64) as u64
		})
		.fold(0u64, u64::saturating_add)
}

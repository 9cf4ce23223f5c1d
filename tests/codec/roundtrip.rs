use rand::{Rng, SeedableRng, rngs::SmallRng};
use xadpcm_rs::prelude::*;

fn random_walk(len: usize, seed: u64) -> Vec<i16> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut value = 0i32;
	(0..len)
		.map(|_| {
			value = (value + rng.random_range(-150..=150)).clamp(-20000, 20000);
			value as i16
		})
		.collect()
}

#[test_log::test]
fn test_xbox_helpers_roundtrip() {
	let samples = random_walk(22050, 42);
	let (format, encoded) = encode_pcm16(&samples, 1, 22050).unwrap();

	assert!(format.is_valid());
	assert!(format.pcm_format().is_valid());
	assert_eq!(encoded.len(), encoded_size(samples.len(), 1));

	let decoded = decode_pcm16(&encoded, &format).unwrap();
	let whole = decoded.len();
	assert_eq!(whole, samples.len() / 64 * 64);

	let max_error = samples[..whole]
		.iter()
		.zip(&decoded)
		.map(|(&a, &b)| (i32::from(a) - i32::from(b)).abs())
		.max()
		.unwrap_or(0);
	assert!(max_error < 1500, "max error {max_error}");
}

#[test]
fn test_every_mode_decodes_with_the_same_decoder() {
	let format = AdpcmFormat::new(2, 44100, 128);
	let left = random_walk(128 * 5, 7);
	let right = random_walk(128 * 5, 8);
	let pcm: Vec<i16> = left.iter().zip(&right).flat_map(|(&l, &r)| [l, r]).collect();
	let bytes: Vec<u8> = pcm.iter().flat_map(|sample| sample.to_le_bytes()).collect();

	for mode in [
		CodecMode::EncodeNormal,
		CodecMode::EncodeOptimizeWholeFile,
		CodecMode::EncodeOptimizePerBlock,
	] {
		let mut encoder = Codec::new(format, mode).unwrap();
		let encoded = encoder.convert(&bytes, 5).unwrap();
		assert_eq!(encoded.len(), 5 * encoder.destination_alignment());

		let mut decoder = Codec::new(format, CodecMode::Decode).unwrap();
		let decoded = decoder.convert(&encoded, 5).unwrap();
		assert_eq!(decoded.len(), bytes.len());

		let report = encoder.last_report().unwrap();
		assert_eq!(report.mode, mode);
		assert_eq!(report.block_step_indices.len(), 5);
	}
}

#[test]
fn test_search_config_from_json() {
	let config: SearchConfig =
		serde_json::from_str(r#"{ "window_half_width": 4, "metric_range": 1000000 }"#).unwrap();
	assert_eq!(config.window_half_width, 4);
	assert_eq!(config.metric_range, 1_000_000);

	let format = AdpcmFormat::new(1, 22050, 64);
	let samples = random_walk(64 * 8, 3);
	let mut codec = Codec::with_config(format, CodecMode::EncodeOptimizePerBlock, config).unwrap();
	codec.encode_samples(&samples).unwrap();

	let report = codec.last_report().unwrap();
	assert!(report.distortion <= 1_000_000);
	for pair in report.block_step_indices.windows(2) {
		assert!(pair[0].abs_diff(pair[1]) <= 4);
	}
}

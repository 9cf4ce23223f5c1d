use xadpcm_rs::prelude::*;

#[test]
fn test_decode_hand_built_mono_block() {
	// 3 samples per block: 2 codes fit one byte, padded to 8 data bytes
	let format = AdpcmFormat::new(1, 22050, 3);
	assert_eq!(format.block_align, 12);

	let mut block = vec![0u8; 12];
	block[..2].copy_from_slice(&1000i16.to_le_bytes());
	block[2] = 0;
	block[4] = 0x74;

	let mut codec = Codec::new(format, CodecMode::Decode).unwrap();
	let decoded = codec.decode_samples(&block).unwrap();

	assert_eq!(decoded, vec![1000, 1007, 1023]);
	assert_eq!(codec.step_indices().left, 10);
}

#[test]
fn test_encode_hand_built_mono_block() {
	let format = AdpcmFormat::new(1, 22050, 3);
	let mut codec = Codec::new(format, CodecMode::EncodeNormal).unwrap();
	let encoded = codec.encode_samples(&[1000, 1007, 1023]).unwrap();

	assert_eq!(encoded, vec![0xE8, 0x03, 0, 0, 0x74, 0, 0, 0, 0, 0, 0, 0]);
	assert_eq!(codec.last_report().unwrap().distortion, 0);
}

#[test]
fn test_decode_hand_built_stereo_block() {
	let format = AdpcmFormat::new(2, 22050, 2);
	assert_eq!(format.block_align, 16);

	let mut block = vec![0u8; 16];
	block[..2].copy_from_slice(&100i16.to_le_bytes());
	block[4..6].copy_from_slice(&(-100i16).to_le_bytes());
	block[6] = 10;
	block[8..12].copy_from_slice(&0x3u32.to_le_bytes());
	block[12..16].copy_from_slice(&0xCu32.to_le_bytes());

	let mut codec = Codec::new(format, CodecMode::Decode).unwrap();
	let decoded = codec.decode_samples(&block).unwrap();

	assert_eq!(decoded, vec![100, -100, 104, -121]);
	assert_eq!(codec.step_indices(), StepIndices { left: 0, right: 12 });
}

#[test]
fn test_stereo_words_hold_eight_codes() {
	// 17 frames: one header frame and two full groups
	let format = AdpcmFormat::new(2, 22050, 17);
	assert_eq!(format.block_align, 8 + 16);

	let mut pcm = vec![0i16; 34];
	for (i, frame) in pcm.chunks_exact_mut(2).enumerate() {
		frame[0] = (i as i16) * 3;
	}

	let mut codec = Codec::new(format, CodecMode::EncodeNormal).unwrap();
	let encoded = codec.encode_samples(&pcm).unwrap();

	// Right channel is silent, so both right words are zero
	assert_eq!(&encoded[12..16], &[0, 0, 0, 0]);
	assert_eq!(&encoded[20..24], &[0, 0, 0, 0]);
	// Left channel rises every frame, so every left nibble is a positive code
	let left = u32::from_le_bytes([encoded[8], encoded[9], encoded[10], encoded[11]]);
	for nibble in 0..8 {
		let code = (left >> (4 * nibble)) & 0x0F;
		assert_eq!(code & 8, 0, "nibble {nibble} of 0x{left:08X}");
		assert_ne!(code, 0, "nibble {nibble} of 0x{left:08X}");
	}
}

#[test]
fn test_corrupt_stream_is_rejected() {
	let format = AdpcmFormat::new(1, 22050, 64);
	let mut block = vec![0u8; 36];
	block[2] = 200;

	let mut codec = Codec::new(format, CodecMode::Decode).unwrap();
	let result = codec.convert(&block, 1);

	assert!(matches!(result, Err(CodecError::CorruptStream { step_index: 200, .. })));
}

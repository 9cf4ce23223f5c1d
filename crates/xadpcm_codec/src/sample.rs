//! Per-sample IMA ADPCM quantization.
//!
//! Both directions reconstruct the predictor with the same arithmetic, so an
//! encoder and a decoder fed the same codes never drift apart.

/// Quantizes one PCM sample into a 4-bit code.
///
/// `predictor` is updated to the value a decoder will reconstruct from the
/// returned code, not to `input`.
///
/// # Arguments
/// * `input` - The PCM sample to encode
/// * `predictor` - Running predictor, updated in place
/// * `step_size` - Step size selected by the current step index
///
/// # Returns
/// The 4-bit code; bit 3 is the sign, bits 2..0 the magnitude
pub fn encode_sample(input: i16, predictor: &mut i32, step_size: i32) -> u8 {
	let input = i32::from(input);
	let mut difference = input - *predictor;
	let mut step = step_size;
	let mut code = 0u8;

	if difference < 0 {
		code = 8;
		difference = -difference;
	}

	if difference >= step {
		code |= 4;
		difference -= step;
	}
	step >>= 1;
	if difference >= step {
		code |= 2;
		difference -= step;
	}
	step >>= 1;
	if difference >= step {
		code |= 1;
		difference -= step;
	}

	// `difference` now holds the part of the input the code cannot express
	let predicted = if code & 8 != 0 {
		input + difference - (step >> 1)
	} else {
		input - difference + (step >> 1)
	};

	*predictor = predicted.clamp(i32::from(i16::MIN), i32::from(i16::MAX));
	code
}

/// Reconstructs a PCM sample from a 4-bit code.
///
/// # Arguments
/// * `code` - The 4-bit code to decode
/// * `predictor` - Predictor before this sample
/// * `step_size` - Step size selected by the current step index
///
/// # Returns
/// The new predictor, which is also the decoded sample
pub fn decode_sample(code: u8, predictor: i32, step_size: i32) -> i16 {
	let mut difference = step_size >> 3;

	if code & 4 != 0 {
		difference += step_size;
	}
	if code & 2 != 0 {
		difference += step_size >> 1;
	}
	if code & 1 != 0 {
		difference += step_size >> 2;
	}
	if code & 8 != 0 {
		difference = -difference;
	}

	(predictor + difference).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

//! Prelude module for `xadpcm_codec`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use xadpcm_codec::prelude::*;
//!
//! let format = AdpcmFormat::new(1, 22050, XBOX_SAMPLES_PER_BLOCK);
//! assert_eq!(compute_adpcm_alignment(1, 64), 36);
//! ```

#[doc(inline)]
pub use crate::block::{BlockCodec, ChannelLayout, StepIndices};

#[doc(inline)]
pub use crate::codec::{Codec, CodecMode, ConversionReport};

#[doc(inline)]
pub use crate::config::SearchConfig;

#[doc(inline)]
pub use crate::error::{CodecError, FormatViolation};

#[doc(inline)]
pub use crate::format::{AdpcmFormat, PcmFormat, compute_adpcm_alignment};

#[doc(inline)]
pub use crate::tables::{MAX_STEP_INDEX, STEP_INDEX_DELTAS, STEP_SIZES, next_step_index};

#[doc(inline)]
pub use crate::xbox::{XBOX_SAMPLES_PER_BLOCK, decode_pcm16, encode_pcm16, encoded_size};

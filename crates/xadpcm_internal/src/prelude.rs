//! Prelude module for `xadpcm_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use xadpcm_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let format = AdpcmFormat::new(2, 44100, XBOX_SAMPLES_PER_BLOCK);
//! let codec = Codec::new(format, CodecMode::Decode).unwrap();
//! assert_eq!(codec.encode_alignment(), 72);
//! ```

// Re-export everything from xadpcm_codec::prelude
#[doc(inline)]
pub use xadpcm_codec::prelude::*;

// Re-export the entire xadpcm_codec module for advanced usage
#[doc(inline)]
pub use xadpcm_codec;

//! `xadpcm-rs` is a block-based IMA ADPCM codec for 16-bit mono and stereo audio.
//!
//! The encoder can pick the starting step index of every block, or of the
//! whole stream, by trial encoding and measuring the distortion of each
//! candidate.
//!
pub use xadpcm_internal::*;

//! This crate implements the block-based IMA ADPCM codec used by the `xadpcm-rs` project.
//!
//! 16-bit PCM (mono or stereo) is compressed to four bits per sample in fixed
//! size blocks. Each block stores the first sample of every channel verbatim
//! together with the starting step index, so blocks can be decoded on their own.
//!
//! # Modules
//!
//! - **tables**: Step size and step index adjustment tables
//! - **sample**: Quantization of single samples
//! - **format**: PCM and ADPCM format descriptors, block alignment
//! - **block**: Mono and stereo block packers
//! - **codec**: Stateful converter with plain and optimizing encoders
//! - **xbox**: One-call helpers for the 64-sample block layout
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use xadpcm_codec::prelude::*;
//!
//! # fn main() -> Result<(), CodecError> {
//! let format = AdpcmFormat::new(2, 44100, 64);
//! let mut codec = Codec::new(format, CodecMode::EncodeOptimizeWholeFile)?;
//!
//! let pcm = vec![0u8; 4 * codec.decode_alignment()];
//! let encoded = codec.convert(&pcm, 4)?;
//! println!("{}", codec.last_report().unwrap());
//! # Ok(())
//! # }
//! ```
//!
//! Or the one-call helpers:
//!
//! ```no_run
//! use xadpcm_codec::xbox::{decode_pcm16, encode_pcm16};
//!
//! # fn main() -> Result<(), xadpcm_codec::error::CodecError> {
//! let samples = vec![0i16; 22050];
//! let (format, encoded) = encode_pcm16(&samples, 1, 22050)?;
//! let decoded = decode_pcm16(&encoded, &format)?;
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod sample;
pub mod tables;
pub mod xbox;

/// `use xadpcm_codec::prelude::*;` to import commonly used items.
pub mod prelude;

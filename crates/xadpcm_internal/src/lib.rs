//! This module is separated into its own crate so the codec can be linked on its own, and should not be used directly.

/// `use xadpcm_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export xadpcm_codec for convenience
pub use xadpcm_codec;

// Re-export commonly used types at crate root
pub use xadpcm_codec::codec::{Codec, CodecMode};
pub use xadpcm_codec::error::CodecError;
pub use xadpcm_codec::format::{AdpcmFormat, PcmFormat, compute_adpcm_alignment};

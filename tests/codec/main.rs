//! Integration tests for `xadpcm-rs`

mod roundtrip;
mod wire_format;

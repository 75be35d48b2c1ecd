//! Frame image decoding.

/// Encoded bytes to RGBA8.
pub mod decode;

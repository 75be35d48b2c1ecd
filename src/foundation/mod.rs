//! Shared primitives: frame numbers, ranges, timestamps and the error type.

/// Frame numbers, frame ranges and timestamps.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;

//! Offline extraction of numbered frame images from source videos.

/// `ffmpeg`-backed frame extractor.
pub mod ffmpeg;
/// Multi-input extraction run and manifest output.
pub mod run;

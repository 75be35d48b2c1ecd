//! Background frame preloading and the frame cache it fills.

/// Loaded frames and progress.
pub mod cache;
/// Frame sources and the rayon-backed loader.
pub mod loader;

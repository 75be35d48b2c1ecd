//! Frame asset manifest: frame count, section boundaries and file naming.

/// `INFO.txt` text manifest.
pub mod info;
/// JSON manifest model and shipped presets.
pub mod model;

//! Frame-to-content resolution: sections and logo state.

/// Logo visibility policies.
pub mod logo;
/// Section table and the frame-to-section resolver.
pub mod section;

//! Scroll-driven animation engine: scroll mapping, snapping, interpolation and the session
//! state machine tying them together.

/// Tunables and their defaults.
pub mod config;
/// Fixed-cadence smoothing toward the target frame.
pub mod interpolator;
/// Scroll offset to frame mapping and back.
pub mod mapper;
/// Headless replay of scripted input.
pub mod replay;
/// Per-page session state machine.
pub mod session;
/// Nearest-boundary snapping decisions.
pub mod snap;
/// Current/target frame and interaction mode.
pub mod state;
/// Cancellable deadlines.
pub mod timers;

//! Scroll-driven image-sequence animation.
//!
//! A page shows one image from a pre-rendered sequence at a time and lets the scroll position
//! pick which. Scrolling sets a target frame; a fixed-cadence smoother eases the displayed frame
//! toward it; when scrolling settles near a section boundary the view snaps onto it; and section
//! navigation jumps straight to a boundary.
//!
//! Pieces:
//!
//! - [`manifest`]: frame count, snap points and frame file naming
//! - [`timeline`]: frame to section and frame to logo resolution
//! - [`engine`]: the clock-agnostic [`ScrollSession`] state machine
//! - [`preload`]: background frame loading into a [`FrameCache`]
//! - [`extract`]: cutting source videos into frames with `ffmpeg`
//! - [`contact`]: contact form submission
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Frame decoding.
pub mod assets;
/// Contact form.
pub mod contact;
/// Animation engine.
pub mod engine;
/// Frame extraction.
pub mod extract;
/// Shared primitives and errors.
pub mod foundation;
/// Frame sequence manifest.
pub mod manifest;
/// Frame preloading.
pub mod preload;
/// Section and logo resolution.
pub mod timeline;

pub use assets::decode::{FrameImage, decode_frame};
pub use contact::form::{
    ContactEndpoint, ContactPayload, LogEndpoint, SubmitOutcome, submit_contact,
};
pub use engine::config::{EngineConfig, Smoothing};
pub use engine::mapper::{ScrollGeometry, scroll_offset_for_frame, target_for_scroll};
pub use engine::replay::{ReplayEvent, Script, ScriptAction, ScriptEvent, replay};
pub use engine::session::{FrameUpdate, ScrollCommand, ScrollSession, SnapReason};
pub use engine::snap::{SnapDecision, SnapEngine};
pub use engine::state::{AnimationState, Mode};
pub use extract::ffmpeg::{ExtractJob, FfmpegExtractor, FrameExtractor, is_ffmpeg_on_path};
pub use extract::run::{ExtractOpts, ExtractReport, InputOutcome, run_extraction};
pub use foundation::core::{FrameNumber, FrameRange, Millis};
pub use foundation::error::{ReelError, ReelResult};
pub use manifest::model::{FrameManifest, FramePattern, Preset};
pub use preload::cache::{FrameCache, FrameSlot, LoadProgress};
pub use preload::loader::{FrameSource, FsFrameSource, PreloadHandle, PreloadOpts, Preloader};
pub use timeline::logo::{LogoBand, LogoPolicy, LogoState, LogoVariant};
pub use timeline::section::{Section, SectionId, SectionTable, resolve};

use crate::foundation::core::FrameNumber;

/// What is currently driving the target frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// No input; the view eases toward the last target.
    #[default]
    Idle,
    /// Scroll notifications arrived within the settle window.
    UserScrolling,
    /// Converging on a snap point, after a settle or a navigation request.
    Snapping,
}

/// Mutable animation state, owned by the engine.
///
/// `current_frame` is written only by the interpolation step; everything else writes the target
/// and the mode through the setters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationState {
    total_frames: u32,
    pub(super) current_frame: f64,
    target_frame: FrameNumber,
    mode: Mode,
}

impl AnimationState {
    /// Start at frame 1, idle.
    pub fn new(total_frames: u32) -> Self {
        Self {
            total_frames: total_frames.max(1),
            current_frame: 1.0,
            target_frame: FrameNumber::FIRST,
            mode: Mode::Idle,
        }
    }

    /// Smoothed, possibly fractional, displayed position in `[1, total_frames]`.
    pub fn current_frame(&self) -> f64 {
        self.current_frame
    }

    /// Frame the interpolator is moving toward.
    pub fn target_frame(&self) -> FrameNumber {
        self.target_frame
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of frames in the sequence.
    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// `current_frame` rounded to the frame that should be displayed.
    pub fn display_frame(&self) -> FrameNumber {
        FrameNumber::from_position(self.current_frame, self.total_frames)
    }

    /// Distance left to travel, in frames.
    pub fn distance_to_target(&self) -> f64 {
        (self.target_frame.as_f64() - self.current_frame).abs()
    }

    pub(crate) fn set_target(&mut self, frame: FrameNumber) {
        self.target_frame = FrameNumber(frame.0.clamp(1, self.total_frames));
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

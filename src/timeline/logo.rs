use crate::foundation::core::FrameNumber;
use crate::foundation::error::{ReelError, ReelResult};

/// Logo artwork variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoVariant {
    /// Dark artwork, used over the light opening frames.
    Dark,
    /// Light artwork, used over the dark closing frames.
    Light,
}

/// Derived logo visibility for one displayed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LogoState {
    /// Whether the logo is shown at all.
    pub visible: bool,
    /// Which artwork to show (kept at `Dark` while hidden).
    pub variant: LogoVariant,
}

impl LogoState {
    /// Hidden logo.
    pub const HIDDEN: Self = Self {
        visible: false,
        variant: LogoVariant::Dark,
    };
}

/// Rule deciding logo visibility from frame position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LogoPolicy {
    /// Dark for `frame <= dark_through`, light for the final `light_tail` frames.
    Thresholds {
        /// Last frame showing the dark logo.
        dark_through: u32,
        /// Number of closing frames showing the light logo.
        light_tail: u32,
    },
    /// Explicit inclusive frame ranges for each variant; the dark range wins on overlap.
    Ranges {
        /// `[first, last]` frames showing the dark logo.
        dark: [u32; 2],
        /// `[first, last]` frames showing the light logo.
        light: [u32; 2],
    },
}

impl Default for LogoPolicy {
    fn default() -> Self {
        Self::Thresholds {
            dark_through: 10,
            light_tail: 10,
        }
    }
}

impl LogoPolicy {
    /// Reject empty or inverted ranges.
    pub fn validate(&self) -> ReelResult<()> {
        if let Self::Ranges { dark, light } = self
            && (dark[0] > dark[1] || light[0] > light[1])
        {
            return Err(ReelError::validation(
                "logo ranges must be [first, last] with first <= last",
            ));
        }
        Ok(())
    }

    /// Logo state at `frame` in a sequence of `total_frames`.
    pub fn logo_at(&self, frame: FrameNumber, total_frames: u32) -> LogoState {
        let f = frame.0;
        let (dark, light) = match self {
            Self::Thresholds {
                dark_through,
                light_tail,
            } => {
                let light_from = total_frames.saturating_sub(*light_tail).saturating_add(1);
                (f <= *dark_through, *light_tail > 0 && f >= light_from)
            }
            Self::Ranges { dark, light } => (
                (dark[0]..=dark[1]).contains(&f),
                (light[0]..=light[1]).contains(&f),
            ),
        };

        if dark {
            LogoState {
                visible: true,
                variant: LogoVariant::Dark,
            }
        } else if light {
            LogoState {
                visible: true,
                variant: LogoVariant::Light,
            }
        } else {
            LogoState::HIDDEN
        }
    }
}

/// Run of consecutive frames showing the same logo artwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LogoBand {
    /// Artwork shown.
    pub variant: LogoVariant,
    /// First frame of the run.
    pub first: FrameNumber,
    /// Last frame of the run, inclusive.
    pub last: FrameNumber,
}

impl LogoPolicy {
    /// Visible runs over `1..=total_frames`, in frame order.
    pub fn bands(&self, total_frames: u32) -> Vec<LogoBand> {
        let mut out: Vec<LogoBand> = Vec::new();
        for f in (1..=total_frames).map(FrameNumber) {
            let state = self.logo_at(f, total_frames);
            if !state.visible {
                continue;
            }
            match out.last_mut() {
                Some(b) if b.variant == state.variant && b.last.0 + 1 == f.0 => b.last = f,
                _ => out.push(LogoBand {
                    variant: state.variant,
                    first: f,
                    last: f,
                }),
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/logo.rs"]
mod tests;

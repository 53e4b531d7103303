use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Lane, Rgb};

/// Buzzer chime code passed straight through to the device.
///
/// Unknown codes are not validated here; the driver treats them as a
/// fallback or a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChimeCode(String);

impl ChimeCode {
    pub const NONE: &'static str = "none";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The silent chime, used when none is requested or the station is muted.
    pub fn none() -> Self {
        Self::new(Self::NONE)
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ChimeCode {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for ChimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for ChimeCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// How many frames an animation renders before `show()` returns on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameBudget {
    /// Render until stopped (or forever, if not interruptible).
    #[default]
    Unbounded,
    Frames(u32),
}

impl FrameBudget {
    /// Has an animation that already rendered `rendered` frames used up its budget?
    pub fn is_exhausted(self, rendered: u32) -> bool {
        match self {
            FrameBudget::Unbounded => false,
            FrameBudget::Frames(n) => rendered >= n,
        }
    }
}

/// A unit of deferred device work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayTask {
    ShowMessage {
        text: String,
        chime: ChimeCode,
    },
    Flash {
        color: Rgb,
    },
    StartAnimation {
        name: String,
        budget: FrameBudget,
        interruptible: bool,
    },
}

impl DisplayTask {
    /// The lane this task is appended to.
    pub fn lane(&self) -> Lane {
        match self {
            DisplayTask::ShowMessage { .. } | DisplayTask::Flash { .. } => Lane::Message,
            DisplayTask::StartAnimation { .. } => Lane::Animation,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DisplayTask::ShowMessage { .. } => "show_message",
            DisplayTask::Flash { .. } => "flash",
            DisplayTask::StartAnimation { .. } => "start_animation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_chime_is_none() {
        assert!(ChimeCode::default().is_none());
        assert!(!ChimeCode::from("reminder").is_none());
    }

    #[rstest]
    #[case(FrameBudget::Unbounded, 1_000_000, false)]
    #[case(FrameBudget::Frames(3), 2, false)]
    #[case(FrameBudget::Frames(3), 3, true)]
    #[case(FrameBudget::Frames(0), 0, true)]
    fn test_frame_budget(#[case] budget: FrameBudget, #[case] rendered: u32, #[case] done: bool) {
        assert_eq!(budget.is_exhausted(rendered), done);
    }

    #[test]
    fn test_flash_shares_message_lane() {
        let msg = DisplayTask::ShowMessage {
            text: "drink".into(),
            chime: ChimeCode::none(),
        };
        let flash = DisplayTask::Flash { color: Rgb::BLUE };
        let anim = DisplayTask::StartAnimation {
            name: "spin".into(),
            budget: FrameBudget::Frames(3),
            interruptible: false,
        };
        assert_eq!(msg.lane(), Lane::Message);
        assert_eq!(flash.lane(), Lane::Message);
        assert_eq!(anim.lane(), Lane::Animation);
    }
}

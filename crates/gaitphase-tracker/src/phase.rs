//! Gait-cycle phase states.
//!
//! The cycle advances through a fixed linear order:
//! `idle → start → start-end → f0 → f0-end → … → f4 → f4-end → done`.
//! Each named phase has an armed `*-end` sub-state in which the tracker
//! waits for the next qualifying sample. There is no branching and no
//! cycling within a run; only an external reset re-arms the machine.

/// Current phase of the tracked motion cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No tracking run has been started yet.
    Idle,
    /// Awaiting the calibration frame.
    Start,
    /// Calibrated; watching the left knee approach full extension.
    StartEnd,
    /// Knee turning point detected; announcing phase f0.
    F0,
    /// Armed; watching for the right foot to rise.
    F0End,
    /// Right foot raised; announcing phase f1.
    F1,
    /// Armed; watching for the right foot to strike the ground.
    F1End,
    /// Right foot down; announcing phase f2.
    F2,
    /// Armed; watching for the left foot to strike the ground.
    F2End,
    /// Left foot down; announcing phase f3.
    F3,
    /// Armed; watching the return swing for its turning point.
    F3End,
    /// Return turning point detected; announcing phase f4.
    F4,
    /// Cycle complete; no further guards are armed.
    F4End,
    /// Terminal until the next reset.
    Done,
}

impl Phase {
    /// Returns the state name as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Start => "start",
            Self::StartEnd => "start-end",
            Self::F0 => "f0",
            Self::F0End => "f0-end",
            Self::F1 => "f1",
            Self::F1End => "f1-end",
            Self::F2 => "f2",
            Self::F2End => "f2-end",
            Self::F3 => "f3",
            Self::F3End => "f3-end",
            Self::F4 => "f4",
            Self::F4End => "f4-end",
            Self::Done => "done",
        }
    }

    /// Returns the transition label for entry states, `None` for armed,
    /// idle, and terminal states. Entry states are the ones announced to
    /// sinks.
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Start => Some("start"),
            Self::F0 => Some("f0"),
            Self::F1 => Some("f1"),
            Self::F2 => Some("f2"),
            Self::F3 => Some("f3"),
            Self::F4 => Some("f4"),
            _ => None,
        }
    }

    /// Returns `true` if the machine consumes frames in this state.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle | Self::Done)
    }

    /// Returns `true` for the terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

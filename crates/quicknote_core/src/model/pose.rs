//! Window pose and transition state.
//!
//! # Invariants
//! - Poses are logical coordinates; the host converts to physical pixels.
//! - At most one transition is in flight; a new request supersedes it.

use std::fmt::{Display, Formatter};

/// Logical-coordinate position of the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowPose {
    pub x: f64,
    pub y: f64,
}

impl WindowPose {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for WindowPose {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Resting visibility of the window when no transition runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// Animator state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle(Visibility),
    Entering,
    Exiting,
}

impl TransitionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle(Visibility::Hidden) => "idle_hidden",
            Self::Idle(Visibility::Visible) => "idle_visible",
            Self::Entering => "entering",
            Self::Exiting => "exiting",
        }
    }

    /// Visibility the state is heading to (or resting at).
    pub fn target(self) -> Visibility {
        match self {
            Self::Idle(visibility) => visibility,
            Self::Entering => Visibility::Visible,
            Self::Exiting => Visibility::Hidden,
        }
    }
}

impl Default for TransitionState {
    fn default() -> Self {
        Self::Idle(Visibility::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::{TransitionState, Visibility};

    #[test]
    fn default_state_is_idle_hidden() {
        assert_eq!(
            TransitionState::default(),
            TransitionState::Idle(Visibility::Hidden)
        );
    }

    #[test]
    fn target_follows_direction_of_travel() {
        assert_eq!(TransitionState::Entering.target(), Visibility::Visible);
        assert_eq!(TransitionState::Exiting.target(), Visibility::Hidden);
        assert_eq!(
            TransitionState::Idle(Visibility::Visible).target(),
            Visibility::Visible
        );
        assert_eq!(Visibility::Hidden.as_str(), "hidden");
    }
}

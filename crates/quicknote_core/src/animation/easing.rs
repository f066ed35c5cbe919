//! Eased step planning shared by both transition directions.
//!
//! # Invariants
//! - Eased progress is monotonic on `[0, 1]` and maps 0 to 0 and 1 to 1.
//! - The last step of a plan lands exactly on `end`.

use crate::config::TransitionTiming;
use crate::model::pose::{Visibility, WindowPose};

/// Transition direction; selects the easing curve and terminal visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Enter,
    Exit,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Exit => "exit",
        }
    }

    /// Enter: cubic ease-out. Exit: quadratic ease-in.
    pub fn ease(self, progress: f64) -> f64 {
        let p = progress.clamp(0.0, 1.0);
        match self {
            Self::Enter => 1.0 - (1.0 - p).powi(3),
            Self::Exit => p * p,
        }
    }

    pub fn terminal(self) -> Visibility {
        match self {
            Self::Enter => Visibility::Visible,
            Self::Exit => Visibility::Hidden,
        }
    }
}

/// Horizontal slide from `start_x` to `end_x` at a fixed `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPlan {
    pub direction: Direction,
    pub start_x: f64,
    pub end_x: f64,
    pub y: f64,
    pub timing: TransitionTiming,
}

impl StepPlan {
    pub fn steps(&self) -> u32 {
        self.timing.steps
    }

    /// Pose for 1-based `step`; the final step snaps to `end_x`.
    pub fn pose_at(&self, step: u32) -> WindowPose {
        let steps = self.steps();
        if step >= steps {
            return WindowPose::new(self.end_x, self.y);
        }
        let progress = f64::from(step) / f64::from(steps);
        let eased = self.direction.ease(progress);
        WindowPose::new(self.start_x + (self.end_x - self.start_x) * eased, self.y)
    }

    pub fn end_pose(&self) -> WindowPose {
        WindowPose::new(self.end_x, self.y)
    }
}

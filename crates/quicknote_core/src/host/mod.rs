//! Host window capability contracts.
//!
//! # Responsibility
//! - Define the narrow window handle consumed by the animator and widget.
//! - Keep OS window-positioning details outside core.
//!
//! # Invariants
//! - Every call may fail; callers recover locally and never surface errors.
//! - Monitor geometry is queried per transition and never cached by callers.

pub mod headless;

use crate::model::pose::WindowPose;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HostResult<T> = Result<T, HostError>;

/// Window capability failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Monitor geometry is not available (no current monitor, display gone).
    MonitorUnavailable,
    /// Window handle is gone or was never created.
    WindowUnavailable,
    /// One host call failed with a backend-specific message.
    Operation {
        op: &'static str,
        message: String,
    },
}

impl HostError {
    pub fn operation(op: &'static str, message: impl Into<String>) -> Self {
        Self::Operation {
            op,
            message: message.into(),
        }
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonitorUnavailable => write!(f, "monitor geometry unavailable"),
            Self::WindowUnavailable => write!(f, "window handle unavailable"),
            Self::Operation { op, message } => write!(f, "host call `{op}` failed: {message}"),
        }
    }
}

impl Error for HostError {}

/// Window handle capability implemented by the host shell.
pub trait WindowHost {
    /// Current display width in logical pixels.
    fn monitor_width(&self) -> HostResult<u32>;
    fn position(&self) -> HostResult<WindowPose>;
    fn set_position(&mut self, pose: WindowPose) -> HostResult<()>;
    fn show(&mut self) -> HostResult<()>;
    fn hide(&mut self) -> HostResult<()>;

    /// Notifies the host of the active UI language.
    fn set_locale(&mut self, _code: &str) -> HostResult<()> {
        Ok(())
    }

    /// Success feedback after a note hand-off; `audible` is false when muted.
    fn signal_saved(&mut self, _audible: bool) -> HostResult<()> {
        Ok(())
    }
}

//! In-memory window host.
//!
//! Backs the CLI smoke run and tests. Clones share one state, so a caller can
//! keep a observer handle while the widget owns another.

use super::{HostError, HostResult, WindowHost};
use crate::model::pose::WindowPose;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded host call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetPosition(WindowPose),
    Show,
    Hide,
    SetLocale(String),
    SignalSaved { audible: bool },
}

#[derive(Debug)]
struct HeadlessState {
    monitor_width: u32,
    pose: WindowPose,
    visible: bool,
    calls: Vec<HostCall>,
    set_position_calls: usize,
    fail_set_position_at: Option<usize>,
    fail_monitor: bool,
    fail_position: bool,
    fail_show: bool,
    fail_hide: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessWindowHost {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessWindowHost {
    /// Creates a hidden window parked at the right edge of the monitor.
    pub fn new(monitor_width: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                monitor_width,
                pose: WindowPose::new(f64::from(monitor_width), 0.0),
                visible: false,
                calls: Vec::new(),
                set_position_calls: 0,
                fail_set_position_at: None,
                fail_monitor: false,
                fail_position: false,
                fail_show: false,
                fail_hide: false,
            })),
        }
    }

    pub fn pose(&self) -> WindowPose {
        self.state.borrow().pose
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Poses applied through `set_position`, in order.
    pub fn applied_poses(&self) -> Vec<WindowPose> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                HostCall::SetPosition(pose) => Some(*pose),
                _ => None,
            })
            .collect()
    }

    /// Moves the window to another display.
    pub fn set_monitor_width(&self, width: u32) {
        self.state.borrow_mut().monitor_width = width;
    }

    /// Fails exactly the `nth` upcoming `set_position` call (1-based).
    pub fn fail_set_position_at(&self, nth: usize) {
        let mut state = self.state.borrow_mut();
        state.fail_set_position_at = Some(state.set_position_calls + nth);
    }

    pub fn fail_monitor(&self, fail: bool) {
        self.state.borrow_mut().fail_monitor = fail;
    }

    /// Makes `position` reads fail; writes are unaffected.
    pub fn fail_position(&self, fail: bool) {
        self.state.borrow_mut().fail_position = fail;
    }

    pub fn fail_show(&self, fail: bool) {
        self.state.borrow_mut().fail_show = fail;
    }

    pub fn fail_hide(&self, fail: bool) {
        self.state.borrow_mut().fail_hide = fail;
    }
}

impl WindowHost for HeadlessWindowHost {
    fn monitor_width(&self) -> HostResult<u32> {
        let state = self.state.borrow();
        if state.fail_monitor {
            return Err(HostError::MonitorUnavailable);
        }
        Ok(state.monitor_width)
    }

    fn position(&self) -> HostResult<WindowPose> {
        let state = self.state.borrow();
        if state.fail_position {
            return Err(HostError::WindowUnavailable);
        }
        Ok(state.pose)
    }

    fn set_position(&mut self, pose: WindowPose) -> HostResult<()> {
        let mut state = self.state.borrow_mut();
        state.set_position_calls += 1;
        if state.fail_set_position_at == Some(state.set_position_calls) {
            state.fail_set_position_at = None;
            return Err(HostError::operation("set_position", "injected failure"));
        }
        state.pose = pose;
        state.calls.push(HostCall::SetPosition(pose));
        Ok(())
    }

    fn show(&mut self) -> HostResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_show {
            return Err(HostError::operation("show", "injected failure"));
        }
        state.visible = true;
        state.calls.push(HostCall::Show);
        Ok(())
    }

    fn hide(&mut self) -> HostResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_hide {
            return Err(HostError::operation("hide", "injected failure"));
        }
        state.visible = false;
        state.calls.push(HostCall::Hide);
        Ok(())
    }

    fn set_locale(&mut self, code: &str) -> HostResult<()> {
        self.state
            .borrow_mut()
            .calls
            .push(HostCall::SetLocale(code.to_string()));
        Ok(())
    }

    fn signal_saved(&mut self, audible: bool) -> HostResult<()> {
        self.state
            .borrow_mut()
            .calls
            .push(HostCall::SignalSaved { audible });
        Ok(())
    }
}

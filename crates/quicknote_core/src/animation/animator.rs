//! Overlay visibility animator.
//!
//! # Responsibility
//! - Slide the overlay between its off-screen and resting poses.
//! - Own the visible/mid-transition state of the single overlay window.
//!
//! # Invariants
//! - At most one transition is active; a request for the opposite direction
//!   replaces it and starts from the host-reported current pose.
//! - Monitor width is read from the host once per transition, never cached.
//! - Exit positions the window off-screen before calling host `hide`.
//! - Any host failure mid-sequence snaps to the requested end state. If the
//!   final show or hide itself fails, the state keeps the old visibility so
//!   the next request starts over.

use crate::animation::easing::{Direction, StepPlan};
use crate::config::{OverlayGeometry, TransitionTiming, WidgetConfig};
use crate::host::{HostError, WindowHost};
use crate::model::pose::{TransitionState, Visibility, WindowPose};
use log::{debug, info, warn};
use std::time::Instant;

/// How a show/hide request was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A stepped transition was scheduled.
    Started,
    /// The window is already at or heading to the requested state.
    Ignored,
    /// A host failure forced the end state without animation.
    Snapped,
}

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    plan: StepPlan,
    next_step: u32,
    due: Instant,
}

pub struct VisibilityAnimator {
    geometry: OverlayGeometry,
    enter: TransitionTiming,
    exit: TransitionTiming,
    state: TransitionState,
    active: Option<ActiveTransition>,
}

impl VisibilityAnimator {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            geometry: config.geometry,
            enter: config.enter,
            exit: config.exit,
            state: TransitionState::default(),
            active: None,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    /// Deadline of the next pending step, if a transition is active.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.map(|active| active.due)
    }

    pub fn request_show(&mut self, host: &mut impl WindowHost, now: Instant) -> RequestOutcome {
        match self.state {
            TransitionState::Idle(Visibility::Visible) | TransitionState::Entering => {
                debug!(
                    "event=show_ignored module=animator state={}",
                    self.state.as_str()
                );
                RequestOutcome::Ignored
            }
            TransitionState::Idle(Visibility::Hidden) | TransitionState::Exiting => {
                match self.plan_enter(host) {
                    Ok(plan) => self.start(plan, now),
                    Err(err) => self.snap(host, Direction::Enter, "plan", &err),
                }
            }
        }
    }

    pub fn request_hide(&mut self, host: &mut impl WindowHost, now: Instant) -> RequestOutcome {
        match self.state {
            TransitionState::Idle(Visibility::Hidden) | TransitionState::Exiting => {
                debug!(
                    "event=hide_ignored module=animator state={}",
                    self.state.as_str()
                );
                RequestOutcome::Ignored
            }
            TransitionState::Idle(Visibility::Visible) | TransitionState::Entering => {
                match self.plan_exit(host) {
                    Ok(plan) => self.start(plan, now),
                    Err(err) => self.snap(host, Direction::Exit, "plan", &err),
                }
            }
        }
    }

    /// Applies at most one due step and returns the next deadline.
    ///
    /// Returns `None` once no transition is active.
    pub fn poll(&mut self, host: &mut impl WindowHost, now: Instant) -> Option<Instant> {
        let mut active = self.active?;
        if now < active.due {
            return Some(active.due);
        }

        let step = active.next_step;
        let plan = active.plan;
        let pose = plan.pose_at(step);
        if let Err(err) = host.set_position(pose) {
            let stage = if step == plan.steps() { "final_step" } else { "step" };
            warn!(
                "event=transition_step_failed module=animator direction={} step={}/{}",
                plan.direction.as_str(),
                step,
                plan.steps()
            );
            self.snap(host, plan.direction, stage, &err);
            return None;
        }

        if step >= plan.steps() {
            self.finish(host, plan);
            return None;
        }

        active.next_step = step + 1;
        active.due = now + plan.timing.step_interval();
        self.active = Some(active);
        Some(active.due)
    }

    fn plan_enter(&self, host: &mut impl WindowHost) -> Result<StepPlan, HostError> {
        let monitor_width = host.monitor_width()?;
        let y = self.geometry.resting_y();
        let start_x = if self.state == TransitionState::Exiting {
            host.position()?.x
        } else {
            let origin = WindowPose::new(self.geometry.hidden_x(monitor_width), y);
            host.set_position(origin)?;
            host.show()?;
            origin.x
        };

        Ok(StepPlan {
            direction: Direction::Enter,
            start_x,
            end_x: self.geometry.resting_x(monitor_width),
            y,
            timing: self.enter,
        })
    }

    fn plan_exit(&self, host: &mut impl WindowHost) -> Result<StepPlan, HostError> {
        let monitor_width = host.monitor_width()?;
        let current = host.position()?;
        Ok(StepPlan {
            direction: Direction::Exit,
            start_x: current.x,
            end_x: self.geometry.hidden_x(monitor_width),
            y: current.y,
            timing: self.exit,
        })
    }

    fn start(&mut self, plan: StepPlan, now: Instant) -> RequestOutcome {
        if let Some(previous) = self.active.take() {
            debug!(
                "event=transition_superseded module=animator previous={} at_step={}",
                previous.plan.direction.as_str(),
                previous.next_step
            );
        }
        self.state = match plan.direction {
            Direction::Enter => TransitionState::Entering,
            Direction::Exit => TransitionState::Exiting,
        };
        self.active = Some(ActiveTransition {
            plan,
            next_step: 1,
            due: now + plan.timing.step_interval(),
        });
        debug!(
            "event=transition_start module=animator direction={} from_x={:.1} to_x={:.1} steps={}",
            plan.direction.as_str(),
            plan.start_x,
            plan.end_x,
            plan.steps()
        );
        RequestOutcome::Started
    }

    fn finish(&mut self, host: &mut impl WindowHost, plan: StepPlan) {
        self.active = None;
        let mut reached = plan.direction.terminal();
        if plan.direction == Direction::Exit {
            if let Err(err) = host.hide() {
                warn!("event=hide_failed module=animator status=error error={err}");
                reached = Visibility::Visible;
            }
        }
        self.state = TransitionState::Idle(reached);
        info!(
            "event=transition_done module=animator direction={} visibility={} pose={}",
            plan.direction.as_str(),
            reached.as_str(),
            plan.end_pose()
        );
    }

    fn snap(
        &mut self,
        host: &mut impl WindowHost,
        direction: Direction,
        stage: &str,
        cause: &HostError,
    ) -> RequestOutcome {
        self.active = None;
        warn!(
            "event=transition_snap module=animator direction={} stage={} cause={}",
            direction.as_str(),
            stage,
            cause
        );

        let monitor_width = host.monitor_width().ok();
        let mut reached = direction.terminal();
        match direction {
            Direction::Enter => {
                if let Some(width) = monitor_width {
                    let resting = WindowPose::new(
                        self.geometry.resting_x(width),
                        self.geometry.resting_y(),
                    );
                    if let Err(err) = host.set_position(resting) {
                        warn!("event=snap_position_failed module=animator error={err}");
                    }
                }
                if let Err(err) = host.show() {
                    warn!("event=snap_show_failed module=animator error={err}");
                    reached = Visibility::Hidden;
                }
            }
            Direction::Exit => {
                if let Some(width) = monitor_width {
                    let y = host
                        .position()
                        .map(|pose| pose.y)
                        .unwrap_or_else(|_| self.geometry.resting_y());
                    let hidden = WindowPose::new(self.geometry.hidden_x(width), y);
                    if let Err(err) = host.set_position(hidden) {
                        warn!("event=snap_position_failed module=animator error={err}");
                    }
                }
                if let Err(err) = host.hide() {
                    warn!("event=snap_hide_failed module=animator error={err}");
                    reached = Visibility::Visible;
                }
            }
        }

        // A failed show or hide leaves the previous visibility in place.
        self.state = TransitionState::Idle(reached);
        info!(
            "event=transition_snapped module=animator direction={} visibility={}",
            direction.as_str(),
            reached.as_str()
        );
        RequestOutcome::Snapped
    }
}

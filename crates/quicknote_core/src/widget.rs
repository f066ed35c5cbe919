//! Capture widget composition root.
//!
//! # Responsibility
//! - Wire the animator, settings synchronizer, note buffer and note sink to
//!   host input (keys, blur) and bus events (show/hide/toggle, mute, locale).
//! - Drive all deferred work from one cooperative `advance(now)` entry point.
//!
//! # Invariants
//! - The note buffer is cleared on every exit path: save, escape, blur, hide.
//! - Note sink failures never prevent the hide transition.
//! - Bus subscriptions exist only between `mount` and `unmount`.

use crate::animation::animator::{RequestOutcome, VisibilityAnimator};
use crate::config::WidgetConfig;
use crate::events::{AppEvent, EventBus, EventKind, Subscription};
use crate::host::WindowHost;
use crate::i18n::Locale;
use crate::model::note::{CapturedNote, NoteBuffer};
use crate::model::pose::{TransitionState, Visibility};
use crate::model::preferences::{FontScale, FontStep, Preferences, Theme};
use crate::notes::NoteSink;
use crate::settings::store::PreferenceStore;
use crate::settings::synchronizer::{PreferenceChange, SettingsSynchronizer};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// Keys the widget reacts to; everything else belongs to the text editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }

    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content handed to the sink; hide follows the success flash.
    Saved,
    /// Sink failed; feedback and hide still happen.
    SinkFailed,
    /// Whitespace-only content; the sink was not called and hide started.
    SkippedEmpty,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Save(SaveOutcome),
    Dismiss,
    FontScale(FontScale),
    /// Not a widget shortcut; the editor handles it.
    Unhandled,
}

pub struct CaptureWidget<H, S, N>
where
    H: WindowHost,
    S: PreferenceStore,
    N: NoteSink,
{
    config: WidgetConfig,
    host: H,
    notes: N,
    animator: VisibilityAnimator,
    settings: SettingsSynchronizer<S>,
    buffer: NoteBuffer,
    bus: EventBus,
    inbox: Rc<RefCell<VecDeque<AppEvent>>>,
    subscriptions: Vec<Subscription>,
    flash_until: Option<Instant>,
}

impl<H, S, N> CaptureWidget<H, S, N>
where
    H: WindowHost,
    S: PreferenceStore,
    N: NoteSink,
{
    /// Creates the widget and loads preferences from `store`.
    pub fn new(
        config: WidgetConfig,
        host: H,
        store: S,
        notes: N,
        bus: EventBus,
        locale: Locale,
    ) -> Self {
        Self {
            animator: VisibilityAnimator::new(&config),
            settings: SettingsSynchronizer::load(store, locale),
            config,
            host,
            notes,
            buffer: NoteBuffer::new(),
            bus,
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            subscriptions: Vec::new(),
            flash_until: None,
        }
    }

    /// Subscribes to every widget event kind. Idempotent.
    pub fn mount(&mut self) {
        if !self.subscriptions.is_empty() {
            return;
        }
        for kind in EventKind::ALL {
            let inbox = Rc::clone(&self.inbox);
            let subscription = self.bus.subscribe(kind, move |event| {
                inbox.borrow_mut().push_back(event.clone());
            });
            self.subscriptions.push(subscription);
        }
        info!(
            "event=widget_mount module=widget subscriptions={}",
            self.subscriptions.len()
        );
    }

    /// Invokes every unsubscribe handle and drops undelivered events.
    pub fn unmount(&mut self) -> usize {
        let removed = self
            .subscriptions
            .drain(..)
            .map(Subscription::unsubscribe)
            .filter(|removed| *removed)
            .count();
        self.inbox.borrow_mut().clear();
        info!("event=widget_unmount module=widget removed={removed}");
        removed
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Runs all work due at `now` and returns the next deadline.
    pub fn advance(&mut self, now: Instant) -> Option<Instant> {
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            self.handle_event(&event, now);
        }

        if self.settings.has_pending() {
            self.settings.flush();
        }

        if let Some(until) = self.flash_until {
            if now >= until {
                self.flash_until = None;
                self.animator.request_hide(&mut self.host, now);
            }
        }

        let next_step = self.animator.poll(&mut self.host, now);
        match (next_step, self.flash_until) {
            (Some(step), Some(flash)) => Some(step.min(flash)),
            (step, flash) => step.or(flash),
        }
    }

    pub fn handle_event(&mut self, event: &AppEvent, now: Instant) {
        debug!("event=bus_event module=widget kind={}", event.kind().name());
        match event {
            AppEvent::MuteChanged(muted) => self
                .settings
                .on_external_change(PreferenceChange::Muted(*muted)),
            AppEvent::WindowShow => self.show(now),
            AppEvent::WindowHide => self.hide(now),
            AppEvent::WindowToggle => self.toggle(now),
            AppEvent::LocaleChanged(code) => self.set_locale(code),
        }
    }

    /// Starts a fresh capture session and slides the window in.
    ///
    /// No-op while already visible or entering.
    pub fn show(&mut self, now: Instant) {
        if self.animator.state().target() == Visibility::Visible {
            debug!("event=show_ignored module=widget reason=already_visible");
            return;
        }
        self.flash_until = None;
        self.buffer.reset();
        let outcome = self.animator.request_show(&mut self.host, now);
        info!(
            "event=widget_show module=widget session={} outcome={outcome:?}",
            self.buffer.session()
        );
    }

    /// Clears the buffer and slides the window out.
    pub fn hide(&mut self, now: Instant) {
        self.buffer.clear();
        self.flash_until = None;
        let outcome = self.animator.request_hide(&mut self.host, now);
        if outcome != RequestOutcome::Ignored {
            info!("event=widget_hide module=widget outcome={outcome:?}");
        }
    }

    /// Global hotkey behavior.
    pub fn toggle(&mut self, now: Instant) {
        match self.animator.state().target() {
            Visibility::Visible => self.hide(now),
            Visibility::Hidden => self.show(now),
        }
    }

    /// Escape key.
    pub fn dismiss(&mut self, now: Instant) {
        self.hide(now);
    }

    /// Window lost focus.
    pub fn on_blur(&mut self, now: Instant) {
        self.hide(now);
    }

    /// Commits the buffer and schedules the hide.
    pub fn save(&mut self, now: Instant) -> SaveOutcome {
        if self.buffer.is_blank() {
            debug!("event=save_skipped module=widget reason=empty");
            self.hide(now);
            return SaveOutcome::SkippedEmpty;
        }

        let text = self.buffer.take();

        let prefs = self.settings.preferences();
        let note = CapturedNote::new(self.buffer.session(), text, prefs.locale);
        let audible = !prefs.muted;
        let outcome = match self.notes.save_note(&note) {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                warn!(
                    "event=note_save module=widget status=error session={} error={err}",
                    note.session
                );
                SaveOutcome::SinkFailed
            }
        };

        if let Err(err) = self.host.signal_saved(audible) {
            debug!("event=save_feedback module=widget status=error error={err}");
        }
        self.flash_until = Some(now + self.config.save_flash);
        info!("event=widget_save module=widget outcome={outcome:?} audible={audible}");
        outcome
    }

    pub fn handle_key(&mut self, input: KeyInput, now: Instant) -> KeyAction {
        match input.key {
            Key::Enter if !input.shift => KeyAction::Save(self.save(now)),
            Key::Escape => {
                self.dismiss(now);
                KeyAction::Dismiss
            }
            Key::Char('=' | '+') if input.has_command_modifier() => {
                KeyAction::FontScale(self.step_font_scale(FontStep::Increase))
            }
            Key::Char('-' | '_') if input.has_command_modifier() => {
                KeyAction::FontScale(self.step_font_scale(FontStep::Decrease))
            }
            _ => KeyAction::Unhandled,
        }
    }

    /// Replaces the buffer content with the editor's current text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer.set_text(text);
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.toggle_theme()
    }

    pub fn step_font_scale(&mut self, step: FontStep) -> FontScale {
        self.settings.step_font_scale(step)
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.set_muted(muted);
    }

    /// Applies a locale resolved by the localization loader.
    pub fn set_locale(&mut self, code: &str) {
        let locale = Locale::parse(code);
        self.settings.set_locale(locale);
        if let Err(err) = self.host.set_locale(locale.code()) {
            warn!("event=set_locale module=widget status=error error={err}");
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.settings.snapshot()
    }

    pub fn state(&self) -> TransitionState {
        self.animator.state()
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn settings(&self) -> &SettingsSynchronizer<S> {
        &self.settings
    }
}

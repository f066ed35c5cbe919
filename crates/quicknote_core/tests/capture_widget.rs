use quicknote_core::{
    AppEvent, CaptureWidget, CapturedNote, EventBus, EventKind, FontStep, HeadlessWindowHost,
    HostCall, Key, KeyAction, KeyInput, Locale, MemoryPreferenceStore, NoteSink, NoteSinkError,
    SaveOutcome, TransitionState, Visibility, WidgetConfig, WindowPose,
};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone, Default)]
struct RecordingSink {
    notes: Rc<RefCell<Vec<CapturedNote>>>,
    fail: Rc<RefCell<bool>>,
}

impl NoteSink for RecordingSink {
    fn save_note(&mut self, note: &CapturedNote) -> Result<(), NoteSinkError> {
        if *self.fail.borrow() {
            return Err(NoteSinkError::Backend("offline".to_string()));
        }
        self.notes.borrow_mut().push(note.clone());
        Ok(())
    }
}

type Widget = CaptureWidget<HeadlessWindowHost, MemoryPreferenceStore, RecordingSink>;

struct Fixture {
    widget: Widget,
    host: HeadlessWindowHost,
    store: MemoryPreferenceStore,
    sink: RecordingSink,
    bus: EventBus,
    now: Instant,
}

impl Fixture {
    fn new() -> Self {
        let host = HeadlessWindowHost::new(1920);
        let store = MemoryPreferenceStore::new();
        let sink = RecordingSink::default();
        let bus = EventBus::new();
        let mut widget = CaptureWidget::new(
            WidgetConfig::default(),
            host.clone(),
            store.clone(),
            sink.clone(),
            bus.clone(),
            Locale::En,
        );
        widget.mount();
        Self {
            widget,
            host,
            store,
            sink,
            bus,
            now: Instant::now(),
        }
    }

    fn settle(&mut self) {
        while let Some(next) = self.widget.advance(self.now) {
            self.now = next;
        }
    }

    fn emit(&mut self, event: AppEvent) {
        self.bus.emit(&event);
        self.settle();
    }

    fn shown() -> Self {
        let mut fixture = Self::new();
        fixture.emit(AppEvent::WindowShow);
        fixture
    }

    fn key(&mut self, input: KeyInput) -> KeyAction {
        self.widget.handle_key(input, self.now)
    }

    fn saved_notes(&self) -> Vec<CapturedNote> {
        self.sink.notes.borrow().clone()
    }
}

#[test]
fn show_event_slides_window_to_resting_pose() {
    let fixture = Fixture::shown();

    assert_eq!(
        fixture.widget.state(),
        TransitionState::Idle(Visibility::Visible)
    );
    assert!(fixture.host.is_visible());
    assert_eq!(fixture.host.pose(), WindowPose::new(1384.0, 16.0));
}

#[test]
fn enter_saves_note_flashes_then_hides() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("buy milk\n");

    let action = fixture.key(KeyInput::plain(Key::Enter));
    assert_eq!(action, KeyAction::Save(SaveOutcome::Saved));
    assert_eq!(fixture.widget.text(), "");
    assert!(fixture.widget.is_flashing());
    assert_eq!(
        fixture.widget.state(),
        TransitionState::Idle(Visibility::Visible)
    );

    let saved = fixture.saved_notes();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].text, "buy milk\n");
    assert_eq!(saved[0].locale, Locale::En);
    assert!(fixture
        .host
        .calls()
        .contains(&HostCall::SignalSaved { audible: true }));

    let started = fixture.now;
    fixture.settle();
    assert!(fixture.now >= started + Duration::from_millis(350));
    assert!(!fixture.widget.is_flashing());
    assert_eq!(
        fixture.widget.state(),
        TransitionState::Idle(Visibility::Hidden)
    );
    assert!(!fixture.host.is_visible());
}

#[test]
fn whitespace_only_save_skips_sink_but_hides() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("  \n\t ");
    fixture.host.clear_calls();

    let action = fixture.key(KeyInput::plain(Key::Enter));

    assert_eq!(action, KeyAction::Save(SaveOutcome::SkippedEmpty));
    assert!(fixture.saved_notes().is_empty());
    assert_eq!(fixture.widget.state(), TransitionState::Exiting);
    fixture.settle();
    assert!(!fixture.host.is_visible());
    assert!(!fixture
        .host
        .calls()
        .iter()
        .any(|call| matches!(call, HostCall::SignalSaved { .. })));
}

#[test]
fn sink_failure_still_gives_feedback_and_hides() {
    let mut fixture = Fixture::shown();
    *fixture.sink.fail.borrow_mut() = true;
    fixture.widget.set_text("draft");

    let action = fixture.key(KeyInput::plain(Key::Enter));
    assert_eq!(action, KeyAction::Save(SaveOutcome::SinkFailed));
    assert_eq!(fixture.widget.text(), "");

    fixture.settle();
    assert!(!fixture.host.is_visible());
    assert!(fixture
        .host
        .calls()
        .contains(&HostCall::SignalSaved { audible: true }));
}

#[test]
fn shift_enter_is_left_to_the_editor() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("line one");

    assert_eq!(fixture.key(KeyInput::shift(Key::Enter)), KeyAction::Unhandled);
    assert_eq!(fixture.widget.text(), "line one");
    assert!(fixture.saved_notes().is_empty());
}

#[test]
fn escape_and_blur_discard_text_and_hide() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("discard me");
    assert_eq!(fixture.key(KeyInput::plain(Key::Escape)), KeyAction::Dismiss);
    assert_eq!(fixture.widget.text(), "");
    fixture.settle();
    assert!(!fixture.host.is_visible());

    fixture.emit(AppEvent::WindowShow);
    fixture.widget.set_text("also discarded");
    fixture.widget.on_blur(fixture.now);
    fixture.settle();
    assert_eq!(fixture.widget.text(), "");
    assert!(!fixture.host.is_visible());
    assert!(fixture.saved_notes().is_empty());
}

#[test]
fn external_mute_silences_feedback_without_persisting() {
    let mut fixture = Fixture::shown();
    fixture.emit(AppEvent::MuteChanged(true));
    assert!(fixture.widget.preferences().muted);

    fixture.widget.set_text("quiet note");
    fixture.key(KeyInput::plain(Key::Enter));

    assert!(fixture
        .host
        .calls()
        .contains(&HostCall::SignalSaved { audible: false }));
    fixture.settle();
    assert_eq!(fixture.store.writes(), 0);
}

#[test]
fn toggle_alternates_visibility() {
    let mut fixture = Fixture::new();

    fixture.emit(AppEvent::WindowToggle);
    assert!(fixture.host.is_visible());
    fixture.emit(AppEvent::WindowToggle);
    assert!(!fixture.host.is_visible());
    assert_eq!(
        fixture.widget.state(),
        TransitionState::Idle(Visibility::Hidden)
    );
}

#[test]
fn show_while_visible_keeps_draft() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("draft");

    fixture.emit(AppEvent::WindowShow);
    assert_eq!(fixture.widget.text(), "draft");
}

#[test]
fn each_show_starts_a_new_capture_session() {
    let mut fixture = Fixture::shown();
    fixture.widget.set_text("first");
    fixture.key(KeyInput::plain(Key::Enter));
    fixture.settle();

    fixture.emit(AppEvent::WindowShow);
    fixture.widget.set_text("second");
    fixture.key(KeyInput::plain(Key::Enter));

    let saved = fixture.saved_notes();
    assert_eq!(saved.len(), 2);
    assert_ne!(saved[0].session, saved[1].session);
}

#[test]
fn font_shortcuts_step_scale_and_persist() {
    let mut fixture = Fixture::shown();

    let bigger = fixture.key(KeyInput::ctrl(Key::Char('=')));
    assert!(matches!(bigger, KeyAction::FontScale(scale) if scale.value() == 1.375));
    let smaller = fixture.key(KeyInput::meta(Key::Char('-')));
    assert!(matches!(smaller, KeyAction::FontScale(scale) if scale.value() == 1.25));
    assert_eq!(
        fixture.key(KeyInput::plain(Key::Char('='))),
        KeyAction::Unhandled
    );

    fixture.settle();
    assert_eq!(fixture.store.writes(), 1);
    assert_eq!(fixture.store.record().get("fontScale"), Some(&json!(1.25)));
    assert_eq!(
        fixture.widget.step_font_scale(FontStep::Decrease).value(),
        1.125
    );
}

#[test]
fn theme_toggle_is_persisted_on_advance() {
    let mut fixture = Fixture::new();
    fixture.widget.toggle_theme();
    fixture.settle();

    assert_eq!(fixture.store.record().get("theme"), Some(&json!("light")));
}

#[test]
fn locale_event_updates_preferences_and_host() {
    let mut fixture = Fixture::new();
    fixture.emit(AppEvent::LocaleChanged("pt-BR".to_string()));

    assert_eq!(fixture.widget.preferences().locale, Locale::PtBr);
    assert!(fixture
        .host
        .calls()
        .contains(&HostCall::SetLocale("pt-BR".to_string())));
    assert_eq!(fixture.store.writes(), 0);
}

#[test]
fn mount_is_idempotent_and_unmount_removes_every_subscription() {
    let mut fixture = Fixture::new();
    fixture.widget.mount();
    for kind in EventKind::ALL {
        assert_eq!(fixture.bus.subscriber_count(kind), 1);
    }

    assert_eq!(fixture.widget.unmount(), EventKind::ALL.len());
    assert!(!fixture.widget.is_mounted());
    for kind in EventKind::ALL {
        assert_eq!(fixture.bus.subscriber_count(kind), 0);
    }

    assert_eq!(fixture.bus.emit(&AppEvent::WindowShow), 0);
    fixture.settle();
    assert!(!fixture.host.is_visible());
}

#[test]
fn decoded_host_events_drive_the_widget() {
    let mut fixture = Fixture::new();
    let event = AppEvent::decode("window-show", &serde_json::Value::Null).unwrap();

    fixture.emit(event);
    assert!(fixture.host.is_visible());
}

#[test]
fn show_event_after_failed_show_brings_window_back() {
    let mut fixture = Fixture::new();
    fixture.host.fail_show(true);
    fixture.emit(AppEvent::WindowShow);
    assert!(!fixture.host.is_visible());

    fixture.host.fail_show(false);
    fixture.emit(AppEvent::WindowShow);
    assert!(fixture.host.is_visible());
    assert_eq!(
        fixture.widget.state(),
        TransitionState::Idle(Visibility::Visible)
    );
}

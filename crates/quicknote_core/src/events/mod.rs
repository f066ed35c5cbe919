//! Cross-component notifications.
//!
//! # Responsibility
//! - Define the typed payload for every event name the widget listens to.
//! - Decode host-originated `(name, json payload)` pairs into typed events.
//!
//! # Invariants
//! - Event names are stable wire strings shared with the host shell.

pub mod bus;

pub use bus::{EventBus, Subscription};

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Event name discriminant used for subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    MuteChanged,
    WindowShow,
    WindowHide,
    WindowToggle,
    LocaleChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        Self::MuteChanged,
        Self::WindowShow,
        Self::WindowHide,
        Self::WindowToggle,
        Self::LocaleChanged,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::MuteChanged => "mute_changed",
            Self::WindowShow => "window-show",
            Self::WindowHide => "window-hide",
            Self::WindowToggle => "window-toggle",
            Self::LocaleChanged => "locale_changed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Typed event payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Mute toggled outside this window (tray menu, another view).
    MuteChanged(bool),
    WindowShow,
    WindowHide,
    /// Global hotkey: hide when visible, show otherwise.
    WindowToggle,
    LocaleChanged(String),
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MuteChanged(_) => EventKind::MuteChanged,
            Self::WindowShow => EventKind::WindowShow,
            Self::WindowHide => EventKind::WindowHide,
            Self::WindowToggle => EventKind::WindowToggle,
            Self::LocaleChanged(_) => EventKind::LocaleChanged,
        }
    }

    /// Decodes a host event. Payload-less events ignore `payload`.
    ///
    /// `mute_changed` follows JavaScript truthiness for non-bool payloads.
    pub fn decode(name: &str, payload: &Value) -> Result<Self, EventDecodeError> {
        let kind = EventKind::from_name(name)
            .ok_or_else(|| EventDecodeError::UnknownEvent(name.to_string()))?;
        match kind {
            EventKind::MuteChanged => Ok(Self::MuteChanged(is_truthy(payload))),
            EventKind::WindowShow => Ok(Self::WindowShow),
            EventKind::WindowHide => Ok(Self::WindowHide),
            EventKind::WindowToggle => Ok(Self::WindowToggle),
            EventKind::LocaleChanged => payload
                .as_str()
                .map(|code| Self::LocaleChanged(code.to_string()))
                .ok_or(EventDecodeError::InvalidPayload {
                    event: kind.name(),
                    expected: "string",
                }),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventDecodeError {
    UnknownEvent(String),
    InvalidPayload {
        event: &'static str,
        expected: &'static str,
    },
}

impl Display for EventDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEvent(name) => write!(f, "unknown event: `{name}`"),
            Self::InvalidPayload { event, expected } => {
                write!(f, "event `{event}` expects a {expected} payload")
            }
        }
    }
}

impl Error for EventDecodeError {}

#[cfg(test)]
mod tests {
    use super::{AppEvent, EventDecodeError, EventKind};
    use serde_json::{json, Value};

    #[test]
    fn names_round_trip_through_from_name() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventKind::from_name("window_show"), None);
    }

    #[test]
    fn decode_mute_uses_truthiness() {
        assert_eq!(
            AppEvent::decode("mute_changed", &json!(true)).expect("bool payload"),
            AppEvent::MuteChanged(true)
        );
        assert_eq!(
            AppEvent::decode("mute_changed", &Value::Null).expect("null payload"),
            AppEvent::MuteChanged(false)
        );
        assert_eq!(
            AppEvent::decode("mute_changed", &json!(1)).expect("number payload"),
            AppEvent::MuteChanged(true)
        );
    }

    #[test]
    fn decode_rejects_unknown_and_malformed_events() {
        assert_eq!(
            AppEvent::decode("window-resize", &Value::Null),
            Err(EventDecodeError::UnknownEvent("window-resize".to_string()))
        );
        assert!(matches!(
            AppEvent::decode("locale_changed", &json!(42)),
            Err(EventDecodeError::InvalidPayload { .. })
        ));
        assert_eq!(
            AppEvent::decode("window-show", &json!({"ignored": true})),
            Ok(AppEvent::WindowShow)
        );
    }
}

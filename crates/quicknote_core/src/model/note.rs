//! In-progress note buffer.
//!
//! # Invariants
//! - A fresh buffer (new session id, empty text) is created on every show.
//! - `take()` always leaves the buffer empty, whichever exit path calls it.

use crate::i18n::Locale;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Identifier of one show-to-dismiss capture session.
pub type CaptureSessionId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBuffer {
    session: CaptureSessionId,
    text: String,
}

impl NoteBuffer {
    pub fn new() -> Self {
        Self {
            session: Uuid::new_v4(),
            text: String::new(),
        }
    }

    pub fn session(&self) -> CaptureSessionId {
        self.session
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Starts a new capture session with empty content.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Hands the content off and clears the buffer.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl Default for NoteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Committed note content handed to the note sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedNote {
    pub session: CaptureSessionId,
    pub text: String,
    pub locale: Locale,
    /// Unix epoch milliseconds at capture time.
    pub captured_at_ms: i64,
}

impl CapturedNote {
    pub fn new(session: CaptureSessionId, text: String, locale: Locale) -> Self {
        Self {
            session,
            text,
            locale,
            captured_at_ms: now_epoch_ms(),
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

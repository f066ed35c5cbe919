//! Preference synchronizer.
//!
//! # Responsibility
//! - Hold the single in-process copy of user preferences.
//! - Apply user actions to memory first, then persist on the next flush.
//! - Absorb externally-sourced changes without writing them back.
//!
//! # Invariants
//! - Load never fails; every key falls back to its default independently.
//! - A failed write never reverts the in-memory value.
//! - Pending writes are coalesced per key; the latest value wins.
//! - External changes never enter the pending write queue.

use crate::i18n::Locale;
use crate::model::preferences::{FontScale, FontStep, Preferences, Theme};
use crate::settings::store::{
    PreferenceRecord, PreferenceStore, KEY_FONT_SCALE, KEY_MUTED, KEY_THEME,
    LEGACY_KEY_FONT_SIZE, LEGACY_KEY_MUTE_SOUND,
};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One typed preference mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreferenceChange {
    Theme(Theme),
    FontScale(FontScale),
    Muted(bool),
}

impl PreferenceChange {
    /// Persisted key name.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Theme(_) => KEY_THEME,
            Self::FontScale(_) => KEY_FONT_SCALE,
            Self::Muted(_) => KEY_MUTED,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Theme(theme) => Value::from(theme.as_str()),
            Self::FontScale(scale) => Value::from(scale.value()),
            Self::Muted(muted) => Value::from(*muted),
        }
    }

    /// Decodes one persisted or broadcast key/value pair.
    ///
    /// Accepts the legacy boolean theme (`true` = dark) and legacy key names.
    pub fn decode(key: &str, value: &Value) -> Result<Self, PreferenceDecodeError> {
        let invalid = |reason: &'static str| PreferenceDecodeError::InvalidValue {
            key: key.to_string(),
            reason,
        };

        match key {
            KEY_THEME => match value {
                Value::String(raw) => Theme::parse(raw)
                    .map(Self::Theme)
                    .ok_or_else(|| invalid("unknown theme name")),
                Value::Bool(true) => Ok(Self::Theme(Theme::Dark)),
                Value::Bool(false) => Ok(Self::Theme(Theme::Light)),
                _ => Err(invalid("expected string or bool")),
            },
            KEY_FONT_SCALE | LEGACY_KEY_FONT_SIZE => {
                let raw = value.as_f64().ok_or_else(|| invalid("expected number"))?;
                if raw <= 0.0 {
                    return Err(invalid("must be greater than zero"));
                }
                FontScale::new(raw)
                    .map(Self::FontScale)
                    .ok_or_else(|| invalid("must be finite"))
            }
            KEY_MUTED | LEGACY_KEY_MUTE_SOUND => value
                .as_bool()
                .map(Self::Muted)
                .ok_or_else(|| invalid("expected bool")),
            other => Err(PreferenceDecodeError::UnknownKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceDecodeError {
    UnknownKey(String),
    InvalidValue { key: String, reason: &'static str },
}

impl Display for PreferenceDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown preference key: `{key}`"),
            Self::InvalidValue { key, reason } => {
                write!(f, "invalid value for preference `{key}`: {reason}")
            }
        }
    }
}

impl Error for PreferenceDecodeError {}

/// Result of draining the pending write queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    pub written: usize,
    pub failed: usize,
}

pub struct SettingsSynchronizer<S: PreferenceStore> {
    store: S,
    prefs: Preferences,
    pending: BTreeMap<&'static str, Value>,
}

impl<S: PreferenceStore> SettingsSynchronizer<S> {
    /// Loads preferences from `store`, defaulting per key on any problem.
    pub fn load(store: S, locale: Locale) -> Self {
        let mut prefs = Preferences::with_locale(locale);
        match store.load() {
            Ok(record) => apply_record(&mut prefs, &record),
            Err(err) => warn!("event=settings_load module=settings status=error error={err}"),
        }
        info!(
            "event=settings_load module=settings status=ok theme={} font_scale={} muted={} locale={}",
            prefs.theme.as_str(),
            prefs.font_scale.value(),
            prefs.muted,
            prefs.locale.code()
        );

        Self {
            store,
            prefs,
            pending: BTreeMap::new(),
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Copy of the current preferences for the UI layer.
    pub fn snapshot(&self) -> Preferences {
        self.prefs.clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.apply_local(PreferenceChange::Theme(theme));
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.prefs.theme.toggled();
        self.set_theme(next);
        next
    }

    /// Sets an arbitrary scale, normalized into range and onto the grid.
    ///
    /// Non-finite input is ignored and the current scale is returned.
    pub fn set_font_scale(&mut self, value: f64) -> FontScale {
        match FontScale::new(value) {
            Some(scale) => self.apply_local(PreferenceChange::FontScale(scale)),
            None => warn!("event=font_scale_rejected module=settings reason=non_finite"),
        }
        self.prefs.font_scale
    }

    /// Moves the scale one step; a saturated step still queues a write.
    pub fn step_font_scale(&mut self, step: FontStep) -> FontScale {
        let next = self.prefs.font_scale.stepped(step);
        self.apply_local(PreferenceChange::FontScale(next));
        next
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.apply_local(PreferenceChange::Muted(muted));
    }

    /// Updates the active locale; the localization layer owns its persistence.
    pub fn set_locale(&mut self, locale: Locale) {
        self.prefs.locale = locale;
    }

    /// Applies a change broadcast from outside this window. Never persisted.
    pub fn on_external_change(&mut self, change: PreferenceChange) {
        apply_change(&mut self.prefs, change);
        if self.pending.remove(change.key()).is_some() {
            debug!(
                "event=pending_write_dropped module=settings key={} reason=external_change",
                change.key()
            );
        }
        debug!(
            "event=external_change module=settings key={}",
            change.key()
        );
    }

    /// Wire-level form of [`Self::on_external_change`].
    pub fn on_external_value(
        &mut self,
        key: &str,
        value: &Value,
    ) -> Result<(), PreferenceDecodeError> {
        let change = PreferenceChange::decode(key, value)?;
        self.on_external_change(change);
        Ok(())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Writes every pending key independently; failures are logged and dropped.
    pub fn flush(&mut self) -> FlushReport {
        let mut report = FlushReport::default();
        for (key, value) in std::mem::take(&mut self.pending) {
            let mut record = PreferenceRecord::new();
            record.insert(key.to_string(), value);
            match self.store.save(&record) {
                Ok(()) => {
                    report.written += 1;
                    debug!("event=settings_write module=settings status=ok key={key}");
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        "event=settings_write module=settings status=error key={key} error={err}"
                    );
                }
            }
        }
        report
    }

    fn apply_local(&mut self, change: PreferenceChange) {
        apply_change(&mut self.prefs, change);
        self.pending.insert(change.key(), change.to_value());
    }
}

fn apply_change(prefs: &mut Preferences, change: PreferenceChange) {
    match change {
        PreferenceChange::Theme(theme) => prefs.theme = theme,
        PreferenceChange::FontScale(scale) => prefs.font_scale = scale,
        PreferenceChange::Muted(muted) => prefs.muted = muted,
    }
}

fn apply_record(prefs: &mut Preferences, record: &PreferenceRecord) {
    let lookups: [&[&str]; 3] = [
        &[KEY_THEME],
        &[KEY_FONT_SCALE, LEGACY_KEY_FONT_SIZE],
        &[KEY_MUTED, LEGACY_KEY_MUTE_SOUND],
    ];

    for keys in lookups {
        let Some((key, value)) = keys
            .iter()
            .find_map(|key| record.get(*key).map(|value| (*key, value)))
        else {
            continue;
        };
        match PreferenceChange::decode(key, value) {
            Ok(change) => apply_change(prefs, change),
            Err(err) => debug!("event=settings_key_default module=settings key={key} error={err}"),
        }
    }
}

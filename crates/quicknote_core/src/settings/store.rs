//! Durable key/value preference stores.
//!
//! # Responsibility
//! - Define the partial-record persistence contract used by the synchronizer.
//! - Provide the JSON file store (`store.json`) and a shared in-memory store.
//!
//! # Invariants
//! - `save` merges the given keys into the stored record; other keys survive.
//! - A missing file loads as an empty record, not an error.

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const KEY_THEME: &str = "theme";
pub const KEY_FONT_SCALE: &str = "fontScale";
pub const KEY_MUTED: &str = "muted";
/// Keys written by earlier releases; read only when the current key is absent.
pub const LEGACY_KEY_FONT_SIZE: &str = "fontSize";
pub const LEGACY_KEY_MUTE_SOUND: &str = "mute_sound";

/// Partial settings record keyed by persisted key name.
pub type PreferenceRecord = Map<String, Value>;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Stored document is valid JSON but not an object.
    InvalidShape(&'static str),
    /// Backend refused the call (used by non-file stores).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings store io error: {err}"),
            Self::Parse(err) => write!(f, "settings store parse error: {err}"),
            Self::InvalidShape(found) => {
                write!(f, "settings store must hold a JSON object, found {found}")
            }
            Self::Unavailable(message) => write!(f, "settings store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidShape(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Durable persistence contract for preferences.
pub trait PreferenceStore {
    fn load(&self) -> StoreResult<PreferenceRecord>;
    fn save(&mut self, record: &PreferenceRecord) -> StoreResult<()>;
}

/// JSON object file store.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn load(&self) -> StoreResult<PreferenceRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PreferenceRecord::new())
            }
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(PreferenceRecord::new());
        }

        match serde_json::from_str::<Value>(&content)? {
            Value::Object(record) => Ok(record),
            other => Err(StoreError::InvalidShape(json_kind(&other))),
        }
    }

    fn save(&mut self, record: &PreferenceRecord) -> StoreResult<()> {
        // A corrupt document is replaced by the merged keys alone; read errors abort.
        let mut merged = match self.load() {
            Ok(existing) => existing,
            Err(StoreError::Parse(_) | StoreError::InvalidShape(_)) => PreferenceRecord::new(),
            Err(err) => return Err(err),
        };
        for (key, value) in record {
            merged.insert(key.clone(), value.clone());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&Value::Object(merged))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    record: PreferenceRecord,
    writes: usize,
    fail_load: bool,
    fail_save: bool,
}

/// In-memory store; clones share one record and one write counter.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: PreferenceRecord) -> Self {
        let store = Self::default();
        store.state.borrow_mut().record = record;
        store
    }

    /// Number of successful `save` calls.
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    pub fn record(&self) -> PreferenceRecord {
        self.state.borrow().record.clone()
    }

    pub fn fail_load(&self, fail: bool) {
        self.state.borrow_mut().fail_load = fail;
    }

    pub fn fail_save(&self, fail: bool) {
        self.state.borrow_mut().fail_save = fail;
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> StoreResult<PreferenceRecord> {
        let state = self.state.borrow();
        if state.fail_load {
            return Err(StoreError::Unavailable("injected load failure".to_string()));
        }
        Ok(state.record.clone())
    }

    fn save(&mut self, record: &PreferenceRecord) -> StoreResult<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_save {
            return Err(StoreError::Unavailable("injected save failure".to_string()));
        }
        for (key, value) in record {
            state.record.insert(key.clone(), value.clone());
        }
        state.writes += 1;
        Ok(())
    }
}

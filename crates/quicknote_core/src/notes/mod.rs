//! Note hand-off backends.
//!
//! # Responsibility
//! - Define the fire-and-forget note sink contract.
//! - Provide the directory-backed sink writing one markdown file per note.
//!
//! # Invariants
//! - Sinks never receive the widget's buffer by reference; they get an owned
//!   `CapturedNote`.
//! - File names are unique per capture session.

use crate::i18n::{translate, KEY_FILE_NOTE_PREFIX};
use crate::model::note::CapturedNote;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum NoteSinkError {
    /// Content was empty or whitespace-only.
    Empty,
    Io(std::io::Error),
    /// Backend-specific failure (remote call, closed channel).
    Backend(String),
}

impl Display for NoteSinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "note content is empty"),
            Self::Io(err) => write!(f, "note write failed: {err}"),
            Self::Backend(message) => write!(f, "note backend failed: {message}"),
        }
    }
}

impl Error for NoteSinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Empty | Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for NoteSinkError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Destination for committed notes.
pub trait NoteSink {
    fn save_note(&mut self, note: &CapturedNote) -> Result<(), NoteSinkError>;
}

/// Writes `<prefix>-<captured_at_ms>-<session8>.md` files into one directory.
#[derive(Debug, Clone)]
pub struct FileNoteSink {
    dir: PathBuf,
}

impl FileNoteSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for `note`, without touching the file system.
    pub fn path_for(&self, note: &CapturedNote) -> PathBuf {
        let prefix = translate(note.locale, KEY_FILE_NOTE_PREFIX);
        let session = note.session.simple().to_string();
        let short_session = &session[..8];
        self.dir.join(format!(
            "{prefix}-{}-{short_session}.md",
            note.captured_at_ms
        ))
    }
}

impl NoteSink for FileNoteSink {
    fn save_note(&mut self, note: &CapturedNote) -> Result<(), NoteSinkError> {
        if note.text.trim().is_empty() {
            return Err(NoteSinkError::Empty);
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(note);
        let mut content = note.text.trim_end().to_string();
        content.push('\n');
        fs::write(&path, content)?;

        info!(
            "event=note_saved module=notes status=ok session={} chars={}",
            note.session,
            note.text.chars().count()
        );
        Ok(())
    }
}

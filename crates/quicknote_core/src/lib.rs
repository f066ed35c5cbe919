//! Core logic for the QuickNote capture widget.
//! Host shells supply window and note-sink capabilities; everything else lives here.

pub mod animation;
pub mod config;
pub mod events;
pub mod host;
pub mod i18n;
pub mod logging;
pub mod model;
pub mod notes;
pub mod settings;
pub mod widget;

pub use animation::animator::{RequestOutcome, VisibilityAnimator};
pub use config::{AppPaths, WidgetConfig};
pub use events::{AppEvent, EventBus, EventDecodeError, EventKind, Subscription};
pub use host::headless::{HeadlessWindowHost, HostCall};
pub use host::{HostError, HostResult, WindowHost};
pub use i18n::{system_locale, translate, Locale};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{CaptureSessionId, CapturedNote, NoteBuffer};
pub use model::pose::{TransitionState, Visibility, WindowPose};
pub use model::preferences::{FontScale, FontStep, Preferences, Theme};
pub use notes::{FileNoteSink, NoteSink, NoteSinkError};
pub use settings::store::{
    JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, StoreError,
};
pub use settings::synchronizer::{PreferenceChange, SettingsSynchronizer};
pub use widget::{CaptureWidget, Key, KeyAction, KeyInput, SaveOutcome};

/// Liveness check for host shells.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

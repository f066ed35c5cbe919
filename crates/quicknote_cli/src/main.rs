//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `quicknote_core` linkage without a desktop shell.
//! - Run one headless show -> type -> save cycle and report the outcome.

use log::info;
use quicknote_core::{
    default_log_level, init_logging, system_locale, CaptureWidget, EventBus, FileNoteSink,
    HeadlessWindowHost, Key, KeyAction, KeyInput, MemoryPreferenceStore, WidgetConfig,
};
use std::error::Error;
use std::time::Instant;

const PROBE_MONITOR_WIDTH: u32 = 1920;

fn main() -> Result<(), Box<dyn Error>> {
    println!("quicknote_core ping={}", quicknote_core::ping());
    println!("quicknote_core version={}", quicknote_core::core_version());

    let work_dir = std::env::temp_dir().join(format!("quicknote-cli-{}", std::process::id()));
    init_logging(default_log_level(), &work_dir.join("logs"))?;

    let host = HeadlessWindowHost::new(PROBE_MONITOR_WIDTH);
    let notes_dir = work_dir.join("notes");
    let mut widget = CaptureWidget::new(
        WidgetConfig::default(),
        host.clone(),
        MemoryPreferenceStore::new(),
        FileNoteSink::new(&notes_dir),
        EventBus::new(),
        system_locale(),
    );

    widget.show(Instant::now());
    drain(&mut widget);
    println!("show: state={} pose={}", widget.state().as_str(), host.pose());

    widget.set_text("quicknote smoke check");
    let action = widget.handle_key(KeyInput::plain(Key::Enter), Instant::now());
    drain(&mut widget);
    println!(
        "save: action={action:?} state={} pose={}",
        widget.state().as_str(),
        host.pose()
    );

    if let KeyAction::Save(outcome) = action {
        info!("event=cli_smoke module=cli status=ok outcome={outcome:?}");
    }
    println!("notes_dir={}", notes_dir.display());
    Ok(())
}

/// Advances the widget until no deadline remains.
fn drain(widget: &mut CaptureWidget<HeadlessWindowHost, MemoryPreferenceStore, FileNoteSink>) {
    while let Some(deadline) = widget.advance(Instant::now()) {
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

//! Compile-time overlay geometry, transition timings and default paths.
//!
//! # Invariants
//! - Geometry and timings are constants; only monitor width is dynamic.
//! - Path resolution never fails; it falls back to the working directory.

use std::path::PathBuf;
use std::time::Duration;

pub const WINDOW_WIDTH: f64 = 520.0;
pub const WINDOW_HEIGHT: f64 = 200.0;
pub const EDGE_PADDING: f64 = 16.0;

pub const TRANSITION_DURATION: Duration = Duration::from_millis(200);
pub const ENTER_STEPS: u32 = 20;
pub const EXIT_STEPS: u32 = 15;
pub const SAVE_FLASH: Duration = Duration::from_millis(350);

const APP_DIR_NAME: &str = "quicknote";
const STORE_FILE_NAME: &str = "store.json";
const NOTES_DIR_NAME: &str = "QuickNote";

/// Window size and edge padding used to derive resting poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub window_width: f64,
    pub window_height: f64,
    pub padding: f64,
}

impl OverlayGeometry {
    /// On-screen resting X for the given monitor width.
    pub fn resting_x(&self, monitor_width: u32) -> f64 {
        f64::from(monitor_width) - self.window_width - self.padding
    }

    pub fn resting_y(&self) -> f64 {
        self.padding
    }

    /// Off-screen X just past the right monitor edge.
    pub fn hidden_x(&self, monitor_width: u32) -> f64 {
        f64::from(monitor_width)
    }
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            padding: EDGE_PADDING,
        }
    }
}

/// Step count and wall-clock duration of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    pub steps: u32,
    pub duration: Duration,
}

impl TransitionTiming {
    pub fn new(steps: u32, duration: Duration) -> Self {
        Self {
            steps: steps.max(1),
            duration,
        }
    }

    pub fn step_interval(&self) -> Duration {
        self.duration / self.steps.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetConfig {
    pub geometry: OverlayGeometry,
    pub enter: TransitionTiming,
    pub exit: TransitionTiming,
    /// Success flash shown between a save and the hide transition.
    pub save_flash: Duration,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            geometry: OverlayGeometry::default(),
            enter: TransitionTiming::new(ENTER_STEPS, TRANSITION_DURATION),
            exit: TransitionTiming::new(EXIT_STEPS, TRANSITION_DURATION),
            save_flash: SAVE_FLASH,
        }
    }
}

/// Default on-disk locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub store_file: PathBuf,
    pub notes_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Self {
        let config_root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_root = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        let notes_root = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            store_file: config_root.join(APP_DIR_NAME).join(STORE_FILE_NAME),
            notes_dir: notes_root.join(NOTES_DIR_NAME),
            log_dir: data_root.join(APP_DIR_NAME).join("logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppPaths, OverlayGeometry, TransitionTiming, WidgetConfig};
    use std::time::Duration;

    #[test]
    fn resting_x_uses_width_and_padding() {
        let geometry = OverlayGeometry::default();
        assert_eq!(geometry.resting_x(1920), 1384.0);
        assert_eq!(geometry.resting_y(), 16.0);
        assert_eq!(geometry.hidden_x(1920), 1920.0);
    }

    #[test]
    fn default_timings_match_overlay_motion() {
        let config = WidgetConfig::default();
        assert_eq!(config.enter.steps, 20);
        assert_eq!(config.exit.steps, 15);
        assert_eq!(config.enter.step_interval(), Duration::from_millis(10));
        assert_eq!(config.save_flash, Duration::from_millis(350));
    }

    #[test]
    fn timing_rejects_zero_steps() {
        let timing = TransitionTiming::new(0, Duration::from_millis(100));
        assert_eq!(timing.steps, 1);
        assert_eq!(timing.step_interval(), Duration::from_millis(100));
    }

    #[test]
    fn resolved_paths_use_expected_file_names() {
        let paths = AppPaths::resolve();
        assert!(paths.store_file.ends_with("quicknote/store.json"));
        assert!(paths.notes_dir.ends_with("QuickNote"));
    }
}

//! Domain model for the capture overlay.
//!
//! # Responsibility
//! - Define the window pose and transition state driven by the animator.
//! - Define user preferences owned by the settings synchronizer.
//! - Define the single in-progress note buffer and its captured hand-off form.
//!
//! # Invariants
//! - Exactly one overlay window and one note buffer exist per process.
//! - `FontScale` values always sit inside `[0.5, 3.0]` on the `0.125` grid.

pub mod note;
pub mod pose;
pub mod preferences;
